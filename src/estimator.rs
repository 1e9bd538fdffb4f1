//! Estimation pipeline
//!
//! Load the characterization table, classify the workload, sample the
//! counters, derive the sequence indicator, look up the two reference
//! bandwidths and interpolate. Only the table load is fatal to the
//! process; sampling and log faults degrade to a zero estimate.

use crate::bandwidth;
use crate::classifier::Classify;
use crate::config::EstimatorConfig;
use crate::counters::{CounterLogParser, LogReadError};
use crate::indicator::IndicatorCalculator;
use crate::profile::{HwProfileTable, Lookup, ProfileError};
use crate::sampler::{event_specs, CounterSampler};
use thiserror::Error;
use tracing::info;

/// How long the workload probe may run before the main window starts.
pub const CLASSIFIER_PROBE_SECS: i64 = 2;

/// Fault taxonomy for one estimation run.
#[derive(Error, Debug)]
pub enum EstimatorError {
    /// Table missing, unreadable or malformed; fatal to the run.
    #[error("{0}")]
    ProfileLoad(#[from] ProfileError),

    /// Counter collection failed to launch or exited abnormally.
    #[error("Counter sampling failed: {0}")]
    Sampling(#[source] anyhow::Error),

    /// Sampling succeeded but its log could not be read back.
    #[error("{0}")]
    LogParse(#[from] LogReadError),
}

impl EstimatorError {
    /// Only a profile-load fault warrants the distinguished exit
    /// status; everything else still terminates normally with a zero
    /// estimate on stdout.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EstimatorError::ProfileLoad(_))
    }
}

/// Run the full pipeline and return the bandwidth-per-GB estimate.
pub fn run(config: &EstimatorConfig, classifier: &dyn Classify) -> Result<f64, EstimatorError> {
    let table = HwProfileTable::load(&config.hw_info)?;

    let kind = classifier.classify(config.pid, &config.classifier_log(), CLASSIFIER_PROBE_SECS);
    info!(?kind, pid = config.pid, "workload classified");

    CounterSampler::new(config.perf.clone())
        .sample(
            &event_specs(kind),
            config.sample_secs,
            config.pid,
            &config.counter_log(),
        )
        .map_err(EstimatorError::Sampling)?;

    let snapshot = CounterLogParser::new().parse(&config.counter_log())?;
    let indicator = IndicatorCalculator::new(config.fallback_indicator).calculate(&snapshot);

    let seq_bw = reference_bandwidth(&table, config, "seq");
    let rand_bw = reference_bandwidth(&table, config, "rand");
    let estimate = bandwidth::interpolate(indicator, seq_bw, rand_bw);

    eprintln!("HW MBps-per-GB calculation:");
    eprintln!("hw_seq_bandwidth = {seq_bw}");
    eprintln!("hw_rand_bandwidth = {rand_bw}");
    eprintln!("workload sequence indicator = {indicator}");

    Ok(estimate)
}

/// One table descent for the given access pattern, read direction.
///
/// Missing or non-numeric entries are reported on stderr and coerced
/// to zero bandwidth, which the interpolation treats as "no profile".
fn reference_bandwidth(table: &HwProfileTable, config: &EstimatorConfig, pattern: &str) -> f64 {
    let lookup = table.lookup(
        &config.dimm_size,
        &config.power_budget,
        &config.combine_type,
        pattern,
        "read",
    );
    match &lookup {
        Lookup::Found(_) => {}
        Lookup::Missing(field) => {
            eprintln!("Failed to get dcpmem hw info with field \"{field}\"");
        }
        Lookup::NonNumeric(field) => {
            eprintln!("Non-numeric dcpmem hw info at field \"{field}\"");
        }
    }
    lookup.value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::WorkloadKind;
    use std::path::Path;

    struct FixedKind(WorkloadKind);

    impl Classify for FixedKind {
        fn classify(&self, _pid: i32, _log: &Path, _timeout: i64) -> WorkloadKind {
            self.0
        }
    }

    fn config(dir: &Path, hw_info: &Path) -> EstimatorConfig {
        EstimatorConfig {
            perf: "/nonexistent/perf".into(),
            pid: 7,
            log_dir: dir.to_path_buf(),
            hw_info: hw_info.to_path_buf(),
            sample_secs: 1,
            dimm_size: "256".into(),
            power_budget: "15".into(),
            combine_type: "222".into(),
            fallback_indicator: 50.0,
        }
    }

    #[test]
    fn test_profile_load_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), Path::new("/nonexistent/hw.yaml"));
        let err = run(&cfg, &FixedKind(WorkloadKind::UserSpace)).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_sampling_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let hw = dir.path().join("hw.yaml");
        std::fs::write(&hw, "\"256\":\n  \"15\":\n    \"222\":\n      seq:\n        read: 8000.0\n      rand:\n        read: 2000.0\n").unwrap();
        let err = run(&config(dir.path(), &hw), &FixedKind(WorkloadKind::UserSpace)).unwrap_err();
        assert!(matches!(err, EstimatorError::Sampling(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_reference_bandwidth_misses_coerce_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let table =
            HwProfileTable::from_value(serde_yaml::from_str("\"512\": {}").unwrap());
        let cfg = config(dir.path(), Path::new("unused"));
        assert_eq!(reference_bandwidth(&table, &cfg, "seq"), 0.0);
    }
}
