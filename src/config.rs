//! Run configuration built once at the CLI boundary
//!
//! Everything the pipeline needs travels in one explicit structure:
//! the former ambient constants (power budget, fallback indicator) are
//! plain fields here so tests can override them.

use crate::cli::Cli;
use std::path::PathBuf;

/// Power budget key used for table lookups; fixed in this version.
pub const DEFAULT_POWER_BUDGET: &str = "15";

/// Indicator (percent) assumed when no relevant counters were observed.
pub const FALLBACK_SEQUENCE_INDICATOR: f64 = 50.0;

/// Full configuration for one estimation run.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// perf binary used for both classification and sampling
    pub perf: PathBuf,
    /// Process under measurement
    pub pid: i32,
    /// Directory for the per-run log files
    pub log_dir: PathBuf,
    /// Hardware characterization table (YAML)
    pub hw_info: PathBuf,
    /// Sampling window in seconds, passed through to perf
    pub sample_secs: i64,
    /// Lookup keys into the characterization table
    pub dimm_size: String,
    pub power_budget: String,
    pub combine_type: String,
    /// Indicator used when a snapshot carries no counter pair at all
    pub fallback_indicator: f64,
}

impl EstimatorConfig {
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            perf: cli.perf,
            pid: cli.pid,
            log_dir: cli.log_dir,
            hw_info: cli.hw_info,
            sample_secs: cli.duration,
            dimm_size: cli.dimm_size,
            power_budget: DEFAULT_POWER_BUDGET.to_string(),
            combine_type: cli.combine_type,
            fallback_indicator: FALLBACK_SEQUENCE_INDICATOR,
        }
    }

    /// Raw counter output log for this run.
    ///
    /// The names are keyed by PID so concurrent runs against different
    /// processes never collide in a shared log directory.
    pub fn counter_log(&self) -> PathBuf {
        self.log_dir
            .join(format!("dcpmem-bw-per-gb-pid-{}.log", self.pid))
    }

    /// Workload classifier output log for this run.
    pub fn classifier_log(&self) -> PathBuf {
        self.log_dir
            .join(format!("dcpmem-bw-per-gb-workload-type-pid-{}.log", self.pid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_config_from_cli_carries_fixed_fields() {
        let cli = Cli::parse_from(["pmembw", "perf", "42", "/var/log", "hw.yaml"]);
        let config = EstimatorConfig::from_cli(cli);
        assert_eq!(config.power_budget, "15");
        assert_eq!(config.fallback_indicator, 50.0);
        assert_eq!(config.sample_secs, 30);
    }

    #[test]
    fn test_log_paths_are_keyed_by_pid() {
        let cli = Cli::parse_from(["pmembw", "perf", "42", "/var/log", "hw.yaml"]);
        let config = EstimatorConfig::from_cli(cli);
        assert_eq!(
            config.counter_log(),
            PathBuf::from("/var/log/dcpmem-bw-per-gb-pid-42.log")
        );
        assert_eq!(
            config.classifier_log(),
            PathBuf::from("/var/log/dcpmem-bw-per-gb-workload-type-pid-42.log")
        );
    }
}
