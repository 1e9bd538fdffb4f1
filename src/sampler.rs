//! Counter sampling via perf stat
//!
//! One blocking perf invocation per run: attach to the target PID,
//! count the four offcore/l2 events for the sampling window, and let
//! perf write its textual statistics to the counter log.

use crate::classifier::WorkloadKind;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Monitored events, in collection order.
pub const EVENTS: [&str; 4] = [
    "offcore_response.all_pf_data_rd.any_response",
    "offcore_response.all_data_rd.any_response",
    "l2_rqsts.all_pf",
    "l2_rqsts.all_demand_data_rd",
];

/// Event specs with the workload's scope modifier appended.
pub fn event_specs(kind: WorkloadKind) -> Vec<String> {
    EVENTS
        .iter()
        .map(|event| format!("{}{}", event, kind.event_modifier()))
        .collect()
}

/// Runs the external counter collection tool.
pub struct CounterSampler {
    perf: PathBuf,
}

impl CounterSampler {
    pub fn new(perf: PathBuf) -> Self {
        Self { perf }
    }

    /// Sample `pid` for `duration_secs`, writing perf's statistics to
    /// `log_path`.
    ///
    /// The argv is built explicitly; nothing passes through a shell.
    /// The call blocks for the full window (the sleep child is the
    /// timer) and is not retried. A non-positive duration is handed to
    /// the tool uninterpreted.
    pub fn sample(
        &self,
        events: &[String],
        duration_secs: i64,
        pid: i32,
        log_path: &Path,
    ) -> Result<()> {
        let mut cmd = Command::new(&self.perf);
        cmd.arg("stat").args(["-p", &pid.to_string()]);
        for event in events {
            cmd.args(["-e", event]);
        }
        cmd.arg("-o").arg(log_path);
        cmd.args(["--", "sleep", &duration_secs.to_string()]);

        debug!(?cmd, "running counter collection");

        let status = cmd
            .status()
            .with_context(|| format!("Failed to run {}", self.perf.display()))?;
        if !status.success() {
            bail!("{} stat exited with {}", self.perf.display(), status);
        }
        Ok(())
    }
}
