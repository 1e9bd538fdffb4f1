//! Workload classification
//!
//! A guest (KVM) workload executes most of its reads behind VM-exits,
//! so its counters must be collected with the guest scope modifier;
//! everything else is sampled user-space only.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Kind of workload running under the target PID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadKind {
    /// Virtualized (KVM) guest
    Guest,
    /// Ordinary user-space process
    UserSpace,
}

impl WorkloadKind {
    /// perf event scope modifier appended to every event spec.
    pub fn event_modifier(self) -> &'static str {
        match self {
            WorkloadKind::Guest => ":G",
            WorkloadKind::UserSpace => ":u",
        }
    }
}

/// Seam for the workload probe so the pipeline can be driven by a
/// stub in tests.
pub trait Classify {
    fn classify(&self, pid: i32, log_path: &Path, timeout_secs: i64) -> WorkloadKind;
}

/// Probes the target with a short perf run over KVM trap events; any
/// counted event marks the workload as a guest.
pub struct PerfWorkloadClassifier {
    perf: PathBuf,
}

impl PerfWorkloadClassifier {
    pub fn new(perf: PathBuf) -> Self {
        Self { perf }
    }
}

impl Classify for PerfWorkloadClassifier {
    fn classify(&self, pid: i32, log_path: &Path, timeout_secs: i64) -> WorkloadKind {
        let status = Command::new(&self.perf)
            .arg("stat")
            .args(["-e", "kvm:kvm_exit"])
            .args(["-p", &pid.to_string()])
            .arg("-o")
            .arg(log_path)
            .args(["--", "sleep", &timeout_secs.to_string()])
            .status();

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => {
                warn!(%status, "workload probe exited abnormally, assuming user-space");
                return WorkloadKind::UserSpace;
            }
            Err(e) => {
                warn!(error = %e, "workload probe failed to run, assuming user-space");
                return WorkloadKind::UserSpace;
            }
        }

        match std::fs::read_to_string(log_path) {
            Ok(text) if guest_exits_observed(&text) => WorkloadKind::Guest,
            Ok(_) => WorkloadKind::UserSpace,
            Err(e) => {
                debug!(error = %e, "workload probe log unreadable, assuming user-space");
                WorkloadKind::UserSpace
            }
        }
    }
}

fn guest_exits_observed(log: &str) -> bool {
    let pattern = Regex::new(r"([\d,]+)\s+kvm:kvm_exit").expect("probe pattern is valid");
    log.lines().any(|line| {
        pattern
            .captures(line)
            .and_then(|c| c[1].replace(',', "").parse::<f64>().ok())
            .is_some_and(|count| count > 0.0)
    })
}
