//! CLI argument parsing for pmembw

use clap::Parser;
use std::path::PathBuf;

/// Default sampling window in seconds.
pub const DEFAULT_SAMPLE_SECS: i64 = 30;

#[derive(Parser, Debug)]
#[command(name = "pmembw")]
#[command(version)]
#[command(about = "Persistent-memory bandwidth-per-GB estimator", long_about = None)]
pub struct Cli {
    /// Path to the perf binary used for counter collection
    #[arg(value_name = "PERF")]
    pub perf: PathBuf,

    /// Target process ID to sample
    #[arg(value_name = "PID")]
    pub pid: i32,

    /// Directory receiving the per-run counter and classifier logs
    #[arg(value_name = "LOG_DIR")]
    pub log_dir: PathBuf,

    /// Hardware characterization table (YAML)
    #[arg(value_name = "HW_INFO")]
    pub hw_info: PathBuf,

    /// Sampling window in seconds (passed to perf uninterpreted)
    #[arg(value_name = "SECONDS", default_value_t = DEFAULT_SAMPLE_SECS, allow_hyphen_values = true)]
    pub duration: i64,

    /// DIMM size key in the characterization table
    #[arg(value_name = "DIMM_SIZE", default_value = "256")]
    pub dimm_size: String,

    /// Combine/interleave type key in the characterization table
    #[arg(value_name = "COMBINE_TYPE", default_value = "222")]
    pub combine_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_required_positionals() {
        let cli = Cli::parse_from(["pmembw", "/usr/bin/perf", "1234", "/tmp", "hw.yaml"]);
        assert_eq!(cli.perf, PathBuf::from("/usr/bin/perf"));
        assert_eq!(cli.pid, 1234);
        assert_eq!(cli.log_dir, PathBuf::from("/tmp"));
        assert_eq!(cli.hw_info, PathBuf::from("hw.yaml"));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["pmembw", "perf", "1", "/tmp", "hw.yaml"]);
        assert_eq!(cli.duration, 30);
        assert_eq!(cli.dimm_size, "256");
        assert_eq!(cli.combine_type, "222");
    }

    #[test]
    fn test_cli_optional_positionals_override_defaults() {
        let cli = Cli::parse_from(["pmembw", "perf", "1", "/tmp", "hw.yaml", "5", "128", "111"]);
        assert_eq!(cli.duration, 5);
        assert_eq!(cli.dimm_size, "128");
        assert_eq!(cli.combine_type, "111");
    }

    #[test]
    fn test_cli_negative_duration_passes_through() {
        // Not validated here; perf receives the value uninterpreted.
        let cli = Cli::parse_from(["pmembw", "perf", "1", "/tmp", "hw.yaml", "-3"]);
        assert_eq!(cli.duration, -3);
    }

    #[test]
    fn test_cli_rejects_missing_table_path() {
        assert!(Cli::try_parse_from(["pmembw", "perf", "1", "/tmp"]).is_err());
    }
}
