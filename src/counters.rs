//! Counter log parsing
//!
//! perf writes one line per monitored event per collection interval,
//! with a comma-grouped count in the leading field:
//!
//! ```text
//!      1,234,567      offcore_response.all_data_rd.any_response:u
//! ```
//!
//! The parser scans the log once and sums every matching line into a
//! [`CounterSnapshot`].

use regex::Regex;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Counter log could not be read; fatal to this pipeline step.
#[derive(Error, Debug)]
#[error("Failed to read counter log {path}: {source}")]
pub struct LogReadError {
    pub path: String,
    source: std::io::Error,
}

/// Aggregated event counts from one sampling window.
///
/// `None` means the event family was never materialized. The parser
/// materializes every accumulator to `Some(0.0)` before scanning, so
/// any parsed snapshot carries the offcore pair even when no line
/// matched; only a default-constructed snapshot leaves them absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CounterSnapshot {
    /// offcore_response.all_pf_data_rd.any_response
    pub all_data_rd_pf: Option<f64>,
    /// offcore_response.all_data_rd.any_response
    pub all_data_rd: Option<f64>,
    /// l2_rqsts.all_pf
    pub l2_all_pf: Option<f64>,
    /// l2_rqsts.all_demand_data_rd
    pub l2_all_demand: Option<f64>,
}

/// Extracts the four monitored counters from a perf stat log.
pub struct CounterLogParser {
    // Checked in order; first match wins per line.
    patterns: [Regex; 4],
}

impl CounterLogParser {
    pub fn new() -> Self {
        let pattern = |event: &str| {
            // Leading count with thousands grouping, then the event name.
            Regex::new(&format!(r"([\d,]+)\s+{}", regex::escape(event)))
                .expect("counter pattern is valid")
        };
        Self {
            patterns: [
                pattern("offcore_response.all_pf_data_rd.any_response"),
                pattern("offcore_response.all_data_rd.any_response"),
                pattern("l2_rqsts.all_pf"),
                pattern("l2_rqsts.all_demand_data_rd"),
            ],
        }
    }

    /// Parse the log at `path`, summing duplicate matches per counter.
    pub fn parse(&self, path: &Path) -> Result<CounterSnapshot, LogReadError> {
        let text = fs::read_to_string(path).map_err(|source| LogReadError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(self.parse_text(&text))
    }

    fn parse_text(&self, text: &str) -> CounterSnapshot {
        let mut snapshot = CounterSnapshot {
            all_data_rd_pf: Some(0.0),
            all_data_rd: Some(0.0),
            l2_all_pf: Some(0.0),
            l2_all_demand: Some(0.0),
        };

        for line in text.lines() {
            for (idx, pattern) in self.patterns.iter().enumerate() {
                let Some(captures) = pattern.captures(line) else {
                    continue;
                };
                let count: f64 = captures[1].replace(',', "").parse().unwrap_or(0.0);
                let slot = match idx {
                    0 => &mut snapshot.all_data_rd_pf,
                    1 => &mut snapshot.all_data_rd,
                    2 => &mut snapshot.l2_all_pf,
                    _ => &mut snapshot.l2_all_demand,
                };
                *slot.get_or_insert(0.0) += count;
                break;
            }
        }

        snapshot
    }
}

impl Default for CounterLogParser {
    fn default() -> Self {
        Self::new()
    }
}
