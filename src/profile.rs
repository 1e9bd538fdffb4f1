//! Hardware characterization table
//!
//! A nested YAML mapping, keyed (outermost first) by DIMM size, power
//! budget, combine/interleave type, access pattern ("seq"/"rand") and
//! direction ("read"/"write"), with MB/s figures at the leaves:
//!
//! ```yaml
//! "256":
//!   "15":
//!     "222":
//!       seq:
//!         read: 8000.0
//!       rand:
//!         read: 2000.0
//! ```

use serde_yaml::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors while loading the table; fatal to the whole run.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to read hardware profile {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse hardware profile {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
}

/// Outcome of one keyed descent through the table.
///
/// Missing and non-numeric leaves are distinguished for callers that
/// care; `value()` collapses both to the documented `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(f64),
    /// The named key was absent at some nesting level.
    Missing(String),
    /// Descent reached a leaf that does not convert to a number.
    NonNumeric(String),
}

impl Lookup {
    /// Best-effort numeric coercion: anything but a found numeric leaf
    /// is reported as zero bandwidth.
    pub fn value(&self) -> f64 {
        match self {
            Lookup::Found(v) => *v,
            Lookup::Missing(_) | Lookup::NonNumeric(_) => 0.0,
        }
    }
}

/// Immutable in-memory copy of the characterization table.
#[derive(Debug, Clone)]
pub struct HwProfileTable {
    root: Value,
}

impl HwProfileTable {
    /// Load the whole table from a YAML file, once per run.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let text = fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let root = serde_yaml::from_str(&text).map_err(|source| ProfileError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Build a table directly from a parsed YAML value.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Descend the table by the composite key and return the leaf
    /// bandwidth. Stops at the first absent key.
    pub fn lookup(
        &self,
        dimm_size: &str,
        power_budget: &str,
        combine_type: &str,
        access_pattern: &str,
        direction: &str,
    ) -> Lookup {
        let keys = [dimm_size, power_budget, combine_type, access_pattern, direction];

        let mut node = &self.root;
        for key in keys {
            match node.get(key) {
                Some(child) => node = child,
                None => {
                    debug!(field = key, "hardware info field absent");
                    return Lookup::Missing(key.to_string());
                }
            }
        }

        match node {
            Value::Number(n) => match n.as_f64() {
                Some(v) => Lookup::Found(v),
                None => Lookup::NonNumeric(direction.to_string()),
            },
            // Quoted figures in hand-written tables still count.
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(v) => Lookup::Found(v),
                Err(_) => Lookup::NonNumeric(direction.to_string()),
            },
            _ => Lookup::NonNumeric(direction.to_string()),
        }
    }
}
