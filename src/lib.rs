//! pmembw - persistent-memory bandwidth-per-GB estimation
//!
//! Samples hardware prefetch and demand-read counters for a target
//! process, classifies its memory-access pattern as sequential or
//! random, and interpolates between two reference bandwidths from a
//! static hardware characterization table.

pub mod bandwidth;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod counters;
pub mod estimator;
pub mod indicator;
pub mod profile;
pub mod sampler;
