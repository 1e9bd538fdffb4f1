//! Sequence indicator derivation
//!
//! Estimates the fraction of prefetch-driven (sequential) read traffic
//! from the sampled counters. Nominally in [0,1]; not hard-clamped.

use crate::counters::CounterSnapshot;

/// Derives the indicator from a snapshot, with a configured fallback
/// for snapshots that carry no counter pair at all.
#[derive(Debug, Clone)]
pub struct IndicatorCalculator {
    fallback: f64,
}

impl IndicatorCalculator {
    pub fn new(fallback: f64) -> Self {
        Self { fallback }
    }

    /// Fixed precedence: offcore pair, then l2 pair, then fallback.
    ///
    /// Any parsed snapshot carries the offcore pair (zero counts as
    /// observed), so the first arm decides in practice; an all-zero
    /// window yields `0 / (0 + 1.0) == 0`, not the fallback. The later
    /// arms only apply to snapshots whose accumulators were never
    /// materialized.
    ///
    /// The `+ 1.0` in each denominator avoids division by zero on an
    /// idle target, slightly biasing tiny counts toward zero.
    pub fn calculate(&self, snapshot: &CounterSnapshot) -> f64 {
        if let (Some(pf), Some(rd)) = (snapshot.all_data_rd_pf, snapshot.all_data_rd) {
            return pf / (rd + 1.0);
        }

        if let (Some(pf), Some(demand)) = (snapshot.l2_all_pf, snapshot.l2_all_demand) {
            return pf / (demand + pf + 1.0);
        }

        self.fallback
    }
}
