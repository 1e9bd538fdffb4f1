//! Bandwidth interpolation
//!
//! Mixes the two reference bandwidths by the sequence indicator.

/// Linear interpolation between the random and sequential reference
/// bandwidths.
///
/// A zero reference means "no valid hardware profile", not a valid
/// zero-bandwidth figure, so either reference being zero yields zero.
/// The result is clamped below at zero (an out-of-range indicator can
/// push the mix negative when `rand_bw > seq_bw`); there is no upper
/// clamp.
pub fn interpolate(indicator: f64, seq_bw: f64, rand_bw: f64) -> f64 {
    if seq_bw == 0.0 || rand_bw == 0.0 {
        return 0.0;
    }

    let bw = rand_bw + indicator * (seq_bw - rand_bw);
    if bw < 0.0 {
        0.0
    } else {
        bw
    }
}
