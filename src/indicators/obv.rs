// =============================================================================
// On-Balance Volume (OBV)
// =============================================================================
//
// Cumulative running total of signed volume:
//
//   contribution_t = sign(close_t - close_{t-1}) * volume_t     (t >= 1)
//   contribution_0 = 0
//   OBV_t          = sum of contributions 0..=t
//
// sign(0) is 0 — an unchanged close contributes nothing.
// =============================================================================

/// Compute the OBV series from parallel `closes` and `volumes` slices.
///
/// Output length equals input length; the first element is always 0. When
/// the slices disagree in length, the shorter one bounds the output.
pub fn on_balance_volume(closes: &[f64], volumes: &[f64]) -> Vec<f64> {
    let len = closes.len().min(volumes.len());
    if len == 0 {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(len);
    let mut running = 0.0;
    result.push(running);

    for t in 1..len {
        let delta = closes[t] - closes[t - 1];
        // f64::signum(0.0) is 1.0, so the zero case is handled explicitly.
        let sign = if delta > 0.0 {
            1.0
        } else if delta < 0.0 {
            -1.0
        } else {
            0.0
        };
        running += sign * volumes[t];
        result.push(running);
    }

    result
}
