// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Unweighted mean over a trailing window of consecutive values. Output is
// only emitted once the window is fully populated — no partial-window values.
// =============================================================================

/// Compute the SMA series for `values` with the given trailing `window`.
///
/// The first output element is the mean of `values[0..window]`; each
/// subsequent element slides the window by one. Output length is
/// `values.len() - window + 1`.
///
/// # Edge cases
/// - `window == 0` => empty vec (division guard)
/// - `values.len() < window` => empty vec (insufficient history)
pub fn simple_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.len() < window {
        return Vec::new();
    }

    let window_f = window as f64;
    values
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window_f)
        .collect()
}
