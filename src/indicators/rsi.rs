// =============================================================================
// Relative Strength Index (RSI) — simple-average variant
// =============================================================================
//
// Momentum oscillator comparing the average magnitude of recent gains versus
// losses over a trailing window of day-over-day deltas:
//
//   deltas_t = close_t - close_{t-1}
//   up       = mean(positive deltas in window)        (0 when there are none)
//   down     = -1 * mean(negative deltas in window)   (0 when there are none)
//   RSI      = 100 * up / (up + down)
//
// This is the plain arithmetic-mean RSI, not Wilder's smoothed variant: each
// window is averaged independently, with no carry-over from earlier windows.
//
// A window with neither gains nor losses (every delta exactly zero) has no
// defined RSI; that slot is `None` rather than a coerced number.
// =============================================================================

/// Compute the RSI series for the given `closes` and delta `window`.
///
/// One output element per fully populated window of `window` deltas, so the
/// output length is `closes.len() - 1 - window + 1` (empty when the input is
/// too short or the window is zero).
pub fn relative_strength_index(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 || closes.len() < window + 1 {
        return Vec::new();
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    deltas.windows(window).map(rsi_for_window).collect()
}

/// RSI over a single window of deltas. `None` when the window is all-zero.
fn rsi_for_window(deltas: &[f64]) -> Option<f64> {
    let (gain_sum, gain_n, loss_sum, loss_n) =
        deltas
            .iter()
            .fold((0.0_f64, 0usize, 0.0_f64, 0usize), |(gs, gn, ls, ln), &d| {
                if d > 0.0 {
                    (gs + d, gn + 1, ls, ln)
                } else if d < 0.0 {
                    (gs, gn, ls + d, ln + 1)
                } else {
                    (gs, gn, ls, ln)
                }
            });

    // Mean over an empty side is defined as 0.
    let up = if gain_n > 0 { gain_sum / gain_n as f64 } else { 0.0 };
    let down = if loss_n > 0 { -loss_sum / loss_n as f64 } else { 0.0 };

    let denom = up + down;
    if denom == 0.0 {
        return None;
    }

    let rsi = 100.0 * up / denom;
    rsi.is_finite().then_some(rsi)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty_input() {
        assert!(relative_strength_index(&[], 6).is_empty());
    }

    #[test]
    fn rsi_window_zero() {
        assert!(relative_strength_index(&[1.0, 2.0, 3.0], 0).is_empty());
    }

    #[test]
    fn rsi_insufficient_data() {
        // window deltas need window + 1 closes.
        let closes: Vec<f64> = (1..=6).map(|x| x as f64).collect();
        assert!(relative_strength_index(&closes, 6).is_empty());
    }

    #[test]
    fn rsi_worked_example() {
        // closes [10,12,11,13,9,14,8] -> deltas [2,-1,2,-4,5,-6]
        // up = mean(2,2,5) = 3, down = mean(1,4,6) = 11/3
        // RSI = 100 * 3 / (3 + 11/3) = 45.0
        let closes = vec![10.0, 12.0, 11.0, 13.0, 9.0, 14.0, 8.0];
        let rsi = relative_strength_index(&closes, 6);
        assert_eq!(rsi.len(), 1);
        let value = rsi[0].expect("window has both gains and losses");
        assert!((value - 45.0).abs() < 1e-10, "got {value}");
    }

    #[test]
    fn rsi_all_gains_is_100() {
        let closes: Vec<f64> = (1..=12).map(|x| x as f64).collect();
        let rsi = relative_strength_index(&closes, 6);
        assert!(!rsi.is_empty());
        for v in &rsi {
            let v = v.unwrap();
            assert!((v - 100.0).abs() < 1e-10, "expected 100.0, got {v}");
        }
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let closes: Vec<f64> = (1..=12).rev().map(|x| x as f64).collect();
        let rsi = relative_strength_index(&closes, 6);
        assert!(!rsi.is_empty());
        for v in &rsi {
            assert!(v.unwrap().abs() < 1e-10);
        }
    }

    #[test]
    fn rsi_flat_window_is_none() {
        // Every delta zero — no defined RSI for any window.
        let closes = vec![100.0; 12];
        let rsi = relative_strength_index(&closes, 6);
        assert!(!rsi.is_empty());
        assert!(rsi.iter().all(Option::is_none));
    }

    #[test]
    fn rsi_length_law() {
        let closes: Vec<f64> = (0..30).map(|x| ((x * 7) % 11) as f64).collect();
        let rsi = relative_strength_index(&closes, 6);
        assert_eq!(rsi.len(), closes.len() - 1 - 6 + 1);
    }

    #[test]
    fn rsi_range_check() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        for value in relative_strength_index(&closes, 6).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&value), "RSI {value} out of range");
        }
    }
}
