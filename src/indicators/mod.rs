// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free rolling-window math over price/volume slices. Each
// function takes slices in and returns a freshly allocated series; an input
// shorter than the required window yields an empty series, never a panic.

pub mod obv;
pub mod rsi;
pub mod sma;

pub use obv::on_balance_volume;
pub use rsi::relative_strength_index;
pub use sma::simple_moving_average;
