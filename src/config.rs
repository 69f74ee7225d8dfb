// =============================================================================
// Dashboard Configuration
// =============================================================================
//
// Central configuration for the CoinDeck server: where the CSV snapshots
// live, which filename pattern selects them, the indicator window sizes and
// the API bind address.
//
// Every field carries a serde default so that adding new fields never breaks
// loading an older config file. Environment overrides (COINDECK_DATA_DIR,
// COINDECK_BIND_ADDR) are applied in `main`, after loading.
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_file_pattern() -> String {
    "coin_*.csv".to_string()
}

fn default_bind_addr() -> String {
    "0.0.0.0:3001".to_string()
}

fn default_ma_window() -> usize {
    40
}

fn default_rsi_window() -> usize {
    6
}

fn default_pct_change_decimals() -> u32 {
    4
}

fn default_sparkline_points() -> usize {
    30
}

// =============================================================================
// DashboardConfig
// =============================================================================

/// Top-level configuration for the dashboard server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Directory scanned for CSV snapshot files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Filename pattern selecting snapshot files. A single `*` wildcard is
    /// supported (prefix and suffix match).
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,

    /// Address the REST API binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Trailing window for the simple moving average over Close.
    #[serde(default = "default_ma_window")]
    pub ma_window: usize,

    /// Trailing window (in deltas) for the relative strength index.
    #[serde(default = "default_rsi_window")]
    pub rsi_window: usize,

    /// Decimal places the summary percent change is rounded to.
    #[serde(default = "default_pct_change_decimals")]
    pub pct_change_decimals: u32,

    /// Trailing number of Open values served per coin for the sparkline
    /// column next to the summary table.
    #[serde(default = "default_sparkline_points")]
    pub sparkline_points: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_pattern: default_file_pattern(),
            bind_addr: default_bind_addr(),
            ma_window: default_ma_window(),
            rsi_window: default_rsi_window(),
            pct_change_decimals: default_pct_change_decimals(),
            sparkline_points: default_sparkline_points(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist or fails to parse, returns an error so the
    /// caller can fall back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dashboard config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse dashboard config from {}", path.display()))?;

        info!(
            path = %path.display(),
            data_dir = %config.data_dir.display(),
            file_pattern = %config.file_pattern,
            "dashboard config loaded"
        );

        Ok(config)
    }
}
