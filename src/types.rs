// =============================================================================
// Shared types used across the CoinDeck dashboard server
// =============================================================================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// PriceRecord
// =============================================================================

/// One row of a per-coin CSV snapshot: a single (Symbol, Date) observation.
///
/// Field names map directly onto the CSV header (`Name`, `Symbol`, `Date`,
/// `Open`, ...). Extra columns in the file (e.g. a serial-number column) are
/// ignored by the deserializer. Records are immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PriceRecord {
    pub name: String,
    pub symbol: String,
    #[serde(deserialize_with = "deserialize_snapshot_date")]
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub marketcap: f64,
}

/// Parse the `Date` column of a snapshot file.
///
/// Historical snapshot exports carry either a plain date (`2021-07-06`) or a
/// date-time (`2021-07-06 23:59:59`); both forms must load.
fn deserialize_snapshot_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

// =============================================================================
// SummaryRow
// =============================================================================

/// One row of the selection table: the latest Open for a coin plus the
/// percent change of Open versus the immediately preceding record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub symbol: String,
    /// Latest Open price for this coin.
    pub open: f64,
    /// `(latest_open - previous_open) / previous_open`, rounded.
    pub pct_change: f64,
}
