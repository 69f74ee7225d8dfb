// =============================================================================
// IndicatorEngine — selection-driven series computation
// =============================================================================
//
// Everything here is a pure function of (PriceTable, selection): resolving a
// table-row index to a coin, assembling the raw OHLCV + market-cap series for
// the price chart, and computing the three indicator series for the side
// panel. No hidden state, so identical inputs always produce identical
// output and concurrent requests need no coordination.
// =============================================================================

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::config::DashboardConfig;
use crate::error::SelectionError;
use crate::indicators::{on_balance_volume, relative_strength_index, simple_moving_average};
use crate::market_data::PriceTable;
use crate::types::SummaryRow;

// =============================================================================
// Response payloads
// =============================================================================

/// Raw per-coin history as parallel columns, time-unfiltered, for the
/// candlestick / volume / market-cap chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    pub dates: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
    pub marketcap: Vec<f64>,
}

/// One sparkline next to a summary-table row: the trailing Open values for
/// that coin, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sparkline {
    pub name: String,
    pub symbol: String,
    pub open: Vec<f64>,
}

/// The three derived series for the indicator panel. A coin with fewer
/// records than an indicator's window yields that series empty — callers
/// render nothing for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorPanel {
    /// Simple moving average over Close (full windows only).
    pub moving_average: Vec<f64>,
    /// Cumulative on-balance volume, same length as the coin's history.
    pub on_balance_volume: Vec<f64>,
    /// Simple-average RSI over Close deltas; `null` where undefined.
    pub rsi: Vec<Option<f64>>,
}

// =============================================================================
// IndicatorEngine
// =============================================================================

/// Computes chart and indicator series for a selected coin.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorEngine {
    ma_window: usize,
    rsi_window: usize,
    sparkline_points: usize,
}

impl IndicatorEngine {
    pub fn new(ma_window: usize, rsi_window: usize, sparkline_points: usize) -> Self {
        Self {
            ma_window,
            rsi_window,
            sparkline_points,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.ma_window, config.rsi_window, config.sparkline_points)
    }

    /// Resolve an optional table-row index against the summary rows.
    ///
    /// `None` is the valid "no selection" state and resolves to `Ok(None)`
    /// without touching the table; an out-of-range index is a
    /// `SelectionError`.
    pub fn resolve<'a>(
        &self,
        summary: &'a [SummaryRow],
        selection: Option<usize>,
    ) -> Result<Option<&'a SummaryRow>, SelectionError> {
        match selection {
            None => Ok(None),
            Some(index) => summary.get(index).map(Some).ok_or(SelectionError {
                index,
                len: summary.len(),
            }),
        }
    }

    /// Assemble the full raw history for one coin as parallel columns.
    pub fn price_series(&self, table: &PriceTable, name: &str) -> PriceSeries {
        let records = table.records_for(name);
        let mut series = PriceSeries {
            dates: Vec::with_capacity(records.len()),
            open: Vec::with_capacity(records.len()),
            high: Vec::with_capacity(records.len()),
            low: Vec::with_capacity(records.len()),
            close: Vec::with_capacity(records.len()),
            volume: Vec::with_capacity(records.len()),
            marketcap: Vec::with_capacity(records.len()),
        };
        for rec in records {
            series.dates.push(rec.date);
            series.open.push(rec.open);
            series.high.push(rec.high);
            series.low.push(rec.low);
            series.close.push(rec.close);
            series.volume.push(rec.volume);
            series.marketcap.push(rec.marketcap);
        }
        series
    }

    /// One trailing-Open sparkline per summary row, in summary order, for
    /// the mini-plot column beside the selection table. A coin with fewer
    /// records than the configured point count yields its full history.
    pub fn sparklines(&self, table: &PriceTable, summary: &[SummaryRow]) -> Vec<Sparkline> {
        summary
            .iter()
            .map(|row| {
                let records = table.records_for(&row.name);
                let start = records.len().saturating_sub(self.sparkline_points);
                Sparkline {
                    name: row.name.clone(),
                    symbol: row.symbol.clone(),
                    open: records[start..].iter().map(|r| r.open).collect(),
                }
            })
            .collect()
    }

    /// Compute the three indicator series for one coin.
    pub fn indicator_panel(&self, table: &PriceTable, name: &str) -> IndicatorPanel {
        let records = table.records_for(name);
        let closes: Vec<f64> = records.iter().map(|r| r.close).collect();
        let volumes: Vec<f64> = records.iter().map(|r| r.volume).collect();

        if closes.len() < self.ma_window || closes.len() < self.rsi_window + 1 {
            warn!(
                name,
                records = closes.len(),
                ma_window = self.ma_window,
                rsi_window = self.rsi_window,
                "insufficient history for at least one indicator window"
            );
        }

        IndicatorPanel {
            moving_average: simple_moving_average(&closes, self.ma_window),
            on_balance_volume: on_balance_volume(&closes, &volumes),
            rsi: relative_strength_index(&closes, self.rsi_window),
        }
    }
}
