// =============================================================================
// Central Application State — CoinDeck dashboard server
// =============================================================================
//
// The explicitly-constructed, immutable context shared by every request
// handler: the price table, the derived summary rows and the indicator
// engine, built exactly once at startup. Nothing here mutates after
// construction (the request counter is an atomic), so handlers share it via
// a plain `Arc` with no locking discipline.
//
// Tests construct isolated instances with synthetic tables — there is no
// module-level global.
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::config::DashboardConfig;
use crate::engine::IndicatorEngine;
use crate::market_data::PriceTable;
use crate::types::SummaryRow;

pub struct AppState {
    pub config: DashboardConfig,
    /// All loaded records, read-only for the process lifetime.
    pub table: PriceTable,
    /// Derived selection-table rows, computed once from `table`.
    pub summary: Vec<SummaryRow>,
    /// Sorted unique coin names.
    pub names: Vec<String>,
    pub engine: IndicatorEngine,
    started_at: Instant,
    selections_served: AtomicU64,
}

impl AppState {
    /// Build the process-wide context from a loaded table. Derives the
    /// summary rows and distinct names eagerly — selection handling never
    /// recomputes them.
    pub fn new(config: DashboardConfig, table: PriceTable) -> Self {
        let summary = table.build_summary(config.pct_change_decimals);
        let names = table.distinct_names();
        let engine = IndicatorEngine::from_config(&config);
        Self {
            config,
            table,
            summary,
            names,
            engine,
            started_at: Instant::now(),
            selections_served: AtomicU64::new(0),
        }
    }

    pub fn record_selection(&self) {
        self.selections_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn selections_served(&self) -> u64 {
        self.selections_served.load(Ordering::Relaxed)
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceRecord;
    use chrono::NaiveDate;

    fn rec(name: &str, day: u32, open: f64) -> PriceRecord {
        PriceRecord {
            name: name.to_string(),
            symbol: name.to_string(),
            date: NaiveDate::from_ymd_opt(2021, 7, day).unwrap(),
            open,
            high: open,
            low: open,
            close: open,
            volume: 1.0,
            marketcap: 1.0,
        }
    }

    #[test]
    fn new_derives_summary_and_names() {
        let table = PriceTable::new(vec![
            rec("Bitcoin", 1, 100.0),
            rec("Bitcoin", 2, 110.0),
            rec("Aave", 1, 5.0),
        ]);
        let state = AppState::new(DashboardConfig::default(), table);
        assert_eq!(state.summary.len(), 1);
        assert_eq!(state.summary[0].name, "Bitcoin");
        assert_eq!(state.names, vec!["Aave", "Bitcoin"]);
        assert_eq!(state.selections_served(), 0);
    }

    #[test]
    fn selection_counter_increments() {
        let state = AppState::new(DashboardConfig::default(), PriceTable::default());
        state.record_selection();
        state.record_selection();
        assert_eq!(state.selections_served(), 2);
    }
}
