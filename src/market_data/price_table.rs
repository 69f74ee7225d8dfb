// =============================================================================
// PriceTable — the process-wide immutable snapshot table
// =============================================================================
//
// All loaded CSV rows concatenated in load order. Built once at startup and
// never mutated afterwards, so request handlers can share it freely.
//
// Ordering caveat: the summary derivation takes the *last two records in load
// order* per coin. The snapshot files are date-ordered per coin, and load
// order preserves per-file row order, so "last two" means "two most recent".
// No explicit date sort is applied; an unordered input file would skew the
// percent change.
// =============================================================================

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::types::{PriceRecord, SummaryRow};

/// Ordered-by-load sequence of price records. No cross-file deduplication is
/// performed: if two files describe overlapping dates for the same coin, both
/// rows are retained.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    records: Vec<PriceRecord>,
}

impl PriceTable {
    pub fn new(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lexicographically sorted list of unique coin names.
    pub fn distinct_names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self.records.iter().map(|r| r.name.as_str()).collect();
        names.into_iter().map(str::to_string).collect()
    }

    /// All records for one coin, preserving load order.
    pub fn records_for(&self, name: &str) -> Vec<&PriceRecord> {
        self.records.iter().filter(|r| r.name == name).collect()
    }

    /// Derive the selection-table rows: per coin, the percent change of Open
    /// between its last two records (load order), rounded to `decimals`
    /// places.
    ///
    /// Coins with fewer than two records, or whose percent change is not
    /// finite (previous Open of zero), produce no row. Exact duplicate rows
    /// are removed. Rows are emitted in first-encounter order of the coin
    /// names — grouping order, with no further sort.
    pub fn build_summary(&self, decimals: u32) -> Vec<SummaryRow> {
        struct LastTwo<'a> {
            symbol: &'a str,
            prev_open: Option<f64>,
            last_open: Option<f64>,
        }

        let mut order: Vec<&str> = Vec::new();
        let mut per_name: HashMap<&str, LastTwo<'_>> = HashMap::new();

        for rec in &self.records {
            let entry = per_name.entry(rec.name.as_str()).or_insert_with(|| {
                order.push(rec.name.as_str());
                LastTwo {
                    symbol: rec.symbol.as_str(),
                    prev_open: None,
                    last_open: None,
                }
            });
            entry.symbol = rec.symbol.as_str();
            entry.prev_open = entry.last_open;
            entry.last_open = Some(rec.open);
        }

        let mut rows = Vec::with_capacity(order.len());
        for name in order {
            let entry = &per_name[name];
            let (Some(prev), Some(last)) = (entry.prev_open, entry.last_open) else {
                continue;
            };
            let pct = (last - prev) / prev;
            if !pct.is_finite() {
                continue;
            }
            rows.push(SummaryRow {
                name: name.to_string(),
                symbol: entry.symbol.to_string(),
                open: last,
                pct_change: round_to(pct, decimals),
            });
        }

        dedup_exact(rows)
    }
}

/// Round `value` to `decimals` decimal places.
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Remove exact duplicate rows, keeping the first occurrence.
fn dedup_exact(rows: Vec<SummaryRow>) -> Vec<SummaryRow> {
    let mut seen: HashSet<(String, String, u64, u64)> = HashSet::new();
    rows.into_iter()
        .filter(|r| {
            seen.insert((
                r.name.clone(),
                r.symbol.clone(),
                r.open.to_bits(),
                r.pct_change.to_bits(),
            ))
        })
        .collect()
}
