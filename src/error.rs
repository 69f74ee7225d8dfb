// =============================================================================
// Error taxonomy
// =============================================================================
//
// Two distinct failure classes with very different propagation rules:
//
//   DataSourceError  — startup-fatal. The process must not come up with an
//                      empty or malformed price table, so `main` aborts.
//   SelectionError   — per-request and recoverable. The API boundary converts
//                      it into an explicit "no data" response; it never
//                      crashes the server and never falls back to stale data.
//
// Insufficient history for an indicator window is deliberately NOT an error:
// it yields an empty series (plus a warn log), which is distinguishable from
// a genuine all-zero series.
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Fatal startup errors raised while discovering and loading CSV snapshots.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("no input files matching '{pattern}' found under {}", .dir.display())]
    NoInputFiles { dir: PathBuf, pattern: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Covers missing required columns, unparseable numbers and bad dates.
    #[error("malformed data in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("input files matched but contained no records")]
    EmptyTable,
}

/// A selection row index that does not resolve against the summary table.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("selection index {index} out of range (summary table has {len} rows)")]
pub struct SelectionError {
    pub index: usize,
    pub len: usize,
}
