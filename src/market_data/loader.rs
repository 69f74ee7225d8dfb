// =============================================================================
// CSV snapshot loader
// =============================================================================
//
// Discovers snapshot files under the configured data directory by filename
// pattern, reads each with a serde-deserializing CSV reader and concatenates
// the rows into one PriceTable, preserving per-file row order. Files are
// visited in sorted filename order so the load is deterministic.
//
// Any failure here is fatal: the server must not start with an empty or
// malformed table.
// =============================================================================

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::error::DataSourceError;
use crate::market_data::PriceTable;
use crate::types::PriceRecord;

/// Discover, read and merge every snapshot file selected by the config.
pub fn load(config: &DashboardConfig) -> Result<PriceTable, DataSourceError> {
    let paths = discover(&config.data_dir, &config.file_pattern)?;
    info!(files = paths.len(), dir = %config.data_dir.display(), "loading snapshot files");

    let mut records = Vec::new();
    for path in &paths {
        let rows = read_file(path)?;
        debug!(path = %path.display(), rows = rows.len(), "snapshot file loaded");
        records.extend(rows);
    }

    let table = PriceTable::new(records);
    if table.is_empty() {
        return Err(DataSourceError::EmptyTable);
    }
    info!(
        records = table.len(),
        names = table.distinct_names().len(),
        "price table built"
    );
    Ok(table)
}

/// List the files in `dir` whose names match `pattern`, sorted by filename.
/// Zero matches is an error — a dashboard with no data is a misconfiguration.
fn discover(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, DataSourceError> {
    let entries = std::fs::read_dir(dir).map_err(|source| DataSourceError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DataSourceError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if matches_pattern(file_name, pattern) {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(DataSourceError::NoInputFiles {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    paths.sort();
    Ok(paths)
}

/// Match a filename against a pattern with at most one `*` wildcard.
fn matches_pattern(name: &str, pattern: &str) -> bool {
    match pattern.split_once('*') {
        Some((prefix, suffix)) => {
            name.len() >= prefix.len() + suffix.len()
                && name.starts_with(prefix)
                && name.ends_with(suffix)
        }
        None => name == pattern,
    }
}

/// Read one CSV file into records. A missing required column, unparseable
/// number or bad date surfaces as `Malformed` with the offending path.
fn read_file(path: &Path) -> Result<Vec<PriceRecord>, DataSourceError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| DataSourceError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let record: PriceRecord = result.map_err(|source| DataSourceError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record);
    }
    Ok(rows)
}
