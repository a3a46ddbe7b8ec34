//! CSV ingestion for the Sales Analyzer.
//!
//! Reads one delimited sales export into a [`RawTable`] of untyped rows for
//! downstream normalization. Structural problems (unreadable file, missing
//! required column, no data rows) fail the operation; a mechanically broken
//! individual row is skipped and logged.

use std::path::Path;

use analyzer_core::models::{RawRecord, RawTable};
use analyzer_core::{AnalyzerError, Result};
use tracing::{debug, warn};

/// Column headers the input file must carry.
const REQUIRED_COLUMNS: &[&str] = &[
    "Order ID",
    "Product",
    "Quantity Ordered",
    "Price Each",
    "Order Date",
    "Purchase Address",
];

/// Load a sales CSV into a [`RawTable`].
///
/// Fails with:
/// * [`AnalyzerError::FileRead`] when the file cannot be opened or read,
/// * [`AnalyzerError::MissingColumn`] when a required header is absent,
/// * [`AnalyzerError::NoDataRows`] when the file holds a header but no rows.
///
/// Rows the CSV layer cannot decode are excluded individually rather than
/// failing the load.
pub fn load_raw_table(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).map_err(|source| AnalyzerError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(file);

    check_required_columns(&mut reader)?;

    let mut records: Vec<RawRecord> = Vec::new();
    let mut rows_skipped = 0u64;

    for (index, result) in reader.deserialize::<RawRecord>().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                rows_skipped += 1;
                debug!("skipping undecodable row {} in {}: {}", index + 1, path.display(), e);
            }
        }
    }

    if rows_skipped > 0 {
        warn!(
            "{}: skipped {} undecodable rows during load",
            path.display(),
            rows_skipped
        );
    }

    if records.is_empty() {
        return Err(AnalyzerError::NoDataRows(path.to_path_buf()));
    }

    debug!("loaded {} raw rows from {}", records.len(), path.display());

    Ok(RawTable {
        path: path.to_path_buf(),
        records,
    })
}

/// Verify that every required column appears in the header row.
fn check_required_columns<R: std::io::Read>(reader: &mut csv::Reader<R>) -> Result<()> {
    let headers = reader.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *required) {
            return Err(AnalyzerError::MissingColumn((*required).to_string()));
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
