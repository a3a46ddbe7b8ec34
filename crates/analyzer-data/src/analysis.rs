//! Top-level analysis pipeline.
//!
//! Runs ingestion and normalization in sequence and returns the resulting
//! [`SalesTable`] snapshot together with run metadata, ready for the
//! presentation layer to query.

use std::path::Path;
use std::time::Instant;

use analyzer_core::models::{SalesTable, ValuePolicy};
use analyzer_core::Result;
use tracing::info;

use crate::normalizer::{normalize_with_stats, NormalizeStats};
use crate::reader::load_raw_table;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the normalized table.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Number of raw rows read from the file.
    pub rows_read: usize,
    /// Number of rows that survived normalization.
    pub rows_normalized: usize,
    /// Per-reason counts of excluded rows.
    pub drops: NormalizeStats,
    /// Wall-clock seconds spent reading the CSV.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent normalizing.
    pub normalize_time_seconds: f64,
}

/// The complete output of [`analyze_file`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// The normalized snapshot all chart queries run against.
    pub table: SalesTable,
    /// Metadata about this run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full ingestion pipeline on one file.
///
/// 1. Load the raw delimited table via [`load_raw_table`].
/// 2. Normalize it under `policy` via [`normalize_with_stats`].
/// 3. Return the snapshot plus timing and drop-count metadata.
///
/// Each call builds a fresh snapshot; callers replace any previous table
/// wholesale rather than mutating it.
pub fn analyze_file(path: &Path, policy: ValuePolicy) -> Result<AnalysisResult> {
    let load_start = Instant::now();
    let raw = load_raw_table(path)?;
    let load_time = load_start.elapsed().as_secs_f64();

    let normalize_start = Instant::now();
    let (table, drops) = normalize_with_stats(&raw, policy)?;
    let normalize_time = normalize_start.elapsed().as_secs_f64();

    let metadata = AnalysisMetadata {
        generated_at: chrono::Utc::now().to_rfc3339(),
        rows_read: raw.records.len(),
        rows_normalized: table.len(),
        drops,
        load_time_seconds: load_time,
        normalize_time_seconds: normalize_time,
    };

    info!(
        "analyzed {}: {} rows read, {} normalized, {} dropped",
        path.display(),
        metadata.rows_read,
        metadata.rows_normalized,
        drops.total_dropped()
    );

    Ok(AnalysisResult { table, metadata })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
