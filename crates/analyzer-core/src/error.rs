use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the Sales Analyzer.
///
/// Row-level problems (a bad quantity, a bad timestamp, a malformed address)
/// are never represented here: they are recovered locally by nulling the
/// affected field or excluding the single row. This enum covers the
/// operation-level failures that are terminal for the current request.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The input file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimited table could not be parsed at the structural level.
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// The file has a header row but no data rows at all.
    #[error("No data rows found in {0}")]
    NoDataRows(PathBuf),

    /// A query was run against a table with zero rows.
    #[error("Dataset is empty; nothing to aggregate")]
    EmptyDataset,

    /// A chart series could not be serialized for export.
    #[error("Failed to serialize chart data: {0}")]
    JsonExport(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the analyzer crates.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
