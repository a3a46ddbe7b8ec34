mod bootstrap;
mod render;

use std::path::Path;

use analyzer_core::settings::Settings;
use analyzer_data::analysis::analyze_file;
use analyzer_data::queries::{self, ChartSeries};
use anyhow::Result;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Sales Analyzer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "File: {}, Chart: {}",
        settings.file.display(),
        settings.chart
    );

    // One ingestion per run; the snapshot is immutable for the request.
    let analysis = analyze_file(&settings.file, settings.value_policy)?;
    tracing::debug!(
        "drops: {} empty, {} header artifacts, {} bad timestamps, {} bad addresses",
        analysis.metadata.drops.rows_empty,
        analysis.metadata.drops.rows_header_artifact,
        analysis.metadata.drops.rows_bad_timestamp,
        analysis.metadata.drops.rows_bad_address
    );

    let series = queries::compute(&analysis.table, settings.chart, settings.top)?;

    print!("{}", render::render_series(&series));

    if let Some(path) = &settings.export {
        export_series(&series, path)?;
        tracing::info!("Exported {} series to {}", settings.chart, path.display());
    }

    Ok(())
}

/// Write the computed series as pretty JSON for an external charting
/// collaborator. Write failures surface as I/O errors; there is no retry.
fn export_series(series: &ChartSeries, path: &Path) -> analyzer_core::Result<()> {
    let json = serde_json::to_string_pretty(series)?;
    std::fs::write(path, json)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer_core::AnalyzerError;
    use analyzer_data::queries::CityCount;
    use tempfile::TempDir;

    fn sample_series() -> ChartSeries {
        ChartSeries::CityVolume(vec![CityCount {
            city: "Austin".to_string(),
            orders: 3,
        }])
    }

    #[test]
    fn test_export_series_writes_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("series.json");

        export_series(&sample_series(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["chart"], "city-volume");
        assert_eq!(value["series"][0]["city"], "Austin");
        assert_eq!(value["series"][0]["orders"], 3);
    }

    #[test]
    fn test_export_series_invalid_path_is_io_error() {
        let err = export_series(
            &sample_series(),
            Path::new("/nonexistent-dir-xyz/series.json"),
        )
        .unwrap_err();
        assert!(matches!(err, AnalyzerError::Io(_)));
    }
}
