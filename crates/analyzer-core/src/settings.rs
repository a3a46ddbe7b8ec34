use clap::Parser;
use std::path::PathBuf;

use crate::models::{ChartKind, ValuePolicy};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Sales spreadsheet analysis and chart-data computation
///
/// There is no persisted configuration and no environment lookup: every run
/// is fully described by its command line.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sales-analyzer",
    about = "Compute chart-ready series from a sales-transaction spreadsheet",
    version
)]
pub struct Settings {
    /// Path to the sales CSV file
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// Chart to compute data for
    #[arg(long, short = 'c', value_enum, default_value_t = ChartKind::MonthlyVolume)]
    pub chart: ChartKind,

    /// How to treat zero/negative quantity or price values
    #[arg(long, default_value = "accept", value_parser = parse_value_policy)]
    pub value_policy: ValuePolicy,

    /// Write the computed series as JSON to this path
    #[arg(long, short = 'e')]
    pub export: Option<PathBuf>,

    /// Number of product combinations to keep (top-combos chart only)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(usize))]
    pub top: usize,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse CLI arguments and apply the `--debug` log-level override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but from an explicit argument list, enabling
    /// unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

/// Map the CLI spelling of a value policy onto [`ValuePolicy`].
fn parse_value_policy(s: &str) -> Result<ValuePolicy, String> {
    match s.to_ascii_lowercase().as_str() {
        "accept" | "accept-all" => Ok(ValuePolicy::AcceptAll),
        "require-positive" | "positive" => Ok(ValuePolicy::RequirePositive),
        other => Err(format!(
            "unknown value policy '{other}' (expected 'accept' or 'require-positive')"
        )),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
