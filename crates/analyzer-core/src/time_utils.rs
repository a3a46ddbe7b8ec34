use chrono::{Datelike, NaiveDateTime, Timelike};
use tracing::debug;

// ── Order-date parsing ────────────────────────────────────────────────────────

/// Timestamp layouts observed in the sales exports.
///
/// The data mixes at least the two-digit-year slash form (`04/19/19 08:46`)
/// and the ISO-like dash form (`2019-04-19 08:46:00`); the remaining entries
/// cover seconds and four-digit-year variants of the same two families.
const ORDER_DATE_FORMATS: &[&str] = &[
    "%m/%d/%y %H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an order timestamp under any recognized layout.
///
/// Returns `None` for blank strings and for values no layout accepts; the
/// caller excludes such rows instead of failing the whole ingestion.
pub fn parse_order_date(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in ORDER_DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }

    debug!("no recognized layout for order date \"{}\"", trimmed);
    None
}

// ── Derived calendar fields ───────────────────────────────────────────────────

/// Calendar month of the timestamp, 1-12.
pub fn order_month(dt: &NaiveDateTime) -> u32 {
    dt.month()
}

/// Hour of day of the timestamp, 0-23.
pub fn order_hour(dt: &NaiveDateTime) -> u32 {
    dt.hour()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
