//! Row normalization: type coercion and derived-field computation.
//!
//! Converts a [`RawTable`] into the immutable [`SalesTable`] snapshot the
//! chart queries run over. Recovery is local: a bad quantity or price nulls
//! the field, a bad timestamp or address excludes the single row, and only a
//! raw table with no rows at all fails the operation.

use analyzer_core::models::{RawTable, SalesRecord, SalesTable, ValuePolicy};
use analyzer_core::time_utils::{order_hour, order_month, parse_order_date};
use analyzer_core::{AnalyzerError, Result};
use tracing::debug;

/// Header label whose reappearance mid-file marks a header-artifact row.
const ORDER_DATE_HEADER: &str = "Order Date";

// ── Public API ────────────────────────────────────────────────────────────────

/// Per-reason counts of rows excluded during normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct NormalizeStats {
    /// Rows blank across all columns.
    pub rows_empty: u64,
    /// Repeated header lines from concatenated exports.
    pub rows_header_artifact: u64,
    /// Rows whose timestamp matched no recognized layout.
    pub rows_bad_timestamp: u64,
    /// Rows whose address had fewer than two comma-separated segments.
    pub rows_bad_address: u64,
    /// Rows dropped by [`ValuePolicy::RequirePositive`].
    pub rows_nonpositive: u64,
}

impl NormalizeStats {
    /// Total number of excluded rows.
    pub fn total_dropped(&self) -> u64 {
        self.rows_empty
            + self.rows_header_artifact
            + self.rows_bad_timestamp
            + self.rows_bad_address
            + self.rows_nonpositive
    }
}

/// Normalize a raw table into a [`SalesTable`] snapshot.
///
/// Fails with [`AnalyzerError::NoDataRows`] only when the raw table holds no
/// rows at all; a table whose rows are all excluded normalizes to an empty
/// snapshot, and the chart queries then report `EmptyDataset`.
pub fn normalize(raw: &RawTable, policy: ValuePolicy) -> Result<SalesTable> {
    normalize_with_stats(raw, policy).map(|(table, _)| table)
}

/// Same as [`normalize`], additionally returning the per-reason drop counts.
pub fn normalize_with_stats(
    raw: &RawTable,
    policy: ValuePolicy,
) -> Result<(SalesTable, NormalizeStats)> {
    if raw.records.is_empty() {
        return Err(AnalyzerError::NoDataRows(raw.path.clone()));
    }

    let mut records: Vec<SalesRecord> = Vec::with_capacity(raw.records.len());
    let mut stats = NormalizeStats::default();

    for record in &raw.records {
        if record.is_empty() {
            stats.rows_empty += 1;
            continue;
        }
        if is_header_artifact(&record.order_date) {
            stats.rows_header_artifact += 1;
            continue;
        }

        let Some(ordered_at) = parse_order_date(&record.order_date) else {
            stats.rows_bad_timestamp += 1;
            continue;
        };
        let Some(city) = extract_city(&record.purchase_address) else {
            stats.rows_bad_address += 1;
            continue;
        };

        let quantity = parse_quantity(&record.quantity);
        let unit_price = parse_price(&record.unit_price);

        if policy == ValuePolicy::RequirePositive && has_nonpositive_value(quantity, unit_price) {
            stats.rows_nonpositive += 1;
            continue;
        }

        let sales = match (quantity, unit_price) {
            (Some(q), Some(p)) => Some(q as f64 * p),
            _ => None,
        };

        records.push(SalesRecord {
            order_id: record.order_id.trim().to_string(),
            product: record.product.trim().to_string(),
            quantity,
            unit_price,
            sales,
            month: order_month(&ordered_at),
            hour: order_hour(&ordered_at),
            ordered_at,
            city,
        });
    }

    debug!(
        "normalized {} of {} rows ({} dropped)",
        records.len(),
        raw.records.len(),
        stats.total_dropped()
    );

    Ok((SalesTable::new(records), stats))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Detect repeated header lines from concatenated monthly exports.
///
/// An explicit pre-parse predicate on the order-date field: blank, or equal
/// to the header label itself.
fn is_header_artifact(order_date: &str) -> bool {
    let trimmed = order_date.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ORDER_DATE_HEADER)
}

/// Lenient integer parse; accepts an integral decimal rendering like "2.0".
fn parse_quantity(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if let Ok(q) = trimmed.parse::<i64>() {
        return Some(q);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f.is_finite() => Some(f as i64),
        _ => None,
    }
}

/// Lenient decimal parse.
fn parse_price(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

/// City is the second comma-separated address segment, trimmed.
///
/// Returns `None` when fewer than two segments exist; the row is excluded.
fn extract_city(address: &str) -> Option<String> {
    let city = address.split(',').nth(1)?.trim();
    if city.is_empty() {
        return None;
    }
    Some(city.to_string())
}

fn has_nonpositive_value(quantity: Option<i64>, unit_price: Option<f64>) -> bool {
    quantity.is_some_and(|q| q <= 0) || unit_price.is_some_and(|p| p <= 0.0)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer_core::models::RawRecord;
    use std::path::PathBuf;

    fn raw(
        order_id: &str,
        product: &str,
        quantity: &str,
        price: &str,
        date: &str,
        address: &str,
    ) -> RawRecord {
        RawRecord {
            order_id: order_id.to_string(),
            product: product.to_string(),
            quantity: quantity.to_string(),
            unit_price: price.to_string(),
            order_date: date.to_string(),
            purchase_address: address.to_string(),
        }
    }

    fn table(records: Vec<RawRecord>) -> RawTable {
        RawTable {
            path: PathBuf::from("test.csv"),
            records,
        }
    }

    // ── the reference scenario ────────────────────────────────────────────────

    #[test]
    fn test_normalize_reference_row() {
        let raw_table = table(vec![raw(
            "1",
            "A",
            "2",
            "10.00",
            "01/01/19 10:00",
            "123 St, Austin, TX",
        )]);

        let result = normalize(&raw_table, ValuePolicy::AcceptAll).unwrap();
        assert_eq!(result.len(), 1);

        let rec = &result.records()[0];
        assert_eq!(rec.sales, Some(20.0));
        assert_eq!(rec.city, "Austin");
        assert_eq!(rec.hour, 10);
        assert_eq!(rec.month, 1);
    }

    // ── null propagation ──────────────────────────────────────────────────────

    #[test]
    fn test_unparseable_price_yields_null_sales_but_keeps_row() {
        let raw_table = table(vec![raw(
            "2",
            "B",
            "1",
            "N/A",
            "03/05/19 14:30",
            "9 Elm St, Seattle, WA",
        )]);

        let result = normalize(&raw_table, ValuePolicy::AcceptAll).unwrap();
        assert_eq!(result.len(), 1);

        let rec = &result.records()[0];
        assert_eq!(rec.quantity, Some(1));
        assert!(rec.unit_price.is_none());
        assert!(rec.sales.is_none());
    }

    #[test]
    fn test_unparseable_quantity_yields_null_sales() {
        let raw_table = table(vec![raw(
            "3",
            "C",
            "two",
            "5.00",
            "03/05/19 14:30",
            "9 Elm St, Seattle, WA",
        )]);

        let result = normalize(&raw_table, ValuePolicy::AcceptAll).unwrap();
        let rec = &result.records()[0];
        assert!(rec.quantity.is_none());
        assert_eq!(rec.unit_price, Some(5.0));
        assert!(rec.sales.is_none());
    }

    #[test]
    fn test_sales_is_exact_product() {
        let raw_table = table(vec![raw(
            "4",
            "D",
            "3",
            "11.95",
            "06/10/19 18:45",
            "1 Oak Ave, Portland, OR",
        )]);

        let result = normalize(&raw_table, ValuePolicy::AcceptAll).unwrap();
        let rec = &result.records()[0];
        assert!((rec.sales.unwrap() - 35.85).abs() < 1e-9);
    }

    // ── row exclusion ─────────────────────────────────────────────────────────

    #[test]
    fn test_empty_rows_dropped() {
        let raw_table = table(vec![
            raw("", "", "", "", "", ""),
            raw("5", "E", "1", "2.50", "02/02/19 09:15", "4 Pine St, Boston, MA"),
        ]);

        let (result, stats) = normalize_with_stats(&raw_table, ValuePolicy::AcceptAll).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(stats.rows_empty, 1);
    }

    #[test]
    fn test_header_artifact_rows_dropped() {
        let raw_table = table(vec![
            raw(
                "Order ID",
                "Product",
                "Quantity Ordered",
                "Price Each",
                "Order Date",
                "Purchase Address",
            ),
            raw("6", "F", "1", "3.00", "07/21/19 11:00", "8 Main St, Atlanta, GA"),
        ]);

        let (result, stats) = normalize_with_stats(&raw_table, ValuePolicy::AcceptAll).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(stats.rows_header_artifact, 1);
        // The "Or" month token can never survive: no output row lacks a
        // parsed timestamp.
        assert!(result.records().iter().all(|r| (1..=12).contains(&r.month)));
    }

    #[test]
    fn test_bad_timestamp_excludes_row() {
        let raw_table = table(vec![
            raw("7", "G", "1", "4.00", "yesterday", "2 Birch Rd, Denver, CO"),
            raw("8", "H", "1", "4.00", "08/08/19 08:08", "2 Birch Rd, Denver, CO"),
        ]);

        let (result, stats) = normalize_with_stats(&raw_table, ValuePolicy::AcceptAll).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(stats.rows_bad_timestamp, 1);
        assert_eq!(result.records()[0].order_id, "8");
    }

    #[test]
    fn test_address_with_one_segment_excludes_row() {
        let raw_table = table(vec![
            raw("9", "I", "1", "4.00", "08/08/19 08:08", "no commas here"),
            raw("10", "J", "1", "4.00", "08/08/19 08:08", "2 Birch Rd, Denver, CO"),
        ]);

        let (result, stats) = normalize_with_stats(&raw_table, ValuePolicy::AcceptAll).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(stats.rows_bad_address, 1);
    }

    #[test]
    fn test_city_is_trimmed_second_segment() {
        let raw_table = table(vec![raw(
            "11",
            "K",
            "1",
            "4.00",
            "08/08/19 08:08",
            "917 1st St,   Dallas , TX 75001",
        )]);

        let result = normalize(&raw_table, ValuePolicy::AcceptAll).unwrap();
        assert_eq!(result.records()[0].city, "Dallas");
    }

    // ── value policy ──────────────────────────────────────────────────────────

    #[test]
    fn test_accept_all_keeps_nonpositive_values() {
        let raw_table = table(vec![raw(
            "12",
            "L",
            "-1",
            "9.99",
            "09/09/19 09:09",
            "5 Cedar Ln, Austin, TX",
        )]);

        let result = normalize(&raw_table, ValuePolicy::AcceptAll).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.records()[0].quantity, Some(-1));
        assert!((result.records()[0].sales.unwrap() + 9.99).abs() < 1e-9);
    }

    #[test]
    fn test_require_positive_drops_nonpositive_rows() {
        let raw_table = table(vec![
            raw("13", "M", "0", "9.99", "09/09/19 09:09", "5 Cedar Ln, Austin, TX"),
            raw("14", "N", "2", "-1.00", "09/09/19 09:09", "5 Cedar Ln, Austin, TX"),
            raw("15", "O", "2", "9.99", "09/09/19 09:09", "5 Cedar Ln, Austin, TX"),
        ]);

        let (result, stats) =
            normalize_with_stats(&raw_table, ValuePolicy::RequirePositive).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(stats.rows_nonpositive, 2);
        assert_eq!(result.records()[0].order_id, "15");
    }

    #[test]
    fn test_require_positive_keeps_null_values() {
        // Nulls are parse failures, not sign violations; the policy only
        // judges values that actually parsed.
        let raw_table = table(vec![raw(
            "16",
            "P",
            "N/A",
            "9.99",
            "09/09/19 09:09",
            "5 Cedar Ln, Austin, TX",
        )]);

        let result = normalize(&raw_table, ValuePolicy::RequirePositive).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result.records()[0].quantity.is_none());
    }

    // ── operation-level failure ───────────────────────────────────────────────

    #[test]
    fn test_zero_raw_rows_is_no_data_rows_error() {
        let raw_table = table(vec![]);
        let err = normalize(&raw_table, ValuePolicy::AcceptAll).unwrap_err();
        assert!(matches!(err, AnalyzerError::NoDataRows(_)));
    }

    #[test]
    fn test_all_rows_excluded_yields_empty_table() {
        // Rows exist but none survives filtering: the queries (not the
        // normalizer) report the empty dataset.
        let raw_table = table(vec![raw("17", "Q", "1", "4.00", "garbage", "1 St, X, Y")]);
        let result = normalize(&raw_table, ValuePolicy::AcceptAll).unwrap();
        assert!(result.is_empty());
    }

    // ── lenient numeric parsing ───────────────────────────────────────────────

    #[test]
    fn test_parse_quantity_integral_decimal() {
        assert_eq!(parse_quantity("2"), Some(2));
        assert_eq!(parse_quantity(" 2.0 "), Some(2));
        assert_eq!(parse_quantity("2.5"), None);
        assert_eq!(parse_quantity("N/A"), None);
    }

    #[test]
    fn test_parse_price_lenient() {
        assert_eq!(parse_price("11.95"), Some(11.95));
        assert_eq!(parse_price(" 600 "), Some(600.0));
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price(""), None);
    }
}
