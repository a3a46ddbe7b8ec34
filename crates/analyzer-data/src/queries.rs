//! The five chart-data queries.
//!
//! Each query is a pure read over a [`SalesTable`] snapshot and returns the
//! exact numeric series its chart needs; none of them mutates the table. All
//! of them fail with [`AnalyzerError::EmptyDataset`] on a zero-row table.

use std::collections::{BTreeMap, HashMap};

use analyzer_core::models::{ChartKind, SalesTable};
use analyzer_core::{AnalyzerError, Result};
use serde::Serialize;

/// Default truncation for the product-combination ranking.
pub const DEFAULT_COMBO_LIMIT: usize = 10;

// ── Series types ──────────────────────────────────────────────────────────────

/// One bar of the monthly-volume chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    /// Calendar month, 1-12.
    pub month: u32,
    /// Number of records in that month.
    pub orders: u64,
}

/// One bar of the city-volume chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityCount {
    pub city: String,
    pub orders: u64,
}

/// One bar of the hourly-volume chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourCount {
    /// Hour of day, 0-23.
    pub hour: u32,
    pub orders: u64,
}

/// One bar of the products-sold-together chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComboCount {
    /// Comma-joined distinct products of one order, in line-item order.
    pub products: String,
    /// Number of distinct orders that produced this combination.
    pub orders: u64,
}

/// The dual-axis product chart: bar series (total quantity) and line series
/// (mean unit price), index-aligned on one shared product ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceVolumeSeries {
    /// Shared x-axis, first-seen product order.
    pub products: Vec<String>,
    /// Total quantity ordered per product (nulls contribute nothing).
    pub quantities: Vec<i64>,
    /// Mean unit price per product; `None` when no price parsed.
    pub mean_prices: Vec<Option<f64>>,
}

/// A computed series for any of the five charts, ready to render or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "chart", content = "series", rename_all = "kebab-case")]
pub enum ChartSeries {
    MonthlyVolume(Vec<MonthCount>),
    CityVolume(Vec<CityCount>),
    HourlyVolume(Vec<HourCount>),
    TopCombos(Vec<ComboCount>),
    PriceVolume(PriceVolumeSeries),
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

/// Compute the series for `kind`.
///
/// `combo_limit` applies to [`ChartKind::TopCombos`] only and is ignored by
/// the other charts.
pub fn compute(table: &SalesTable, kind: ChartKind, combo_limit: usize) -> Result<ChartSeries> {
    match kind {
        ChartKind::MonthlyVolume => Ok(ChartSeries::MonthlyVolume(monthly_volume(table)?)),
        ChartKind::CityVolume => Ok(ChartSeries::CityVolume(city_volume(table)?)),
        ChartKind::HourlyVolume => Ok(ChartSeries::HourlyVolume(hourly_volume(table)?)),
        ChartKind::TopCombos => Ok(ChartSeries::TopCombos(top_product_combos(
            table,
            combo_limit,
        )?)),
        ChartKind::PriceVolume => Ok(ChartSeries::PriceVolume(product_price_volume(table)?)),
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

/// Record count per calendar month, reindexed to the full 1-12 axis.
///
/// Months absent from the data are present with a zero count: a plain
/// group-by would undercount the x-axis.
pub fn monthly_volume(table: &SalesTable) -> Result<Vec<MonthCount>> {
    ensure_nonempty(table)?;

    let mut counts = [0u64; 12];
    for record in table.records() {
        counts[(record.month - 1) as usize] += 1;
    }

    Ok(counts
        .iter()
        .enumerate()
        .map(|(i, &orders)| MonthCount {
            month: i as u32 + 1,
            orders,
        })
        .collect())
}

/// Record count per city, in first-seen order.
pub fn city_volume(table: &SalesTable) -> Result<Vec<CityCount>> {
    ensure_nonempty(table)?;

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u64> = HashMap::new();
    for record in table.records() {
        if !counts.contains_key(&record.city) {
            order.push(record.city.clone());
        }
        *counts.entry(record.city.clone()).or_insert(0) += 1;
    }

    Ok(order
        .into_iter()
        .map(|city| {
            let orders = counts[&city];
            CityCount { city, orders }
        })
        .collect())
}

/// Record count per hour of day, ascending, only hours present in the data.
pub fn hourly_volume(table: &SalesTable) -> Result<Vec<HourCount>> {
    ensure_nonempty(table)?;

    // BTreeMap keeps the hours sorted.
    let mut counts: BTreeMap<u32, u64> = BTreeMap::new();
    for record in table.records() {
        *counts.entry(record.hour).or_insert(0) += 1;
    }

    Ok(counts
        .into_iter()
        .map(|(hour, orders)| HourCount { hour, orders })
        .collect())
}

/// Most frequent product combinations sold together under one order.
///
/// Orders are grouped by identifier first and each order contributes its
/// combination label exactly once, so an order with N line items cannot
/// inflate its own count. Only orders with at least two line items qualify.
/// Sorted by descending frequency, ties kept in first-seen order, truncated
/// to `limit` entries.
pub fn top_product_combos(table: &SalesTable, limit: usize) -> Result<Vec<ComboCount>> {
    ensure_nonempty(table)?;

    // Group line items by order identifier, preserving first-seen order of
    // both the orders and the products within each order.
    let mut order_ids: Vec<&str> = Vec::new();
    let mut line_items: HashMap<&str, Vec<&str>> = HashMap::new();
    for record in table.records() {
        let entry = line_items.entry(record.order_id.as_str()).or_default();
        if entry.is_empty() {
            order_ids.push(record.order_id.as_str());
        }
        entry.push(record.product.as_str());
    }

    // One label per qualifying order: the distinct products, comma-joined.
    let mut label_order: Vec<String> = Vec::new();
    let mut label_counts: HashMap<String, u64> = HashMap::new();
    for order_id in order_ids {
        let products = &line_items[order_id];
        if products.len() < 2 {
            continue;
        }
        let label = join_distinct(products);
        if !label_counts.contains_key(&label) {
            label_order.push(label.clone());
        }
        *label_counts.entry(label).or_insert(0) += 1;
    }

    let mut combos: Vec<ComboCount> = label_order
        .into_iter()
        .map(|products| {
            let orders = label_counts[&products];
            ComboCount { products, orders }
        })
        .collect();

    // Stable sort keeps first-seen order among equal counts.
    combos.sort_by(|a, b| b.orders.cmp(&a.orders));
    combos.truncate(limit);

    Ok(combos)
}

/// Total quantity and mean unit price per product, on one shared ordering.
///
/// Both series are built in a single grouping pass so they cannot drift onto
/// different product axes. Null quantities and prices are skipped, matching
/// how the aggregation treats unparseable fields elsewhere.
pub fn product_price_volume(table: &SalesTable) -> Result<PriceVolumeSeries> {
    ensure_nonempty(table)?;

    #[derive(Default)]
    struct Accum {
        quantity: i64,
        price_sum: f64,
        price_count: u64,
    }

    let mut order: Vec<String> = Vec::new();
    let mut accums: HashMap<String, Accum> = HashMap::new();
    for record in table.records() {
        if !accums.contains_key(&record.product) {
            order.push(record.product.clone());
        }
        let accum = accums.entry(record.product.clone()).or_default();
        if let Some(q) = record.quantity {
            accum.quantity += q;
        }
        if let Some(p) = record.unit_price {
            accum.price_sum += p;
            accum.price_count += 1;
        }
    }

    let mut quantities = Vec::with_capacity(order.len());
    let mut mean_prices = Vec::with_capacity(order.len());
    for product in &order {
        let accum = &accums[product];
        quantities.push(accum.quantity);
        mean_prices.push(if accum.price_count > 0 {
            Some(accum.price_sum / accum.price_count as f64)
        } else {
            None
        });
    }

    Ok(PriceVolumeSeries {
        products: order,
        quantities,
        mean_prices,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn ensure_nonempty(table: &SalesTable) -> Result<()> {
    if table.is_empty() {
        return Err(AnalyzerError::EmptyDataset);
    }
    Ok(())
}

/// Comma-join the distinct products of one order, first appearance first.
fn join_distinct(products: &[&str]) -> String {
    let mut seen: Vec<&str> = Vec::with_capacity(products.len());
    for product in products {
        if !seen.contains(product) {
            seen.push(product);
        }
    }
    seen.join(", ")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
