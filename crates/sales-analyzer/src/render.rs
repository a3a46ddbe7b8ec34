//! Text rendering of computed chart series.
//!
//! The analyzer owns no drawing surface: each query returns immutable
//! chart-ready data, and this module turns it into an aligned stdout table.
//! A graphical front-end would consume the same series via `--export`.

use analyzer_core::formatting::{format_count, format_currency};
use analyzer_data::queries::{
    ChartSeries, CityCount, ComboCount, HourCount, MonthCount, PriceVolumeSeries,
};

/// Render a computed series as an aligned text table.
pub fn render_series(series: &ChartSeries) -> String {
    match series {
        ChartSeries::MonthlyVolume(points) => render_monthly(points),
        ChartSeries::CityVolume(points) => render_cities(points),
        ChartSeries::HourlyVolume(points) => render_hours(points),
        ChartSeries::TopCombos(points) => render_combos(points),
        ChartSeries::PriceVolume(series) => render_price_volume(series),
    }
}

// ── Per-chart renderers ───────────────────────────────────────────────────────

fn render_monthly(points: &[MonthCount]) -> String {
    let rows: Vec<(String, String)> = points
        .iter()
        .map(|p| (p.month.to_string(), format_count(p.orders)))
        .collect();
    two_column_table("Month", "Orders", &rows)
}

fn render_cities(points: &[CityCount]) -> String {
    let rows: Vec<(String, String)> = points
        .iter()
        .map(|p| (p.city.clone(), format_count(p.orders)))
        .collect();
    two_column_table("City", "Orders", &rows)
}

fn render_hours(points: &[HourCount]) -> String {
    let rows: Vec<(String, String)> = points
        .iter()
        .map(|p| (format!("{:02}:00", p.hour), format_count(p.orders)))
        .collect();
    two_column_table("Hour", "Orders", &rows)
}

fn render_combos(points: &[ComboCount]) -> String {
    let rows: Vec<(String, String)> = points
        .iter()
        .map(|p| (p.products.clone(), format_count(p.orders)))
        .collect();
    two_column_table("Products sold together", "Orders", &rows)
}

fn render_price_volume(series: &PriceVolumeSeries) -> String {
    let mut out = String::new();

    let label_width = column_width("Product", series.products.iter().map(String::as_str));
    out.push_str(&format!(
        "{:<label_width$}  {:>10}  {:>12}\n",
        "Product", "Quantity", "Mean price"
    ));

    for (i, product) in series.products.iter().enumerate() {
        let price = match series.mean_prices[i] {
            Some(p) => format_currency(p),
            None => "-".to_string(),
        };
        out.push_str(&format!(
            "{:<label_width$}  {:>10}  {:>12}\n",
            product,
            series.quantities[i],
            price
        ));
    }

    out
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(str::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

fn two_column_table(left: &str, right: &str, rows: &[(String, String)]) -> String {
    let left_width = column_width(left, rows.iter().map(|(l, _)| l.as_str()));
    let right_width = column_width(right, rows.iter().map(|(_, r)| r.as_str()));

    let mut out = String::new();
    out.push_str(&format!(
        "{:<left_width$}  {:>right_width$}\n",
        left, right
    ));
    for (l, r) in rows {
        out.push_str(&format!("{:<left_width$}  {:>right_width$}\n", l, r));
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
