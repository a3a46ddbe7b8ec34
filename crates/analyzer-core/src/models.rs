use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ── Policy knobs ──────────────────────────────────────────────────────────────

/// How zero or negative quantity / price values are treated.
///
/// The source data contains occasional non-positive values that may be either
/// data-quality defects or legitimate returns/refunds, so the policy is a
/// caller decision rather than a hard-coded assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValuePolicy {
    /// Keep every row regardless of sign.
    AcceptAll,
    /// Drop rows whose parsed quantity or unit price is zero or negative.
    RequirePositive,
}

impl Default for ValuePolicy {
    fn default() -> Self {
        ValuePolicy::AcceptAll
    }
}

// ── Chart kinds ───────────────────────────────────────────────────────────────

/// The five predefined charts the analyzer can compute data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    /// Order count per calendar month (1-12, zero-filled).
    MonthlyVolume,
    /// Order count per city, first-seen order.
    CityVolume,
    /// Order count per hour of day, ascending.
    HourlyVolume,
    /// Top 10 product combinations sold together under one order.
    TopCombos,
    /// Total quantity (bar) and mean unit price (line) per product.
    PriceVolume,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::MonthlyVolume => "monthly-volume",
            ChartKind::CityVolume => "city-volume",
            ChartKind::HourlyVolume => "hourly-volume",
            ChartKind::TopCombos => "top-combos",
            ChartKind::PriceVolume => "price-volume",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Raw records ───────────────────────────────────────────────────────────────

/// One input row exactly as it appears in the delimited file.
///
/// Everything is text at this stage; quantity and price may be malformed and
/// the order date may use more than one layout. The serde renames match the
/// header row of the sales export format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// Order identifier. Not unique: an order spans one row per line item.
    #[serde(rename = "Order ID")]
    pub order_id: String,
    /// Product name.
    #[serde(rename = "Product")]
    pub product: String,
    /// Quantity ordered, unparsed.
    #[serde(rename = "Quantity Ordered")]
    pub quantity: String,
    /// Unit price, unparsed.
    #[serde(rename = "Price Each")]
    pub unit_price: String,
    /// Order timestamp, unparsed (at least two layouts occur in the data).
    #[serde(rename = "Order Date")]
    pub order_date: String,
    /// Free-text purchase address with comma-separated components.
    #[serde(rename = "Purchase Address")]
    pub purchase_address: String,
}

impl RawRecord {
    /// `true` when every column is blank after trimming.
    pub fn is_empty(&self) -> bool {
        self.order_id.trim().is_empty()
            && self.product.trim().is_empty()
            && self.quantity.trim().is_empty()
            && self.unit_price.trim().is_empty()
            && self.order_date.trim().is_empty()
            && self.purchase_address.trim().is_empty()
    }
}

/// The untyped table produced by one file read.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Path the table was loaded from.
    pub path: PathBuf,
    /// All data rows, in file order.
    pub records: Vec<RawRecord>,
}

// ── Normalized records ────────────────────────────────────────────────────────

/// A transaction line item after type coercion and derived-field computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Order identifier (an order may span multiple records).
    pub order_id: String,
    /// Product name.
    pub product: String,
    /// Quantity ordered; `None` when the raw value was unparseable.
    pub quantity: Option<i64>,
    /// Unit price in USD; `None` when the raw value was unparseable.
    pub unit_price: Option<f64>,
    /// quantity x unit_price; `None` when either operand is `None`.
    pub sales: Option<f64>,
    /// Parsed order timestamp (naive local time; the data carries no zone).
    pub ordered_at: NaiveDateTime,
    /// Calendar month of the order, 1-12.
    pub month: u32,
    /// Hour of day of the order, 0-23.
    pub hour: u32,
    /// City extracted from the purchase address.
    pub city: String,
}

/// An immutable snapshot of normalized records.
///
/// A new ingestion replaces the snapshot wholesale; it is never partially
/// updated, and every chart query is a pure read over it.
#[derive(Debug, Clone, Default)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

impl SalesTable {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
