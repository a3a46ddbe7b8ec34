//! Data pipeline layer for the Sales Analyzer.
//!
//! Responsible for reading the delimited sales export, normalizing it into
//! the typed [`SalesTable`](analyzer_core::models::SalesTable) snapshot, and
//! computing the five chart-data series over that snapshot.

pub mod analysis;
pub mod normalizer;
pub mod queries;
pub mod reader;

pub use analyzer_core as core;
