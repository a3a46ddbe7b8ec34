//! Core domain layer for the Sales Analyzer.
//!
//! Defines the raw and normalized record types, the error taxonomy shared by
//! every crate in the workspace, tolerant order-date parsing, number
//! formatting for the text renderer, and the CLI settings type.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{AnalyzerError, Result};
