//! Core library for Brazilian electricity bill processing.
//!
//! This crate provides:
//! - PDF text extraction
//! - Rule-based extraction of billing fields (client number, reference
//!   month, energy lines, public lighting, payment value)
//! - Aggregation of stored bills into energy and financial summaries
//! - Reference-month formatting for display

pub mod error;
pub mod invoice;
pub mod models;
pub mod pdf;

pub use error::{FaturaError, PdfError, Result};
pub use invoice::rules::{MonthDisplay, format_reference_month};
pub use invoice::{EnergyBillParser, aggregate};
pub use models::invoice::{EnergyReading, InvoiceRecord, ParsedInvoiceFields};
pub use models::summary::{AggregateSummary, SeriesEntry};
pub use pdf::{PdfExtractor, PdfProcessor};
