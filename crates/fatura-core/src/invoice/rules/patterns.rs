//! Regex patterns for Brazilian electricity bill extraction.
//!
//! The patterns assume the layout produced by text extraction from the
//! distributor's PDF: section labels come out glued to the `kWh` unit
//! marker, and every amount uses a comma as the decimal separator.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Header row: client number first, installation number discarded
    pub static ref CLIENT_NUMBER: Regex = Regex::new(
        r"Nº DO CLIENTE\s+Nº DA INSTALAÇÃO\s+(\d+)\s+\d+"
    ).unwrap();

    // "Referente a JUN/2023 07/07/2023" - captures the month token
    pub static ref REFERENCE_MONTH: Regex = Regex::new(
        r"Referente a\s+([\w/]+)\s+\d{2}/\d{2}/\d{4}"
    ).unwrap();

    // Any bare MMM/YYYY token anywhere in the text
    pub static ref REFERENCE_MONTH_TOKEN: Regex = Regex::new(
        r"(?:JAN|FEV|MAR|ABR|MAI|JUN|JUL|AGO|SET|OUT|NOV|DEZ)/\d{4}"
    ).unwrap();

    // Energy lines: quantity, unit price (discarded), total value
    pub static ref ELECTRIC_ENERGY: Regex = Regex::new(
        r"Energia ElétricakWh\s+(\d+)\s+\d+,\d+\s+(\d+,\d+)"
    ).unwrap();

    pub static ref ENERGY_SCEE: Regex = Regex::new(
        r"Energia SCEE s/ ICMSkWh\s+(\d+)\s+\d+,\d+\s+(\d+,\d+)"
    ).unwrap();

    // The compensated value may carry a leading minus (GD credit)
    pub static ref ENERGY_COMPENSATED: Regex = Regex::new(
        r"Energia compensada GD IkWh\s+(\d+)\s+\d+,\d+\s+(-?\d+,\d+)"
    ).unwrap();

    pub static ref PUBLIC_LIGHTING: Regex = Regex::new(
        r"Contrib Ilum Publica Municipal\s+(\d+,\d+)"
    ).unwrap();

    // First amount anywhere after the label, across line breaks
    pub static ref PAYMENT_VALUE: Regex = Regex::new(
        r"(?s)Valor a pagar \(R\$\).+?(\d+,\d+)"
    ).unwrap();

    // First amount following a DD/MM/YYYY token (due-date row layout)
    pub static ref PAYMENT_VALUE_AFTER_DATE: Regex = Regex::new(
        r"\d{2}/\d{2}/\d{4}\s+(\d+,\d+)"
    ).unwrap();
}
