//! Reference-month token handling.

use serde::{Deserialize, Serialize};

/// The twelve three-letter month codes used in `MMM/YYYY` tokens, with
/// their full Portuguese names.
const MONTH_NAMES: [(&str, &str); 12] = [
    ("JAN", "Janeiro"),
    ("FEV", "Fevereiro"),
    ("MAR", "Março"),
    ("ABR", "Abril"),
    ("MAI", "Maio"),
    ("JUN", "Junho"),
    ("JUL", "Julho"),
    ("AGO", "Agosto"),
    ("SET", "Setembro"),
    ("OUT", "Outubro"),
    ("NOV", "Novembro"),
    ("DEZ", "Dezembro"),
];

/// Full Portuguese name for a three-letter month code.
pub fn month_name(code: &str) -> Option<&'static str> {
    MONTH_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// A reference month expanded for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDisplay {
    pub name: String,
    pub year: String,
}

/// Expand a `MMM/YYYY` token for display.
///
/// An unrecognized code passes through unchanged; a token without the
/// `/` separator yields an empty year. There is no failure path.
pub fn format_reference_month(token: &str) -> MonthDisplay {
    let (code, year) = match token.split_once('/') {
        Some((code, year)) => (code, year),
        None => (token, ""),
    };

    MonthDisplay {
        name: month_name(code).unwrap_or(code).to_string(),
        year: year.to_string(),
    }
}
