//! Aggregated totals across stored bills.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One named value in a chart-ready series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub name: String,
    pub value: Decimal,
}

impl SeriesEntry {
    pub fn new(name: impl Into<String>, value: Decimal) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Energy and financial totals over a set of bills.
///
/// Derived on demand and never persisted. The serialized field names are
/// part of the compatibility surface consumed by the reporting layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSummary {
    /// Total consumed energy in kWh (standard + SCEE).
    pub energy_consumption: u64,

    /// Total compensated (GD) energy in kWh.
    pub compensated_energy: u64,

    /// Billed total in R$ before the GD credit.
    #[serde(rename = "totalWithoutGD")]
    pub total_without_gd: Decimal,

    /// GD credit in R$, typically negative.
    pub gd_economy: Decimal,

    /// Sum of the bills' payable totals in R$.
    pub total_value: Decimal,

    /// "Sem GD" / "Economia GD" series for the financial chart.
    pub financial_results: Vec<SeriesEntry>,

    /// "Consumido" / "Compensado" series for the energy chart.
    pub energy_results: Vec<SeriesEntry>,
}
