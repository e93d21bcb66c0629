//! Bill data models.
//!
//! Field names on the serialized forms follow the surface the original
//! service exposed, so downstream consumers keep working unchanged.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quantity and billed value of one energy line on a bill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyReading {
    /// Energy in kWh.
    pub quantity: u32,

    /// Billed value in R$. Negative for credits.
    pub value: Decimal,
}

/// Fields extracted from the text of one bill.
///
/// Every field is independently optional: a rule that finds no match
/// leaves its field empty, and no combination of failures is an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedInvoiceFields {
    /// Client number, digits only.
    pub client_number: Option<String>,

    /// Reference month as the verbatim `MMM/YYYY` token.
    pub reference_month: Option<String>,

    /// Standard electric energy line.
    pub electric_energy: Option<EnergyReading>,

    /// SCEE energy line (billed without ICMS).
    #[serde(rename = "energySCEEICMS")]
    pub energy_scee_icms: Option<EnergyReading>,

    /// Compensated (GD) energy line; its value is typically negative.
    pub energy_compensated: Option<EnergyReading>,

    /// Municipal public lighting contribution in R$.
    pub public_lighting: Option<Decimal>,

    /// Total amount due in R$.
    pub payment_value: Option<Decimal>,
}

impl ParsedInvoiceFields {
    /// Names of the fields that could not be extracted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.client_number.is_none() {
            missing.push("clientNumber");
        }
        if self.reference_month.is_none() {
            missing.push("referenceMonth");
        }
        if self.electric_energy.is_none() {
            missing.push("electricEnergy");
        }
        if self.energy_scee_icms.is_none() {
            missing.push("energySCEEICMS");
        }
        if self.energy_compensated.is_none() {
            missing.push("energyCompensated");
        }
        if self.public_lighting.is_none() {
            missing.push("publicLighting");
        }
        if self.payment_value.is_none() {
            missing.push("paymentValue");
        }

        missing
    }

    /// Whether every field was extracted.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// A validated, stored bill.
///
/// All columns are required; incomplete extractions are rejected by the
/// caller before a record is built. A record is identified by its
/// `(client_number, reference_month)` pair and is never updated once
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub client_number: String,
    pub reference_month: String,
    pub electric_energy_kwh: u32,
    pub electric_energy_r: Decimal,
    #[serde(rename = "energySCEEKwh")]
    pub energy_scee_kwh: u32,
    #[serde(rename = "energySCEER")]
    pub energy_scee_r: Decimal,
    pub energy_compensation_kwh: u32,
    pub energy_compensation_r: Decimal,
    pub public_lighting_r: Decimal,
    pub total_r: Decimal,
    pub created_at: DateTime<Utc>,
}

impl InvoiceRecord {
    /// Flatten extracted fields into a record, stamping the creation
    /// time. Returns `None` when any required field is missing.
    pub fn from_parsed(fields: &ParsedInvoiceFields, created_at: DateTime<Utc>) -> Option<Self> {
        let electric = fields.electric_energy?;
        let scee = fields.energy_scee_icms?;
        let compensated = fields.energy_compensated?;

        Some(Self {
            client_number: fields.client_number.clone()?,
            reference_month: fields.reference_month.clone()?,
            electric_energy_kwh: electric.quantity,
            electric_energy_r: electric.value,
            energy_scee_kwh: scee.quantity,
            energy_scee_r: scee.value,
            energy_compensation_kwh: compensated.quantity,
            energy_compensation_r: compensated.value,
            public_lighting_r: fields.public_lighting?,
            total_r: fields.payment_value?,
            created_at,
        })
    }

    /// Identity used for duplicate detection.
    pub fn key(&self) -> (&str, &str) {
        (&self.client_number, &self.reference_month)
    }
}
