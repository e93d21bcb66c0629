//! Reduction of stored bills into summary totals.

use rust_decimal::Decimal;

use crate::models::invoice::InvoiceRecord;
use crate::models::summary::{AggregateSummary, SeriesEntry};

/// Reduce a set of bills into energy and financial totals.
///
/// The fold is order-independent and total: an empty slice produces a
/// zeroed summary with both series present. No rounding is applied;
/// display layers round if they need to.
pub fn aggregate(records: &[InvoiceRecord]) -> AggregateSummary {
    let mut energy_consumption: u64 = 0;
    let mut compensated_energy: u64 = 0;
    let mut total_without_gd = Decimal::ZERO;
    let mut gd_economy = Decimal::ZERO;
    let mut total_value = Decimal::ZERO;

    for record in records {
        energy_consumption +=
            u64::from(record.electric_energy_kwh) + u64::from(record.energy_scee_kwh);
        compensated_energy += u64::from(record.energy_compensation_kwh);
        total_without_gd +=
            record.electric_energy_r + record.energy_scee_r + record.public_lighting_r;
        gd_economy += record.energy_compensation_r;
        total_value += record.total_r;
    }

    AggregateSummary {
        energy_consumption,
        compensated_energy,
        total_without_gd,
        gd_economy,
        total_value,
        financial_results: vec![
            SeriesEntry::new("Sem GD", total_without_gd),
            SeriesEntry::new("Economia GD", gd_economy),
        ],
        energy_results: vec![
            SeriesEntry::new("Consumido", Decimal::from(energy_consumption)),
            SeriesEntry::new("Compensado", Decimal::from(compensated_energy)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(
        month: &str,
        kwh: (u32, u32, u32),
        values: (&str, &str, &str, &str, &str),
    ) -> InvoiceRecord {
        InvoiceRecord {
            client_number: "1234567".to_string(),
            reference_month: month.to_string(),
            electric_energy_kwh: kwh.0,
            electric_energy_r: dec(values.0),
            energy_scee_kwh: kwh.1,
            energy_scee_r: dec(values.1),
            energy_compensation_kwh: kwh.2,
            energy_compensation_r: dec(values.2),
            public_lighting_r: dec(values.3),
            total_r: dec(values.4),
            created_at: DateTime::from_timestamp(1_688_169_600, 0).unwrap(),
        }
    }

    fn two_bills() -> Vec<InvoiceRecord> {
        vec![
            record(
                "JUN/2023",
                (150, 75, 100),
                ("118.5", "40.5", "-45", "10.5", "124.5"),
            ),
            record(
                "JUL/2023",
                (180, 90, 120),
                ("142.2", "48.6", "-54", "12.6", "149.4"),
            ),
        ]
    }

    #[test]
    fn test_aggregate_two_bills() {
        let summary = aggregate(&two_bills());

        assert_eq!(summary.energy_consumption, 495);
        assert_eq!(summary.compensated_energy, 220);
        assert_eq!(summary.total_without_gd, dec("372.9"));
        assert_eq!(summary.gd_economy, dec("-99"));
        assert_eq!(summary.total_value, dec("273.9"));

        assert_eq!(
            summary.energy_results,
            vec![
                SeriesEntry::new("Consumido", dec("495")),
                SeriesEntry::new("Compensado", dec("220")),
            ]
        );
        assert_eq!(
            summary.financial_results,
            vec![
                SeriesEntry::new("Sem GD", dec("372.9")),
                SeriesEntry::new("Economia GD", dec("-99")),
            ]
        );
    }

    #[test]
    fn test_aggregate_empty_is_zeroed() {
        let summary = aggregate(&[]);

        assert_eq!(summary.energy_consumption, 0);
        assert_eq!(summary.compensated_energy, 0);
        assert_eq!(summary.total_without_gd, Decimal::ZERO);
        assert_eq!(summary.gd_economy, Decimal::ZERO);
        assert_eq!(summary.total_value, Decimal::ZERO);
        assert_eq!(
            summary.energy_results,
            vec![
                SeriesEntry::new("Consumido", Decimal::ZERO),
                SeriesEntry::new("Compensado", Decimal::ZERO),
            ]
        );
        assert_eq!(
            summary.financial_results,
            vec![
                SeriesEntry::new("Sem GD", Decimal::ZERO),
                SeriesEntry::new("Economia GD", Decimal::ZERO),
            ]
        );
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let mut reversed = two_bills();
        reversed.reverse();

        assert_eq!(aggregate(&two_bills()), aggregate(&reversed));
    }

    #[test]
    fn test_summary_serializes_with_compat_names() {
        let json = serde_json::to_value(aggregate(&two_bills())).unwrap();

        assert_eq!(json["energyConsumption"], 495);
        assert_eq!(json["compensatedEnergy"], 220);
        assert_eq!(json["totalWithoutGD"], 372.9);
        assert_eq!(json["gdEconomy"], -99.0);
        assert_eq!(json["totalValue"], 273.9);
        assert_eq!(json["energyResults"][0]["name"], "Consumido");
        assert_eq!(json["energyResults"][0]["value"], 495.0);
        assert_eq!(json["financialResults"][1]["name"], "Economia GD");
        assert_eq!(json["financialResults"][1]["value"], -99.0);
    }
}
