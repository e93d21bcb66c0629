//! Rule-driven extraction of billing fields from bill text.

use lazy_static::lazy_static;
use regex::Captures;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::invoice::{EnergyReading, ParsedInvoiceFields};

use super::rules::{FieldRule, captured_token, parse_amount, patterns::*};

lazy_static! {
    static ref CLIENT_NUMBER_RULE: FieldRule<String> =
        FieldRule::new(&CLIENT_NUMBER, convert_token);
    static ref REFERENCE_MONTH_RULE: FieldRule<String> =
        FieldRule::new(&REFERENCE_MONTH, convert_token).with_fallback(&REFERENCE_MONTH_TOKEN);
    static ref ELECTRIC_ENERGY_RULE: FieldRule<EnergyReading> =
        FieldRule::new(&ELECTRIC_ENERGY, convert_reading);
    static ref ENERGY_SCEE_RULE: FieldRule<EnergyReading> =
        FieldRule::new(&ENERGY_SCEE, convert_reading);
    static ref ENERGY_COMPENSATED_RULE: FieldRule<EnergyReading> =
        FieldRule::new(&ENERGY_COMPENSATED, convert_reading);
    static ref PUBLIC_LIGHTING_RULE: FieldRule<Decimal> =
        FieldRule::new(&PUBLIC_LIGHTING, convert_amount);
    static ref PAYMENT_VALUE_RULE: FieldRule<Decimal> =
        FieldRule::new(&PAYMENT_VALUE, convert_amount).with_fallback(&PAYMENT_VALUE_AFTER_DATE);
}

fn convert_token(caps: &Captures) -> Option<String> {
    Some(captured_token(caps).to_string())
}

fn convert_amount(caps: &Captures) -> Option<Decimal> {
    parse_amount(captured_token(caps))
}

fn convert_reading(caps: &Captures) -> Option<EnergyReading> {
    let quantity = caps[1].parse().ok()?;
    let value = parse_amount(&caps[2])?;
    Some(EnergyReading { quantity, value })
}

/// Extracts billing fields from the text of one electricity bill.
pub struct EnergyBillParser;

impl EnergyBillParser {
    pub fn new() -> Self {
        Self
    }

    /// Apply every extraction rule to the text.
    ///
    /// Rules are independent: a pattern with no match leaves its field
    /// empty, and no input makes this fail. The same text always yields
    /// the same fields.
    pub fn parse(&self, text: &str) -> ParsedInvoiceFields {
        let fields = ParsedInvoiceFields {
            client_number: CLIENT_NUMBER_RULE.apply(text),
            reference_month: REFERENCE_MONTH_RULE.apply(text),
            electric_energy: ELECTRIC_ENERGY_RULE.apply(text),
            energy_scee_icms: ENERGY_SCEE_RULE.apply(text),
            energy_compensated: ENERGY_COMPENSATED_RULE.apply(text),
            public_lighting: PUBLIC_LIGHTING_RULE.apply(text),
            payment_value: PAYMENT_VALUE_RULE.apply(text),
        };

        let missing = fields.missing_fields();
        if missing.is_empty() {
            debug!("extracted all fields from {} chars of text", text.len());
        } else {
            debug!(?missing, "extraction left fields empty");
        }

        fields
    }
}

impl Default for EnergyBillParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_full_bill() {
        let text = "\
            Nº DO CLIENTE   Nº DA INSTALAÇÃO\n\
            1234567   9876543\n\
            \n\
            Referente a   JUN/2023   07/07/2023\n\
            \n\
            Energia ElétricakWh   150   0,79   118,50\n\
            Energia SCEE s/ ICMSkWh   75   0,54   40,50\n\
            Energia compensada GD IkWh   100   0,45   -45,00\n\
            Contrib Ilum Publica Municipal   10,50\n\
            \n\
            Valor a pagar (R$)\n\
            124,50\n";

        let fields = EnergyBillParser::new().parse(text);

        assert_eq!(fields.client_number.as_deref(), Some("1234567"));
        assert_eq!(fields.reference_month.as_deref(), Some("JUN/2023"));
        assert_eq!(
            fields.electric_energy,
            Some(EnergyReading {
                quantity: 150,
                value: dec("118.5"),
            })
        );
        assert_eq!(
            fields.energy_scee_icms,
            Some(EnergyReading {
                quantity: 75,
                value: dec("40.5"),
            })
        );
        assert_eq!(
            fields.energy_compensated,
            Some(EnergyReading {
                quantity: 100,
                value: dec("-45"),
            })
        );
        assert_eq!(fields.public_lighting, Some(dec("10.5")));
        assert_eq!(fields.payment_value, Some(dec("124.5")));
        assert!(fields.is_complete());
    }

    #[test]
    fn test_empty_text_yields_all_empty() {
        let fields = EnergyBillParser::new().parse("");

        assert_eq!(fields, ParsedInvoiceFields::default());
    }

    #[test]
    fn test_no_client_header_leaves_client_empty() {
        let fields = EnergyBillParser::new().parse("Energia ElétricakWh 10 0,50 5,00");

        assert_eq!(fields.client_number, None);
        assert!(fields.electric_energy.is_some());
    }

    #[test]
    fn test_reference_month_fallback_token() {
        // No "Referente a" phrase: the bare token is picked up verbatim
        let fields = EnergyBillParser::new().parse("fatura do mês MAI/2024 vencimento");

        assert_eq!(fields.reference_month.as_deref(), Some("MAI/2024"));
    }

    #[test]
    fn test_reference_month_primary_wins_over_fallback() {
        let text = "JAN/2020 histórico\nReferente a   ABR/2024   05/05/2024\n";

        let fields = EnergyBillParser::new().parse(text);

        assert_eq!(fields.reference_month.as_deref(), Some("ABR/2024"));
    }

    #[test]
    fn test_invalid_month_code_not_matched_by_fallback() {
        let fields = EnergyBillParser::new().parse("periodo XYZ/2023");

        assert_eq!(fields.reference_month, None);
    }

    #[test]
    fn test_compensated_value_keeps_sign() {
        let fields =
            EnergyBillParser::new().parse("Energia compensada GD IkWh 120 0,45 -54,00");

        let reading = fields.energy_compensated.unwrap();
        assert_eq!(reading.quantity, 120);
        assert_eq!(reading.value, dec("-54"));
    }

    #[test]
    fn test_payment_value_lazy_match_after_label() {
        let text = "Valor a pagar (R$)\nvencimento 10/07/2023\n107,38\n";

        let fields = EnergyBillParser::new().parse(text);

        assert_eq!(fields.payment_value, Some(dec("107.38")));
    }

    #[test]
    fn test_payment_value_fallback_after_date() {
        // No label at all: first amount following a DD/MM/YYYY token
        let fields = EnergyBillParser::new().parse("vencimento 10/07/2023   98,76");

        assert_eq!(fields.payment_value, Some(dec("98.76")));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = "Referente a JUL/2023 01/08/2023 Contrib Ilum Publica Municipal 12,34";
        let parser = EnergyBillParser::new();

        assert_eq!(parser.parse(text), parser.parse(text));
    }
}
