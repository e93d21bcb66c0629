//! Rule-based field extraction for electricity bills.

pub mod amounts;
pub mod months;
pub mod patterns;

pub use amounts::parse_amount;
pub use months::{MonthDisplay, format_reference_month, month_name};

use regex::{Captures, Regex};

/// One field-extraction rule: a primary pattern, an optional fallback
/// pattern, and a converter applied to whichever matched.
///
/// The primary pattern always wins; the fallback is consulted only when
/// the primary finds no match anywhere in the text. A rule that matches
/// nothing yields `None` for its field and nothing else.
pub struct FieldRule<T> {
    primary: &'static Regex,
    fallback: Option<&'static Regex>,
    convert: fn(&Captures) -> Option<T>,
}

impl<T> FieldRule<T> {
    pub fn new(primary: &'static Regex, convert: fn(&Captures) -> Option<T>) -> Self {
        Self {
            primary,
            fallback: None,
            convert,
        }
    }

    pub fn with_fallback(mut self, fallback: &'static Regex) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Apply the rule to the text.
    pub fn apply(&self, text: &str) -> Option<T> {
        let caps = self
            .primary
            .captures(text)
            .or_else(|| self.fallback.and_then(|re| re.captures(text)))?;

        (self.convert)(&caps)
    }
}

/// The captured token of a match: the first capture group when the
/// pattern has one, the whole match otherwise (fallback patterns match
/// the full token).
pub fn captured_token<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(1)
        .or_else(|| caps.get(0))
        .map(|m| m.as_str())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use lazy_static::lazy_static;
    use pretty_assertions::assert_eq;

    use super::*;

    lazy_static! {
        static ref LABELED: Regex = Regex::new(r"valor:\s*(\d+)").unwrap();
        static ref BARE: Regex = Regex::new(r"\d+").unwrap();
    }

    fn convert(caps: &Captures) -> Option<String> {
        Some(captured_token(caps).to_string())
    }

    #[test]
    fn test_primary_wins_over_fallback() {
        let rule = FieldRule::new(&LABELED, convert).with_fallback(&BARE);

        // Both would match; the labeled capture takes precedence
        assert_eq!(rule.apply("99 valor: 42"), Some("42".to_string()));
    }

    #[test]
    fn test_fallback_used_on_primary_failure() {
        let rule = FieldRule::new(&LABELED, convert).with_fallback(&BARE);

        assert_eq!(rule.apply("total 99"), Some("99".to_string()));
    }

    #[test]
    fn test_no_match_yields_none() {
        let rule = FieldRule::new(&LABELED, convert);

        assert_eq!(rule.apply("nothing numeric here"), None);
        assert_eq!(rule.apply(""), None);
    }
}
