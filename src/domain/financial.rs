//! Financial identifier recognition: payment card numbers and IBANs.
//!
//! Both identifiers carry a check digit scheme, so candidates are only
//! reported when the checksum holds.

use super::{digits, EntityType, PatternMatcher};
use once_cell::sync::Lazy;
use regex::Regex;

/// Payment card number matcher (13-19 digits, Luhn validated).
///
/// Digits may be grouped with single spaces or hyphens:
/// - 4111111111111111
/// - 4111 1111 1111 1111
/// - 3782-822463-10005
#[derive(Debug, Clone, Default)]
pub struct CreditCardMatcher;

impl CreditCardMatcher {
    pub fn new() -> Self {
        Self
    }

    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"\b(?:\d[ -]?){12,18}\d\b").expect("Valid credit card regex")
        });
        &PATTERN
    }

    /// Luhn (mod 10) checksum over a digit sequence.
    pub fn luhn_valid(digits: &[u32]) -> bool {
        if digits.is_empty() {
            return false;
        }

        let sum: u32 = digits
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &d)| {
                if i % 2 == 1 {
                    let doubled = d * 2;
                    if doubled > 9 {
                        doubled - 9
                    } else {
                        doubled
                    }
                } else {
                    d
                }
            })
            .sum();

        sum % 10 == 0
    }
}

impl PatternMatcher for CreditCardMatcher {
    fn entity_type(&self) -> EntityType {
        EntityType::CreditCard
    }

    fn pattern(&self) -> &Regex {
        Self::regex()
    }

    fn score(&self) -> f64 {
        1.0
    }

    fn validate(&self, candidate: &str) -> bool {
        let digits = digits(candidate);
        (13..=19).contains(&digits.len()) && Self::luhn_valid(&digits)
    }
}

/// International Bank Account Number matcher (ISO 13616, mod-97 validated).
#[derive(Debug, Clone, Default)]
pub struct IbanMatcher;

impl IbanMatcher {
    pub fn new() -> Self {
        Self
    }

    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"\b[A-Z]{2}\d{2}(?: ?[A-Z0-9]{4}){2,7}(?: ?[A-Z0-9]{1,3})?\b")
                .expect("Valid IBAN regex")
        });
        &PATTERN
    }

    /// Computes the ISO 7064 mod-97 remainder of an IBAN.
    ///
    /// The country code and check digits are moved to the end and every
    /// letter is expanded to two digits (A = 10 ... Z = 35). A valid IBAN
    /// yields a remainder of 1.
    pub fn mod97(iban: &str) -> Option<u32> {
        let compact: String = iban.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.len() < 5 || !compact.is_ascii() {
            return None;
        }

        let rearranged = format!("{}{}", &compact[4..], &compact[..4]);
        let mut remainder: u32 = 0;
        for c in rearranged.chars() {
            let value = c.to_digit(36)?;
            remainder = if value < 10 {
                (remainder * 10 + value) % 97
            } else {
                (remainder * 100 + value) % 97
            };
        }
        Some(remainder)
    }
}

impl PatternMatcher for IbanMatcher {
    fn entity_type(&self) -> EntityType {
        EntityType::IbanCode
    }

    fn pattern(&self) -> &Regex {
        Self::regex()
    }

    fn score(&self) -> f64 {
        1.0
    }

    fn validate(&self, candidate: &str) -> bool {
        let length = candidate.chars().filter(|c| !c.is_whitespace()).count();
        (15..=34).contains(&length) && Self::mod97(candidate) == Some(1)
    }
}
