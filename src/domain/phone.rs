//! Phone number recognition.
//!
//! This module encapsulates the rules for detecting North American
//! phone numbers in extracted page text.

use super::{EntityType, PatternMatcher};
use once_cell::sync::Lazy;
use regex::Regex;

/// Recognizes NANP numbers written in the usual ways:
/// - (555) 234-5678
/// - 555-234-5678
/// - 555.234.5678
/// - +1 555 234 5678
#[derive(Debug, Clone)]
pub struct PhoneNumberMatcher;

impl PhoneNumberMatcher {
    /// Creates a new phone number matcher.
    pub fn new() -> Self {
        Self
    }

    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"(?:\+?1[-. \t]?[ \t]*)?\(?([2-9]\d{2})\)?[-. \t]?[ \t]*(\d{3})[-. \t]?[ \t]*(\d{4})\b",
            )
            .expect("phone regex compiles")
        });
        &PATTERN
    }

    /// NANP check: area code and exchange are `[2-9]XX`, subscriber is four digits.
    pub fn validate_parts(area: &str, exchange: &str, subscriber: &str) -> bool {
        fn is_nxx(code: &str) -> bool {
            code.len() == 3 && matches!(code.as_bytes()[0], b'2'..=b'9')
        }
        is_nxx(area) && is_nxx(exchange) && subscriber.len() == 4
    }

    /// Reduces a matched phone number to its ten NANP digits.
    pub fn normalize(&self, text: &str) -> Option<String> {
        self.pattern().captures(text).and_then(|caps| {
            let area = caps.get(1)?.as_str();
            let exchange = caps.get(2)?.as_str();
            let subscriber = caps.get(3)?.as_str();

            if Self::validate_parts(area, exchange, subscriber) {
                Some(format!("{}{}{}", area, exchange, subscriber))
            } else {
                None
            }
        })
    }
}

impl Default for PhoneNumberMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMatcher for PhoneNumberMatcher {
    fn entity_type(&self) -> EntityType {
        EntityType::PhoneNumber
    }

    fn pattern(&self) -> &Regex {
        Self::regex()
    }

    fn score(&self) -> f64 {
        0.75
    }

    fn validate(&self, candidate: &str) -> bool {
        self.normalize(candidate).is_some()
    }
}
