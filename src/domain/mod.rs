//! Domain models and business logic for PII pattern recognition.
//!
//! Each recognizer pairs a regular expression with a validation rule
//! (checksums, numbering-plan rules, address parsing) and a confidence
//! score, and reports its findings as [`RecognizerResult`]s.

pub mod email;
pub mod financial;
pub mod government_id;
pub mod network;
pub mod phone;

pub use email::EmailMatcher;
pub use financial::{CreditCardMatcher, IbanMatcher};
pub use government_id::UsSsnMatcher;
pub use network::{IpAddressMatcher, UrlMatcher};
pub use phone::PhoneNumberMatcher;

use regex::Regex;
use std::fmt;

/// Category of personally identifiable information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityType {
    EmailAddress,
    PhoneNumber,
    UsSsn,
    CreditCard,
    IpAddress,
    Url,
    IbanCode,
}

impl EntityType {
    /// All entity types, in the order recognizers run.
    pub const ALL: [EntityType; 7] = [
        EntityType::EmailAddress,
        EntityType::PhoneNumber,
        EntityType::UsSsn,
        EntityType::CreditCard,
        EntityType::IpAddress,
        EntityType::Url,
        EntityType::IbanCode,
    ];

    /// Canonical upper-snake-case label, also used as the default placeholder.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailAddress => "EMAIL_ADDRESS",
            Self::PhoneNumber => "PHONE_NUMBER",
            Self::UsSsn => "US_SSN",
            Self::CreditCard => "CREDIT_CARD",
            Self::IpAddress => "IP_ADDRESS",
            Self::Url => "URL",
            Self::IbanCode => "IBAN_CODE",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single PII finding: a byte span of the analyzed text and its category.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizerResult {
    pub entity_type: EntityType,
    /// Byte offset of the first character (inclusive)
    pub start: usize,
    /// Byte offset past the last character (exclusive)
    pub end: usize,
    /// Confidence in `0.0..=1.0`
    pub score: f64,
}

impl RecognizerResult {
    pub fn new(entity_type: EntityType, start: usize, end: usize, score: f64) -> Self {
        Self {
            entity_type,
            start,
            end,
            score,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True if `other` lies entirely within this span.
    pub fn contains(&self, other: &RecognizerResult) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn overlaps(&self, other: &RecognizerResult) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Trait for regex-backed PII recognizers.
pub trait PatternMatcher: Send + Sync {
    /// The category this recognizer reports.
    fn entity_type(&self) -> EntityType;

    /// Candidate pattern; every match is passed through [`validate`](Self::validate).
    fn pattern(&self) -> &Regex;

    /// Score assigned to validated matches.
    fn score(&self) -> f64;

    /// Rejects candidates that match the pattern but fail a domain rule.
    fn validate(&self, candidate: &str) -> bool {
        !candidate.is_empty()
    }

    /// Language this recognizer's patterns are written for.
    fn supported_language(&self) -> &str {
        "en"
    }

    fn extract_all<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.find_all(text)
            .into_iter()
            .map(|r| &text[r.start..r.end])
            .collect()
    }

    /// Finds every validated match.
    ///
    /// A candidate that fails validation does not hide matches overlapping
    /// it: the search resumes one character after the rejected start.
    fn find_all(&self, text: &str) -> Vec<RecognizerResult> {
        let mut results = Vec::new();
        let mut pos = 0;

        while pos <= text.len() {
            let Some(m) = self.pattern().find_at(text, pos) else {
                break;
            };

            if !m.as_str().is_empty() && self.validate(m.as_str()) {
                results.push(RecognizerResult::new(
                    self.entity_type(),
                    m.start(),
                    m.end(),
                    self.score(),
                ));
                pos = m.end();
            } else {
                pos = m.start()
                    + text[m.start()..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
            }
        }

        results
    }
}

/// Returns the ASCII digits of `text` as numeric values.
pub(crate) fn digits(text: &str) -> Vec<u32> {
    text.chars().filter_map(|c| c.to_digit(10)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_labels() {
        assert_eq!(EntityType::EmailAddress.to_string(), "EMAIL_ADDRESS");
        assert_eq!(EntityType::UsSsn.as_str(), "US_SSN");
    }

    #[test]
    fn test_span_relations() {
        let outer = RecognizerResult::new(EntityType::CreditCard, 0, 16, 1.0);
        let inner = RecognizerResult::new(EntityType::PhoneNumber, 3, 13, 0.75);
        let disjoint = RecognizerResult::new(EntityType::Url, 16, 20, 0.6);

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.overlaps(&inner));
        assert!(!outer.overlaps(&disjoint));
        assert_eq!(inner.len(), 10);
    }
}
