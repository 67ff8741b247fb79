//! Email address recognition.

use super::{EntityType, PatternMatcher};
use once_cell::sync::Lazy;
use regex::Regex;

/// Email address matcher.
///
/// Matches `local@domain.tld` where the top-level domain is at least two
/// letters. Candidates with empty labels (`a@b..com`) or a local part that
/// starts or ends with a dot are rejected.
#[derive(Debug, Clone, Default)]
pub struct EmailMatcher;

impl EmailMatcher {
    pub fn new() -> Self {
        Self
    }

    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"\b[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}\b")
                .expect("Valid email regex")
        });
        &PATTERN
    }
}

impl PatternMatcher for EmailMatcher {
    fn entity_type(&self) -> EntityType {
        EntityType::EmailAddress
    }

    fn pattern(&self) -> &Regex {
        Self::regex()
    }

    fn score(&self) -> f64 {
        1.0
    }

    fn validate(&self, candidate: &str) -> bool {
        let Some((local, domain)) = candidate.split_once('@') else {
            return false;
        };

        !local.is_empty()
            && !local.starts_with('.')
            && !local.ends_with('.')
            && domain
                .split('.')
                .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_extraction() {
        let matcher = EmailMatcher::new();
        let text = "Email Address: sarah.johnson@company.com, cc ops+alerts@mail.example.org";
        assert_eq!(
            matcher.extract_all(text),
            vec!["sarah.johnson@company.com", "ops+alerts@mail.example.org"]
        );
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        let matcher = EmailMatcher::new();
        assert!(matcher.extract_all("not an email: user@localhost").is_empty());
        assert!(!matcher.validate(".user@example.com"));
        assert!(!matcher.validate("user@-example.com"));
    }
}
