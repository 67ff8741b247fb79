//! Network identifier recognition: IP addresses and URLs.

use super::{EntityType, PatternMatcher};
use once_cell::sync::Lazy;
use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};

/// IPv4 and IPv6 address matcher.
///
/// Candidates are confirmed by parsing them with the standard library's
/// address parsers, so `999.1.1.1` or a clock time like `10:30:15` never
/// match.
#[derive(Debug, Clone, Default)]
pub struct IpAddressMatcher;

impl IpAddressMatcher {
    pub fn new() -> Self {
        Self
    }

    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"\b(?:\d{1,3}\.){3}\d{1,3}\b|(?:[0-9A-Fa-f]{0,4}:){2,7}(?:[0-9A-Fa-f]{1,4}|(?:\d{1,3}\.){3}\d{1,3})?",
            )
            .expect("Valid IP address regex")
        });
        &PATTERN
    }
}

impl PatternMatcher for IpAddressMatcher {
    fn entity_type(&self) -> EntityType {
        EntityType::IpAddress
    }

    fn pattern(&self) -> &Regex {
        Self::regex()
    }

    fn score(&self) -> f64 {
        0.95
    }

    fn validate(&self, candidate: &str) -> bool {
        if candidate.parse::<Ipv4Addr>().is_ok() {
            return true;
        }
        // "::" alone parses as the unspecified address but is never PII
        candidate.parse::<Ipv6Addr>().is_ok()
            && candidate.chars().filter(|c| c.is_ascii_hexdigit()).count() >= 2
    }
}

/// URL matcher for `http://`, `https://` and bare `www.` links.
///
/// Trailing sentence punctuation is left out of the match.
#[derive(Debug, Clone, Default)]
pub struct UrlMatcher;

impl UrlMatcher {
    pub fn new() -> Self {
        Self
    }

    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r#"(?i)\b(?:https?://|www\.)[^\s<>"'()\[\]{}]*[^\s<>"'()\[\]{}.,;:!?]"#,
            )
            .expect("Valid URL regex")
        });
        &PATTERN
    }
}

impl PatternMatcher for UrlMatcher {
    fn entity_type(&self) -> EntityType {
        EntityType::Url
    }

    fn pattern(&self) -> &Regex {
        Self::regex()
    }

    fn score(&self) -> f64 {
        0.6
    }

    fn validate(&self, candidate: &str) -> bool {
        let host = candidate
            .split_once("://")
            .map_or(candidate, |(_, rest)| rest)
            .split(|c: char| matches!(c, '/' | '?' | '#'))
            .next()
            .unwrap_or_default();
        host.contains('.') && !host.starts_with('.') && !host.ends_with('.')
    }
}
