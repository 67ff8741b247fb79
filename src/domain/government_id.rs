//! US Social Security Number recognition.

use super::{EntityType, PatternMatcher};
use once_cell::sync::Lazy;
use regex::Regex;

/// US Social Security Number matcher.
///
/// Accepts `AAA-GG-SSSS`, `AAA GG SSSS`, `AAA.GG.SSSS` and nine bare
/// digits. The two separators must agree.
#[derive(Debug, Clone, Default)]
pub struct UsSsnMatcher;

impl UsSsnMatcher {
    pub fn new() -> Self {
        Self
    }

    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"\b(\d{3})([- .]?)(\d{2})([- .]?)(\d{4})\b").expect("Valid SSN regex")
        });
        &PATTERN
    }

    /// Validates the area, group and serial numbers against SSA allocation rules.
    ///
    /// # Rules
    /// - Area is never 000, 666 or 900-999
    /// - Group is never 00
    /// - Serial is never 0000
    /// - A number made of one repeated digit is never issued
    pub fn validate_parts(area: &str, group: &str, serial: &str) -> bool {
        let all_same = format!("{}{}{}", area, group, serial)
            .chars()
            .collect::<Vec<_>>()
            .windows(2)
            .all(|w| w[0] == w[1]);

        area != "000"
            && area != "666"
            && !area.starts_with('9')
            && group != "00"
            && serial != "0000"
            && !all_same
    }
}

impl PatternMatcher for UsSsnMatcher {
    fn entity_type(&self) -> EntityType {
        EntityType::UsSsn
    }

    fn pattern(&self) -> &Regex {
        Self::regex()
    }

    fn score(&self) -> f64 {
        0.85
    }

    fn validate(&self, candidate: &str) -> bool {
        let Some(caps) = self.pattern().captures(candidate) else {
            return false;
        };
        let (Some(area), Some(sep1), Some(group), Some(sep2), Some(serial)) =
            (caps.get(1), caps.get(2), caps.get(3), caps.get(4), caps.get(5))
        else {
            return false;
        };

        sep1.as_str() == sep2.as_str()
            && Self::validate_parts(area.as_str(), group.as_str(), serial.as_str())
    }
}
