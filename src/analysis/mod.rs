//! PII analysis over extracted page text.
//!
//! The [`PiiAnalyzer`] trait is the seam between the redaction stage and
//! whatever detects sensitive spans. [`PatternAnalyzer`] is the built-in
//! implementation, running every registered [`PatternMatcher`] over the
//! text and collecting their findings.

use crate::domain::{
    CreditCardMatcher, EmailMatcher, EntityType, IbanMatcher, IpAddressMatcher, PatternMatcher,
    PhoneNumberMatcher, RecognizerResult, UrlMatcher, UsSsnMatcher,
};
use crate::error::{RedactorError, RedactorResult};
use tracing::debug;

/// Detects PII spans in a piece of text.
pub trait PiiAnalyzer: Send + Sync {
    /// Returns every finding in `text`, sorted by start offset.
    ///
    /// Fails with [`RedactorError::UnsupportedLanguage`] when no recognizer
    /// handles `language`.
    fn analyze(&self, text: &str, language: &str) -> RedactorResult<Vec<RecognizerResult>>;

    /// Returns a human-readable name for this analyzer.
    fn name(&self) -> &str;
}

/// Regex and checksum based analyzer.
pub struct PatternAnalyzer {
    recognizers: Vec<Box<dyn PatternMatcher>>,
    /// Findings scoring below this are dropped
    score_threshold: f64,
    /// When set, only these entity types are reported
    entities: Option<Vec<EntityType>>,
}

impl PatternAnalyzer {
    /// Creates an analyzer with every built-in recognizer registered.
    pub fn new() -> Self {
        Self {
            recognizers: vec![
                Box::new(EmailMatcher::new()),
                Box::new(PhoneNumberMatcher::new()),
                Box::new(UsSsnMatcher::new()),
                Box::new(CreditCardMatcher::new()),
                Box::new(IpAddressMatcher::new()),
                Box::new(UrlMatcher::new()),
                Box::new(IbanMatcher::new()),
            ],
            score_threshold: 0.0,
            entities: None,
        }
    }

    /// Creates an analyzer with no recognizers registered.
    pub fn empty() -> Self {
        Self {
            recognizers: Vec::new(),
            score_threshold: 0.0,
            entities: None,
        }
    }

    /// Registers an additional recognizer.
    pub fn with_recognizer(mut self, recognizer: Box<dyn PatternMatcher>) -> Self {
        self.recognizers.push(recognizer);
        self
    }

    /// Sets the minimum score a finding needs to be reported.
    pub fn with_score_threshold(mut self, threshold: f64) -> Self {
        self.score_threshold = threshold;
        self
    }

    /// Restricts reported findings to the given entity types.
    pub fn with_entities(mut self, entities: Vec<EntityType>) -> Self {
        self.entities = Some(entities);
        self
    }

    fn wants(&self, entity_type: EntityType) -> bool {
        self.entities
            .as_ref()
            .map_or(true, |allowed| allowed.contains(&entity_type))
    }
}

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PiiAnalyzer for PatternAnalyzer {
    fn analyze(&self, text: &str, language: &str) -> RedactorResult<Vec<RecognizerResult>> {
        let active: Vec<&dyn PatternMatcher> = self
            .recognizers
            .iter()
            .map(|r| r.as_ref())
            .filter(|r| r.supported_language() == language)
            .collect();

        if active.is_empty() {
            return Err(RedactorError::UnsupportedLanguage {
                language: language.to_string(),
            });
        }

        let mut results: Vec<RecognizerResult> = active
            .iter()
            .filter(|r| self.wants(r.entity_type()))
            .flat_map(|r| r.find_all(text))
            .filter(|result| result.score >= self.score_threshold)
            .collect();

        results.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

        debug!(
            findings = results.len(),
            text_len = text.len(),
            "analyzed text for PII"
        );
        Ok(results)
    }

    fn name(&self) -> &str {
        "PatternAnalyzer"
    }
}
