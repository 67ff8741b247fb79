//! Replaces analyzer findings with placeholders.
//!
//! Findings are first reduced to a set of non-overlapping spans:
//! spans already covered by earlier ones are dropped (on identical spans
//! the higher score wins) and a span that partially overlaps is trimmed to
//! start where the furthest earlier span ends. Each surviving span is then
//! rewritten by the [`Operator`] configured for its entity type.

use crate::domain::{EntityType, RecognizerResult};
use std::collections::HashMap;
use tracing::{debug, warn};

/// How a detected span is rewritten.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// Replace with `new_value`, or `<ENTITY_TYPE>` when unset
    Replace { new_value: Option<String> },
    /// Remove the span entirely
    Redact,
    /// Overwrite up to `chars_to_mask` characters with `masking_char`
    Mask {
        masking_char: char,
        chars_to_mask: usize,
        from_end: bool,
    },
}

impl Operator {
    /// The default operator: replace with the entity label.
    pub fn replace() -> Self {
        Self::Replace { new_value: None }
    }

    /// Masks every character of the span.
    pub fn mask_all(masking_char: char) -> Self {
        Self::Mask {
            masking_char,
            chars_to_mask: usize::MAX,
            from_end: false,
        }
    }

    /// Produces the replacement for `original`.
    pub fn apply(&self, original: &str, entity_type: EntityType) -> String {
        match self {
            Self::Replace { new_value: Some(value) } => value.clone(),
            Self::Replace { new_value: None } => format!("<{}>", entity_type),
            Self::Redact => String::new(),
            Self::Mask {
                masking_char,
                chars_to_mask,
                from_end,
            } => {
                let total = original.chars().count();
                let masked = (*chars_to_mask).min(total);
                let (mask_from, mask_to) = if *from_end {
                    (total - masked, total)
                } else {
                    (0, masked)
                };
                original
                    .chars()
                    .enumerate()
                    .map(|(i, c)| {
                        if (mask_from..mask_to).contains(&i) {
                            *masking_char
                        } else {
                            c
                        }
                    })
                    .collect()
            }
        }
    }
}

impl Default for Operator {
    fn default() -> Self {
        Self::replace()
    }
}

/// One rewritten span, positioned in the anonymized text.
#[derive(Debug, Clone, PartialEq)]
pub struct AnonymizedItem {
    pub entity_type: EntityType,
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

/// Anonymized text plus a record of every rewrite applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnonymizedText {
    pub text: String,
    pub items: Vec<AnonymizedItem>,
}

/// Rewrites analyzer findings in text.
#[derive(Debug, Clone, Default)]
pub struct Anonymizer {
    default_operator: Operator,
    operators: HashMap<EntityType, Operator>,
}

impl Anonymizer {
    /// Creates an anonymizer that replaces every finding with `<ENTITY_TYPE>`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operator used for entity types without a specific one.
    pub fn with_default_operator(mut self, operator: Operator) -> Self {
        self.default_operator = operator;
        self
    }

    /// Sets the operator for one entity type.
    pub fn with_operator(mut self, entity_type: EntityType, operator: Operator) -> Self {
        self.operators.insert(entity_type, operator);
        self
    }

    fn operator_for(&self, entity_type: EntityType) -> &Operator {
        self.operators
            .get(&entity_type)
            .unwrap_or(&self.default_operator)
    }

    /// Reduces findings to non-overlapping spans in text order.
    pub fn resolve_conflicts(text: &str, findings: &[RecognizerResult]) -> Vec<RecognizerResult> {
        let mut sorted: Vec<RecognizerResult> = findings
            .iter()
            .filter(|r| {
                let usable = !r.is_empty() && text.get(r.start..r.end).is_some();
                if !usable {
                    warn!(
                        entity = %r.entity_type,
                        start = r.start,
                        end = r.end,
                        "ignoring finding outside text bounds"
                    );
                }
                usable
            })
            .cloned()
            .collect();

        sorted.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(b.end.cmp(&a.end))
                .then(b.score.total_cmp(&a.score))
        });

        let mut kept: Vec<RecognizerResult> = Vec::with_capacity(sorted.len());
        let mut covered_to = 0;
        for mut result in sorted {
            if result.end <= covered_to {
                continue;
            }
            result.start = result.start.max(covered_to);
            covered_to = result.end;
            kept.push(result);
        }
        kept
    }

    /// Rewrites every finding in `text`.
    pub fn anonymize(&self, text: &str, findings: &[RecognizerResult]) -> AnonymizedText {
        let spans = Self::resolve_conflicts(text, findings);

        let mut output = String::with_capacity(text.len());
        let mut items = Vec::with_capacity(spans.len());
        let mut cursor = 0;

        for span in &spans {
            output.push_str(&text[cursor..span.start]);

            let replacement = self
                .operator_for(span.entity_type)
                .apply(&text[span.start..span.end], span.entity_type);
            let start = output.len();
            output.push_str(&replacement);

            items.push(AnonymizedItem {
                entity_type: span.entity_type,
                start,
                end: output.len(),
                replacement,
            });
            cursor = span.end;
        }
        output.push_str(&text[cursor..]);

        debug!(replaced = items.len(), "anonymized text");
        AnonymizedText {
            text: output,
            items,
        }
    }
}
