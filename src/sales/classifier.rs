//! Rule-based mapping from free-text product descriptions to slot counts.
//!
//! Rules are kept as an ordered list and evaluated top to bottom; the first rule
//! that produces a count wins. Recurring plans sit above the session-package
//! pattern so a plan name that happens to carry "(N sessões)" still resolves to
//! the plan's count.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::errors::{MetricsError, Result};

pub const DEFAULT_SESSION_PATTERN: &str = r"\(([0-9]+)\s*SESS";

static DEFAULT_CLASSIFIER: Lazy<SlotClassifier> = Lazy::new(SlotClassifier::default);

/// Classifies a description with the built-in rule set.
pub fn classify(description: Option<&str>) -> u32 {
    DEFAULT_CLASSIFIER.classify(description)
}

/// Upper-cases `text` and strips the Latin diacritics found in Portuguese
/// product names so keyword matching ignores accents. Both precomposed letters
/// and decomposed ones (base letter plus combining mark) fold the same way.
pub fn fold_text(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .filter(|ch| !is_combining_mark(*ch))
        .map(fold_char)
        .collect()
}

fn is_combining_mark(ch: char) -> bool {
    matches!(ch, '\u{0300}'..='\u{036F}')
}

fn fold_char(ch: char) -> char {
    match ch {
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ç' => 'C',
        'Ñ' => 'N',
        other => other,
    }
}

/// Keyword that maps to a fixed slot count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub slots: u32,
}

impl KeywordRule {
    pub fn new(keyword: impl Into<String>, slots: u32) -> Self {
        Self {
            keyword: keyword.into(),
            slots,
        }
    }
}

/// Serializable description of a rule set.
///
/// Rules are evaluated as: every `recurring_plans` entry in order, then the
/// session-package pattern, then every `single_sessions` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "ClassifierConfig::default_recurring_plans")]
    pub recurring_plans: Vec<KeywordRule>,
    #[serde(default = "ClassifierConfig::default_session_pattern")]
    pub session_pattern: String,
    #[serde(default = "ClassifierConfig::default_single_sessions")]
    pub single_sessions: Vec<KeywordRule>,
}

impl ClassifierConfig {
    pub fn default_recurring_plans() -> Vec<KeywordRule> {
        vec![
            KeywordRule::new("SEMESTRAL", 24),
            KeywordRule::new("TRIMESTRAL", 12),
            KeywordRule::new("MENSAL", 4),
        ]
    }

    pub fn default_session_pattern() -> String {
        DEFAULT_SESSION_PATTERN.into()
    }

    pub fn default_single_sessions() -> Vec<KeywordRule> {
        vec![KeywordRule::new("AVULSA", 1)]
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            recurring_plans: Self::default_recurring_plans(),
            session_pattern: Self::default_session_pattern(),
            single_sessions: Self::default_single_sessions(),
        }
    }
}

#[derive(Debug, Clone)]
enum RuleMatcher {
    Contains { keyword: String, slots: u32 },
    /// Slot count read from the first capture group of the first match.
    Captured(Regex),
}

/// A single (predicate, result) pair in the rule list.
#[derive(Debug, Clone)]
pub struct SlotRule {
    label: String,
    matcher: RuleMatcher,
}

impl SlotRule {
    pub fn keyword(keyword: &str, slots: u32) -> Self {
        let keyword = fold_text(keyword);
        Self {
            label: keyword.clone(),
            matcher: RuleMatcher::Contains { keyword, slots },
        }
    }

    /// Builds a rule that extracts the count from capture group 1 of `pattern`.
    pub fn session_count(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|err| MetricsError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: err.to_string(),
            })?;
        if regex.captures_len() < 2 {
            return Err(MetricsError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: "pattern needs a capture group for the session count".into(),
            });
        }
        Ok(Self {
            label: "SESSION_PACKAGE".into(),
            matcher: RuleMatcher::Captured(regex),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Evaluates the rule against already folded text.
    pub fn apply(&self, folded: &str) -> Option<u32> {
        match &self.matcher {
            RuleMatcher::Contains { keyword, slots } => {
                if folded.contains(keyword.as_str()) {
                    Some(*slots)
                } else {
                    None
                }
            }
            // A count that does not fit in u32 falls through to the next rule.
            RuleMatcher::Captured(regex) => regex
                .captures(folded)
                .and_then(|captures| captures.get(1))
                .and_then(|count| count.as_str().parse().ok()),
        }
    }
}

/// Outcome of classifying one description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub slots: u32,
    /// Label of the rule that fired, `None` when nothing matched.
    pub rule: Option<String>,
}

impl Classification {
    fn unmatched() -> Self {
        Self {
            slots: 0,
            rule: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SlotClassifier {
    rules: Vec<SlotRule>,
}

impl SlotClassifier {
    pub fn new(rules: Vec<SlotRule>) -> Self {
        Self { rules }
    }

    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        let mut rules = Vec::with_capacity(
            config.recurring_plans.len() + config.single_sessions.len() + 1,
        );
        rules.extend(
            config
                .recurring_plans
                .iter()
                .map(|rule| SlotRule::keyword(&rule.keyword, rule.slots)),
        );
        rules.push(SlotRule::session_count(&config.session_pattern)?);
        rules.extend(
            config
                .single_sessions
                .iter()
                .map(|rule| SlotRule::keyword(&rule.keyword, rule.slots)),
        );
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[SlotRule] {
        &self.rules
    }

    pub fn classify(&self, description: Option<&str>) -> u32 {
        self.classify_detailed(description).slots
    }

    pub fn classify_detailed(&self, description: Option<&str>) -> Classification {
        let text = match description.map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => return Classification::unmatched(),
        };
        let folded = fold_text(text);
        self.rules
            .iter()
            .find_map(|rule| {
                rule.apply(&folded).map(|slots| Classification {
                    slots,
                    rule: Some(rule.label().to_string()),
                })
            })
            .unwrap_or_else(Classification::unmatched)
    }
}

impl Default for SlotClassifier {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default()).expect("built-in rules compile")
    }
}
