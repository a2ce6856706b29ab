//! Keyword-based category classifier
//!
//! Assigns a spending category to a free-text description by substring
//! matching against an ordered rule table. The first rule with any matching
//! keyword wins, so rule order is part of the contract: "taxi to the library"
//! lands in Education because Education is listed before Transportation.
//!
//! Descriptions that match nothing fall back to [`OTHER_CATEGORY`] with a low
//! confidence instead of failing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Catch-all category, never matched by keywords
pub const OTHER_CATEGORY: &str = "Other";

/// Built-in rule table, in evaluation order
const DEFAULT_RULES: &[(&str, &[&str])] = &[
    (
        "Food & Dining",
        &[
            "restaurant",
            "food",
            "meal",
            "pizza",
            "coffee",
            "lunch",
            "dinner",
            "breakfast",
            "snack",
            "cafeteria",
        ],
    ),
    (
        "Education",
        &[
            "book", "tuition", "course", "textbook", "supplies", "lab", "library", "academic",
            "school",
        ],
    ),
    (
        "Transportation",
        &[
            "gas", "uber", "bus", "train", "parking", "taxi", "metro", "fuel", "car",
        ],
    ),
    (
        "Entertainment",
        &[
            "movie", "game", "music", "netflix", "spotify", "concert", "party", "club",
        ],
    ),
    (
        "Shopping",
        &[
            "amazon", "store", "clothes", "shopping", "retail", "purchase", "buy",
        ],
    ),
    (
        "Health",
        &[
            "pharmacy", "doctor", "medical", "health", "medicine", "clinic", "hospital",
        ],
    ),
    (
        "Utilities",
        &["internet", "phone", "electricity", "water", "bill", "utility"],
    ),
];

/// A category and the keywords that select it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    /// Stored lower-cased
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new<S: AsRef<str>>(category: impl Into<String>, keywords: &[S]) -> Self {
        Self {
            category: category.into(),
            keywords: keywords
                .iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Number of keywords found in an already lower-cased description
    fn match_count(&self, description: &str) -> usize {
        self.keywords
            .iter()
            .filter(|k| description.contains(k.as_str()))
            .count()
    }
}

/// Result of classifying a description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: String,
    /// Heuristic score in [0, 1]
    pub confidence: Decimal,
}

impl Classification {
    fn other() -> Self {
        Self {
            category: OTHER_CATEGORY.to_string(),
            confidence: fallback_confidence(),
        }
    }

    pub fn is_other(&self) -> bool {
        self.category == OTHER_CATEGORY
    }
}

/// Confidence for a description that matched no rule
fn fallback_confidence() -> Decimal {
    Decimal::new(3, 1)
}

/// Confidence for `matches` keyword hits: 0.6 + 0.15 per hit, capped at 0.95
fn match_confidence(matches: usize) -> Decimal {
    let base = Decimal::new(6, 1);
    let per_match = Decimal::new(15, 2);
    let cap = Decimal::new(95, 2);
    (base + per_match * Decimal::from(matches)).min(cap)
}

/// Classifier settings
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Rules in evaluation order
    pub rules: Vec<CategoryRule>,
    /// Minimum confidence (exclusive) for live auto-fill suggestions
    pub auto_fill_threshold: Decimal,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            auto_fill_threshold: Decimal::new(6, 1),
        }
    }
}

/// The built-in rule table
pub fn default_rules() -> Vec<CategoryRule> {
    DEFAULT_RULES
        .iter()
        .map(|(category, keywords)| CategoryRule::new(*category, *keywords))
        .collect()
}

/// Rule-based description classifier
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    rules: Vec<CategoryRule>,
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryClassifier {
    /// Create a classifier with the built-in rules
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Create a classifier with custom rules
    ///
    /// Rules naming the catch-all category are dropped; it is always the
    /// fallback and never matched directly.
    pub fn with_rules(rules: Vec<CategoryRule>) -> Self {
        let rules = rules
            .into_iter()
            .filter(|r| {
                if r.category == OTHER_CATEGORY {
                    debug!("Ignoring keyword rule for catch-all category");
                    return false;
                }
                true
            })
            .collect();
        Self { rules }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::with_rules(config.rules.clone())
    }

    /// Classify a description
    pub fn classify(&self, description: &str) -> Classification {
        let desc = description.to_lowercase();

        for rule in &self.rules {
            let matches = rule.match_count(&desc);
            if matches > 0 {
                return Classification {
                    category: rule.category.clone(),
                    confidence: match_confidence(matches),
                };
            }
        }

        Classification::other()
    }

    /// Classification for live auto-fill, if confident enough
    pub fn suggest(&self, description: &str, min_confidence: Decimal) -> Option<Classification> {
        if description.trim().is_empty() {
            return None;
        }
        let classification = self.classify(description);
        (classification.confidence > min_confidence).then_some(classification)
    }

    /// Category labels in evaluation order, catch-all last
    pub fn categories(&self) -> Vec<&str> {
        self.rules
            .iter()
            .map(|r| r.category.as_str())
            .chain(std::iter::once(OTHER_CATEGORY))
            .collect()
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }
}

/// Classify a description with the built-in rules
pub fn classify(description: &str) -> Classification {
    CategoryClassifier::new().classify(description)
}
