//! Engine configuration
//!
//! Classifier rules and insight/trend thresholds, loaded from TOML.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, else the override in the data dir
//!    (~/.local/share/spendwise/engine.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::classifier::{CategoryRule, ClassifierConfig};
use crate::error::{Error, Result};
use crate::insights::{InsightConfig, MonthMatching};
use crate::trends::TrendConfig;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineConfig {
    pub classifier: ClassifierConfig,
    pub insights: InsightConfig,
    pub trends: TrendConfig,
}

impl EngineConfig {
    /// Load config from `path`, the data dir override, or the embedded default
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading engine config");
                fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?
            }
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => {
                    debug!(path = %path.display(), "Loading engine config override");
                    fs::read_to_string(&path).map_err(|e| {
                        Error::Config(format!("Failed to read {}: {}", path.display(), e))
                    })?
                }
                None => DEFAULT_CONFIG.to_string(),
            },
        };

        Self::from_toml(&content)
    }

    /// Parse config from TOML content, filling gaps with defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)?;
        let mut config = EngineConfig::default();

        if let Some(classifier) = raw.classifier {
            if let Some(threshold) = classifier.auto_fill_threshold {
                let threshold = threshold.to_decimal("classifier.auto_fill_threshold")?;
                if threshold < Decimal::ZERO || threshold > Decimal::ONE {
                    return Err(Error::Config(format!(
                        "classifier.auto_fill_threshold must be between 0 and 1, got {}",
                        threshold
                    )));
                }
                config.classifier.auto_fill_threshold = threshold;
            }
            if let Some(categories) = classifier.categories {
                config.classifier.rules = parse_rules(categories)?;
            }
        }

        if let Some(insights) = raw.insights {
            if let Some(ratio) = insights.near_limit_ratio {
                let ratio = ratio.to_decimal("insights.near_limit_ratio")?;
                if ratio <= Decimal::ZERO {
                    return Err(Error::Config(format!(
                        "insights.near_limit_ratio must be positive, got {}",
                        ratio
                    )));
                }
                config.insights.near_limit_ratio = ratio;
            }
            if let Some(threshold) = insights.projection_threshold {
                let threshold = threshold.to_decimal("insights.projection_threshold")?;
                if threshold < Decimal::ZERO {
                    return Err(Error::Config(format!(
                        "insights.projection_threshold must not be negative, got {}",
                        threshold
                    )));
                }
                config.insights.projection_threshold = threshold;
            }
            if let Some(matching) = insights.month_matching {
                config.insights.month_matching =
                    MonthMatching::from_str(&matching).map_err(Error::Config)?;
            }
        }

        if let Some(trends) = raw.trends {
            if let Some(window) = trends.window {
                if window < 2 {
                    return Err(Error::Config(format!(
                        "trends.window must be at least 2, got {}",
                        window
                    )));
                }
                config.trends.window = window;
            }
            if let Some(max_points) = trends.max_points {
                if max_points == 0 {
                    return Err(Error::Config("trends.max_points must be at least 1".into()));
                }
                config.trends.max_points = max_points;
            }
        }

        Ok(config)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("spendwise").join("engine.toml"))
}

/// Build ordered rules from config entries
fn parse_rules(categories: Vec<RawCategory>) -> Result<Vec<CategoryRule>> {
    let mut rules: Vec<CategoryRule> = Vec::with_capacity(categories.len());

    for raw in categories {
        let name = raw.name.trim();
        if name.is_empty() {
            return Err(Error::Config("classifier category with empty name".into()));
        }
        if rules.iter().any(|r| r.category == name) {
            return Err(Error::Config(format!(
                "classifier category listed twice: {}",
                name
            )));
        }

        let rule = CategoryRule::new(name, raw.keywords.as_slice());
        if rule.keywords.is_empty() {
            warn!(category = name, "Classifier category has no keywords");
        }
        rules.push(rule);
    }

    Ok(rules)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    classifier: Option<RawClassifier>,
    insights: Option<RawInsights>,
    trends: Option<RawTrends>,
}

#[derive(Debug, Deserialize)]
struct RawClassifier {
    auto_fill_threshold: Option<RawNumber>,
    categories: Option<Vec<RawCategory>>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    name: String,
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    near_limit_ratio: Option<RawNumber>,
    projection_threshold: Option<RawNumber>,
    month_matching: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTrends {
    window: Option<usize>,
    max_points: Option<usize>,
}

/// TOML number written either as an integer or a float
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Integer(i64),
    Float(f64),
}

impl RawNumber {
    fn to_decimal(&self, key: &str) -> Result<Decimal> {
        match self {
            RawNumber::Integer(i) => Ok(Decimal::from(*i)),
            // Go through the shortest decimal text so 0.8 stays 0.8
            RawNumber::Float(f) => Decimal::from_str(&f.to_string())
                .map_err(|e| Error::Config(format!("{} is not a valid number: {}", key, e))),
        }
    }
}
