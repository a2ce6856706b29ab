//! Classifier command implementations (classify, categories)

use anyhow::Result;
use serde::Serialize;
use spendwise_core::{CategoryClassifier, EngineConfig};

use super::{percent, print_json};

#[derive(Serialize)]
struct ClassifyOutput<'a> {
    description: &'a str,
    category: String,
    confidence: rust_decimal::Decimal,
    auto_fill: bool,
}

pub fn cmd_classify(config: &EngineConfig, description: &str, json: bool) -> Result<()> {
    let classifier = CategoryClassifier::from_config(&config.classifier);
    let classification = classifier.classify(description);
    let auto_fill = classifier
        .suggest(description, config.classifier.auto_fill_threshold)
        .is_some();

    if json {
        return print_json(&ClassifyOutput {
            description,
            category: classification.category,
            confidence: classification.confidence,
            auto_fill,
        });
    }

    println!();
    println!("🏷️  {}", description);
    println!("   Category:   {}", classification.category);
    println!("   Confidence: {}", percent(classification.confidence));
    if auto_fill {
        println!("   ✓ Confident enough to auto-fill");
    } else {
        println!(
            "   \x1b[2mBelow the {} auto-fill threshold\x1b[0m",
            percent(config.classifier.auto_fill_threshold)
        );
    }

    Ok(())
}

pub fn cmd_categories(config: &EngineConfig, json: bool) -> Result<()> {
    let classifier = CategoryClassifier::from_config(&config.classifier);
    let categories = classifier.categories();

    if json {
        return print_json(&categories);
    }

    println!();
    println!("🏷️  Categories ({})", categories.len());
    println!("   ─────────────────────────────────────────────────────────────");
    for rule in classifier.rules() {
        println!("   {:20} {}", rule.category, rule.keywords.join(", "));
    }
    println!("   {:20} \x1b[2m(fallback)\x1b[0m", spendwise_core::OTHER_CATEGORY);

    Ok(())
}
