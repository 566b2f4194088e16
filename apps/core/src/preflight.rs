//! Preflight Check System
//!
//! Verifies the intents catalog and the classifier before the bot starts
//! talking: the file exists and parses, there are enough tags, intents have
//! patterns and responses, and the trained model labels its own training
//! patterns correctly.

use crate::brain::{Chatbot, IntentStore};
use crate::config::Settings;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Below this training accuracy the catalog probably has overlapping patterns
const MIN_TRAINING_ACCURACY: f64 = 0.8;

/// Result of a single check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    /// Failure does not prevent the bot from running
    pub warning_only: bool,
    pub message: String,
    pub details: Option<String>,
}

impl CheckResult {
    fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            warning_only: false,
            message: message.to_string(),
            details: None,
        }
    }

    fn fail(name: &str, message: &str, details: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            warning_only: false,
            message: message.to_string(),
            details,
        }
    }

    fn warn(name: &str, message: &str, details: Option<String>) -> Self {
        Self {
            warning_only: true,
            ..Self::fail(name, message, details)
        }
    }
}

/// Complete preflight check report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreflightReport {
    pub all_passed: bool,
    pub ready_to_start: bool,
    pub checks: Vec<CheckResult>,
    pub training_accuracy: Option<f64>,
    pub summary: String,
}

/// Performs all preflight checks and returns a report
pub fn run_preflight(settings: &Settings) -> PreflightReport {
    info!("Running preflight checks on {:?}", settings.intents_path);

    let mut checks = Vec::new();
    let mut training_accuracy = None;

    // 1. File exists
    if settings.intents_path.exists() {
        checks.push(CheckResult::pass("intents_file", "Intents file found"));
    } else {
        checks.push(CheckResult::fail(
            "intents_file",
            "Intents file not found",
            Some(settings.intents_path.display().to_string()),
        ));
        return finish(checks, training_accuracy);
    }

    // 2. Parses and validates
    let store = match IntentStore::load(&settings.intents_path) {
        Ok(store) => {
            checks.push(CheckResult::pass(
                "intents_format",
                &format!("{} intents, {} patterns", store.len(), store.pattern_count()),
            ));
            store
        }
        Err(e) => {
            checks.push(CheckResult::fail(
                "intents_format",
                "Intents file could not be loaded",
                Some(e.to_string()),
            ));
            return finish(checks, training_accuracy);
        }
    };

    // 3. Enough tags to train on
    let trainable_tags = store
        .iter()
        .filter(|i| !i.patterns.is_empty())
        .map(|i| i.tag.as_str())
        .collect::<std::collections::HashSet<_>>()
        .len();
    if trainable_tags >= 2 {
        checks.push(CheckResult::pass(
            "tag_count",
            &format!("{} tags with patterns", trainable_tags),
        ));
    } else {
        checks.push(CheckResult::fail(
            "tag_count",
            "At least two tags with patterns are required",
            Some(format!("found {}", trainable_tags)),
        ));
    }

    // 4. Every intent reachable
    let unreachable: Vec<&str> = store
        .iter()
        .filter(|i| i.patterns.is_empty())
        .map(|i| i.tag.as_str())
        .collect();
    if unreachable.is_empty() {
        checks.push(CheckResult::pass("patterns", "Every intent has patterns"));
    } else {
        checks.push(CheckResult::warn(
            "patterns",
            "Some intents have no patterns and will never be predicted",
            Some(unreachable.join(", ")),
        ));
    }

    // 5. Every intent answerable
    let silent: Vec<&str> = store
        .iter()
        .filter(|i| i.responses.is_empty())
        .map(|i| i.tag.as_str())
        .collect();
    if silent.is_empty() {
        checks.push(CheckResult::pass("responses", "Every intent has responses"));
    } else {
        checks.push(CheckResult::warn(
            "responses",
            "Some intents have no responses and will answer with the fallback reply",
            Some(silent.join(", ")),
        ));
    }

    // 6. Training
    match Chatbot::train(store, settings) {
        Ok(bot) => {
            let accuracy = bot.training_accuracy();
            training_accuracy = Some(accuracy);
            checks.push(CheckResult::pass(
                "training",
                &format!(
                    "Trained {} tags on {} words",
                    bot.model().classes().len(),
                    bot.vocabulary_len()
                ),
            ));
            let message = format!("{:.1}% of training patterns recognized", accuracy * 100.0);
            if accuracy >= MIN_TRAINING_ACCURACY {
                checks.push(CheckResult::pass("training_accuracy", &message));
            } else {
                checks.push(CheckResult::warn(
                    "training_accuracy",
                    &message,
                    Some("patterns of different intents overlap heavily".to_string()),
                ));
            }
        }
        Err(e) => checks.push(CheckResult::fail(
            "training",
            "Classifier training failed",
            Some(e.to_string()),
        )),
    }

    finish(checks, training_accuracy)
}

fn finish(checks: Vec<CheckResult>, training_accuracy: Option<f64>) -> PreflightReport {
    let all_passed = checks.iter().all(|c| c.passed);
    let ready_to_start = checks.iter().all(|c| c.passed || c.warning_only);

    let summary = if all_passed {
        "All checks passed. Chatbot ready.".to_string()
    } else if ready_to_start {
        "Some checks produced warnings. Chatbot can start.".to_string()
    } else {
        "Critical checks failed. Chatbot cannot start.".to_string()
    };

    for check in &checks {
        if check.passed {
            info!("  ✅ {}: {}", check.name, check.message);
        } else {
            warn!("  ❌ {}: {}", check.name, check.message);
            if let Some(details) = &check.details {
                warn!("      Details: {}", details);
            }
        }
    }
    info!("Summary: {}", summary);

    PreflightReport {
        all_passed,
        ready_to_start,
        checks,
        training_accuracy,
        summary,
    }
}
