//! Response formatting.
//!
//! A reply is one randomly chosen response template, optionally followed by
//! an "Examples" section and a "Resources" section taken from the intent's
//! `additional_info`.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::AppError;
use crate::models::IntentDefinition;

/// Assemble the reply text for a matched intent
pub fn format_response<R: Rng + ?Sized>(
    intent: &IntentDefinition,
    rng: &mut R,
) -> Result<String, AppError> {
    let mut response = intent
        .responses
        .choose(rng)
        .cloned()
        .ok_or_else(|| AppError::Validation(format!("intent '{}' has no responses", intent.tag)))?;

    if let Some(info) = &intent.additional_info {
        if let Some(examples) = &info.examples {
            let lines: Vec<String> = examples
                .iter()
                .map(|ex| format!("Q: {} - A: {}", ex.question, ex.answer()))
                .collect();
            response.push_str("\n\nExamples:\n");
            response.push_str(&lines.join("\n"));
        }
        if let Some(resources) = &info.resources {
            let lines: Vec<String> = resources
                .iter()
                .map(|res| format!("{}: {}", res.topic, res.url))
                .collect();
            response.push_str("\n\nResources:\n");
            response.push_str(&lines.join("\n"));
        }
    }

    Ok(response)
}
