//! Intent Store.
//!
//! Static catalog of intents loaded once from a JSON file. The file is an
//! array of objects with `tag`, `patterns`, `responses` and an optional
//! `additional_info` block.

use crate::error::AppError;
use crate::models::IntentDefinition;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};
use validator::Validate;

/// Ordered, validated collection of intents
#[derive(Debug, Clone)]
pub struct IntentStore {
    intents: Vec<IntentDefinition>,
}

impl IntentStore {
    /// Build a store from already parsed definitions
    pub fn new(intents: Vec<IntentDefinition>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for intent in &intents {
            intent
                .validate()
                .map_err(|e| AppError::Validation(format!("intent '{}': {}", intent.tag, e)))?;
            if !seen.insert(intent.tag.as_str()) {
                warn!(
                    "Duplicate intent tag '{}'; the first definition answers",
                    intent.tag
                );
            }
            if intent.patterns.is_empty() {
                warn!("Intent '{}' has no patterns and can never be predicted", intent.tag);
            }
            if intent.responses.is_empty() {
                warn!("Intent '{}' has no responses; answering it will fail", intent.tag);
            }
        }
        Ok(Self { intents })
    }

    /// Parse a store from a JSON string
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let intents: Vec<IntentDefinition> = serde_json::from_str(json)?;
        Self::new(intents)
    }

    /// Load the catalog from disk
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AppError::IntentsNotFound(path.display().to_string()),
            _ => AppError::Io(e),
        })?;
        let store = Self::from_json(&raw)?;
        if store.is_empty() {
            warn!("Intents file {:?} contains no intents", path);
        }
        info!(
            "Loaded {} intents ({} patterns) from {:?}",
            store.len(),
            store.pattern_count(),
            path
        );
        Ok(store)
    }

    /// Flatten the catalog into `(pattern, tag)` training pairs, in catalog order
    pub fn training_pairs(&self) -> Vec<(&str, &str)> {
        self.intents
            .iter()
            .flat_map(|intent| {
                intent
                    .patterns
                    .iter()
                    .map(move |p| (p.as_str(), intent.tag.as_str()))
            })
            .collect()
    }

    /// First intent carrying `tag`
    pub fn find(&self, tag: &str) -> Option<&IntentDefinition> {
        self.intents.iter().find(|intent| intent.tag == tag)
    }

    /// Distinct tags, in catalog order
    pub fn tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.intents
            .iter()
            .map(|i| i.tag.as_str())
            .filter(|t| seen.insert(*t))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IntentDefinition> {
        self.intents.iter()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn pattern_count(&self) -> usize {
        self.intents.iter().map(|i| i.patterns.len()).sum()
    }
}
