//! Runtime settings.
//!
//! Values come from the environment (a `.env` file is loaded by `main`
//! beforehand), then command-line flags override them. Every value has a
//! default so the bot starts with no configuration at all.

use crate::brain::Language;
use crate::error::AppError;
use crate::fs_manager::PortablePathManager;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use validator::Validate;

pub const ENV_INTENTS: &str = "PREPBOT_INTENTS";
pub const ENV_LANGUAGE: &str = "PREPBOT_LANGUAGE";
pub const ENV_MAX_ITER: &str = "PREPBOT_MAX_ITER";
pub const ENV_C: &str = "PREPBOT_C";
pub const ENV_SEED: &str = "PREPBOT_SEED";
pub const ENV_LOG_FORMAT: &str = "PREPBOT_LOG_FORMAT";

pub const DEFAULT_MAX_ITER: usize = 10_000;
pub const DEFAULT_C: f64 = 1.0;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("unknown log format '{}'", other))),
        }
    }
}

/// Settings for training the classifier and running the chat loop.
#[derive(Debug, Clone, Validate)]
pub struct Settings {
    /// Path of the intents catalog.
    pub intents_path: PathBuf,
    /// Language the user writes in and expects replies in.
    pub language: Language,
    /// Iteration cap for classifier training.
    #[validate(range(min = 1))]
    pub max_iter: usize,
    /// Inverse L2 regularization strength.
    #[validate(range(exclusive_min = 0.0))]
    pub regularization: f64,
    /// Seed for reproducible response selection.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            intents_path: PortablePathManager::intents_file(),
            language: Language::English,
            max_iter: DEFAULT_MAX_ITER,
            regularization: DEFAULT_C,
            seed: None,
        }
    }
}

impl Settings {
    /// Builds settings from `PREPBOT_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let mut settings = Self::default();

        if let Some(path) = read_var(ENV_INTENTS) {
            settings.intents_path = PathBuf::from(path);
        }
        if let Some(lang) = read_var(ENV_LANGUAGE) {
            settings.language = lang.parse()?;
        }
        if let Some(raw) = read_var(ENV_MAX_ITER) {
            settings.max_iter = parse_var(ENV_MAX_ITER, &raw)?;
        }
        if let Some(raw) = read_var(ENV_C) {
            settings.regularization = parse_var(ENV_C, &raw)?;
        }
        if let Some(raw) = read_var(ENV_SEED) {
            settings.seed = Some(parse_var(ENV_SEED, &raw)?);
        }

        settings.validate()?;
        Ok(settings)
    }
}

/// Log format from `PREPBOT_LOG_FORMAT`. Read on its own so logging can be
/// set up before the rest of the settings.
pub fn log_format_from_env() -> Result<LogFormat, AppError> {
    match read_var(ENV_LOG_FORMAT) {
        Some(raw) => raw.parse(),
        None => Ok(LogFormat::default()),
    }
}

fn read_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{} has an invalid value '{}': {}", name, raw, e)))
}
