//! Settings Tests
//!
//! Environment variables are set per test with `temp_env` so tests do not
//! leak configuration into each other.

use crate::brain::Language;
use crate::config::{
    log_format_from_env, LogFormat, Settings, DEFAULT_C, DEFAULT_MAX_ITER, ENV_C, ENV_INTENTS, ENV_LANGUAGE,
    ENV_LOG_FORMAT, ENV_MAX_ITER, ENV_SEED,
};
use crate::error::AppError;
use std::path::PathBuf;

const ALL_VARS: [&str; 6] = [
    ENV_INTENTS,
    ENV_LANGUAGE,
    ENV_MAX_ITER,
    ENV_C,
    ENV_SEED,
    ENV_LOG_FORMAT,
];

#[test]
fn test_defaults_without_environment() {
    let unset: Vec<(&str, Option<&str>)> = ALL_VARS.iter().map(|v| (*v, None)).collect();
    temp_env::with_vars(unset, || {
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.language, Language::English);
        assert_eq!(settings.max_iter, DEFAULT_MAX_ITER);
        assert_eq!(settings.regularization, DEFAULT_C);
        assert_eq!(settings.seed, None);
        assert_eq!(log_format_from_env().unwrap(), LogFormat::Pretty);
        assert!(settings.intents_path.ends_with("intents.json"));
    });
}

#[test]
fn test_values_from_environment() {
    temp_env::with_vars(
        [
            (ENV_INTENTS, Some("/tmp/catalog.json")),
            (ENV_LANGUAGE, Some("hi")),
            (ENV_MAX_ITER, Some("500")),
            (ENV_C, Some("0.5")),
            (ENV_SEED, Some("42")),
            (ENV_LOG_FORMAT, Some("json")),
        ],
        || {
            let settings = Settings::from_env().unwrap();
            assert_eq!(settings.intents_path, PathBuf::from("/tmp/catalog.json"));
            assert_eq!(settings.language, Language::Hindi);
            assert_eq!(settings.max_iter, 500);
            assert!((settings.regularization - 0.5).abs() < f64::EPSILON);
            assert_eq!(settings.seed, Some(42));
            assert_eq!(log_format_from_env().unwrap(), LogFormat::Json);
        },
    );
}

#[test]
fn test_blank_values_fall_back_to_defaults() {
    temp_env::with_vars([(ENV_LANGUAGE, Some("  ")), (ENV_MAX_ITER, Some(""))], || {
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.language, Language::English);
        assert_eq!(settings.max_iter, DEFAULT_MAX_ITER);
    });
}

#[test]
fn test_unparsable_number_is_config_error() {
    temp_env::with_var(ENV_MAX_ITER, Some("lots"), || {
        let err = Settings::from_env().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains(ENV_MAX_ITER));
    });
}

#[test]
fn test_unsupported_language_is_config_error() {
    temp_env::with_var(ENV_LANGUAGE, Some("tlh"), || {
        assert!(matches!(Settings::from_env(), Err(AppError::Config(_))));
    });
}

#[test]
fn test_out_of_range_values_fail_validation() {
    temp_env::with_var(ENV_C, Some("-1"), || {
        assert!(matches!(Settings::from_env(), Err(AppError::Validation(_))));
    });
    temp_env::with_var(ENV_MAX_ITER, Some("0"), || {
        assert!(matches!(Settings::from_env(), Err(AppError::Validation(_))));
    });
}
