//! Configuration management for the assistant
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default.*`, `config/{env}.*`)
//! - Environment variables (KRISHI_ prefix, `__` as section separator)
//!
//! Besides runtime settings this crate owns the two hand-authored tables the
//! pipeline runs on:
//! - [`Lexicon`]: crops, locations, varieties, intent keywords (ordered priority lists)
//! - [`Localization`]: message key → per-language templates

pub mod lexicon;
pub mod localization;
pub mod settings;

pub use lexicon::{CommodityMapping, IntentKeywords, KeywordGroup, Lexicon, LexiconEntry};
pub use localization::{Localization, LocalizationEntry, MessageKey};
pub use settings::{
    load_settings, ConversationConfig, DataConfig, MatchPolicy, MatchingConfig, ModelConfig,
    ObservabilityConfig, Settings, SpeechConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
