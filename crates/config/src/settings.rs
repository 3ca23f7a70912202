//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Knowledge tables and history log locations
    #[serde(default)]
    pub data: DataConfig,

    /// Optional statistical intent model
    #[serde(default)]
    pub models: ModelConfig,

    /// Conversation context limits
    #[serde(default)]
    pub conversation: ConversationConfig,

    /// Lexicon matching policy
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Speech collaborators
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_models()?;
        self.validate_conversation()?;
        self.validate_speech()?;
        Ok(())
    }

    fn validate_models(&self) -> Result<(), ConfigError> {
        let threshold = self.models.confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidValue {
                field: "models.confidence_threshold".to_string(),
                message: format!("Must be between 0.0 and 1.0, got {}", threshold),
            });
        }
        Ok(())
    }

    fn validate_conversation(&self) -> Result<(), ConfigError> {
        if self.conversation.history_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "conversation.history_limit".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }
        if self.conversation.persist_every == 0 {
            return Err(ConfigError::InvalidValue {
                field: "conversation.persist_every".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    fn validate_speech(&self) -> Result<(), ConfigError> {
        if self.speech.wait_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "speech.wait_timeout_secs".to_string(),
                message: "Must be at least 1 second".to_string(),
            });
        }
        if self.speech.phrase_limit_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "speech.phrase_limit_secs".to_string(),
                message: "Must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }
}

/// Where knowledge tables and the history log live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_prices_file")]
    pub prices_file: String,

    #[serde(default = "default_weather_file")]
    pub weather_file: String,

    #[serde(default = "default_advice_file")]
    pub advice_file: String,

    #[serde(default = "default_varieties_file")]
    pub varieties_file: String,

    #[serde(default = "default_markets_file")]
    pub markets_file: String,

    #[serde(default = "default_localization_file")]
    pub localization_file: String,

    #[serde(default = "default_history_file")]
    pub history_file: String,

    /// Write the built-in tables to disk when a table file is missing
    #[serde(default = "default_true")]
    pub write_defaults: bool,
}

impl DataConfig {
    /// Resolve a table file name against the data directory
    pub fn path(&self, file: &str) -> PathBuf {
        PathBuf::from(&self.data_dir).join(file)
    }

    pub fn history_path(&self) -> PathBuf {
        self.path(&self.history_file)
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}
fn default_prices_file() -> String {
    "mandi_prices.csv".to_string()
}
fn default_weather_file() -> String {
    "weather_data.csv".to_string()
}
fn default_advice_file() -> String {
    "crop_advice.csv".to_string()
}
fn default_varieties_file() -> String {
    "crop_varieties.csv".to_string()
}
fn default_markets_file() -> String {
    "market_info.csv".to_string()
}
fn default_localization_file() -> String {
    "localization.csv".to_string()
}
fn default_history_file() -> String {
    "conversation_history.csv".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            prices_file: default_prices_file(),
            weather_file: default_weather_file(),
            advice_file: default_advice_file(),
            varieties_file: default_varieties_file(),
            markets_file: default_markets_file(),
            localization_file: default_localization_file(),
            history_file: default_history_file(),
            write_defaults: true,
        }
    }
}

/// Statistical intent model artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Consult the model at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: String,

    #[serde(default = "default_classifier_path")]
    pub classifier_path: String,

    /// Predictions below this probability are discarded in favor of rules
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
}

fn default_vectorizer_path() -> String {
    "models/vectorizer.json".to_string()
}
fn default_classifier_path() -> String {
    "models/intent_classifier.json".to_string()
}
fn default_confidence_threshold() -> f32 {
    0.4
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            vectorizer_path: default_vectorizer_path(),
            classifier_path: default_classifier_path(),
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

/// Conversation context limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Most recent turns kept in history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Persist history whenever its length is a multiple of this
    #[serde(default = "default_persist_every")]
    pub persist_every: usize,
}

fn default_history_limit() -> usize {
    100
}
fn default_persist_every() -> usize {
    10
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            persist_every: default_persist_every(),
        }
    }
}

/// How lexicon variants and keywords are matched against an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Variant tokens must appear as a contiguous run of whole words
    #[default]
    WholeWord,
    /// Plain substring containment (matches inside longer words)
    Substring,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MatchingConfig {
    #[serde(default)]
    pub policy: MatchPolicy,

    /// YAML file overriding the built-in lexicon
    #[serde(default)]
    pub lexicon_path: Option<String>,
}

/// Speech collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Capture speech when the typed input is empty
    #[serde(default = "default_true")]
    pub input_enabled: bool,

    /// Speak responses aloud
    #[serde(default)]
    pub output_enabled: bool,

    /// Seconds to wait for speech to start
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,

    /// Maximum seconds of a single phrase
    #[serde(default = "default_phrase_limit_secs")]
    pub phrase_limit_secs: u64,

    /// Words per minute for speech output
    #[serde(default = "default_speaking_rate")]
    pub speaking_rate: u32,
}

fn default_wait_timeout_secs() -> u64 {
    5
}
fn default_phrase_limit_secs() -> u64 {
    5
}
fn default_speaking_rate() -> u32 {
    150
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            input_enabled: true,
            output_enabled: false,
            wait_timeout_secs: default_wait_timeout_secs(),
            phrase_limit_secs: default_phrase_limit_secs(),
            speaking_rate: default_speaking_rate(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (KRISHI_ prefix)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("KRISHI")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.conversation.history_limit, 100);
        assert_eq!(settings.conversation.persist_every, 10);
        assert_eq!(settings.models.confidence_threshold, 0.4);
        assert_eq!(settings.matching.policy, MatchPolicy::WholeWord);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_threshold_validation() {
        let mut settings = Settings::default();
        settings.models.confidence_threshold = 1.5;
        assert!(settings.validate_models().is_err());

        settings.models.confidence_threshold = 0.6;
        assert!(settings.validate_models().is_ok());
    }

    #[test]
    fn test_conversation_validation() {
        let mut settings = Settings::default();
        settings.conversation.history_limit = 0;
        assert!(settings.validate_conversation().is_err());
        settings.conversation.history_limit = 100;

        settings.conversation.persist_every = 0;
        assert!(settings.validate_conversation().is_err());
    }

    #[test]
    fn test_speech_validation() {
        let mut settings = Settings::default();
        settings.speech.wait_timeout_secs = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_data_paths() {
        let data = DataConfig::default();
        assert_eq!(data.history_path(), PathBuf::from("data/conversation_history.csv"));
        assert_eq!(
            data.path(&data.prices_file),
            PathBuf::from("data").join("mandi_prices.csv")
        );
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
matching:
  policy: substring
conversation:
  history_limit: 20
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.matching.policy, MatchPolicy::Substring);
        assert_eq!(settings.conversation.history_limit, 20);
        assert_eq!(settings.conversation.persist_every, 10);
        assert_eq!(settings.data.data_dir, "data");
    }
}
