//! Lexicon Configuration
//!
//! Canonical crops, locations, varieties and seasons with their surface variants,
//! intent keyword groups per language, exit phrases and the romanized Hindi
//! word list used by language detection.
//!
//! Every list is an ordered priority list: lookups walk entries in declared
//! order and stop at the first match. A YAML file can replace any section;
//! sections it omits keep the built-in tables.

mod builtin;

use serde::{Deserialize, Serialize};
use std::path::Path;

use krishi_core::{EntityKind, Intent, Language};

use crate::ConfigError;

/// Canonical key with the surface forms that map to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub key: String,
    pub variants: Vec<String>,
}

impl LexiconEntry {
    pub fn new(key: impl Into<String>, variants: &[&str]) -> Self {
        Self {
            key: key.into(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// Crop key → commodity name as it appears in the mandi price table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommodityMapping {
    pub crop: String,
    pub commodity: String,
}

/// Keywords that signal one intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub intent: Intent,
    pub keywords: Vec<String>,
}

/// Keyword groups per language, in classification priority order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentKeywords {
    pub english: Vec<KeywordGroup>,
    pub hindi: Vec<KeywordGroup>,
}

impl IntentKeywords {
    pub fn for_language(&self, language: Language) -> &[KeywordGroup] {
        match language {
            Language::English => &self.english,
            Language::Hindi => &self.hindi,
        }
    }
}

impl Default for IntentKeywords {
    fn default() -> Self {
        Self {
            english: groups(builtin::ENGLISH_KEYWORDS),
            hindi: groups(builtin::HINDI_KEYWORDS),
        }
    }
}

fn groups(table: &[(Intent, &[&str])]) -> Vec<KeywordGroup> {
    table
        .iter()
        .map(|(intent, keywords)| KeywordGroup {
            intent: *intent,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}

fn entries(table: builtin::Table) -> Vec<LexiconEntry> {
    table
        .iter()
        .map(|(key, variants)| LexiconEntry::new(*key, variants))
        .collect()
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn default_crops() -> Vec<LexiconEntry> {
    entries(builtin::CROPS)
}

fn default_locations() -> Vec<LexiconEntry> {
    entries(builtin::LOCATIONS)
}

fn default_varieties() -> Vec<LexiconEntry> {
    entries(builtin::VARIETIES)
}

fn default_seasons() -> Vec<LexiconEntry> {
    entries(builtin::SEASONS)
}

fn default_commodities() -> Vec<CommodityMapping> {
    builtin::COMMODITIES
        .iter()
        .map(|(crop, commodity)| CommodityMapping {
            crop: crop.to_string(),
            commodity: commodity.to_string(),
        })
        .collect()
}

fn default_exit_phrases() -> Vec<String> {
    strings(builtin::EXIT_PHRASES)
}

fn default_roman_hindi_words() -> Vec<String> {
    strings(builtin::ROMAN_HINDI_WORDS)
}

/// All matching vocabulary for the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default = "default_crops")]
    pub crops: Vec<LexiconEntry>,

    #[serde(default = "default_locations")]
    pub locations: Vec<LexiconEntry>,

    #[serde(default = "default_varieties")]
    pub varieties: Vec<LexiconEntry>,

    #[serde(default = "default_seasons")]
    pub seasons: Vec<LexiconEntry>,

    #[serde(default = "default_commodities")]
    pub commodities: Vec<CommodityMapping>,

    #[serde(default)]
    pub keywords: IntentKeywords,

    /// Whole utterances that end the session
    #[serde(default = "default_exit_phrases")]
    pub exit_phrases: Vec<String>,

    /// Romanized Hindi function words
    #[serde(default = "default_roman_hindi_words")]
    pub roman_hindi_words: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            crops: default_crops(),
            locations: default_locations(),
            varieties: default_varieties(),
            seasons: default_seasons(),
            commodities: default_commodities(),
            keywords: IntentKeywords::default(),
            exit_phrases: default_exit_phrases(),
            roman_hindi_words: default_roman_hindi_words(),
        }
    }
}

impl Lexicon {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let lexicon: Lexicon = serde_yaml::from_str(&content)?;
        lexicon.validate()?;

        tracing::info!(
            path = %path.display(),
            crops = lexicon.crops.len(),
            locations = lexicon.locations.len(),
            varieties = lexicon.varieties.len(),
            "Loaded lexicon"
        );

        Ok(lexicon)
    }

    /// Load the override file when one is configured, else the built-in tables.
    /// A broken override file is logged and ignored.
    pub fn load_or_default(path: Option<&str>) -> Self {
        match path {
            Some(path) => Self::load(path).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to load lexicon, using built-in tables");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Reject entries that can never match
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (section, list) in [
            ("crops", &self.crops),
            ("locations", &self.locations),
            ("varieties", &self.varieties),
            ("seasons", &self.seasons),
        ] {
            for entry in list {
                if entry.key.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: format!("lexicon.{}", section),
                        message: "Entry with empty key".to_string(),
                    });
                }
                if entry.variants.iter().all(|v| v.trim().is_empty()) {
                    return Err(ConfigError::InvalidValue {
                        field: format!("lexicon.{}.{}", section, entry.key),
                        message: "At least one non-empty variant is required".to_string(),
                    });
                }
            }
        }

        for group in self
            .keywords
            .english
            .iter()
            .chain(self.keywords.hindi.iter())
        {
            if matches!(group.intent, Intent::Exit | Intent::Unknown) {
                return Err(ConfigError::InvalidValue {
                    field: "lexicon.keywords".to_string(),
                    message: format!("Intent '{}' cannot be keyword-classified", group.intent),
                });
            }
        }

        Ok(())
    }

    /// Priority list for one entity kind
    pub fn entries(&self, kind: EntityKind) -> &[LexiconEntry] {
        match kind {
            EntityKind::Crop => &self.crops,
            EntityKind::Location => &self.locations,
            EntityKind::Variety => &self.varieties,
            EntityKind::Season => &self.seasons,
        }
    }

    /// Commodity name for a crop key, or the crop key itself when unmapped
    pub fn commodity_for<'a>(&'a self, crop: &'a str) -> &'a str {
        self.commodities
            .iter()
            .find(|m| m.crop.eq_ignore_ascii_case(crop))
            .map(|m| m.commodity.as_str())
            .unwrap_or(crop)
    }

    pub fn is_exit_phrase(&self, utterance: &str) -> bool {
        let normalized = utterance.trim().to_lowercase();
        !normalized.is_empty() && self.exit_phrases.iter().any(|p| *p == normalized)
    }
}
