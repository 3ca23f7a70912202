//! Localized message templates
//!
//! Every user-facing string is a template keyed by message name, with one
//! text per language and `{named}` placeholders. Resolution falls back from
//! the requested language to English and finally to the bare key.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use krishi_core::Language;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w+)\}").unwrap());

/// Known message keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Greeting,
    Goodbye,
    Error,
    Listening,
    NotUnderstood,
    ServiceUnavailable,
    NoSpeech,
    HelpPrompt,
    MissingCrop,
    MissingLocation,
    PriceNotFound,
    WeatherNotFound,
    AdviceNotFound,
    VarietyNotFound,
    MarketNotFound,
    PriceReport,
    WeatherReport,
    AdviceReport,
    SeasonalAdviceReport,
    VarietyHeader,
    VarietyLine,
    MarketHeader,
    MarketLine,
}

impl MessageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Goodbye => "goodbye",
            Self::Error => "error",
            Self::Listening => "listening",
            Self::NotUnderstood => "not_understood",
            Self::ServiceUnavailable => "service_unavailable",
            Self::NoSpeech => "no_speech",
            Self::HelpPrompt => "help_prompt",
            Self::MissingCrop => "missing_crop",
            Self::MissingLocation => "missing_location",
            Self::PriceNotFound => "price_not_found",
            Self::WeatherNotFound => "weather_not_found",
            Self::AdviceNotFound => "advice_not_found",
            Self::VarietyNotFound => "variety_not_found",
            Self::MarketNotFound => "market_not_found",
            Self::PriceReport => "price_report",
            Self::WeatherReport => "weather_report",
            Self::AdviceReport => "advice_report",
            Self::SeasonalAdviceReport => "seasonal_advice_report",
            Self::VarietyHeader => "variety_header",
            Self::VarietyLine => "variety_line",
            Self::MarketHeader => "market_header",
            Self::MarketLine => "market_line",
        }
    }
}

/// One row of the localization table (`key,english,hindi`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationEntry {
    pub key: String,
    pub english: String,
    #[serde(default)]
    pub hindi: String,
}

impl LocalizationEntry {
    pub fn new(key: &str, english: &str, hindi: &str) -> Self {
        Self {
            key: key.to_string(),
            english: english.to_string(),
            hindi: hindi.to_string(),
        }
    }

    /// Template for a language; empty cells count as missing
    pub fn template(&self, language: Language) -> Option<&str> {
        let text = match language {
            Language::English => &self.english,
            Language::Hindi => &self.hindi,
        };
        if text.is_empty() {
            None
        } else {
            Some(text.as_str())
        }
    }
}

/// Message key → localized templates
#[derive(Debug, Clone, Default)]
pub struct Localization {
    entries: HashMap<String, LocalizationEntry>,
}

impl Localization {
    /// Empty table; every lookup resolves to the bare key
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = LocalizationEntry>) -> Self {
        let mut table = Self::empty();
        table.extend(entries);
        table
    }

    /// Built-in templates for every [`MessageKey`]
    pub fn builtin() -> Self {
        Self::from_entries(Self::builtin_entries())
    }

    /// Rows of the built-in table, in a stable order
    pub fn builtin_entries() -> Vec<LocalizationEntry> {
        default_entries()
    }

    /// Built-in templates overridden by the given rows
    pub fn with_overrides(entries: impl IntoIterator<Item = LocalizationEntry>) -> Self {
        let mut table = Self::builtin();
        table.extend(entries);
        table
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = LocalizationEntry>) {
        for entry in entries {
            self.entries.insert(entry.key.trim().to_string(), entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&LocalizationEntry> {
        self.entries.get(key)
    }

    /// Resolve a message and fill its placeholders
    pub fn resolve(&self, key: MessageKey, language: Language, args: &[(&str, &str)]) -> String {
        self.resolve_key(key.as_str(), language, args)
    }

    /// Resolve by raw key name
    ///
    /// If the template names a placeholder absent from `args`, the template is
    /// returned unformatted.
    pub fn resolve_key(&self, key: &str, language: Language, args: &[(&str, &str)]) -> String {
        let template = self.entries.get(key).and_then(|entry| {
            entry
                .template(language)
                .or_else(|| entry.template(Language::English))
        });

        let Some(template) = template else {
            tracing::debug!(key, language = %language, "Missing localization entry");
            return key.to_string();
        };

        format_template(template, args).unwrap_or_else(|| {
            tracing::debug!(key, "Template placeholder without a value");
            template.to_string()
        })
    }
}

/// Fill `{name}` placeholders; `None` if any placeholder has no value
pub fn format_template(template: &str, args: &[(&str, &str)]) -> Option<String> {
    let lookup = |name: &str| args.iter().find(|(k, _)| *k == name).map(|(_, v)| *v);

    if PLACEHOLDER
        .captures_iter(template)
        .any(|caps| lookup(&caps[1]).is_none())
    {
        return None;
    }

    Some(
        PLACEHOLDER
            .replace_all(template, |caps: &regex::Captures| {
                lookup(&caps[1]).unwrap_or_default().to_string()
            })
            .into_owned(),
    )
}

fn default_entries() -> Vec<LocalizationEntry> {
    vec![
        LocalizationEntry::new(
            "greeting",
            "Hello! How can I help you today?",
            "नमस्ते! मैं आपकी कैसे मदद कर सकता हूं?",
        ),
        LocalizationEntry::new(
            "price_not_found",
            "Sorry, I don't have price information for {crop} in {location}",
            "क्षमा करें, मेरे पास {location} में {crop} की कीमत की जानकारी नहीं है",
        ),
        LocalizationEntry::new(
            "weather_not_found",
            "Weather information not available for {location}",
            "{location} के लिए मौसम की जानकारी उपलब्ध नहीं है",
        ),
        LocalizationEntry::new(
            "advice_not_found",
            "No specific advice available for {crop}",
            "{crop} के लिए कोई विशिष्ट सलाह उपलब्ध नहीं है",
        ),
        LocalizationEntry::new(
            "variety_not_found",
            "Sorry, I don't have information about varieties of {crop}",
            "क्षमा करें, मेरे पास {crop} की किस्मों की जानकारी नहीं है",
        ),
        LocalizationEntry::new(
            "market_not_found",
            "Sorry, I don't have information about markets in {location}",
            "क्षमा करें, मेरे पास {location} में बाजारों की जानकारी नहीं है",
        ),
        LocalizationEntry::new("missing_crop", "Please specify a crop", "कृपया एक फसल निर्दिष्ट करें"),
        LocalizationEntry::new(
            "missing_location",
            "Please specify a location",
            "कृपया एक स्थान निर्दिष्ट करें",
        ),
        LocalizationEntry::new("goodbye", "Goodbye! Have a great day!", "अलविदा! आपका दिन शुभ हो!"),
        LocalizationEntry::new(
            "error",
            "Sorry, I encountered an error. Please try again.",
            "क्षमा करें, एक त्रुटि हुई। कृपया पुनः प्रयास करें।",
        ),
        LocalizationEntry::new("listening", "Listening...", "सुन रहा हूँ..."),
        LocalizationEntry::new(
            "not_understood",
            "Sorry, I didn't understand that.",
            "क्षमा करें, मैं समझा नहीं।",
        ),
        LocalizationEntry::new(
            "service_unavailable",
            "Sorry, speech service is unavailable.",
            "क्षमा करें, भाषण सेवा उपलब्ध नहीं है।",
        ),
        LocalizationEntry::new("no_speech", "No speech detected.", "कोई भाषण नहीं मिला।"),
        LocalizationEntry::new(
            "help_prompt",
            "I can help with prices, weather, agricultural advice, variety information, and market details. Please try again.",
            "मैं कीमतों, मौसम, कृषि सलाह, किस्मों की जानकारी और बाजार की जानकारी में मदद कर सकता हूं। कृपया पुनः प्रयास करें।",
        ),
        LocalizationEntry::new(
            "price_report",
            "Price of {crop} ({variety}) in {market}: Min ₹{min_price}, Max ₹{max_price}, Modal ₹{modal_price} per quintal (date: {date})",
            "{market} में {crop} ({variety}) की कीमत: न्यूनतम ₹{min_price}, अधिकतम ₹{max_price}, मोडल ₹{modal_price} प्रति क्विंटल (तारीख: {date})",
        ),
        LocalizationEntry::new(
            "weather_report",
            "Weather in {location}: {condition}, Temperature: {temperature}°C, Humidity: {humidity}%, Rainfall: {rainfall}mm. Forecast: {forecast}",
            "{location} में मौसम: {condition}, तापमान: {temperature}°C, नमी: {humidity}%, वर्षा: {rainfall}mm. पूर्वानुमान: {forecast}",
        ),
        LocalizationEntry::new(
            "advice_report",
            "Advice for {crop}: {advice}",
            "{crop} के लिए सलाह: {advice}",
        ),
        LocalizationEntry::new(
            "seasonal_advice_report",
            "Advice for {crop} in {season} season: {advice}",
            "{season} मौसम में {crop} के लिए सलाह: {advice}",
        ),
        LocalizationEntry::new(
            "variety_header",
            "Major varieties of {crop}:",
            "{crop} की प्रमुख किस्में:",
        ),
        LocalizationEntry::new(
            "variety_line",
            "- {variety}: {characteristics}, Yield: {yield}, Duration: {duration}",
            "- {variety}: {characteristics}, उपज: {yield}, अवधि: {duration}",
        ),
        LocalizationEntry::new(
            "market_header",
            "Major agricultural markets in {location}:",
            "{location} में प्रमुख कृषि बाजार:",
        ),
        LocalizationEntry::new(
            "market_line",
            "- {market_name}: Contact: {contact}, Business hours: {business_hours}",
            "- {market_name}: संपर्क: {contact}, व्यापार के घंटे: {business_hours}",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KEYS: &[MessageKey] = &[
        MessageKey::Greeting,
        MessageKey::Goodbye,
        MessageKey::Error,
        MessageKey::Listening,
        MessageKey::NotUnderstood,
        MessageKey::ServiceUnavailable,
        MessageKey::NoSpeech,
        MessageKey::HelpPrompt,
        MessageKey::MissingCrop,
        MessageKey::MissingLocation,
        MessageKey::PriceNotFound,
        MessageKey::WeatherNotFound,
        MessageKey::AdviceNotFound,
        MessageKey::VarietyNotFound,
        MessageKey::MarketNotFound,
        MessageKey::PriceReport,
        MessageKey::WeatherReport,
        MessageKey::AdviceReport,
        MessageKey::SeasonalAdviceReport,
        MessageKey::VarietyHeader,
        MessageKey::VarietyLine,
        MessageKey::MarketHeader,
        MessageKey::MarketLine,
    ];

    #[test]
    fn test_builtin_covers_every_key_in_both_languages() {
        let table = Localization::builtin();
        for key in ALL_KEYS {
            let entry = table.get(key.as_str()).expect(key.as_str());
            assert!(entry.template(Language::English).is_some());
            assert!(entry.template(Language::Hindi).is_some());
        }
    }

    #[test]
    fn test_resolve_with_placeholders() {
        let table = Localization::builtin();
        let text = table.resolve(
            MessageKey::PriceNotFound,
            Language::English,
            &[("crop", "wheat"), ("location", "pune")],
        );
        assert_eq!(text, "Sorry, I don't have price information for wheat in pune");

        let text = table.resolve(
            MessageKey::WeatherNotFound,
            Language::Hindi,
            &[("location", "पटना")],
        );
        assert_eq!(text, "पटना के लिए मौसम की जानकारी उपलब्ध नहीं है");
    }

    #[test]
    fn test_missing_placeholder_returns_template() {
        let table = Localization::builtin();
        let text = table.resolve(MessageKey::PriceNotFound, Language::English, &[("crop", "wheat")]);
        assert_eq!(
            text,
            "Sorry, I don't have price information for {crop} in {location}"
        );
    }

    #[test]
    fn test_fallback_to_english_then_key() {
        let table = Localization::from_entries(vec![LocalizationEntry::new("only_en", "Hi", "")]);
        assert_eq!(table.resolve_key("only_en", Language::Hindi, &[]), "Hi");
        assert_eq!(table.resolve_key("absent", Language::Hindi, &[]), "absent");
        assert_eq!(
            Localization::empty().resolve(MessageKey::Goodbye, Language::English, &[]),
            "goodbye"
        );
    }

    #[test]
    fn test_overrides_replace_builtin() {
        let table = Localization::with_overrides(vec![LocalizationEntry::new(
            "greeting",
            "Ram Ram!",
            "राम राम!",
        )]);
        assert_eq!(table.resolve(MessageKey::Greeting, Language::Hindi, &[]), "राम राम!");
        assert_eq!(
            table.resolve(MessageKey::Goodbye, Language::English, &[]),
            "Goodbye! Have a great day!"
        );
    }

    #[test]
    fn test_format_template() {
        assert_eq!(
            format_template("{a} and {b}", &[("a", "x"), ("b", "y")]),
            Some("x and y".to_string())
        );
        assert_eq!(format_template("{a} and {b}", &[("a", "x")]), None);
        assert_eq!(format_template("plain", &[]), Some("plain".to_string()));
    }
}
