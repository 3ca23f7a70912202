//! Language detection
//!
//! Hindi if the utterance contains any Devanagari character, or if more than
//! a fifth of its whitespace tokens are common romanized Hindi words.
//! Everything else, including empty input, is English.

use std::collections::HashSet;

use krishi_core::{Language, Script};

/// Share of romanized Hindi tokens above which input counts as Hindi
const ROMAN_HINDI_RATIO: f32 = 0.2;

#[derive(Debug, Clone)]
pub struct LanguageDetector {
    roman_hindi: HashSet<String>,
}

impl LanguageDetector {
    pub fn new<I, S>(roman_hindi_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            roman_hindi: roman_hindi_words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn detect(&self, text: &str) -> Language {
        if Script::Devanagari.appears_in(text) {
            return Language::Hindi;
        }

        let lower = text.to_lowercase();
        let tokens: Vec<&str> = lower.split_whitespace().collect();
        if tokens.is_empty() {
            return Language::English;
        }

        let hits = tokens
            .iter()
            .filter(|t| self.roman_hindi.contains(**t))
            .count();

        if hits as f32 > tokens.len() as f32 * ROMAN_HINDI_RATIO {
            Language::Hindi
        } else {
            Language::English
        }
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(&krishi_config::Lexicon::default().roman_hindi_words)
    }
}
