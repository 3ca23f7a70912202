//! Keyword rule classifier

use std::sync::Arc;

use krishi_config::Lexicon;
use krishi_core::{Intent, Language};

use crate::matching::{NormalizedText, PhraseMatcher};

/// Confidence reported when a keyword group matched
pub const RULE_MATCH_CONFIDENCE: f32 = 0.5;
/// Confidence reported when nothing matched
pub const RULE_UNKNOWN_CONFIDENCE: f32 = 0.1;

/// Walks the keyword groups of the detected language in priority order
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    lexicon: Arc<Lexicon>,
    matcher: PhraseMatcher,
}

impl RuleClassifier {
    pub fn new(lexicon: Arc<Lexicon>, matcher: PhraseMatcher) -> Self {
        Self { lexicon, matcher }
    }

    pub fn classify(&self, text: &NormalizedText, language: Language) -> (Intent, f32) {
        self.lexicon
            .keywords
            .for_language(language)
            .iter()
            .find(|group| self.matcher.matches_any(text, &group.keywords))
            .map(|group| (group.intent, RULE_MATCH_CONFIDENCE))
            .unwrap_or((Intent::Unknown, RULE_UNKNOWN_CONFIDENCE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> RuleClassifier {
        RuleClassifier::new(Arc::new(Lexicon::default()), PhraseMatcher::default())
    }

    fn classify(text: &str, language: Language) -> Intent {
        classifier().classify(&NormalizedText::new(text), language).0
    }

    #[test]
    fn test_english_priority() {
        assert_eq!(classify("price of tomato in patna", Language::English), Intent::GetPrice);
        // market appears under price before market info
        assert_eq!(classify("market in delhi", Language::English), Intent::GetPrice);
        assert_eq!(classify("where can I sell wheat", Language::English), Intent::GetMarketInfo);
        assert_eq!(classify("will it rain in pune", Language::English), Intent::GetWeather);
        assert_eq!(classify("my rice has a pest problem", Language::English), Intent::GetAdvice);
        assert_eq!(classify("hello", Language::English), Intent::Greeting);
        assert_eq!(classify("which variety of wheat", Language::English), Intent::GetVarietyInfo);
        // price beats weather when both are present
        assert_eq!(classify("weather and price", Language::English), Intent::GetPrice);
    }

    #[test]
    fn test_hindi_keywords() {
        assert_eq!(classify("गेहूं का भाव", Language::Hindi), Intent::GetPrice);
        assert_eq!(classify("दिल्ली का मौसम", Language::Hindi), Intent::GetWeather);
        assert_eq!(classify("टमाटर की बीमारी", Language::Hindi), Intent::GetAdvice);
        assert_eq!(classify("नमस्ते", Language::Hindi), Intent::Greeting);
        assert_eq!(classify("गेहूं की किस्म", Language::Hindi), Intent::GetVarietyInfo);
        assert_eq!(classify("gehun ka bhav batao", Language::Hindi), Intent::GetPrice);
    }

    #[test]
    fn test_keywords_follow_detected_language() {
        // English keywords are not consulted for Hindi input
        assert_eq!(classify("price", Language::Hindi), Intent::Unknown);
    }

    #[test]
    fn test_unknown_and_confidence() {
        let c = classifier();
        assert_eq!(
            c.classify(&NormalizedText::new("tell me a story"), Language::English),
            (Intent::Unknown, RULE_UNKNOWN_CONFIDENCE)
        );
        assert_eq!(
            c.classify(&NormalizedText::new("hi"), Language::English),
            (Intent::Greeting, RULE_MATCH_CONFIDENCE)
        );
        assert_eq!(
            c.classify(&NormalizedText::new(""), Language::English).0,
            Intent::Unknown
        );
    }

    #[test]
    fn test_whole_word_avoids_false_greeting() {
        // "hi" inside "this" or "which" must not count
        assert_eq!(classify("this is something", Language::English), Intent::Unknown);
    }
}
