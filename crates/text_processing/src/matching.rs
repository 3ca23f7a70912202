//! Phrase matching against normalized utterances
//!
//! Uses unicode_segmentation for word boundaries so Devanagari words with
//! vowel signs and nuktas stay intact.

use unicode_segmentation::UnicodeSegmentation;

use krishi_config::{LexiconEntry, MatchPolicy};

/// Lowercased utterance with its word tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    lower: String,
    words: Vec<String>,
}

impl NormalizedText {
    pub fn new(text: &str) -> Self {
        let lower = text.to_lowercase();
        let words = lower.unicode_words().map(str::to_string).collect();
        Self { lower, words }
    }

    pub fn as_str(&self) -> &str {
        &self.lower
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Decides whether a phrase occurs in an utterance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhraseMatcher {
    policy: MatchPolicy,
}

impl PhraseMatcher {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Check a single phrase; empty phrases never match
    pub fn matches(&self, text: &NormalizedText, phrase: &str) -> bool {
        let phrase = phrase.trim().to_lowercase();
        if phrase.is_empty() {
            return false;
        }

        match self.policy {
            MatchPolicy::Substring => text.lower.contains(&phrase),
            MatchPolicy::WholeWord => {
                let needle: Vec<&str> = phrase.unicode_words().collect();
                if needle.is_empty() || needle.len() > text.words.len() {
                    return false;
                }
                text.words
                    .windows(needle.len())
                    .any(|window| window.iter().zip(&needle).all(|(w, n)| w == n))
            }
        }
    }

    pub fn matches_any<S: AsRef<str>>(&self, text: &NormalizedText, phrases: &[S]) -> bool {
        phrases.iter().any(|p| self.matches(text, p.as_ref()))
    }

    /// First entry, in priority order, with any matching variant
    pub fn first_match<'a>(
        &self,
        text: &NormalizedText,
        entries: &'a [LexiconEntry],
    ) -> Option<&'a LexiconEntry> {
        entries
            .iter()
            .find(|entry| self.matches_any(text, &entry.variants))
    }
}
