//! Text Processing for the agricultural query assistant
//!
//! This crate turns a raw utterance into structured input:
//! - **Language Detection**: English or Hindi (script plus romanized Hindi word ratio)
//! - **Phrase Matching**: whole-word or substring matching of lexicon variants
//! - **Intent Classification**: keyword rules with an optional statistical model
//! - **Entity Extraction**: crop, location, variety and season with context fallback
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use krishi_config::Lexicon;
//! use krishi_text_processing::{ContextHints, EntityExtractor, LanguageDetector, PhraseMatcher};
//!
//! let lexicon = Arc::new(Lexicon::default());
//! let detector = LanguageDetector::new(&lexicon.roman_hindi_words);
//! let extractor = EntityExtractor::new(lexicon, PhraseMatcher::default());
//!
//! let entities = extractor.extract("tomato price in patna", ContextHints::default());
//! assert_eq!(entities.crop(), Some("tomato"));
//! assert_eq!(detector.detect("tomato price in patna").key(), "english");
//! ```

pub mod entities;
pub mod intent;
pub mod language;
pub mod matching;

mod error;

pub use error::{Result, TextProcessingError};

pub use entities::{ContextHints, EntityExtractor};
pub use intent::{
    Classification, ClassificationSource, IntentClassifier, IntentTrainer, TfidfIntentModel,
    TrainingSample,
};
pub use language::LanguageDetector;
pub use matching::{NormalizedText, PhraseMatcher};
