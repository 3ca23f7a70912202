//! Intent Classification
//!
//! Exit phrases are intercepted first. Otherwise keyword rules for the
//! detected language decide, unless a statistical model is loaded and its
//! top prediction clears the confidence threshold.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use krishi_config::Lexicon;
//! use krishi_core::{Intent, Language};
//! use krishi_text_processing::intent::IntentClassifier;
//!
//! let classifier = IntentClassifier::rules_only(Arc::new(Lexicon::default()));
//! let result = classifier.classify("price of tomato in patna", Language::English);
//!
//! assert_eq!(result.intent, Intent::GetPrice);
//! ```

pub mod model;
pub mod rules;
pub mod training;

use std::sync::Arc;

use krishi_config::Lexicon;
use krishi_core::{Intent, IntentModel, Language};

use crate::matching::{NormalizedText, PhraseMatcher};

pub use model::{LogisticRegression, TfidfIntentModel, TfidfVectorizer};
pub use rules::{RuleClassifier, RULE_MATCH_CONFIDENCE, RULE_UNKNOWN_CONFIDENCE};
pub use training::{builtin_corpus, load_samples, IntentTrainer, TrainerConfig, TrainingSample};

/// Default minimum model probability
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.4;

/// Which stage produced the intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationSource {
    ExitPhrase,
    Rules,
    Model,
}

impl ClassificationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExitPhrase => "exit_phrase",
            Self::Rules => "rules",
            Self::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub intent: Intent,
    pub confidence: f32,
    pub source: ClassificationSource,
}

pub struct IntentClassifier {
    lexicon: Arc<Lexicon>,
    rules: RuleClassifier,
    model: Option<Box<dyn IntentModel>>,
    threshold: f32,
}

impl IntentClassifier {
    pub fn new(
        lexicon: Arc<Lexicon>,
        matcher: PhraseMatcher,
        model: Option<Box<dyn IntentModel>>,
        threshold: f32,
    ) -> Self {
        Self {
            rules: RuleClassifier::new(lexicon.clone(), matcher),
            lexicon,
            model,
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// Keyword rules with whole-word matching and no model
    pub fn rules_only(lexicon: Arc<Lexicon>) -> Self {
        Self::new(lexicon, PhraseMatcher::default(), None, DEFAULT_CONFIDENCE_THRESHOLD)
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_exit(&self, utterance: &str) -> bool {
        self.lexicon.is_exit_phrase(utterance)
    }

    pub fn classify(&self, utterance: &str, language: Language) -> Classification {
        if self.is_exit(utterance) {
            return Classification {
                intent: Intent::Exit,
                confidence: 1.0,
                source: ClassificationSource::ExitPhrase,
            };
        }

        if let Some(model) = &self.model {
            match model.classify(utterance) {
                Ok((intent, confidence)) if confidence >= self.threshold && intent != Intent::Exit => {
                    tracing::debug!(
                        model = model.model_name(),
                        intent = %intent,
                        confidence,
                        "Model intent accepted"
                    );
                    return Classification {
                        intent,
                        confidence,
                        source: ClassificationSource::Model,
                    };
                }
                Ok((intent, confidence)) => {
                    tracing::debug!(
                        intent = %intent,
                        confidence,
                        threshold = self.threshold,
                        "Model confidence below threshold, using rules"
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Intent model failed, using rules");
                }
            }
        }

        let (intent, confidence) = self.rules.classify(&NormalizedText::new(utterance), language);
        Classification {
            intent,
            confidence,
            source: ClassificationSource::Rules,
        }
    }
}

impl std::fmt::Debug for IntentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentClassifier")
            .field("model", &self.model.as_ref().map(|m| m.model_name()))
            .field("threshold", &self.threshold)
            .finish()
    }
}
