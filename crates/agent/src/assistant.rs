//! Turn processing
//!
//! One turn: exit interception, language detection, intent classification,
//! entity extraction with context fallback, response generation, context
//! update. A panic inside the pipeline is caught here and answered with the
//! localized error message so the session keeps going.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use krishi_config::{Lexicon, MessageKey, ModelConfig, Settings};
use krishi_core::{EntityBundle, EntitySource, Intent, IntentModel, Language, TurnRecord};
use krishi_persistence::KnowledgeBase;
use krishi_text_processing::{
    Classification, ContextHints, EntityExtractor, IntentClassifier, LanguageDetector,
    PhraseMatcher, TfidfIntentModel,
};

use crate::context::ConversationContext;
use crate::response::ResponseGenerator;
use crate::{record_fallback, record_turn};

/// A non-exit turn's answer and how it was reached
#[derive(Debug, Clone, PartialEq)]
pub struct TurnResponse {
    pub text: String,
    pub language: Language,
    pub intent: Intent,
    pub confidence: f32,
    pub entities: EntityBundle,
    /// Set when the pipeline failed and `text` is the generic error message
    pub faulted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The user asked to leave; context is untouched
    Exit { farewell: String, language: Language },
    Response(TurnResponse),
}

impl TurnOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Exit { farewell, .. } => farewell,
            Self::Response(response) => &response.text,
        }
    }

    pub fn language(&self) -> Language {
        match self {
            Self::Exit { language, .. } => *language,
            Self::Response(response) => response.language,
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }
}

struct Evaluation {
    classification: Classification,
    entities: EntityBundle,
    text: String,
}

/// The query pipeline, shared by every session
#[derive(Debug)]
pub struct Assistant {
    detector: LanguageDetector,
    classifier: IntentClassifier,
    extractor: EntityExtractor,
    responder: ResponseGenerator,
}

impl Assistant {
    pub fn new(
        detector: LanguageDetector,
        classifier: IntentClassifier,
        extractor: EntityExtractor,
        responder: ResponseGenerator,
    ) -> Self {
        Self {
            detector,
            classifier,
            extractor,
            responder,
        }
    }

    /// Assemble the pipeline from already loaded parts
    pub fn from_parts(
        settings: &Settings,
        lexicon: Arc<Lexicon>,
        knowledge: Arc<KnowledgeBase>,
        model: Option<Box<dyn IntentModel>>,
    ) -> Self {
        let matcher = PhraseMatcher::new(settings.matching.policy);
        Self::new(
            LanguageDetector::new(&lexicon.roman_hindi_words),
            IntentClassifier::new(
                lexicon.clone(),
                matcher,
                model,
                settings.models.confidence_threshold,
            ),
            EntityExtractor::new(lexicon.clone(), matcher),
            ResponseGenerator::new(knowledge, lexicon),
        )
    }

    /// Load lexicon, knowledge tables and the optional model from settings
    ///
    /// Every missing piece degrades to its built-in default.
    pub fn from_settings(settings: &Settings) -> Self {
        let lexicon = Arc::new(Lexicon::load_or_default(
            settings.matching.lexicon_path.as_deref(),
        ));
        let knowledge = Arc::new(KnowledgeBase::load(&settings.data));
        let model = load_intent_model(&settings.models);

        tracing::info!(
            policy = ?settings.matching.policy,
            model = model.as_ref().map(|m| m.model_name()).unwrap_or("none"),
            threshold = settings.models.confidence_threshold,
            "Assistant ready"
        );

        Self::from_parts(settings, lexicon, knowledge, model)
    }

    pub fn detect_language(&self, utterance: &str) -> Language {
        self.detector.detect(utterance)
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn responder(&self) -> &ResponseGenerator {
        &self.responder
    }

    /// Resolve a plain message, e.g. for speech failures
    pub fn message(&self, key: MessageKey, language: Language) -> String {
        self.responder.message(key, language)
    }

    /// Run one turn and apply it to `context`
    pub fn process_turn(&self, utterance: &str, context: &mut ConversationContext) -> TurnOutcome {
        let language = self.detector.detect(utterance);
        let hints = context.hints();

        let evaluation = catch_unwind(AssertUnwindSafe(|| {
            self.evaluate(utterance, language, hints)
        }));

        let response = match evaluation {
            Ok(Evaluation {
                classification, ..
            }) if classification.intent == Intent::Exit => {
                record_turn(Intent::Exit);
                return TurnOutcome::Exit {
                    farewell: self.responder.message(MessageKey::Goodbye, language),
                    language,
                };
            }
            Ok(eval) => TurnResponse {
                text: eval.text,
                language,
                intent: eval.classification.intent,
                confidence: eval.classification.confidence,
                entities: eval.entities,
                faulted: false,
            },
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown".to_string());
                tracing::error!(utterance, reason = %reason, "Turn failed");
                record_fallback("turn_fault");

                TurnResponse {
                    text: self.responder.message(MessageKey::Error, language),
                    language,
                    intent: Intent::Unknown,
                    confidence: 0.0,
                    entities: EntityBundle::default(),
                    faulted: true,
                }
            }
        };

        record_turn(response.intent);
        context.record_turn(
            &response.entities,
            TurnRecord::now(utterance, response.intent, response.text.clone(), language),
        );

        TurnOutcome::Response(response)
    }

    fn evaluate(&self, utterance: &str, language: Language, hints: ContextHints<'_>) -> Evaluation {
        let classification = self.classifier.classify(utterance, language);
        if classification.intent == Intent::Exit {
            return Evaluation {
                classification,
                entities: EntityBundle::default(),
                text: String::new(),
            };
        }

        let entities = self.extractor.extract(utterance, hints);
        if entities.crop.as_ref().map(|e| e.source) == Some(EntitySource::Context) {
            record_fallback("context_crop");
        }
        if entities.location.as_ref().map(|e| e.source) == Some(EntitySource::Context) {
            record_fallback("context_location");
        }

        tracing::debug!(
            language = %language,
            intent = %classification.intent,
            confidence = classification.confidence,
            source = classification.source.as_str(),
            "Classified utterance"
        );

        let text = self
            .responder
            .respond(classification.intent, &entities, language);

        Evaluation {
            classification,
            entities,
            text,
        }
    }
}

/// Load the statistical model if enabled; any failure means rules only
pub fn load_intent_model(config: &ModelConfig) -> Option<Box<dyn IntentModel>> {
    if !config.enabled {
        return None;
    }

    match TfidfIntentModel::load(&config.vectorizer_path, &config.classifier_path) {
        Ok(model) => {
            tracing::info!(
                vectorizer = %config.vectorizer_path,
                classifier = %config.classifier_path,
                "Loaded intent model"
            );
            Some(Box::new(model))
        }
        Err(e) => {
            tracing::info!(error = %e, "Intent model unavailable, using keyword rules only");
            record_fallback("model_unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant() -> Assistant {
        Assistant::from_parts(
            &Settings::default(),
            Arc::new(Lexicon::default()),
            Arc::new(KnowledgeBase::builtin()),
            None,
        )
    }

    struct PanickingModel;

    impl IntentModel for PanickingModel {
        fn classify(&self, _utterance: &str) -> krishi_core::Result<(Intent, f32)> {
            panic!("corrupt weights")
        }

        fn model_name(&self) -> &str {
            "panicking"
        }
    }

    #[test]
    fn test_exit_leaves_context_untouched() {
        let a = assistant();
        let mut ctx = ConversationContext::default();
        a.process_turn("wheat price in patna", &mut ctx);

        let outcome = a.process_turn("  Quit ", &mut ctx);
        assert!(outcome.is_exit());
        assert_eq!(outcome.text(), "Goodbye! Have a great day!");
        assert_eq!(ctx.history().len(), 1);

        let outcome = a.process_turn("बंद", &mut ctx);
        assert_eq!(outcome.language(), Language::Hindi);
        assert_eq!(outcome.text(), "अलविदा! आपका दिन शुभ हो!");
    }

    #[test]
    fn test_context_fallback_across_turns() {
        let a = assistant();
        let mut ctx = ConversationContext::default();

        a.process_turn("price of tomato in patna", &mut ctx);
        let outcome = a.process_turn("what is the weather", &mut ctx);

        match outcome {
            TurnOutcome::Response(r) => {
                assert_eq!(r.intent, Intent::GetWeather);
                assert_eq!(r.entities.location(), Some("patna"));
                assert_eq!(
                    r.entities.location.as_ref().map(|e| e.source),
                    Some(EntitySource::Context)
                );
                assert!(r.text.starts_with("Weather in patna: Sunny"), "{}", r.text);
            }
            TurnOutcome::Exit { .. } => panic!("unexpected exit"),
        }
        assert_eq!(ctx.last_intent(), Some(Intent::GetWeather));
    }

    #[test]
    fn test_panicking_model_yields_error_message() {
        let a = Assistant::from_parts(
            &Settings::default(),
            Arc::new(Lexicon::default()),
            Arc::new(KnowledgeBase::builtin()),
            Some(Box::new(PanickingModel)),
        );
        let mut ctx = ConversationContext::default();

        match a.process_turn("tomato price in patna", &mut ctx) {
            TurnOutcome::Response(r) => {
                assert!(r.faulted);
                assert_eq!(r.text, "Sorry, I encountered an error. Please try again.");
            }
            TurnOutcome::Exit { .. } => panic!("unexpected exit"),
        }
        assert_eq!(ctx.history().len(), 1);

        // Exit still works because interception runs before the model
        assert!(a.process_turn("exit", &mut ctx).is_exit());
    }

    #[test]
    fn test_disabled_model_not_loaded() {
        let config = ModelConfig {
            enabled: false,
            ..ModelConfig::default()
        };
        assert!(load_intent_model(&config).is_none());

        let config = ModelConfig {
            vectorizer_path: "/nonexistent/vectorizer.json".into(),
            classifier_path: "/nonexistent/classifier.json".into(),
            ..ModelConfig::default()
        };
        assert!(load_intent_model(&config).is_none());
    }
}
