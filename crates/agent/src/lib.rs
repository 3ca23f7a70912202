//! Conversational layer of the agricultural query assistant
//!
//! Features:
//! - Conversation context with crop/location fallback and capped history
//! - Localized response generation over the knowledge tables
//! - Turn processing with exit interception and fault containment
//! - Session loop with optional speech input/output and periodic history saves

pub mod assistant;
pub mod context;
pub mod response;
pub mod session;

pub use assistant::{load_intent_model, Assistant, TurnOutcome, TurnResponse};
pub use context::{ConversationContext, DEFAULT_HISTORY_LIMIT};
pub use response::ResponseGenerator;
pub use session::{LineSource, Session, SessionConfig, SessionReply, RESET_COMMAND};

use krishi_core::Intent;
use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Speech error: {0}")]
    Speech(#[from] krishi_core::SpeechError),

    #[error("History error: {0}")]
    History(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<krishi_core::Error> for AgentError {
    fn from(err: krishi_core::Error) -> Self {
        match err {
            krishi_core::Error::Io(e) => AgentError::Io(e),
            krishi_core::Error::Speech(e) => AgentError::Speech(e),
            other => AgentError::History(other.to_string()),
        }
    }
}

pub(crate) fn record_turn(intent: Intent) {
    metrics::counter!("krishi_turns_total", "intent" => intent.label()).increment(1);
}

pub(crate) fn record_fallback(kind: &'static str) {
    metrics::counter!("krishi_fallback_total", "kind" => kind).increment(1);
}
