//! Collaborator traits
//!
//! Everything around the query pipeline that talks to the outside world is a
//! trait so it can be swapped or mocked:
//!
//! ```text
//! Speech:
//!   - SpeechToText: microphone → utterance text (bounded wait)
//!   - TextToSpeech: response text → audible playback
//!
//! Classification:
//!   - IntentModel: optional statistical intent classifier
//!
//! Storage:
//!   - HistoryStore: conversation history log
//! ```

mod history;
mod intent_model;
mod speech;

pub use history::HistoryStore;
pub use intent_model::IntentModel;
pub use speech::{ListenLimits, SpeechError, SpeechToText, TextToSpeech};
