//! Core traits and types for the agricultural query assistant
//!
//! This crate provides foundational types used across all other crates:
//! - Language definitions (English and Hindi) and script detection
//! - The closed set of user intents
//! - Entity bundles extracted from an utterance
//! - Conversation turn records
//! - Collaborator traits (speech, statistical intent model, history storage)
//! - Error types

pub mod conversation;
pub mod entity;
pub mod error;
pub mod intent;
pub mod language;
pub mod traits;

pub use conversation::TurnRecord;
pub use entity::{EntityBundle, EntityKind, EntitySource, ResolvedEntity};
pub use error::{Error, Result};
pub use intent::Intent;
pub use language::{Language, Script};

pub use traits::{HistoryStore, IntentModel, ListenLimits, SpeechError, SpeechToText, TextToSpeech};
