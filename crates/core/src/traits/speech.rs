//! Speech processing traits

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::Language;

/// Failure modes a speech capture backend must distinguish
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// Audio was captured but could not be transcribed
    #[error("speech was not intelligible")]
    Unintelligible,

    /// The recognition or synthesis service could not be reached
    #[error("speech service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Nothing was said before the wait timeout elapsed
    #[error("no speech detected")]
    NoSpeech,
}

/// Bounds applied to a single capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenLimits {
    /// How long to wait for speech to start
    pub wait_timeout: Duration,
    /// Maximum length of a single phrase
    pub phrase_limit: Duration,
}

impl Default for ListenLimits {
    fn default() -> Self {
        Self {
            wait_timeout: Duration::from_secs(5),
            phrase_limit: Duration::from_secs(5),
        }
    }
}

/// Speech-to-Text interface
///
/// # Example
///
/// ```ignore
/// let stt: Box<dyn SpeechToText> = Box::new(MyRecognizer::new());
/// match stt.listen(ListenLimits::default()).await {
///     Ok(text) => println!("You said: {}", text),
///     Err(SpeechError::NoSpeech) => println!("No speech detected."),
///     Err(e) => println!("{}", e),
/// }
/// ```
#[async_trait]
pub trait SpeechToText: Send + Sync + 'static {
    /// Capture one utterance and transcribe it
    ///
    /// Implementations should honor `limits`; callers additionally enforce
    /// `limits.wait_timeout + limits.phrase_limit` as a hard deadline.
    async fn listen(&self, limits: ListenLimits) -> Result<String, SpeechError>;

    /// Get backend name for logging
    fn model_name(&self) -> &str;
}

/// Text-to-Speech interface
#[async_trait]
pub trait TextToSpeech: Send + Sync + 'static {
    /// Speak the text aloud; returns once playback has finished
    async fn speak(&self, text: &str, language: Language) -> Result<(), SpeechError>;

    /// Get backend name for logging
    fn model_name(&self) -> &str;
}
