//! Session loop
//!
//! Drives sequential turns for one user:
//!
//! ```text
//! line ──┬── text ──────────────▶ Assistant ──▶ reply ──▶ (TTS)
//!        └── empty ──▶ STT ─────▶     │
//!                                     ▼
//!                           ConversationContext ──▶ HistoryStore (every N turns)
//! ```
//!
//! The session is the single owner of its context. History is saved every
//! `persist_every` turns and once more at shutdown.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use krishi_config::{MessageKey, Settings};
use krishi_core::{HistoryStore, Language, ListenLimits, SpeechError, SpeechToText, TextToSpeech};

use crate::assistant::{Assistant, TurnOutcome};
use crate::context::{ConversationContext, DEFAULT_HISTORY_LIMIT};
use crate::{record_fallback, AgentError};

/// REPL command that forgets the remembered crop and location
pub const RESET_COMMAND: &str = "/reset";

/// Where typed lines come from
///
/// `next_line` must be cancel safe: a dropped call consumes nothing.
#[async_trait]
pub trait LineSource: Send {
    async fn next_line(&mut self) -> std::io::Result<Option<String>>;
}

#[async_trait]
impl<R> LineSource for Lines<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        Lines::next_line(self).await
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub history_limit: usize,
    pub persist_every: usize,
    pub listen: ListenLimits,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            persist_every: 10,
            listen: ListenLimits::default(),
        }
    }
}

impl From<&Settings> for SessionConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            history_limit: settings.conversation.history_limit,
            persist_every: settings.conversation.persist_every,
            listen: ListenLimits {
                wait_timeout: Duration::from_secs(settings.speech.wait_timeout_secs),
                phrase_limit: Duration::from_secs(settings.speech.phrase_limit_secs),
            },
        }
    }
}

/// What the session made of one input line
#[derive(Debug, Clone, PartialEq)]
pub enum SessionReply {
    /// Answer to show (and speak); the session continues
    Response(String),
    /// Farewell; the session is over
    Goodbye(String),
    /// Context was cleared
    Reset,
}

pub struct Session {
    assistant: Arc<Assistant>,
    context: ConversationContext,
    history: Arc<dyn HistoryStore>,
    stt: Option<Arc<dyn SpeechToText>>,
    tts: Option<Arc<dyn TextToSpeech>>,
    config: SessionConfig,
    unsaved_turns: usize,
    language: Language,
}

impl Session {
    /// Open a session, seeding history from the store
    ///
    /// A history that cannot be read starts the session empty.
    pub async fn start(
        assistant: Arc<Assistant>,
        history: Arc<dyn HistoryStore>,
        config: SessionConfig,
    ) -> Self {
        let records = match history.load(config.history_limit).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(backend = history.backend_name(), error = %e, "Could not load history");
                Vec::new()
            }
        };

        Self {
            assistant,
            context: ConversationContext::with_history(config.history_limit, records),
            history,
            stt: None,
            tts: None,
            config,
            unsaved_turns: 0,
            language: Language::default(),
        }
    }

    pub fn with_speech_input(mut self, stt: Arc<dyn SpeechToText>) -> Self {
        self.stt = Some(stt);
        self
    }

    pub fn with_speech_output(mut self, tts: Arc<dyn TextToSpeech>) -> Self {
        self.tts = Some(tts);
        self
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    /// Language of the most recent turn
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn message(&self, key: MessageKey) -> String {
        self.assistant.message(key, self.language)
    }

    /// Handle one typed line; an empty line means "listen instead"
    pub async fn handle_line(&mut self, line: &str) -> SessionReply {
        let line = line.trim();

        if line == RESET_COMMAND {
            self.context.clear();
            tracing::info!("Context cleared");
            return SessionReply::Reset;
        }

        if line.is_empty() {
            return match self.capture().await {
                Ok(utterance) => self.turn(&utterance).await,
                Err(e) => SessionReply::Response(self.speech_failure(&e)),
            };
        }

        self.turn(line).await
    }

    /// Process an utterance as a turn, persisting history when due
    pub async fn turn(&mut self, utterance: &str) -> SessionReply {
        let outcome = self.assistant.process_turn(utterance, &mut self.context);
        self.language = outcome.language();

        match outcome {
            TurnOutcome::Exit { farewell, .. } => SessionReply::Goodbye(farewell),
            TurnOutcome::Response(response) => {
                self.unsaved_turns += 1;
                if self.unsaved_turns >= self.config.persist_every {
                    self.persist_logged().await;
                }
                SessionReply::Response(response.text)
            }
        }
    }

    /// Capture one utterance from the speech collaborator
    ///
    /// The whole capture is bounded by the wait timeout plus the phrase
    /// limit; running out of time counts as no speech.
    pub async fn capture(&self) -> Result<String, SpeechError> {
        let stt = self
            .stt
            .as_ref()
            .ok_or_else(|| SpeechError::ServiceUnavailable("speech input disabled".to_string()))?;

        let limits = self.config.listen;
        let deadline = limits.wait_timeout + limits.phrase_limit;

        match tokio::time::timeout(deadline, stt.listen(limits)).await {
            Ok(Ok(text)) if text.trim().is_empty() => Err(SpeechError::NoSpeech),
            Ok(Ok(text)) => {
                tracing::debug!(backend = stt.model_name(), text = %text, "Captured speech");
                Ok(text)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(SpeechError::NoSpeech),
        }
    }

    fn speech_failure(&self, error: &SpeechError) -> String {
        let (key, kind) = match error {
            SpeechError::Unintelligible => (MessageKey::NotUnderstood, "speech_unintelligible"),
            SpeechError::ServiceUnavailable(_) => {
                (MessageKey::ServiceUnavailable, "speech_unavailable")
            }
            SpeechError::NoSpeech => (MessageKey::NoSpeech, "speech_none"),
        };
        tracing::warn!(error = %error, "Speech capture failed");
        record_fallback(kind);
        self.message(key)
    }

    /// Speak a reply if speech output is configured; failures are logged
    pub async fn speak(&self, text: &str) {
        let Some(tts) = &self.tts else {
            return;
        };
        if let Err(e) = tts.speak(text, self.language).await {
            tracing::warn!(backend = tts.model_name(), error = %e, "Speech output failed");
            record_fallback("speech_output");
        }
    }

    /// Save the history log now
    pub async fn persist(&mut self) -> Result<(), AgentError> {
        let records: Vec<_> = self.context.history().iter().cloned().collect();
        self.history.save(&records).await?;
        self.unsaved_turns = 0;
        tracing::debug!(turns = records.len(), "History persisted");
        Ok(())
    }

    async fn persist_logged(&mut self) {
        if let Err(e) = self.persist().await {
            tracing::warn!(backend = self.history.backend_name(), error = %e, "Failed to persist history");
        }
    }

    /// Final save at session end
    pub async fn shutdown(&mut self) {
        self.persist_logged().await;
        tracing::info!(turns = self.context.history().len(), "Session ended");
    }

    /// Read lines until exit or end of input, writing each reply
    ///
    /// The greeting is written first; the history is saved on the way out
    /// however the loop ends.
    pub async fn run<R, W>(&mut self, input: R, output: W) -> Result<(), AgentError>
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin,
    {
        self.run_with(input.lines(), output).await
    }

    /// Like [`Session::run`], over any line source
    pub async fn run_with<L, W>(&mut self, mut lines: L, mut output: W) -> Result<(), AgentError>
    where
        L: LineSource,
        W: AsyncWrite + Unpin,
    {
        let result = self.run_loop(&mut lines, &mut output).await;
        self.shutdown().await;
        output.flush().await?;
        result
    }

    async fn run_loop<L, W>(&mut self, lines: &mut L, output: &mut W) -> Result<(), AgentError>
    where
        L: LineSource,
        W: AsyncWrite + Unpin,
    {
        let greeting = self.message(MessageKey::Greeting);
        write_reply(output, &greeting).await?;
        self.speak(&greeting).await;

        loop {
            output.write_all(b"\n> ").await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            if line.trim().is_empty() && self.stt.is_some() {
                write_reply(output, &self.message(MessageKey::Listening)).await?;
            }

            match self.handle_line(&line).await {
                SessionReply::Response(text) => {
                    write_reply(output, &text).await?;
                    self.speak(&text).await;
                }
                SessionReply::Goodbye(text) => {
                    write_reply(output, &text).await?;
                    self.speak(&text).await;
                    break;
                }
                SessionReply::Reset => {}
            }
        }
        Ok(())
    }
}

async fn write_reply<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<(), AgentError> {
    output
        .write_all(format!("Assistant: {}\n", text).as_bytes())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use krishi_config::Lexicon;
    use krishi_persistence::{InMemoryHistoryStore, KnowledgeBase};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn assistant() -> Arc<Assistant> {
        Arc::new(Assistant::from_parts(
            &Settings::default(),
            Arc::new(Lexicon::default()),
            Arc::new(KnowledgeBase::builtin()),
            None,
        ))
    }

    struct ScriptedStt(Result<String, SpeechError>);

    #[async_trait]
    impl SpeechToText for ScriptedStt {
        async fn listen(&self, _limits: ListenLimits) -> Result<String, SpeechError> {
            self.0.clone()
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    struct SilentStt;

    #[async_trait]
    impl SpeechToText for SilentStt {
        async fn listen(&self, _limits: ListenLimits) -> Result<String, SpeechError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        }

        fn model_name(&self) -> &str {
            "silent"
        }
    }

    #[derive(Default)]
    struct CountingTts(AtomicUsize);

    #[async_trait]
    impl TextToSpeech for CountingTts {
        async fn speak(&self, _text: &str, _language: Language) -> Result<(), SpeechError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(SpeechError::ServiceUnavailable("no speaker".to_string()))
        }

        fn model_name(&self) -> &str {
            "counting"
        }
    }

    async fn session(store: Arc<InMemoryHistoryStore>, config: SessionConfig) -> Session {
        Session::start(assistant(), store, config).await
    }

    #[tokio::test]
    async fn test_speech_errors_map_to_messages() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let cases = [
            (SpeechError::Unintelligible, "Sorry, I didn't understand that."),
            (
                SpeechError::ServiceUnavailable("offline".into()),
                "Sorry, speech service is unavailable.",
            ),
            (SpeechError::NoSpeech, "No speech detected."),
        ];
        for (error, expected) in cases {
            let mut s = session(store.clone(), SessionConfig::default())
                .await
                .with_speech_input(Arc::new(ScriptedStt(Err(error))));
            assert_eq!(s.handle_line("").await, SessionReply::Response(expected.to_string()));
            assert!(s.context().history().is_empty());
        }
    }

    #[tokio::test]
    async fn test_captured_speech_becomes_a_turn() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let mut s = session(store, SessionConfig::default())
            .await
            .with_speech_input(Arc::new(ScriptedStt(Ok("hello".into()))));
        assert_eq!(
            s.handle_line("   ").await,
            SessionReply::Response("Hello! How can I help you today?".into())
        );
        assert_eq!(s.context().history().len(), 1);
    }

    #[tokio::test]
    async fn test_capture_timeout_is_no_speech() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let config = SessionConfig {
            listen: ListenLimits {
                wait_timeout: Duration::from_millis(20),
                phrase_limit: Duration::from_millis(20),
            },
            ..SessionConfig::default()
        };
        let s = session(store, config)
            .await
            .with_speech_input(Arc::new(SilentStt));
        assert_eq!(s.capture().await, Err(SpeechError::NoSpeech));
    }

    #[tokio::test]
    async fn test_no_speech_input_configured() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let mut s = session(store, SessionConfig::default()).await;
        assert_eq!(
            s.handle_line("").await,
            SessionReply::Response("Sorry, speech service is unavailable.".into())
        );
    }

    #[tokio::test]
    async fn test_persists_every_n_turns() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let config = SessionConfig {
            persist_every: 3,
            ..SessionConfig::default()
        };
        let mut s = session(store.clone(), config).await;

        s.turn("hello").await;
        s.turn("weather in pune").await;
        assert!(store.snapshot().await.is_empty());

        s.turn("thanks").await;
        assert_eq!(store.snapshot().await.len(), 3);

        s.turn("hi").await;
        assert_eq!(store.snapshot().await.len(), 3);
        s.shutdown().await;
        assert_eq!(store.snapshot().await.len(), 4);
    }

    #[tokio::test]
    async fn test_reset_clears_entities() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let mut s = session(store, SessionConfig::default()).await;

        s.turn("price of wheat in delhi").await;
        assert_eq!(s.context().last_crop(), Some("wheat"));

        assert_eq!(s.handle_line("/reset").await, SessionReply::Reset);
        assert_eq!(s.context().last_crop(), None);
        assert_eq!(
            s.turn("what is the price").await,
            SessionReply::Response("Please specify a crop".into())
        );
    }

    #[tokio::test]
    async fn test_run_until_exit() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let tts = Arc::new(CountingTts::default());
        let mut s = session(store.clone(), SessionConfig::default())
            .await
            .with_speech_output(tts.clone());

        let input: &[u8] = b"weather in delhi\nquit\nhello\n";
        let mut output = Vec::new();
        s.run(input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Assistant: Hello! How can I help you today?\n"));
        assert!(text.contains("Assistant: Weather in delhi: Partly cloudy"));
        assert!(text.contains("Assistant: Goodbye! Have a great day!"));
        // Input after exit is never read as a turn
        assert_eq!(store.snapshot().await.len(), 1);
        // Greeting, weather reply and goodbye were all offered to speech output
        assert_eq!(tts.0.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_history_seeded_from_store() {
        let store = Arc::new(InMemoryHistoryStore::new());
        {
            let mut s = session(store.clone(), SessionConfig::default()).await;
            s.turn("hello").await;
            s.turn("weather in patna").await;
            s.shutdown().await;
        }

        let s = session(store, SessionConfig::default()).await;
        assert_eq!(s.context().history().len(), 2);
        assert_eq!(s.context().last_location(), None);
    }
}
