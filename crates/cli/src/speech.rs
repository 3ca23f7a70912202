//! Console speech collaborators
//!
//! Stand-ins for a microphone and a speaker: "listening" takes the next line
//! typed at the terminal, "speaking" writes the text to the log at the
//! configured rate.
//!
//! Stdin has exactly one reader task. The REPL and speech capture both pull
//! lines from its channel, so a capture that times out leaves the next line
//! for the REPL.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Mutex};

use krishi_agent::LineSource;
use krishi_core::{Language, ListenLimits, SpeechError, SpeechToText, TextToSpeech};

/// Lines typed at the terminal, shared by the REPL and speech capture
#[derive(Debug, Clone)]
pub struct ConsoleLines {
    rx: Arc<Mutex<mpsc::Receiver<String>>>,
}

impl ConsoleLines {
    /// Start the stdin reader task
    pub fn stdin() -> Self {
        Self::spawn(BufReader::new(tokio::io::stdin()))
    }

    pub fn spawn<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            let mut lines = reader.lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if tx.send(line).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read terminal input");
                        break;
                    }
                }
            }
        });
        Self {
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Next line, or `None` once input is closed; cancel safe
    pub async fn recv(&self) -> Option<String> {
        self.rx.lock().await.recv().await
    }
}

#[async_trait]
impl LineSource for ConsoleLines {
    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        Ok(self.recv().await)
    }
}

/// Takes the transcript of one utterance from the terminal
#[derive(Debug, Clone)]
pub struct ConsoleSpeechInput {
    lines: ConsoleLines,
}

impl ConsoleSpeechInput {
    pub fn new(lines: ConsoleLines) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl SpeechToText for ConsoleSpeechInput {
    async fn listen(&self, limits: ListenLimits) -> Result<String, SpeechError> {
        tracing::debug!(
            wait_ms = limits.wait_timeout.as_millis() as u64,
            phrase_ms = limits.phrase_limit.as_millis() as u64,
            "Waiting for transcript"
        );

        eprint!("(say) ");
        let _ = std::io::stderr().flush();

        let line = self
            .lines
            .recv()
            .await
            .ok_or_else(|| SpeechError::ServiceUnavailable("terminal input closed".to_string()))?;

        let text = line.trim();
        if text.is_empty() {
            return Err(SpeechError::NoSpeech);
        }
        if text == "?" {
            return Err(SpeechError::Unintelligible);
        }
        Ok(text.to_string())
    }

    fn model_name(&self) -> &str {
        "console"
    }
}

/// Logs what would be spoken
#[derive(Debug)]
pub struct ConsoleSpeechOutput {
    words_per_minute: u32,
}

impl ConsoleSpeechOutput {
    pub fn new(words_per_minute: u32) -> Self {
        Self { words_per_minute }
    }
}

#[async_trait]
impl TextToSpeech for ConsoleSpeechOutput {
    async fn speak(&self, text: &str, language: Language) -> Result<(), SpeechError> {
        tracing::info!(
            language = %language,
            rate = self.words_per_minute,
            words = text.split_whitespace().count(),
            "Speaking response"
        );
        Ok(())
    }

    fn model_name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_timed_out_capture_leaves_next_line() {
        let (mut keyboard, terminal) = tokio::io::duplex(256);
        let mut lines = ConsoleLines::spawn(BufReader::new(terminal));
        let stt = ConsoleSpeechInput::new(lines.clone());

        let capture = tokio::time::timeout(
            Duration::from_millis(20),
            stt.listen(ListenLimits::default()),
        )
        .await;
        assert!(capture.is_err());

        keyboard.write_all(b"price of wheat in patna\n").await.unwrap();
        assert_eq!(
            lines.next_line().await.unwrap().as_deref(),
            Some("price of wheat in patna")
        );
    }

    #[tokio::test]
    async fn test_capture_reads_shared_lines() {
        let (mut keyboard, terminal) = tokio::io::duplex(256);
        let mut lines = ConsoleLines::spawn(BufReader::new(terminal));
        let stt = ConsoleSpeechInput::new(lines.clone());

        keyboard.write_all(b"hello\n?\n   \nweather in pune\n").await.unwrap();
        assert_eq!(stt.listen(ListenLimits::default()).await, Ok("hello".to_string()));
        assert_eq!(
            stt.listen(ListenLimits::default()).await,
            Err(SpeechError::Unintelligible)
        );
        assert_eq!(stt.listen(ListenLimits::default()).await, Err(SpeechError::NoSpeech));
        assert_eq!(
            lines.next_line().await.unwrap().as_deref(),
            Some("weather in pune")
        );

        drop(keyboard);
        assert_eq!(lines.next_line().await.unwrap(), None);
        assert!(matches!(
            stt.listen(ListenLimits::default()).await,
            Err(SpeechError::ServiceUnavailable(_))
        ));
    }
}
