//! Krishi agricultural query assistant
//!
//! Usage:
//!   krishi                          # interactive chat (default)
//!   krishi ask "price of tomato in patna"
//!   krishi train --data samples.csv # fit the statistical intent model

mod speech;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;

use krishi_agent::{Assistant, ConversationContext, Session, SessionConfig};
use krishi_config::{load_settings, Settings};
use krishi_core::HistoryStore;
use krishi_persistence::CsvHistoryStore;
use krishi_text_processing::intent::{builtin_corpus, load_samples, TrainerConfig};
use krishi_text_processing::{IntentTrainer, TrainingSample};

use speech::{ConsoleLines, ConsoleSpeechInput, ConsoleSpeechOutput};

#[derive(Parser)]
#[command(name = "krishi", version)]
#[command(about = "Answer crop price, weather and farming questions in English or Hindi")]
struct Cli {
    /// Configuration environment (loads config/<env>.yaml); defaults to $KRISHI_ENV
    #[arg(short, long)]
    env: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive session; an empty line captures speech
    Chat,

    /// Answer a single query and exit
    Ask {
        /// The query text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Fit the intent model and write its artifacts
    Train {
        /// CSV file with `text,intent` columns; the built-in corpus when omitted
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = cli.env.clone().or_else(|| std::env::var("KRISHI_ENV").ok());
    let config = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        }
    };

    init_tracing(&config);
    tracing::debug!(
        environment = env.as_deref().unwrap_or("default"),
        "Configuration loaded"
    );

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => chat(&config).await,
        Command::Ask { query } => ask(&config, &query.join(" ")),
        Command::Train { data } => train(&config, data),
    }
}

fn init_tracing(config: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.observability.log_level;
        format!("krishi={}", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.observability.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };
    subscriber.with(fmt_layer).init();
}

async fn chat(config: &Settings) -> anyhow::Result<()> {
    let assistant = Arc::new(Assistant::from_settings(config));
    let history: Arc<dyn HistoryStore> =
        Arc::new(CsvHistoryStore::new(config.data.history_path()));

    let lines = ConsoleLines::stdin();
    let mut session = Session::start(assistant, history, SessionConfig::from(config)).await;
    if config.speech.input_enabled {
        session = session.with_speech_input(Arc::new(ConsoleSpeechInput::new(lines.clone())));
    }
    if config.speech.output_enabled {
        session = session.with_speech_output(Arc::new(ConsoleSpeechOutput::new(
            config.speech.speaking_rate,
        )));
    }

    println!("Krishi assistant v{}", env!("CARGO_PKG_VERSION"));
    println!("Ask about crop prices, weather, advice, varieties or markets.");
    if config.speech.input_enabled {
        println!("Press Enter on an empty line to speak; type /reset to forget crop and location.");
    }

    session
        .run_with(lines, tokio::io::stdout())
        .await
        .context("chat session failed")?;
    Ok(())
}

fn ask(config: &Settings, query: &str) -> anyhow::Result<()> {
    let assistant = Assistant::from_settings(config);
    let mut context = ConversationContext::new(config.conversation.history_limit);

    let outcome = assistant.process_turn(query, &mut context);
    println!("{}", outcome.text());
    Ok(())
}

fn train(config: &Settings, data: Option<PathBuf>) -> anyhow::Result<()> {
    let samples: Vec<TrainingSample> = match &data {
        Some(path) => load_samples(path)
            .with_context(|| format!("failed to read training data from {}", path.display()))?,
        None => builtin_corpus(),
    };
    tracing::info!(
        samples = samples.len(),
        source = data
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string()),
        "Training intent model"
    );

    let model = IntentTrainer::new(TrainerConfig::default())
        .train(&samples)
        .context("training failed")?;

    let correct = samples
        .iter()
        .filter(|s| model.predict(&s.text).map(|(intent, _)| intent) == Some(s.intent))
        .count();

    model
        .save(&config.models.vectorizer_path, &config.models.classifier_path)
        .context("failed to write model artifacts")?;

    println!(
        "Trained on {} samples ({} features), training accuracy {:.1}%",
        samples.len(),
        model.vectorizer().dimension(),
        100.0 * correct as f64 / samples.len() as f64
    );
    println!("Vectorizer: {}", config.models.vectorizer_path);
    println!("Classifier: {}", config.models.classifier_path);
    Ok(())
}
