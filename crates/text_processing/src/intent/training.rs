//! Intent model training
//!
//! Fits a [`TfidfIntentModel`] from labelled utterances with mini-batch
//! gradient descent on the L2-regularized cross-entropy loss.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use krishi_core::Intent;

use super::model::{LogisticRegression, SparseVector, TfidfIntentModel, TfidfVectorizer};
use crate::{Result, TextProcessingError};

/// One labelled utterance (`text,intent` in CSV)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub text: String,
    pub intent: Intent,
}

impl TrainingSample {
    pub fn new(text: impl Into<String>, intent: Intent) -> Self {
        Self {
            text: text.into(),
            intent,
        }
    }
}

/// Trainer hyperparameters
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    pub max_features: usize,
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f32,
    /// Inverse regularization strength
    pub c: f32,
    /// Shuffle seed, fixed so training is reproducible
    pub seed: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            max_features: 1000,
            epochs: 300,
            batch_size: 8,
            learning_rate: 0.5,
            c: 1.0,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IntentTrainer {
    config: TrainerConfig,
}

impl IntentTrainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn train(&self, samples: &[TrainingSample]) -> Result<TfidfIntentModel> {
        if samples.is_empty() {
            return Err(TextProcessingError::TrainingData("no samples".to_string()));
        }
        if let Some(sample) = samples.iter().find(|s| s.intent == Intent::Exit) {
            return Err(TextProcessingError::TrainingData(format!(
                "'{}' is labelled exit, which is not classifiable",
                sample.text
            )));
        }

        let labels: Vec<Intent> = samples
            .iter()
            .map(|s| s.intent)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if labels.len() < 2 {
            return Err(TextProcessingError::TrainingData(
                "at least two distinct intents are required".to_string(),
            ));
        }

        let texts: Vec<&str> = samples.iter().map(|s| s.text.as_str()).collect();
        let vectorizer = TfidfVectorizer::fit(&texts, self.config.max_features)?;
        let dimension = vectorizer.dimension();

        let rows: Vec<(SparseVector, usize)> = samples
            .iter()
            .map(|s| {
                let target = labels.iter().position(|l| *l == s.intent).unwrap_or(0);
                (vectorizer.transform(&s.text), target)
            })
            .collect();

        let mut classifier = LogisticRegression {
            labels: labels.clone(),
            coefficients: vec![vec![0.0; dimension]; labels.len()],
            intercepts: vec![0.0; labels.len()],
        };

        let n = rows.len() as f32;
        let l2 = 1.0 / (self.config.c.max(f32::EPSILON) * n);
        let batch_size = self.config.batch_size.max(1);
        let mut order: Vec<usize> = (0..rows.len()).collect();
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        for epoch in 0..self.config.epochs {
            order.shuffle(&mut rng);
            for batch in order.chunks(batch_size) {
                self.step(&mut classifier, &rows, batch, l2);
            }

            if epoch + 1 == self.config.epochs || epoch % 100 == 0 {
                tracing::debug!(
                    epoch,
                    loss = mean_loss(&classifier, &rows),
                    "Intent model training"
                );
            }
        }

        let loss = mean_loss(&classifier, &rows);
        tracing::info!(
            samples = rows.len(),
            features = dimension,
            labels = labels.len(),
            loss,
            "Trained intent model"
        );

        TfidfIntentModel::new(vectorizer, classifier)
    }

    fn step(
        &self,
        classifier: &mut LogisticRegression,
        rows: &[(SparseVector, usize)],
        batch: &[usize],
        l2: f32,
    ) {
        let k = classifier.labels.len();
        let scale = self.config.learning_rate / batch.len() as f32;
        let mut grad_w = vec![Vec::<(usize, f32)>::new(); k];
        let mut grad_b = vec![0.0f32; k];

        for &row in batch {
            let (features, target) = &rows[row];
            let probs = classifier.predict_proba(features);
            for (class, p) in probs.into_iter().enumerate() {
                let err = p - if class == *target { 1.0 } else { 0.0 };
                grad_b[class] += err;
                for &(i, x) in features {
                    grad_w[class].push((i, err * x));
                }
            }
        }

        let decay = 1.0 - self.config.learning_rate * l2;
        for class in 0..k {
            let weights = &mut classifier.coefficients[class];
            for w in weights.iter_mut() {
                *w *= decay;
            }
            for &(i, g) in &grad_w[class] {
                weights[i] -= scale * g;
            }
            classifier.intercepts[class] -= scale * grad_b[class];
        }
    }
}

fn mean_loss(classifier: &LogisticRegression, rows: &[(SparseVector, usize)]) -> f32 {
    let total: f32 = rows
        .iter()
        .map(|(features, target)| {
            let p = classifier.predict_proba(features)[*target];
            -(p.max(1e-9)).ln()
        })
        .sum();
    total / rows.len().max(1) as f32
}

/// Read `text,intent` rows from a CSV file with a header
pub fn load_samples(path: impl AsRef<Path>) -> Result<Vec<TrainingSample>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut samples = Vec::new();
    for record in reader.deserialize() {
        let sample: TrainingSample = record?;
        if !sample.text.trim().is_empty() {
            samples.push(sample);
        }
    }
    Ok(samples)
}

/// Labelled utterances shipped with the assistant
pub fn builtin_corpus() -> Vec<TrainingSample> {
    const CORPUS: &[(&str, Intent)] = &[
        ("what is the price of wheat", Intent::GetPrice),
        ("how much does rice cost", Intent::GetPrice),
        ("tell me the weather in patna", Intent::GetWeather),
        ("will it rain today", Intent::GetWeather),
        ("my tomato plants have disease", Intent::GetAdvice),
        ("how to treat pests in wheat", Intent::GetAdvice),
        ("hello", Intent::Greeting),
        ("hi", Intent::Greeting),
        ("good morning", Intent::Greeting),
        ("what's the rate for potatoes", Intent::GetPrice),
        ("weather forecast for delhi", Intent::GetWeather),
        ("need advice for rice cultivation", Intent::GetAdvice),
        ("नमस्ते", Intent::Greeting),
        ("गेहूं का भाव", Intent::GetPrice),
        ("दिल्ली का मौसम", Intent::GetWeather),
        ("टमाटर की बीमारी", Intent::GetAdvice),
        ("gehun ka bhav batao", Intent::GetPrice),
        ("tamatar ka bhav batao", Intent::GetPrice),
        ("delhi mein mausam kaisa hai", Intent::GetWeather),
        ("patna ka temperature kya hai", Intent::GetWeather),
        ("tamatar ki salah chahiye", Intent::GetAdvice),
        ("chawal ke rog ka upay", Intent::GetAdvice),
        ("aloo ke keet ka ilaj", Intent::GetAdvice),
        ("हैलो", Intent::Greeting),
        ("टमाटर की सलाह", Intent::GetAdvice),
        ("which varieties of wheat are good", Intent::GetVarietyInfo),
        ("best seed type for potato", Intent::GetVarietyInfo),
        ("गेहूं की किस्में बताओ", Intent::GetVarietyInfo),
        ("where can i sell my crop", Intent::GetMarketInfo),
        ("which markets are open in pune", Intent::GetMarketInfo),
        ("पटना में मंडी कहाँ है", Intent::GetMarketInfo),
    ];

    CORPUS
        .iter()
        .map(|(text, intent)| TrainingSample::new(*text, *intent))
        .collect()
}
