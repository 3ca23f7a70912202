//! Statistical intent model
//!
//! TF-IDF features over word tokens feeding a multinomial logistic
//! regression. Both halves are plain JSON artifacts so they can be produced
//! by the bundled trainer or exported from another toolchain.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

use krishi_core::{Intent, IntentModel};

use crate::{Result, TextProcessingError};

/// Sparse feature vector: (feature index, weight), ascending by index
pub type SparseVector = Vec<(usize, f32)>;

fn default_max_features() -> usize {
    1000
}

/// Lowercase word tokens of at least two characters
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .unicode_words()
        .filter(|w| w.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// TF-IDF vectorizer with smoothed idf and L2-normalized output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term → feature index
    pub vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency per feature index
    pub idf: Vec<f32>,
    #[serde(default = "default_max_features")]
    pub max_features: usize,
}

impl TfidfVectorizer {
    /// Learn vocabulary and idf weights from a corpus
    ///
    /// Keeps the `max_features` most frequent terms; feature indices follow
    /// alphabetical term order.
    pub fn fit<S: AsRef<str>>(documents: &[S], max_features: usize) -> Result<Self> {
        if documents.is_empty() {
            return Err(TextProcessingError::TrainingData(
                "Cannot fit vectorizer on an empty corpus".to_string(),
            ));
        }

        let mut term_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let tokens = tokenize(doc.as_ref());
            let mut seen = std::collections::HashSet::new();
            for token in tokens {
                *term_counts.entry(token.clone()).or_insert(0) += 1;
                if seen.insert(token.clone()) {
                    *doc_freq.entry(token).or_insert(0) += 1;
                }
            }
        }

        if term_counts.is_empty() {
            return Err(TextProcessingError::TrainingData(
                "Corpus contains no usable tokens".to_string(),
            ));
        }

        let mut ranked: Vec<(String, usize)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features.max(1));

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n_docs = documents.len() as f32;
        let idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f32;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term, index))
            .collect();

        Ok(Self {
            vocabulary,
            idf,
            max_features,
        })
    }

    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut features: SparseVector = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();

        let norm = features.iter().map(|(_, v)| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, value) in features.iter_mut() {
                *value /= norm;
            }
        }
        features
    }

    fn validate(&self) -> Result<()> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(TextProcessingError::InvalidModel(format!(
                "vocabulary has {} terms but idf has {} weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        if self.vocabulary.values().any(|&i| i >= self.idf.len()) {
            return Err(TextProcessingError::InvalidModel(
                "vocabulary index out of range".to_string(),
            ));
        }
        Ok(())
    }
}

/// Multinomial logistic regression over sparse features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub labels: Vec<Intent>,
    /// One weight row per label
    pub coefficients: Vec<Vec<f32>>,
    pub intercepts: Vec<f32>,
}

impl LogisticRegression {
    /// Class probabilities in `labels` order
    pub fn predict_proba(&self, features: &[(usize, f32)]) -> Vec<f32> {
        let scores: Vec<f32> = self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, bias)| {
                bias + features
                    .iter()
                    .filter_map(|&(i, x)| row.get(i).map(|w| w * x))
                    .sum::<f32>()
            })
            .collect();
        softmax(&scores)
    }

    /// Most probable label with its probability
    pub fn predict(&self, features: &[(usize, f32)]) -> Option<(Intent, f32)> {
        self.predict_proba(features)
            .into_iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .and_then(|(i, p)| self.labels.get(i).map(|label| (*label, p)))
    }

    fn validate(&self, dimension: usize) -> Result<()> {
        if self.labels.is_empty() {
            return Err(TextProcessingError::InvalidModel(
                "classifier has no labels".to_string(),
            ));
        }
        if self.labels.contains(&Intent::Exit) {
            return Err(TextProcessingError::InvalidModel(
                "exit is not a classifiable intent".to_string(),
            ));
        }
        if self.coefficients.len() != self.labels.len()
            || self.intercepts.len() != self.labels.len()
        {
            return Err(TextProcessingError::InvalidModel(
                "coefficient or intercept count does not match labels".to_string(),
            ));
        }
        if self.coefficients.iter().any(|row| row.len() != dimension) {
            return Err(TextProcessingError::InvalidModel(format!(
                "coefficient rows must have {} weights",
                dimension
            )));
        }
        Ok(())
    }
}

pub(crate) fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum > 0.0 {
        exps.into_iter().map(|e| e / sum).collect()
    } else {
        vec![0.0; scores.len()]
    }
}

/// Vectorizer and classifier loaded together
#[derive(Debug, Clone)]
pub struct TfidfIntentModel {
    vectorizer: TfidfVectorizer,
    classifier: LogisticRegression,
}

impl TfidfIntentModel {
    pub fn new(vectorizer: TfidfVectorizer, classifier: LogisticRegression) -> Result<Self> {
        vectorizer.validate()?;
        classifier.validate(vectorizer.dimension())?;
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Load both artifacts from JSON files
    pub fn load(vectorizer_path: impl AsRef<Path>, classifier_path: impl AsRef<Path>) -> Result<Self> {
        let vectorizer: TfidfVectorizer = read_json(vectorizer_path.as_ref())?;
        let classifier: LogisticRegression = read_json(classifier_path.as_ref())?;
        let model = Self::new(vectorizer, classifier)?;

        tracing::info!(
            vectorizer = %vectorizer_path.as_ref().display(),
            classifier = %classifier_path.as_ref().display(),
            features = model.vectorizer.dimension(),
            labels = model.classifier.labels.len(),
            "Loaded intent model"
        );
        Ok(model)
    }

    /// Write both artifacts as JSON, creating parent directories
    pub fn save(&self, vectorizer_path: impl AsRef<Path>, classifier_path: impl AsRef<Path>) -> Result<()> {
        write_json(vectorizer_path.as_ref(), &self.vectorizer)?;
        write_json(classifier_path.as_ref(), &self.classifier)?;
        Ok(())
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }

    pub fn predict(&self, utterance: &str) -> Option<(Intent, f32)> {
        let features = self.vectorizer.transform(utterance);
        self.classifier.predict(&features)
    }
}

impl IntentModel for TfidfIntentModel {
    fn classify(&self, utterance: &str) -> krishi_core::Result<(Intent, f32)> {
        self.predict(utterance).ok_or_else(|| {
            krishi_core::Error::Model("classifier produced no prediction".to_string())
        })
    }

    fn model_name(&self) -> &str {
        "tfidf-logreg"
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(TextProcessingError::ModelNotFound(path.display().to_string()));
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}
