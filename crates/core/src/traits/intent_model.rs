//! Statistical intent classifier capability

use crate::{Intent, Result};

/// A trained intent classifier
///
/// Optional: the rule-based classifier is always available, and a model is
/// only consulted when one has been loaded.
pub trait IntentModel: Send + Sync {
    /// Predict the most likely intent with its probability in `[0, 1]`
    fn classify(&self, utterance: &str) -> Result<(Intent, f32)>;

    /// Get model name for logging
    fn model_name(&self) -> &str;
}
