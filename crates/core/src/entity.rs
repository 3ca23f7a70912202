//! Entities extracted from an utterance

use serde::{Deserialize, Serialize};

/// Kind of entity the lexicon knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Crop,
    Location,
    Variety,
    Season,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crop => "crop",
            Self::Location => "location",
            Self::Variety => "variety",
            Self::Season => "season",
        }
    }
}

/// Where a resolved entity value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntitySource {
    /// Matched in the current utterance
    Utterance,
    /// Carried over from an earlier turn
    Context,
}

/// A canonical entity value plus its provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEntity {
    /// Canonical lexicon key (e.g. "wheat", "patna")
    pub value: String,
    pub source: EntitySource,
}

impl ResolvedEntity {
    pub fn from_utterance(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            source: EntitySource::Utterance,
        }
    }

    pub fn from_context(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            source: EntitySource::Context,
        }
    }
}

/// Entities for one turn; each optional, at most one per kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBundle {
    pub crop: Option<ResolvedEntity>,
    pub location: Option<ResolvedEntity>,
    pub variety: Option<ResolvedEntity>,
    /// Growing season, only ever taken from the utterance
    pub season: Option<ResolvedEntity>,
}

impl EntityBundle {
    pub fn crop(&self) -> Option<&str> {
        self.crop.as_ref().map(|e| e.value.as_str())
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_ref().map(|e| e.value.as_str())
    }

    pub fn variety(&self) -> Option<&str> {
        self.variety.as_ref().map(|e| e.value.as_str())
    }

    pub fn season(&self) -> Option<&str> {
        self.season.as_ref().map(|e| e.value.as_str())
    }

    /// Check if no entity was resolved at all
    pub fn is_empty(&self) -> bool {
        self.crop.is_none()
            && self.location.is_none()
            && self.variety.is_none()
            && self.season.is_none()
    }
}
