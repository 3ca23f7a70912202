//! User intents
//!
//! The set of intents is closed: response generation matches on it
//! exhaustively, so a new intent is a compile-time checked change.

use serde::{Deserialize, Serialize};

/// Intent of a single turn
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    GetPrice,
    GetWeather,
    GetAdvice,
    GetVarietyInfo,
    GetMarketInfo,
    Greeting,
    #[default]
    Unknown,
    /// Pseudo-intent recognized before classification; ends the session
    Exit,
}

impl Intent {
    /// Stable label used in history logs and model artifacts
    pub fn label(&self) -> &'static str {
        match self {
            Self::GetPrice => "get_price",
            Self::GetWeather => "get_weather",
            Self::GetAdvice => "get_advice",
            Self::GetVarietyInfo => "get_variety_info",
            Self::GetMarketInfo => "get_market_info",
            Self::Greeting => "greeting",
            Self::Unknown => "unknown",
            Self::Exit => "exit",
        }
    }

    /// Parse a label; unknown labels map to `None`
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "get_price" => Some(Self::GetPrice),
            "get_weather" => Some(Self::GetWeather),
            "get_advice" => Some(Self::GetAdvice),
            "get_variety_info" => Some(Self::GetVarietyInfo),
            "get_market_info" => Some(Self::GetMarketInfo),
            "greeting" => Some(Self::Greeting),
            "unknown" => Some(Self::Unknown),
            "exit" => Some(Self::Exit),
            _ => None,
        }
    }

    /// Intents a classifier may produce (everything except `Exit`)
    pub fn classifiable() -> &'static [Intent] {
        &[
            Self::GetPrice,
            Self::GetWeather,
            Self::GetAdvice,
            Self::GetVarietyInfo,
            Self::GetMarketInfo,
            Self::Greeting,
            Self::Unknown,
        ]
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for intent in Intent::classifiable().iter().chain([Intent::Exit].iter()) {
            assert_eq!(Intent::from_label(intent.label()), Some(*intent));
        }
        assert_eq!(Intent::from_label("book_ticket"), None);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Intent::GetVarietyInfo).unwrap();
        assert_eq!(json, "\"get_variety_info\"");
    }

    #[test]
    fn test_exit_is_not_classifiable() {
        assert!(!Intent::classifiable().contains(&Intent::Exit));
    }
}
