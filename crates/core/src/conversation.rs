//! Conversation turn records

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Intent, Language};

/// One completed turn, as kept in history and written to the history log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    #[serde(deserialize_with = "lenient_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(alias = "user_text")]
    pub utterance: String,
    pub intent: Intent,
    pub response: String,
    pub language: Language,
}

impl TurnRecord {
    /// Create a record stamped with the current time
    pub fn now(
        utterance: impl Into<String>,
        intent: Intent,
        response: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            utterance: utterance.into(),
            intent,
            response: response.into(),
            language,
        }
    }
}

/// RFC 3339, or a zone-less ISO 8601 timestamp taken as UTC
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("unrecognized timestamp '{}'", raw))
    })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_timestamp_formats() {
        let utc = parse_timestamp("2025-09-10T14:03:22.123456+05:30").unwrap();
        assert_eq!(utc.hour(), 8);

        let naive = parse_timestamp("2025-09-10T14:03:22.123456").unwrap();
        assert_eq!((naive.day(), naive.hour(), naive.second()), (10, 14, 22));

        assert!(parse_timestamp("2025-09-10 14:03:22").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_reads_legacy_row() {
        let json = r#"{
            "timestamp": "2025-09-10T14:03:22.123456",
            "user_text": "price of wheat",
            "intent": "get_price",
            "response": "Please specify a location",
            "language": "english"
        }"#;
        let record: TurnRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.utterance, "price of wheat");
        assert_eq!(record.intent, Intent::GetPrice);
        assert_eq!(record.timestamp.minute(), 3);
    }

    #[test]
    fn test_round_trip_keeps_utterance_column() {
        let record = TurnRecord::now("hello", Intent::Greeting, "Hi", Language::English);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"utterance\":\"hello\""));
        let back: TurnRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
