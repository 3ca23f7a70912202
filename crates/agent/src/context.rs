//! Conversation Context
//!
//! Per-session memory of the last crop, location and intent, plus a capped
//! history of completed turns. Owned by exactly one session.

use std::collections::VecDeque;

use krishi_core::{EntityBundle, Intent, TurnRecord};
use krishi_text_processing::ContextHints;

/// Default number of turns kept in history
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct ConversationContext {
    last_crop: Option<String>,
    last_location: Option<String>,
    last_intent: Option<Intent>,
    history: VecDeque<TurnRecord>,
    history_limit: usize,
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl ConversationContext {
    pub fn new(history_limit: usize) -> Self {
        let history_limit = history_limit.max(1);
        Self {
            last_crop: None,
            last_location: None,
            last_intent: None,
            history: VecDeque::with_capacity(history_limit),
            history_limit,
        }
    }

    /// Start from previously persisted turns; entity slots stay empty
    pub fn with_history(history_limit: usize, records: Vec<TurnRecord>) -> Self {
        let mut context = Self::new(history_limit);
        for record in records {
            context.push_history(record);
        }
        context
    }

    pub fn last_crop(&self) -> Option<&str> {
        self.last_crop.as_deref()
    }

    pub fn last_location(&self) -> Option<&str> {
        self.last_location.as_deref()
    }

    pub fn last_intent(&self) -> Option<Intent> {
        self.last_intent
    }

    pub fn history(&self) -> &VecDeque<TurnRecord> {
        &self.history
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Values offered to the entity extractor as fallback
    pub fn hints(&self) -> ContextHints<'_> {
        ContextHints {
            crop: self.last_crop(),
            location: self.last_location(),
        }
    }

    /// Apply a completed non-exit turn
    ///
    /// Crop and location are only overwritten when the turn resolved one.
    pub fn record_turn(&mut self, entities: &EntityBundle, record: TurnRecord) {
        if let Some(crop) = entities.crop() {
            self.last_crop = Some(crop.to_string());
        }
        if let Some(location) = entities.location() {
            self.last_location = Some(location.to_string());
        }
        self.last_intent = Some(record.intent);
        self.push_history(record);
    }

    /// Forget crop, location and intent; history is kept
    pub fn clear(&mut self) {
        self.last_crop = None;
        self.last_location = None;
        self.last_intent = None;
    }

    fn push_history(&mut self, record: TurnRecord) {
        while self.history.len() >= self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krishi_core::{Language, ResolvedEntity};

    fn record(i: usize, intent: Intent) -> TurnRecord {
        TurnRecord::now(format!("turn {}", i), intent, "ok", Language::English)
    }

    fn bundle(crop: Option<&str>, location: Option<&str>) -> EntityBundle {
        EntityBundle {
            crop: crop.map(ResolvedEntity::from_utterance),
            location: location.map(ResolvedEntity::from_utterance),
            ..EntityBundle::default()
        }
    }

    #[test]
    fn test_record_turn_updates_slots() {
        let mut ctx = ConversationContext::default();
        ctx.record_turn(&bundle(Some("wheat"), Some("patna")), record(0, Intent::GetPrice));
        ctx.record_turn(&bundle(None, Some("delhi")), record(1, Intent::GetWeather));

        assert_eq!(ctx.last_crop(), Some("wheat"));
        assert_eq!(ctx.last_location(), Some("delhi"));
        assert_eq!(ctx.last_intent(), Some(Intent::GetWeather));
        assert_eq!(ctx.history().len(), 2);
    }

    #[test]
    fn test_history_capped() {
        let mut ctx = ConversationContext::new(100);
        for i in 0..150 {
            ctx.record_turn(&EntityBundle::default(), record(i, Intent::Greeting));
        }
        assert_eq!(ctx.history().len(), 100);
        assert_eq!(ctx.history().front().unwrap().utterance, "turn 50");
        assert_eq!(ctx.history().back().unwrap().utterance, "turn 149");
    }

    #[test]
    fn test_with_history_trims_and_leaves_slots_empty() {
        let records = (0..5).map(|i| record(i, Intent::GetPrice)).collect();
        let ctx = ConversationContext::with_history(3, records);
        assert_eq!(ctx.history().len(), 3);
        assert_eq!(ctx.history()[0].utterance, "turn 2");
        assert_eq!(ctx.last_crop(), None);
        assert_eq!(ctx.last_intent(), None);
    }

    #[test]
    fn test_clear_keeps_history() {
        let mut ctx = ConversationContext::default();
        ctx.record_turn(&bundle(Some("rice"), Some("pune")), record(0, Intent::GetAdvice));
        ctx.clear();

        assert_eq!(ctx.hints(), ContextHints::default());
        assert_eq!(ctx.history().len(), 1);
    }
}
