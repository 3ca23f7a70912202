//! Entity Extraction
//!
//! Dictionary lookup of crop, location, variety and season. For each kind the
//! lexicon entries are tried in priority order and the first entry with a
//! matching variant wins. Crop and location fall back to the values carried
//! over from earlier turns; variety and season never do.

use std::sync::Arc;

use krishi_config::Lexicon;
use krishi_core::{EntityBundle, EntityKind, ResolvedEntity};

use crate::matching::{NormalizedText, PhraseMatcher};

/// Entity values remembered from earlier turns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextHints<'a> {
    pub crop: Option<&'a str>,
    pub location: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct EntityExtractor {
    lexicon: Arc<Lexicon>,
    matcher: PhraseMatcher,
}

impl EntityExtractor {
    pub fn new(lexicon: Arc<Lexicon>, matcher: PhraseMatcher) -> Self {
        Self { lexicon, matcher }
    }

    /// Extract entities; a pure function of the utterance and the hints
    pub fn extract(&self, utterance: &str, hints: ContextHints<'_>) -> EntityBundle {
        let text = NormalizedText::new(utterance);

        let bundle = EntityBundle {
            crop: self
                .find(&text, EntityKind::Crop)
                .or_else(|| hints.crop.map(ResolvedEntity::from_context)),
            location: self
                .find(&text, EntityKind::Location)
                .or_else(|| hints.location.map(ResolvedEntity::from_context)),
            variety: self.find(&text, EntityKind::Variety),
            season: self.find(&text, EntityKind::Season),
        };

        tracing::debug!(
            crop = ?bundle.crop,
            location = ?bundle.location,
            variety = ?bundle.variety,
            season = ?bundle.season,
            "Extracted entities"
        );

        bundle
    }

    /// First matching key of one kind in the utterance alone
    pub fn find(&self, text: &NormalizedText, kind: EntityKind) -> Option<ResolvedEntity> {
        self.matcher
            .first_match(text, self.lexicon.entries(kind))
            .map(|entry| ResolvedEntity::from_utterance(entry.key.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krishi_config::MatchPolicy;
    use krishi_core::EntitySource;

    fn extractor() -> EntityExtractor {
        EntityExtractor::new(Arc::new(Lexicon::default()), PhraseMatcher::default())
    }

    #[test]
    fn test_extract_from_utterance() {
        let bundle = extractor().extract("price of tomato in patna", ContextHints::default());
        assert_eq!(bundle.crop(), Some("tomato"));
        assert_eq!(bundle.location(), Some("patna"));
        assert_eq!(bundle.variety(), None);
        assert_eq!(bundle.crop.unwrap().source, EntitySource::Utterance);
    }

    #[test]
    fn test_hindi_variants() {
        let bundle = extractor().extract("गेहूं का भाव", ContextHints::default());
        assert_eq!(bundle.crop(), Some("wheat"));
        assert_eq!(bundle.location(), None);

        let bundle = extractor().extract("पटना में आलू", ContextHints::default());
        assert_eq!(bundle.crop(), Some("potato"));
        assert_eq!(bundle.location(), Some("patna"));
    }

    #[test]
    fn test_context_fallback() {
        let hints = ContextHints {
            crop: Some("wheat"),
            location: Some("delhi"),
        };
        let bundle = extractor().extract("what about pune", hints);
        assert_eq!(bundle.crop(), Some("wheat"));
        assert_eq!(bundle.crop.as_ref().unwrap().source, EntitySource::Context);
        assert_eq!(bundle.location(), Some("pune"));
        assert_eq!(bundle.location.unwrap().source, EntitySource::Utterance);
    }

    #[test]
    fn test_variety_and_season_do_not_fall_back() {
        let hints = ContextHints {
            crop: Some("rice"),
            location: None,
        };
        let bundle = extractor().extract("advice please", hints);
        assert_eq!(bundle.variety, None);
        assert_eq!(bundle.season, None);

        let bundle = extractor().extract("hybrid tomato advice for summer", hints);
        assert_eq!(bundle.variety(), Some("hybrid"));
        assert_eq!(bundle.season(), Some("summer"));
        assert_eq!(bundle.crop(), Some("tomato"));
    }

    #[test]
    fn test_priority_order() {
        let bundle = extractor().extract("black gram rate", ContextHints::default());
        assert_eq!(bundle.crop(), Some("urd"));

        let bundle = extractor().extract("shimla mirch ka bhav", ContextHints::default());
        assert_eq!(bundle.crop(), Some("capsicum"));
    }

    #[test]
    fn test_idempotent() {
        let e = extractor();
        let hints = ContextHints {
            crop: Some("wheat"),
            location: None,
        };
        let first = e.extract("weather in bengaluru", hints);
        let second = e.extract("weather in bengaluru", hints);
        assert_eq!(first, second);
        assert_eq!(first.location(), Some("bangalore"));
    }

    #[test]
    fn test_whole_word_vs_substring() {
        let text = "the sonalika seeds from tokyo";
        let whole = extractor().extract(text, ContextHints::default());
        assert_eq!(whole.variety(), None);

        let substring = EntityExtractor::new(
            Arc::new(Lexicon::default()),
            PhraseMatcher::new(MatchPolicy::Substring),
        )
        .extract(text, ContextHints::default());
        assert_eq!(substring.variety(), Some("sona"));
    }
}
