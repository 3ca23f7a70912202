//! Response Generator
//!
//! Maps (intent, entities, language) to a localized answer. Every string the
//! user sees goes through the localization table, including the report lines
//! built from knowledge records.

use std::sync::Arc;

use krishi_config::{Lexicon, Localization, MessageKey};
use krishi_core::{EntityBundle, Intent, Language};
use krishi_persistence::{AdviceLookup, KnowledgeBase, PriceLookup, PriceQuery};

#[derive(Debug, Clone)]
pub struct ResponseGenerator {
    knowledge: Arc<KnowledgeBase>,
    lexicon: Arc<Lexicon>,
}

impl ResponseGenerator {
    pub fn new(knowledge: Arc<KnowledgeBase>, lexicon: Arc<Lexicon>) -> Self {
        Self { knowledge, lexicon }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    fn l10n(&self) -> &Localization {
        self.knowledge.localization()
    }

    /// Resolve a plain message in `language`
    pub fn message(&self, key: MessageKey, language: Language) -> String {
        self.l10n().resolve(key, language, &[])
    }

    pub fn respond(&self, intent: Intent, entities: &EntityBundle, language: Language) -> String {
        match intent {
            Intent::GetPrice => match (entities.crop(), entities.location()) {
                (Some(crop), Some(location)) => {
                    self.price(crop, location, entities.variety(), language)
                }
                (None, _) => self.message(MessageKey::MissingCrop, language),
                (Some(_), None) => self.message(MessageKey::MissingLocation, language),
            },
            Intent::GetWeather => match entities.location() {
                Some(location) => self.weather(location, language),
                None => self.message(MessageKey::MissingLocation, language),
            },
            Intent::GetAdvice => match entities.crop() {
                Some(crop) => self.advice(crop, entities.season(), language),
                None => self.message(MessageKey::MissingCrop, language),
            },
            Intent::GetVarietyInfo => match entities.crop() {
                Some(crop) => self.varieties(crop, language),
                None => self.message(MessageKey::MissingCrop, language),
            },
            Intent::GetMarketInfo => match entities.location() {
                Some(location) => self.markets(location, language),
                None => self.message(MessageKey::MissingLocation, language),
            },
            Intent::Greeting => self.message(MessageKey::Greeting, language),
            Intent::Unknown => self.message(MessageKey::HelpPrompt, language),
            Intent::Exit => self.message(MessageKey::Goodbye, language),
        }
    }

    fn price(&self, crop: &str, location: &str, variety: Option<&str>, language: Language) -> String {
        let query = PriceQuery {
            commodity: self.lexicon.commodity_for(crop),
            location: Some(location),
            variety,
        };

        match self.knowledge.price(query) {
            PriceLookup::Found(record) => self.l10n().resolve(
                MessageKey::PriceReport,
                language,
                &[
                    ("crop", crop),
                    ("variety", record.variety.as_str()),
                    ("market", record.market.as_str()),
                    ("min_price", record.min_price.as_str()),
                    ("max_price", record.max_price.as_str()),
                    ("modal_price", record.modal_price.as_str()),
                    ("date", record.arrival_date.as_str()),
                ],
            ),
            PriceLookup::NotFound => {
                tracing::debug!(crop, location, commodity = query.commodity, "No price record");
                self.l10n().resolve(
                    MessageKey::PriceNotFound,
                    language,
                    &[("crop", crop), ("location", location)],
                )
            }
        }
    }

    fn weather(&self, location: &str, language: Language) -> String {
        match self.knowledge.weather(location) {
            Some(record) => self.l10n().resolve(
                MessageKey::WeatherReport,
                language,
                &[
                    ("location", location),
                    ("condition", record.condition.as_str()),
                    ("temperature", record.temperature.as_str()),
                    ("humidity", record.humidity.as_str()),
                    ("rainfall", record.rainfall.as_str()),
                    ("forecast", record.forecast.as_str()),
                ],
            ),
            None => self.l10n().resolve(
                MessageKey::WeatherNotFound,
                language,
                &[("location", location)],
            ),
        }
    }

    fn advice(&self, crop: &str, season: Option<&str>, language: Language) -> String {
        match self.knowledge.advice(crop, season) {
            AdviceLookup::Seasonal(record) => self.l10n().resolve(
                MessageKey::SeasonalAdviceReport,
                language,
                &[
                    ("crop", crop),
                    ("season", record.season.as_str()),
                    ("advice", record.advice(language)),
                ],
            ),
            AdviceLookup::General(record) => self.l10n().resolve(
                MessageKey::AdviceReport,
                language,
                &[("crop", crop), ("advice", record.advice(language))],
            ),
            AdviceLookup::NotFound => {
                self.l10n()
                    .resolve(MessageKey::AdviceNotFound, language, &[("crop", crop)])
            }
        }
    }

    fn varieties(&self, crop: &str, language: Language) -> String {
        let records = self.knowledge.varieties(crop);
        if records.is_empty() {
            return self
                .l10n()
                .resolve(MessageKey::VarietyNotFound, language, &[("crop", crop)]);
        }

        let mut lines = vec![self
            .l10n()
            .resolve(MessageKey::VarietyHeader, language, &[("crop", crop)])];
        lines.extend(records.iter().map(|r| {
            self.l10n().resolve(
                MessageKey::VarietyLine,
                language,
                &[
                    ("variety", r.variety.as_str()),
                    ("characteristics", r.characteristics.as_str()),
                    ("yield", r.yield_.as_str()),
                    ("duration", r.duration.as_str()),
                ],
            )
        }));
        lines.join("\n")
    }

    fn markets(&self, location: &str, language: Language) -> String {
        let records = self.knowledge.markets(location);
        if records.is_empty() {
            return self.l10n().resolve(
                MessageKey::MarketNotFound,
                language,
                &[("location", location)],
            );
        }

        let mut lines = vec![self.l10n().resolve(
            MessageKey::MarketHeader,
            language,
            &[("location", location)],
        )];
        lines.extend(records.iter().map(|r| {
            self.l10n().resolve(
                MessageKey::MarketLine,
                language,
                &[
                    ("market_name", r.market_name.as_str()),
                    ("contact", r.contact.as_str()),
                    ("business_hours", r.business_hours.as_str()),
                ],
            )
        }));
        lines.join("\n")
    }
}
