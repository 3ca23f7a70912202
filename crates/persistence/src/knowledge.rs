//! Knowledge tables
//!
//! Read-only tables loaded once at startup: mandi prices, weather, crop
//! advice, crop varieties and market information, plus the localization
//! overrides. Lookups are pure and return explicit found/not-found values.

use serde::{Deserialize, Serialize};
use std::path::Path;

use krishi_config::{DataConfig, Localization, LocalizationEntry};
use krishi_core::Language;

use crate::csv_table::{self, load_or_default};
use crate::defaults;
use crate::prices::{PriceLookup, PriceQuery, PriceRecord, PriceTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub temperature: String,
    #[serde(default)]
    pub humidity: String,
    #[serde(default)]
    pub rainfall: String,
    #[serde(default)]
    pub forecast: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceRecord {
    pub crop: String,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub soil_type: String,
    #[serde(default)]
    pub advice_english: String,
    #[serde(default)]
    pub advice_hindi: String,
}

impl AdviceRecord {
    /// Advice text in a language, falling back to English
    pub fn advice(&self, language: Language) -> &str {
        match language {
            Language::Hindi if !self.advice_hindi.is_empty() => &self.advice_hindi,
            _ => &self.advice_english,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarietyRecord {
    pub crop: String,
    pub variety: String,
    #[serde(default)]
    pub characteristics: String,
    #[serde(default, rename = "yield")]
    pub yield_: String,
    #[serde(default)]
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub location: String,
    pub market_name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub business_hours: String,
}

/// Result of an advice lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceLookup<'a> {
    /// Record for the requested season
    Seasonal(&'a AdviceRecord),
    /// First record for the crop
    General(&'a AdviceRecord),
    NotFound,
}

fn same_key(field: &str, key: &str) -> bool {
    field.trim().to_lowercase() == key.trim().to_lowercase()
}

/// All knowledge tables for one session
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    prices: PriceTable,
    weather: Vec<WeatherRecord>,
    advice: Vec<AdviceRecord>,
    varieties: Vec<VarietyRecord>,
    markets: Vec<MarketRecord>,
    localization: Localization,
}

impl KnowledgeBase {
    /// Tables built from in-memory rows, with built-in localization
    pub fn new(
        prices: Vec<PriceRecord>,
        weather: Vec<WeatherRecord>,
        advice: Vec<AdviceRecord>,
        varieties: Vec<VarietyRecord>,
        markets: Vec<MarketRecord>,
    ) -> Self {
        Self {
            prices: PriceTable::new(prices),
            weather,
            advice,
            varieties,
            markets,
            localization: Localization::builtin(),
        }
    }

    /// Built-in tables only; nothing touches the disk
    pub fn builtin() -> Self {
        Self::new(
            defaults::prices(),
            defaults::weather(),
            defaults::advice(),
            defaults::varieties(),
            defaults::markets(),
        )
    }

    /// Load every table under the data directory
    ///
    /// A missing table is replaced by its built-in rows (written back to disk
    /// when `write_defaults` is set). Never fails.
    pub fn load(config: &DataConfig) -> Self {
        let write = config.write_defaults;

        let prices = load_or_default(
            &config.path(&config.prices_file),
            defaults::prices,
            write,
            PriceTable::read,
        );
        let weather = load_or_default(
            &config.path(&config.weather_file),
            defaults::weather,
            write,
            |p: &Path| csv_table::read_rows(p),
        );
        let advice = load_or_default(
            &config.path(&config.advice_file),
            defaults::advice,
            write,
            |p: &Path| csv_table::read_rows(p),
        );
        let varieties = load_or_default(
            &config.path(&config.varieties_file),
            defaults::varieties,
            write,
            |p: &Path| csv_table::read_rows(p),
        );
        let markets = load_or_default(
            &config.path(&config.markets_file),
            defaults::markets,
            write,
            |p: &Path| csv_table::read_rows(p),
        );
        let overrides: Vec<LocalizationEntry> = load_or_default(
            &config.path(&config.localization_file),
            defaults::localization,
            write,
            |p: &Path| csv_table::read_rows(p),
        );

        tracing::info!(
            data_dir = %config.data_dir,
            prices = prices.len(),
            weather = weather.len(),
            advice = advice.len(),
            varieties = varieties.len(),
            markets = markets.len(),
            "Loaded knowledge tables"
        );

        Self {
            localization: Localization::with_overrides(overrides),
            ..Self::new(prices, weather, advice, varieties, markets)
        }
    }

    pub fn with_localization(mut self, localization: Localization) -> Self {
        self.localization = localization;
        self
    }

    pub fn localization(&self) -> &Localization {
        &self.localization
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    pub fn price(&self, query: PriceQuery<'_>) -> PriceLookup<'_> {
        self.prices.lookup(query)
    }

    /// Weather row for a location (first match)
    pub fn weather(&self, location: &str) -> Option<&WeatherRecord> {
        self.weather.iter().find(|r| same_key(&r.location, location))
    }

    /// Advice for a crop, preferring a record for `season` when given
    pub fn advice(&self, crop: &str, season: Option<&str>) -> AdviceLookup<'_> {
        let mut for_crop = self.advice.iter().filter(|r| same_key(&r.crop, crop));

        if let Some(season) = season {
            if let Some(record) = for_crop.clone().find(|r| same_key(&r.season, season)) {
                return AdviceLookup::Seasonal(record);
            }
        }

        match for_crop.next() {
            Some(record) => AdviceLookup::General(record),
            None => AdviceLookup::NotFound,
        }
    }

    /// All variety rows for a crop; empty means not found
    pub fn varieties(&self, crop: &str) -> Vec<&VarietyRecord> {
        self.varieties
            .iter()
            .filter(|r| same_key(&r.crop, crop))
            .collect()
    }

    /// All market rows for a location; empty means not found
    pub fn markets(&self, location: &str) -> Vec<&MarketRecord> {
        self.markets
            .iter()
            .filter(|r| same_key(&r.location, location))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krishi_config::MessageKey;

    fn data_config(dir: &Path) -> DataConfig {
        DataConfig {
            data_dir: dir.to_string_lossy().into_owned(),
            ..DataConfig::default()
        }
    }

    #[test]
    fn test_builtin_lookups() {
        let kb = KnowledgeBase::builtin();

        assert_eq!(kb.weather("PATNA").map(|w| w.condition.as_str()), Some("Sunny"));
        assert!(kb.weather("mumbai").is_none());

        assert_eq!(kb.varieties("wheat").len(), 1);
        assert!(kb.varieties("mango").is_empty());

        let markets = kb.markets("delhi");
        assert_eq!(markets.len(), 1);
        assert_eq!(markets[0].market_name, "Azadpur Mandi");
    }

    #[test]
    fn test_advice_season_preference() {
        let kb = KnowledgeBase::new(
            vec![],
            vec![],
            vec![
                AdviceRecord {
                    crop: "wheat".into(),
                    season: "winter".into(),
                    soil_type: "loamy".into(),
                    advice_english: "Irrigate".into(),
                    advice_hindi: "सिंचाई करें".into(),
                },
                AdviceRecord {
                    crop: "wheat".into(),
                    season: "summer".into(),
                    soil_type: "loamy".into(),
                    advice_english: "Harvest early".into(),
                    advice_hindi: String::new(),
                },
            ],
            vec![],
            vec![],
        );

        match kb.advice("wheat", Some("summer")) {
            AdviceLookup::Seasonal(r) => {
                assert_eq!(r.advice(Language::English), "Harvest early");
                assert_eq!(r.advice(Language::Hindi), "Harvest early");
            }
            other => panic!("unexpected {:?}", other),
        }
        match kb.advice("wheat", Some("monsoon")) {
            AdviceLookup::General(r) => assert_eq!(r.advice(Language::Hindi), "सिंचाई करें"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(kb.advice("rice", None), AdviceLookup::NotFound);
    }

    #[test]
    fn test_load_writes_missing_tables() {
        let dir = tempfile::tempdir().unwrap();
        let config = data_config(dir.path());

        let kb = KnowledgeBase::load(&config);
        assert_eq!(kb.prices().len(), defaults::prices().len());
        for file in [
            &config.prices_file,
            &config.weather_file,
            &config.advice_file,
            &config.varieties_file,
            &config.markets_file,
            &config.localization_file,
        ] {
            assert!(config.path(file).exists(), "{} not written", file);
        }

        // Second load reads the written files back
        let reloaded = KnowledgeBase::load(&config);
        assert_eq!(reloaded.prices().records(), kb.prices().records());
        assert_eq!(
            reloaded.localization().resolve(MessageKey::Greeting, Language::Hindi, &[]),
            kb.localization().resolve(MessageKey::Greeting, Language::Hindi, &[])
        );
    }

    #[test]
    fn test_load_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = DataConfig {
            write_defaults: false,
            ..data_config(dir.path())
        };

        let kb = KnowledgeBase::load(&config);
        assert!(kb.weather("pune").is_some());
        assert!(!config.path(&config.weather_file).exists());
    }

    #[test]
    fn test_localization_overrides_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let config = data_config(dir.path());
        std::fs::write(
            config.path(&config.localization_file),
            "key,english,hindi\ngreeting,Ram Ram!,राम राम!\n",
        )
        .unwrap();

        let kb = KnowledgeBase::load(&config);
        let l10n = kb.localization();
        assert_eq!(l10n.resolve(MessageKey::Greeting, Language::English, &[]), "Ram Ram!");
        // Keys absent from the file keep their built-in text
        assert_eq!(
            l10n.resolve(MessageKey::Goodbye, Language::English, &[]),
            "Goodbye! Have a great day!"
        );
    }

    #[test]
    fn test_user_table_replaces_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = data_config(dir.path());
        std::fs::write(
            config.path(&config.weather_file),
            "location,condition,temperature,humidity,rainfall,forecast\nnagpur,Hot,41,20,0,Dry\n",
        )
        .unwrap();

        let kb = KnowledgeBase::load(&config);
        assert!(kb.weather("nagpur").is_some());
        assert!(kb.weather("patna").is_none());
    }
}
