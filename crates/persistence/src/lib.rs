//! CSV-backed storage for the assistant
//!
//! Provides:
//! - Knowledge tables (mandi prices, weather, crop advice, varieties, markets)
//! - Localization overrides
//! - Built-in default tables, written out when a file is missing
//! - Conversation history log

pub mod csv_table;
pub mod defaults;
pub mod error;
pub mod history;
pub mod knowledge;
pub mod prices;

pub use error::PersistenceError;
pub use history::{CsvHistoryStore, InMemoryHistoryStore};
pub use knowledge::{
    AdviceLookup, AdviceRecord, KnowledgeBase, MarketRecord, VarietyRecord, WeatherRecord,
};
pub use prices::{PriceLookup, PriceQuery, PriceRecord, PriceTable};
