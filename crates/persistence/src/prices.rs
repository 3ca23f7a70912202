//! Mandi price table
//!
//! Rows follow the public mandi price export: state, district, market,
//! commodity, variety, grade, arrival date and min/max/modal prices.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::csv_table;
use crate::PersistenceError;

/// Date format of the `Arrival Date` column
pub const ARRIVAL_DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(rename = "State", default)]
    pub state: String,
    #[serde(rename = "District", default)]
    pub district: String,
    #[serde(rename = "Market", default)]
    pub market: String,
    #[serde(rename = "Commodity")]
    pub commodity: String,
    #[serde(rename = "Variety", default)]
    pub variety: String,
    #[serde(rename = "Grade", default)]
    pub grade: String,
    #[serde(rename = "Arrival Date", default)]
    pub arrival_date: String,
    #[serde(rename = "Min Price", default)]
    pub min_price: String,
    #[serde(rename = "Max Price", default)]
    pub max_price: String,
    #[serde(rename = "Modal Price", default)]
    pub modal_price: String,
}

impl PriceRecord {
    pub fn arrival(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.arrival_date.trim(), ARRIVAL_DATE_FORMAT).ok()
    }

    /// Location matches district, market or state, ignoring case
    fn is_at(&self, location: &str) -> bool {
        [&self.district, &self.market, &self.state]
            .iter()
            .any(|field| field.trim().eq_ignore_ascii_case(location))
    }
}

/// Rewrite export-style headers (`Arrival_Date`, `Min_x0020_Price`)
pub fn normalize_header(header: &str) -> String {
    header
        .replace("_x0020_", " ")
        .replace("Arrival_Date", "Arrival Date")
        .trim()
        .to_string()
}

/// What to look for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuery<'a> {
    /// Commodity name as used in the table
    pub commodity: &'a str,
    pub location: Option<&'a str>,
    pub variety: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceLookup<'a> {
    Found(&'a PriceRecord),
    NotFound,
}

/// Dates of the matching rows, or the reason they cannot be ordered
#[derive(Debug, Clone, PartialEq, Eq)]
enum ArrivalOrder {
    Dated(Vec<NaiveDate>),
    Unparseable,
}

#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    records: Vec<PriceRecord>,
}

impl PriceTable {
    pub fn new(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }

    pub fn read(path: &Path) -> Result<Vec<PriceRecord>, PersistenceError> {
        csv_table::read_rows_with(path, normalize_header)
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent matching record
    ///
    /// Filters by commodity, then location (district, market or state), then
    /// variety. Matches are ordered by arrival date, newest first; if any
    /// matching date fails to parse, table order is kept.
    pub fn lookup(&self, query: PriceQuery<'_>) -> PriceLookup<'_> {
        let commodity = query.commodity.trim();
        let mut matches: Vec<&PriceRecord> = self
            .records
            .iter()
            .filter(|r| r.commodity.trim().eq_ignore_ascii_case(commodity))
            .filter(|r| query.location.map_or(true, |loc| r.is_at(loc.trim())))
            .filter(|r| {
                query
                    .variety
                    .map_or(true, |v| same_variety(&r.variety, v))
            })
            .collect();

        match arrival_order(&matches) {
            ArrivalOrder::Dated(dates) => {
                let mut dated: Vec<(NaiveDate, &PriceRecord)> =
                    dates.into_iter().zip(matches).collect();
                dated.sort_by(|a, b| b.0.cmp(&a.0));
                matches = dated.into_iter().map(|(_, r)| r).collect();
            }
            ArrivalOrder::Unparseable => {
                tracing::debug!(commodity, "Unparseable arrival date, keeping table order");
            }
        }

        match matches.first() {
            Some(record) => PriceLookup::Found(record),
            None => PriceLookup::NotFound,
        }
    }
}

fn arrival_order(records: &[&PriceRecord]) -> ArrivalOrder {
    records
        .iter()
        .map(|r| r.arrival())
        .collect::<Option<Vec<_>>>()
        .map_or(ArrivalOrder::Unparseable, ArrivalOrder::Dated)
}

/// Compare varieties on letters and digits only, so `B P T` equals `bpt`
fn same_variety(record: &str, wanted: &str) -> bool {
    let squash = |s: &str| -> String {
        s.chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect()
    };
    let wanted = squash(wanted);
    !wanted.is_empty() && squash(record) == wanted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(district: &str, commodity: &str, variety: &str, date: &str, modal: &str) -> PriceRecord {
        PriceRecord {
            state: "Bihar".into(),
            district: district.into(),
            market: format!("{} Mandi", district),
            commodity: commodity.into(),
            variety: variety.into(),
            grade: "FAQ".into(),
            arrival_date: date.into(),
            min_price: "1000".into(),
            max_price: "2000".into(),
            modal_price: modal.into(),
        }
    }

    fn query<'a>(commodity: &'a str, location: Option<&'a str>) -> PriceQuery<'a> {
        PriceQuery {
            commodity,
            location,
            variety: None,
        }
    }

    #[test]
    fn test_latest_date_wins() {
        let table = PriceTable::new(vec![
            record("Patna", "Wheat", "Local", "01-09-2025", "1500"),
            record("Patna", "Wheat", "Local", "10-09-2025", "1700"),
            record("Patna", "Wheat", "Local", "05-08-2025", "1400"),
        ]);
        match table.lookup(query("wheat", Some("patna"))) {
            PriceLookup::Found(r) => assert_eq!(r.modal_price, "1700"),
            PriceLookup::NotFound => panic!("expected a record"),
        }
    }

    #[test]
    fn test_unparseable_date_keeps_table_order() {
        let table = PriceTable::new(vec![
            record("Patna", "Wheat", "Local", "01-09-2025", "1500"),
            record("Patna", "Wheat", "Local", "yesterday", "1700"),
        ]);
        match table.lookup(query("Wheat", None)) {
            PriceLookup::Found(r) => assert_eq!(r.modal_price, "1500"),
            PriceLookup::NotFound => panic!("expected a record"),
        }
    }

    #[test]
    fn test_location_matches_state_district_or_market() {
        let table = PriceTable::new(vec![record("Bhojpur", "Potato", "Jyoti", "10-09-2025", "2100")]);
        for loc in ["bhojpur", "BIHAR", "bhojpur mandi"] {
            assert!(matches!(
                table.lookup(query("potato", Some(loc))),
                PriceLookup::Found(_)
            ));
        }
        assert_eq!(table.lookup(query("potato", Some("delhi"))), PriceLookup::NotFound);
        assert_eq!(table.lookup(query("onion", None)), PriceLookup::NotFound);
    }

    #[test]
    fn test_variety_filter_ignores_spacing() {
        let table = PriceTable::new(vec![
            record("Krishna", "Paddy(Dhan)(Common)", "B P T", "10-09-2025", "2350"),
            record("Krishna", "Paddy(Dhan)(Common)", "Sona", "11-09-2025", "2500"),
        ]);
        let q = PriceQuery {
            commodity: "paddy(dhan)(common)",
            location: Some("krishna"),
            variety: Some("bpt"),
        };
        match table.lookup(q) {
            PriceLookup::Found(r) => assert_eq!(r.modal_price, "2350"),
            PriceLookup::NotFound => panic!("expected a record"),
        }
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Arrival_Date"), "Arrival Date");
        assert_eq!(normalize_header("Min_x0020_Price"), "Min Price");
        assert_eq!(normalize_header(" State "), "State");
    }

    #[test]
    fn test_read_export_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mandi_prices.csv");
        std::fs::write(
            &path,
            "State,District,Market,Commodity,Variety,Grade,Arrival_Date,Min_x0020_Price,Max_x0020_Price,Modal_x0020_Price\n\
             Bihar,Patna,Patna,Tomato,Local,FAQ,10-09-2025,1500,1900,1700\n",
        )
        .unwrap();

        let rows = PriceTable::read(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].arrival_date, "10-09-2025");
        assert_eq!(rows[0].modal_price, "1700");
    }
}
