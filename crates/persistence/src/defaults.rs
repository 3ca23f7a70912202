//! Built-in table rows
//!
//! Used when a table file is missing from the data directory, and written
//! back to disk so it can be edited.

use krishi_config::{Localization, LocalizationEntry};

use crate::knowledge::{AdviceRecord, MarketRecord, VarietyRecord, WeatherRecord};
use crate::prices::PriceRecord;

fn price(row: [&str; 10]) -> PriceRecord {
    let [state, district, market, commodity, variety, grade, date, min, max, modal] = row;
    PriceRecord {
        state: state.to_string(),
        district: district.to_string(),
        market: market.to_string(),
        commodity: commodity.to_string(),
        variety: variety.to_string(),
        grade: grade.to_string(),
        arrival_date: date.to_string(),
        min_price: min.to_string(),
        max_price: max.to_string(),
        modal_price: modal.to_string(),
    }
}

pub fn prices() -> Vec<PriceRecord> {
    [
        ["Andhra Pradesh", "Chittor", "Punganur", "Tomato", "Hybrid", "FAQ", "10-09-2025", "1000", "1400", "1200"],
        ["Andhra Pradesh", "Chittor", "Vepanjari", "Gur(Jaggery)", "Achhu", "FAQ", "10-09-2025", "2500", "3000", "2700"],
        ["Andhra Pradesh", "Krishna", "Divi", "Paddy(Dhan)(Common)", "B P T", "FAQ", "10-09-2025", "2300", "2400", "2350"],
        ["Bihar", "Bhojpur", "Aarah", "Potato", "Jyoti", "FAQ", "10-09-2025", "2000", "2200", "2100"],
        ["Bihar", "Patna", "Patna", "Tomato", "Local", "FAQ", "10-09-2025", "1500", "1900", "1700"],
        ["Chandigarh", "Chandigarh", "Chandigarh(Grain/Fruit)", "Cucumbar(Kheera)", "Other", "FAQ", "10-09-2025", "2000", "4500", "3300"],
        ["Chandigarh", "Chandigarh", "Chandigarh(Grain/Fruit)", "Green Chilli", "Other", "FAQ", "10-09-2025", "2000", "3500", "2800"],
    ]
    .into_iter()
    .map(price)
    .collect()
}

pub fn weather() -> Vec<WeatherRecord> {
    [
        ["patna", "Sunny", "32", "65", "0", "Partly cloudy tomorrow"],
        ["delhi", "Partly cloudy", "35", "60", "0", "Light rain expected"],
        ["pune", "Cloudy", "28", "75", "10", "Heavy rain warning"],
        ["bangalore", "Rainy", "26", "85", "25", "Continuing rain"],
        ["chittor", "Hot", "38", "45", "0", "Clear skies"],
        ["krishna", "Humid", "34", "80", "5", "Possible showers"],
    ]
    .into_iter()
    .map(
        |[location, condition, temperature, humidity, rainfall, forecast]| WeatherRecord {
            location: location.to_string(),
            condition: condition.to_string(),
            temperature: temperature.to_string(),
            humidity: humidity.to_string(),
            rainfall: rainfall.to_string(),
            forecast: forecast.to_string(),
        },
    )
    .collect()
}

pub fn advice() -> Vec<AdviceRecord> {
    [
        [
            "wheat",
            "winter",
            "loamy",
            "Ensure proper irrigation and use nitrogen-based fertilizers during growth.",
            "वृद्धि के दौरान उचित सिंचाई सुनिश्चित करें और नाइट्रोजन आधारित उर्वरकों का उपयोग करें।",
        ],
        [
            "rice",
            "monsoon",
            "clayey",
            "Maintain water level at 2-3 inches and control weeds regularly.",
            "पानी का स्तर 2-3 इंच पर बनाए रखें और नियमित रूप से खरपतवार नियंत्रित करें।",
        ],
        [
            "paddy",
            "monsoon",
            "clayey",
            "Transplant 25-30 day old seedlings and keep the field flooded until tillering ends.",
            "25-30 दिन पुराने पौधों की रोपाई करें और कल्ले निकलने तक खेत में पानी भरा रखें।",
        ],
        [
            "tomato",
            "summer",
            "well-drained",
            "Ensure proper drainage and rotate crops to prevent diseases.",
            "रोगों को रोकने के लिए उचित जल निकासी सुनिश्चित करें और फसलों को घुमाएं।",
        ],
        [
            "potato",
            "winter",
            "sandy loam",
            "Plant in well-drained soil and maintain consistent moisture.",
            "अच्छी तरह से सूखा मिट्टी में लगाएं और लगातार नमी बनाए रखें।",
        ],
    ]
    .into_iter()
    .map(|[crop, season, soil_type, english, hindi]| AdviceRecord {
        crop: crop.to_string(),
        season: season.to_string(),
        soil_type: soil_type.to_string(),
        advice_english: english.to_string(),
        advice_hindi: hindi.to_string(),
    })
    .collect()
}

pub fn varieties() -> Vec<VarietyRecord> {
    [
        ["wheat", "HD 3086", "High yield, disease resistant", "5.5 t/ha", "120 days"],
        ["rice", "Pusa Basmati", "Aromatic, long grain", "4.5 t/ha", "135 days"],
        ["tomato", "Pusa Ruby", "High yield, firm fruit", "60 t/ha", "90 days"],
        ["potato", "Kufri Jyoti", "High yield, disease resistant", "25 t/ha", "100 days"],
    ]
    .into_iter()
    .map(|[crop, variety, characteristics, yield_, duration]| VarietyRecord {
        crop: crop.to_string(),
        variety: variety.to_string(),
        characteristics: characteristics.to_string(),
        yield_: yield_.to_string(),
        duration: duration.to_string(),
    })
    .collect()
}

pub fn markets() -> Vec<MarketRecord> {
    [
        ["patna", "Patna Grain Market", "0612-XXXXXX", "6 AM to 8 PM"],
        ["delhi", "Azadpur Mandi", "011-XXXXXX", "24 hours"],
        ["pune", "Market Yard", "020-XXXXXX", "5 AM to 9 PM"],
        ["bangalore", "K.R. Market", "080-XXXXXX", "6 AM to 10 PM"],
        ["chittor", "Chittor Mandi", "08572-XXXXX", "5 AM to 7 PM"],
        ["krishna", "Krishna Market", "0866-XXXXXX", "6 AM to 8 PM"],
    ]
    .into_iter()
    .map(|[location, market_name, contact, business_hours]| MarketRecord {
        location: location.to_string(),
        market_name: market_name.to_string(),
        contact: contact.to_string(),
        business_hours: business_hours.to_string(),
    })
    .collect()
}

pub fn localization() -> Vec<LocalizationEntry> {
    Localization::builtin_entries()
}
