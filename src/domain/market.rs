use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One observation of the Brent spot price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Price")]
    pub price: Option<f64>,
}

/// A curated market event. Columns other than `event_date` are carried
/// through untouched and flattened into the serialized object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    pub event_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePointEstimate {
    pub tau_date: NaiveDate,
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_point_uses_capitalized_keys() {
        let point = PricePoint {
            date: NaiveDate::from_ymd_opt(1987, 5, 20).unwrap(),
            price: Some(18.63),
        };
        assert_eq!(
            serde_json::to_value(&point).unwrap(),
            json!({ "Date": "1987-05-20", "Price": 18.63 })
        );
    }

    #[test]
    fn test_market_event_flattens_details() {
        let mut details = Map::new();
        details.insert("event_name".to_string(), json!("COVID-19 lockdowns"));
        details.insert("impact".to_string(), Value::Null);
        let event = MarketEvent {
            event_date: None,
            details,
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({ "event_date": null, "event_name": "COVID-19 lockdowns", "impact": null })
        );
    }
}
