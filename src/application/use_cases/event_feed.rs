// ============================================================
// EVENT FEED USE CASE
// ============================================================
// Load the curated market events CSV, every row kept

use std::path::PathBuf;

use serde_json::Map;
use tracing::info;

use crate::domain::error::{AppError, Result};
use crate::domain::market::MarketEvent;
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::dates::{parse_date, DateOrder};

pub const EVENT_DATE_COLUMN: &str = "event_date";

pub struct EventFeedUseCase {
    path: PathBuf,
    parser: CsvParser,
}

impl EventFeedUseCase {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            parser: CsvParser::new(),
        }
    }

    /// Read the file fresh and return one event per row.
    ///
    /// Unlike the price feed, rows with an unparseable `event_date` are kept
    /// with a `None` date. All other columns pass through.
    pub fn execute(&self) -> Result<Vec<MarketEvent>> {
        let table = self.parser.parse_file(&self.path)?;

        if !table.has_column(EVENT_DATE_COLUMN) {
            return Err(AppError::ParseError(format!(
                "{} has no '{}' column",
                self.path.display(),
                EVENT_DATE_COLUMN
            )));
        }

        // Typed per column: a column is numeric only if every cell in it is
        let kinds = table.column_kinds();

        let events: Vec<MarketEvent> = table
            .rows
            .iter()
            .map(|row| {
                let mut event_date = None;
                let mut details = Map::new();
                for (field, kind) in row.fields.iter().zip(&kinds) {
                    if field.name == EVENT_DATE_COLUMN {
                        event_date = parse_date(&field.value, DateOrder::MonthFirst);
                    } else {
                        details.insert(field.name.clone(), kind.to_json(field));
                    }
                }
                MarketEvent {
                    event_date,
                    details,
                }
            })
            .collect();

        let undated = events.iter().filter(|e| e.event_date.is_none()).count();
        info!(
            path = %self.path.display(),
            rows = events.len(),
            undated,
            "Loaded event feed"
        );

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_temp_file;
    use chrono::NaiveDate;
    use serde_json::json;

    fn run(contents: &str) -> Result<Vec<MarketEvent>> {
        let path = write_temp_file(contents.as_bytes());
        let result = EventFeedUseCase::new(path.clone()).execute();
        std::fs::remove_file(path).ok();
        result
    }

    const EVENTS: &str = "event_date,event_name,description,severity\n\
        2020-03-09,Saudi-Russia price war,OPEC+ talks collapse,5\n\
        sometime in 2008,Financial crisis,,4\n\
        04/20/2020,WTI goes negative,May contract expiry,4.5\n";

    #[test]
    fn test_row_count_matches_input() {
        let events = run(EVENTS).unwrap();
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_unparseable_date_becomes_none() {
        let events = run(EVENTS).unwrap();

        assert_eq!(events[0].event_date, NaiveDate::from_ymd_opt(2020, 3, 9));
        assert_eq!(events[1].event_date, None);
        assert_eq!(events[1].details["event_name"], json!("Financial crisis"));
    }

    #[test]
    fn test_ambiguous_dates_are_month_first() {
        let events = run("event_date,event_name\n01/02/2020,Test\n").unwrap();
        assert_eq!(events[0].event_date, NaiveDate::from_ymd_opt(2020, 1, 2));
    }

    #[test]
    fn test_extra_columns_pass_through_typed() {
        let events = run(EVENTS).unwrap();

        let value = serde_json::to_value(&events[2]).unwrap();
        assert_eq!(
            value,
            json!({
                "event_date": "2020-04-20",
                "event_name": "WTI goes negative",
                "description": "May contract expiry",
                "severity": 4.5
            })
        );
        assert_eq!(events[1].details["description"], serde_json::Value::Null);
        assert_eq!(events[0].details["severity"], json!(5.0));
    }

    #[test]
    fn test_mixed_column_stays_text() {
        let events = run("event_date,code,event_name\n\
            1973-10-17,007,Oil embargo\n\
            2020-03-09,OPEC-A,1973\n")
        .unwrap();

        assert_eq!(events[0].details["code"], json!("007"));
        assert_eq!(events[1].details["code"], json!("OPEC-A"));
        assert_eq!(events[1].details["event_name"], json!("1973"));
    }

    #[test]
    fn test_integer_column_stays_integer() {
        let events = run("event_date,rank\n2020-03-09,1\n2020-04-20,2\n").unwrap();
        assert_eq!(events[1].details["rank"], json!(2));
    }

    #[test]
    fn test_duplicate_columns_are_all_kept() {
        let events = run("event_date,note,note\n2020-03-09,first,second\n").unwrap();

        assert_eq!(events[0].details.len(), 2);
        assert_eq!(events[0].details["note"], json!("first"));
        assert_eq!(events[0].details["note.1"], json!("second"));
    }

    #[test]
    fn test_missing_event_date_column_is_parse_error() {
        let err = run("date,event_name\n2020-03-09,Price war\n").unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn test_header_only_file_is_empty_feed() {
        let events = run("event_date,event_name\n").unwrap();
        assert!(events.is_empty());
    }
}
