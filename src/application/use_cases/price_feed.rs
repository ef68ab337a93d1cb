// ============================================================
// PRICE FEED USE CASE
// ============================================================
// Load the Brent price CSV and keep rows whose date parses

use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::error::{AppError, Result};
use crate::domain::market::PricePoint;
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::dates::{parse_date, DateOrder};

pub const DATE_COLUMN: &str = "Date";
pub const PRICE_COLUMN: &str = "Price";

pub struct PriceFeedUseCase {
    path: PathBuf,
    parser: CsvParser,
}

impl PriceFeedUseCase {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            parser: CsvParser::new(),
        }
    }

    /// Read the file fresh and return its price points in file order.
    /// Rows with an unparseable date are dropped; the price is kept as-is
    /// (`None` when empty or non-numeric).
    pub fn execute(&self) -> Result<Vec<PricePoint>> {
        let table = self.parser.parse_file(&self.path)?;

        for column in [DATE_COLUMN, PRICE_COLUMN] {
            if !table.has_column(column) {
                return Err(AppError::ParseError(format!(
                    "{} has no '{}' column",
                    self.path.display(),
                    column
                )));
            }
        }

        let total = table.rows.len();
        let points: Vec<PricePoint> = table
            .rows
            .iter()
            .filter_map(|row| {
                let date = row
                    .get(DATE_COLUMN)
                    .and_then(|f| parse_date(&f.value, DateOrder::DayFirst));
                let Some(date) = date else {
                    debug!(row = row.index, "Dropping price row with unparseable date");
                    return None;
                };
                let price = row.get(PRICE_COLUMN).and_then(|f| f.as_f64());
                Some(PricePoint { date, price })
            })
            .collect();

        info!(
            path = %self.path.display(),
            rows = total,
            kept = points.len(),
            "Loaded price feed"
        );

        Ok(points)
    }
}
