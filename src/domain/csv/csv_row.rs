// ============================================================
// CSV ROW TYPES
// ============================================================
// Data structures representing parsed CSV content

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A single field in a CSV row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvField {
    /// Column name (header)
    pub name: String,

    /// Field value, as read from the file
    pub value: String,

    /// Whether the value is empty
    pub is_empty: bool,
}

impl CsvField {
    /// Create a new CSV field
    pub fn new(name: String, value: String) -> Self {
        let is_empty = value.trim().is_empty();

        Self {
            name,
            value,
            is_empty,
        }
    }

    /// Parse the value as a finite float, tolerating thousands separators
    pub fn as_f64(&self) -> Option<f64> {
        if self.is_empty {
            return None;
        }
        parse_number(&self.value).or_else(|| {
            let without_separators = self.value.trim().replace(',', "");
            parse_number(&without_separators)
        })
    }
}

/// JSON type chosen once for a whole column, the way a dataframe loader types it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every cell is an integer, none empty
    Integer,
    /// Every non-empty cell is a finite number
    Float,
    /// Anything else; cells are kept as their original strings
    Text,
}

impl ColumnKind {
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a CsvField>) -> Self {
        let mut kind = ColumnKind::Integer;
        for cell in cells {
            if cell.is_empty {
                kind = ColumnKind::Float;
                continue;
            }
            let trimmed = cell.value.trim();
            if kind == ColumnKind::Integer && trimmed.parse::<i64>().is_ok() {
                continue;
            }
            if parse_number(trimmed).is_none() {
                return ColumnKind::Text;
            }
            kind = ColumnKind::Float;
        }
        kind
    }

    /// Convert one cell of a column of this kind; empty cells become null.
    pub fn to_json(self, field: &CsvField) -> Value {
        if field.is_empty {
            return Value::Null;
        }

        let trimmed = field.value.trim();
        match self {
            ColumnKind::Integer => trimmed
                .parse::<i64>()
                .map(|int| Value::Number(int.into()))
                .unwrap_or(Value::Null),
            ColumnKind::Float => parse_number(trimmed)
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ColumnKind::Text => Value::String(field.value.clone()),
        }
    }
}

/// Parse a finite number; f64 parsing accepts "inf" and "NaN", which are not numbers in a CSV cell
fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// A single row in a CSV file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvRow {
    /// Row index (0-based, header excluded)
    pub index: usize,

    /// All fields in this row, in header order
    pub fields: Vec<CsvField>,
}

impl CsvRow {
    /// Create a new CSV row
    pub fn new(index: usize, fields: Vec<CsvField>) -> Self {
        Self { index, fields }
    }

    /// Look up a field by its header name
    pub fn get(&self, name: &str) -> Option<&CsvField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A parsed CSV file: header row plus data rows in file order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

impl CsvTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// One [`ColumnKind`] per header, in header order
    pub fn column_kinds(&self) -> Vec<ColumnKind> {
        (0..self.headers.len())
            .map(|idx| ColumnKind::infer(self.rows.iter().filter_map(|row| row.fields.get(idx))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(value: &str) -> CsvField {
        CsvField::new("col".to_string(), value.to_string())
    }

    fn column(values: &[&str]) -> Vec<CsvField> {
        values.iter().map(|v| field(v)).collect()
    }

    #[test]
    fn test_column_kind_inference() {
        assert_eq!(ColumnKind::infer(&column(&["1", "42"])), ColumnKind::Integer);
        assert_eq!(ColumnKind::infer(&column(&["1", "4.5"])), ColumnKind::Float);
        assert_eq!(ColumnKind::infer(&column(&["1", ""])), ColumnKind::Float);
        assert_eq!(ColumnKind::infer(&column(&["007", "OPEC-A"])), ColumnKind::Text);
        assert_eq!(ColumnKind::infer(&column(&["1973", "Oil embargo"])), ColumnKind::Text);
        assert_eq!(ColumnKind::infer(&column(&["NaN", "1"])), ColumnKind::Text);
    }

    #[test]
    fn test_text_column_keeps_original_strings() {
        assert_eq!(ColumnKind::Text.to_json(&field("007")), json!("007"));
        assert_eq!(ColumnKind::Text.to_json(&field("1973")), json!("1973"));
        assert_eq!(ColumnKind::Text.to_json(&field("")), Value::Null);
    }

    #[test]
    fn test_numeric_columns_emit_numbers() {
        assert_eq!(ColumnKind::Integer.to_json(&field("42")), json!(42));
        assert_eq!(ColumnKind::Float.to_json(&field("18.63")), json!(18.63));
        assert_eq!(ColumnKind::Float.to_json(&field("")), Value::Null);
    }

    #[test]
    fn test_as_f64_tolerates_thousands_separator() {
        assert_eq!(field("1,234.5").as_f64(), Some(1234.5));
        assert_eq!(field(" 18.63 ").as_f64(), Some(18.63));
        assert_eq!(field("n/a").as_f64(), None);
        assert_eq!(field("").as_f64(), None);
    }

    #[test]
    fn test_get_by_header() {
        let row = CsvRow::new(
            0,
            vec![
                CsvField::new("Date".to_string(), "20-May-87".to_string()),
                CsvField::new("Price".to_string(), "18.63".to_string()),
            ],
        );
        assert_eq!(row.get("Price").map(|f| f.value.as_str()), Some("18.63"));
        assert!(row.get("Volume").is_none());
    }
}
