// ============================================================
// CSV PARSER
// ============================================================
// Parse CSV files with encoding fallback and error handling

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::domain::csv::{CsvField, CsvRow, CsvTable};
use crate::domain::error::AppError;

/// Comma-delimited CSV parser with encoding fallback.
/// Headers are trimmed; values are kept exactly as written.
#[derive(Debug, Default)]
pub struct CsvParser;

impl CsvParser {
    /// Create a new CSV parser
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a CSV file
    pub fn parse_file(&self, path: &Path) -> Result<CsvTable, AppError> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                AppError::NotFound(format!("CSV file {} does not exist", path.display()))
            }
            _ => AppError::IoError(format!("Failed to read {}: {}", path.display(), e)),
        })?;

        let content = Self::decode(&bytes);
        let table = self.parse_content(&content)?;
        debug!(
            path = %path.display(),
            rows = table.rows.len(),
            columns = table.headers.len(),
            "Parsed CSV file"
        );
        Ok(table)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<CsvTable, AppError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = Self::dedupe_headers(
            reader
                .headers()
                .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?,
        );

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(Self::parse_row(index, &headers, &record));
        }

        Ok(CsvTable { headers, rows })
    }

    /// Repeated headers get a numeric suffix: `note, note` becomes `note, note.1`
    fn dedupe_headers(headers: &StringRecord) -> Vec<String> {
        let mut seen = HashSet::new();
        headers
            .iter()
            .map(|header| {
                let mut name = header.to_string();
                let mut suffix = 1;
                while seen.contains(&name) {
                    name = format!("{}.{}", header, suffix);
                    suffix += 1;
                }
                seen.insert(name.clone());
                name
            })
            .collect()
    }

    /// Decode file bytes: UTF-8 (BOM stripped) first, Windows-1252 as fallback
    fn decode(bytes: &[u8]) -> String {
        match std::str::from_utf8(bytes) {
            Ok(content) => content.trim_start_matches('\u{feff}').to_string(),
            Err(_) => {
                warn!("CSV content is not valid UTF-8, decoding as Windows-1252");
                let (content, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
                content.into_owned()
            }
        }
    }

    /// Parse a single CSV row; missing trailing cells read as empty
    fn parse_row(index: usize, headers: &[String], record: &StringRecord) -> CsvRow {
        let fields = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = record.get(idx).unwrap_or("").to_string();
                CsvField::new(header.clone(), value)
            })
            .collect();

        CsvRow::new(index, fields)
    }
}
