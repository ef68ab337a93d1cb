// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV file reading and encoding fallback

mod csv_parser;

pub use csv_parser::CsvParser;
