// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Row and field value objects produced by the CSV parser
// No I/O, no async

mod csv_row;

pub use csv_row::{ColumnKind, CsvField, CsvRow, CsvTable};
