pub mod error;
pub mod market;

// CSV row value objects
pub mod csv;
