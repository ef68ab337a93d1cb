//! Helpers shared by unit tests.

use std::path::PathBuf;

/// Write `contents` to a uniquely named file under the system temp dir.
pub fn write_temp_file(contents: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("brent-oil-api-{}.csv", uuid::Uuid::new_v4()));
    std::fs::write(&path, contents).expect("write temp csv");
    path
}
