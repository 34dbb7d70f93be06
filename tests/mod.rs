pub mod fixtures;
pub mod integration;

use std::io::Write;

use tempfile::NamedTempFile;

/// Writes `json` to a temporary file that lives as long as the handle
pub fn write_temp_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}
