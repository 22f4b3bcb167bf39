use serde_json::Value;
use std::{io, path::Path};
use tokio::fs;

/// Read a provider export (a JSON document) from disk.
pub async fn read_json_file(file: &Path) -> Result<Value, io::Error> {
    if !file.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("File does not exist: {}", file.display()),
        ));
    }

    let content = fs::read_to_string(file).await?;

    serde_json::from_str(&content).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Invalid JSON in {}: {}", file.display(), e),
        )
    })
}
