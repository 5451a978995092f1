//! Persisted dataset snapshot: a three-column CSV.
//!
//! Writes go to a temporary file in the target directory and are renamed
//! over the snapshot, so readers see either the old file or the new one.

use std::io::Write;
use std::path::Path;

use reviewlens_core::{Error, Result, Sentiment};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

/// Header of the persisted dataset, in column order.
pub const SNAPSHOT_COLUMNS: [&str; 3] = ["product_name", "normalized_text", "sentiment"];

/// One row of the persisted dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedReview {
    pub product_name: String,
    pub normalized_text: String,
    pub sentiment: Sentiment,
}

/// Serialize rows to CSV bytes (header always present).
fn encode(rows: &[CleanedReview]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(SNAPSHOT_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| Error::Internal(format!("Failed to finish CSV buffer: {}", e)))
}

/// Atomically replace the snapshot at `path`. Returns the SHA-256 of the
/// written bytes.
pub fn write_snapshot(path: &Path, rows: &[CleanedReview]) -> Result<String> {
    let bytes = encode(rows)?;
    let digest = hex::encode(Sha256::digest(&bytes));

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    info!(
        "Persisted {} reviews to {} (sha256={})",
        rows.len(),
        path.display(),
        digest
    );
    Ok(digest)
}

/// Load the snapshot. A missing file is a precondition failure.
pub fn read_snapshot(path: &Path) -> Result<Vec<CleanedReview>> {
    if !path.exists() {
        return Err(Error::Precondition(format!(
            "Persisted dataset not found at {}. Run `reviewlens build` first.",
            path.display()
        )));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize::<CleanedReview>() {
        rows.push(row?);
    }
    Ok(rows)
}
