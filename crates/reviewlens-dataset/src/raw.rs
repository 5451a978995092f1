//! Raw review shards: discovery and parsing.
//!
//! Shards are CSV files with a header row. Column names vary between
//! exports, so each field accepts a small set of aliases. Files that are
//! not valid UTF-8 are decoded as Latin-1.

use std::path::{Path, PathBuf};

use reviewlens_core::{Error, Result};
use tracing::debug;

/// One ingested review record. Empty cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawReview {
    pub text: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub product_name: Option<String>,
}

const TEXT_COLUMNS: &[&str] = &["text", "extract"];
const LANGUAGE_COLUMNS: &[&str] = &["language", "lang"];
const COUNTRY_COLUMNS: &[&str] = &["country"];
const PRODUCT_COLUMNS: &[&str] = &["product_name", "product"];

/// List shard files in `dir` whose name starts with `prefix` and ends in
/// `.csv`, sorted by file name.
pub fn discover_shards(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        Error::Config(format!(
            "Raw review directory {} is not readable: {}",
            dir.display(),
            e
        ))
    })?;

    let mut shards = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => continue,
        };
        if name.starts_with(prefix) && name.to_lowercase().ends_with(".csv") {
            shards.push(path);
        }
    }

    if shards.is_empty() {
        return Err(Error::Config(format!(
            "No raw shards matching {}*.csv found in {}",
            prefix,
            dir.display()
        )));
    }

    shards.sort();
    Ok(shards)
}

/// Read every record of one shard, in file order.
pub fn read_shard(path: &Path) -> Result<Vec<RawReview>> {
    let bytes = std::fs::read(path)?;
    let content = decode(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let find = |aliases: &[&str]| {
        headers
            .iter()
            .position(|h| aliases.iter().any(|a| h.trim().eq_ignore_ascii_case(a)))
    };

    let text_idx = find(TEXT_COLUMNS);
    let product_idx = find(PRODUCT_COLUMNS);
    let (language_idx, country_idx) = match (find(LANGUAGE_COLUMNS), find(COUNTRY_COLUMNS)) {
        (Some(l), Some(c)) => (l, c),
        _ => {
            return Err(Error::Config(format!(
                "Shard {} lacks a language or country column (found: {})",
                path.display(),
                headers.iter().collect::<Vec<_>>().join(", ")
            )))
        }
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        rows.push(RawReview {
            text: cell(text_idx),
            language: cell(Some(language_idx)),
            country: cell(Some(country_idx)),
            product_name: cell(product_idx),
        });
    }

    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// UTF-8 when valid, otherwise Latin-1 (every byte maps to one char).
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    }
}
