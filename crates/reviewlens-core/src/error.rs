//! Error types for ReviewLens.
//!
//! "Nothing to do" conditions (a keyword with no matching reviews, an empty
//! sentiment slice) are modeled as values by the callers, never as variants
//! here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Required build inputs are missing or malformed. Fatal for the build.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A query ran before its inputs exist (e.g. no persisted dataset).
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// A scoring or embedding backend could not be initialized.
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
