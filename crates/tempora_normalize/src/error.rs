use std::path::PathBuf;

use tempora_edtf::DateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A date value could not be assembled; this is a defect, not bad input.
    #[error(transparent)]
    Date(#[from] DateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for NormalizeError {
    fn from(e: serde_json::Error) -> Self {
        NormalizeError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
