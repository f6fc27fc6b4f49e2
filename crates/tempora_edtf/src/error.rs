use thiserror::Error;

/// Errors raised while reading or constructing dates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// The text is not a date this grammar accepts, or it names an impossible
    /// calendar field such as month 13 or 30 February.
    #[error("cannot extract a date from {input:?}: {reason}")]
    Extraction { input: String, reason: String },

    /// A date value was assembled from contradictory parts.
    #[error("invalid date construction: {0}")]
    Builder(String),
}

impl DateError {
    pub(crate) fn extraction(input: &str, reason: impl Into<String>) -> Self {
        DateError::Extraction {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn builder(reason: impl Into<String>) -> Self {
        DateError::Builder(reason.into())
    }

    /// True for grammar and calendar failures, false for construction defects.
    pub fn is_extraction(&self) -> bool {
        matches!(self, DateError::Extraction { .. })
    }
}

pub type Result<T> = std::result::Result<T, DateError>;
