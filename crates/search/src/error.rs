use thiserror::Error;

use crate::host::TextRange;

/// Failures reported by a host document adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("range {start}..{end} is outside the document")]
    InvalidRange { start: usize, end: usize },
    #[error("host does not support {0}")]
    Unsupported(&'static str),
    #[error("host rejected the edit: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("enter text to search for")]
    MissingQuery,
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
    #[error(transparent)]
    Host(#[from] HostError),
}

impl HostError {
    pub fn invalid_range(range: TextRange) -> Self {
        Self::InvalidRange {
            start: range.start,
            end: range.end,
        }
    }
}

impl SearchError {
    /// True for errors the user can fix by changing the query.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::MissingQuery | Self::InvalidPattern(_))
    }
}
