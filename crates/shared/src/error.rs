use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    MissingMountPoint,
    MalformedDateSource,
    InvalidPageNumber,
}

/// Failures inside the page behavior layer. None of them is ever shown to a
/// reader; callers degrade to "element absent" or "annotation absent".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteUiError {
    #[error("missing mount point: {selector}")]
    MissingMountPoint { selector: String },
    #[error("malformed date source '{source_text}': {reason}")]
    MalformedDateSource { source_text: String, reason: String },
    #[error("invalid page number '{raw}' (total pages {total_pages})")]
    InvalidPageNumber { raw: String, total_pages: u32 },
}

impl SiteUiError {
    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingMountPoint {
            selector: selector.into(),
        }
    }

    pub fn malformed_date(source_text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDateSource {
            source_text: source_text.into(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingMountPoint { .. } => ErrorCode::MissingMountPoint,
            Self::MalformedDateSource { .. } => ErrorCode::MalformedDateSource,
            Self::InvalidPageNumber { .. } => ErrorCode::InvalidPageNumber,
        }
    }
}
