use std::fmt;

/// Failure of a call across the remote boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn status(code: u16) -> Self {
        Self::new(
            ApiErrorKind::HttpStatus(code),
            format!("HTTP error! status: {code}"),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::InvalidUrl => write!(f, "invalid url"),
            ApiErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::Decode => write!(f, "invalid response body"),
            ApiErrorKind::Network => write!(f, "network error"),
        }
    }
}
