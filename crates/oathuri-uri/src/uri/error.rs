//! Key URI error type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorised composition / parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UriErrorKind {
    /// Secret, account name or issuer is empty.
    NullParameter,
    /// Account name or issuer contains the `:` label separator.
    InvalidInput,
    /// Digits is neither `0` nor one of 6, 7, 8.
    InvalidDigits,
    /// The percent-encoder could not be initialised or rejected a field.
    EncodingFailure,
    /// The assembled URI does not fit a QR code.
    UriTooLong,
    /// A key URI handed to the reader is malformed.
    InvalidUri,
}

impl UriErrorKind {
    /// Stable numeric code, `0` is reserved for success.
    pub fn code(&self) -> u8 {
        match self {
            Self::NullParameter => 1,
            Self::InvalidDigits => 2,
            Self::EncodingFailure => 3,
            Self::UriTooLong => 4,
            Self::InvalidInput => 5,
            Self::InvalidUri => 6,
        }
    }
}

impl fmt::Display for UriErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Crate-level error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UriError {
    pub kind: UriErrorKind,
    pub message: String,
    pub detail: Option<String>,
}

pub type UriResult<T> = Result<T, UriError>;

impl UriError {
    pub fn new(kind: UriErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(d) = &self.detail {
            write!(f, " ({})", d)?;
        }
        Ok(())
    }
}

impl std::error::Error for UriError {}

impl From<UriError> for String {
    fn from(e: UriError) -> String {
        e.to_string()
    }
}
