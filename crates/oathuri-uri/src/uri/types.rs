//! Core types for OATH key URI composition.

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Maximum URI length including a terminating marker: the largest payload
/// of a binary/byte-mode QR symbol plus one. A composed URI is at most
/// `MAX_URI_LEN - 1` bytes.
pub const MAX_URI_LEN: usize = 2954;

/// Scheme of every key URI.
pub const URI_SCHEME: &str = "otpauth";

/// Digits an authenticator assumes when `digits=` is absent.
pub const DEFAULT_DIGITS: u32 = 6;

/// TOTP period in seconds an authenticator assumes when `period=` is absent.
pub const DEFAULT_PERIOD: u64 = 30;

/// Explicit digit counts accepted besides the `0` sentinel.
pub const SUPPORTED_DIGITS: [u32; 3] = [6, 7, 8];

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Algorithm
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Hash algorithm the authenticator should use for OTP generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Algorithm {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri_name())
    }
}

impl Algorithm {
    /// Parse from a case-insensitive string.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "SHA1" | "SHA-1" => Some(Self::Sha1),
            "SHA256" | "SHA-256" => Some(Self::Sha256),
            "SHA512" | "SHA-512" => Some(Self::Sha512),
            _ => None,
        }
    }

    /// Name used for the `algorithm=` parameter.
    pub fn uri_name(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }

    /// SHA1 is the wire default and is never written out.
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Sha1)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  OTP type
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Time-based or counter-based OTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpType {
    #[default]
    Totp,
    Hotp,
}

impl fmt::Display for OtpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl OtpType {
    /// Lowercase literal used as the URI host.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Totp => "totp",
            Self::Hotp => "hotp",
        }
    }

    /// Parse from a case-insensitive string.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "totp" => Some(Self::Totp),
            "hotp" => Some(Self::Hotp),
            _ => None,
        }
    }

    /// Name of the query parameter carrying the moving factor.
    pub fn moving_factor_param(&self) -> &'static str {
        match self {
            Self::Totp => "period",
            Self::Hotp => "counter",
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Request
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Everything needed to compose one key URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRequest {
    /// TOTP or HOTP.
    pub otp_type: OtpType,
    /// Shared secret, embedded verbatim (typically base-32).
    pub secret: String,
    /// Account name (e.g. "alice@example.com"). Must not contain `:`.
    pub account_name: String,
    /// Issuer / provider (e.g. "GitHub"). Must not contain `:`.
    pub issuer: String,
    /// `0` for the default, otherwise 6, 7 or 8.
    pub digits: u32,
    /// HOTP: counter, always written. TOTP: period, written only if non-zero.
    pub moving_factor: u64,
    /// Hash algorithm.
    pub algorithm: Algorithm,
}

impl OtpRequest {
    /// Create a TOTP request with default digits, period and algorithm.
    pub fn totp(
        secret: impl Into<String>,
        account_name: impl Into<String>,
        issuer: impl Into<String>,
    ) -> Self {
        Self {
            otp_type: OtpType::Totp,
            secret: secret.into(),
            account_name: account_name.into(),
            issuer: issuer.into(),
            digits: 0,
            moving_factor: 0,
            algorithm: Algorithm::default(),
        }
    }

    /// Create a HOTP request starting at `counter`.
    pub fn hotp(
        secret: impl Into<String>,
        account_name: impl Into<String>,
        issuer: impl Into<String>,
        counter: u64,
    ) -> Self {
        Self {
            otp_type: OtpType::Hotp,
            moving_factor: counter,
            ..Self::totp(secret, account_name, issuer)
        }
    }

    /// Builder: set digit count (`0` = default).
    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    /// Builder: set TOTP period (`0` = default, omitted).
    pub fn with_period(mut self, period: u64) -> Self {
        self.moving_factor = period;
        self
    }

    /// Builder: set HOTP counter.
    pub fn with_counter(mut self, counter: u64) -> Self {
        self.moving_factor = counter;
        self
    }

    /// Builder: set algorithm.
    pub fn with_algorithm(mut self, algo: Algorithm) -> Self {
        self.algorithm = algo;
        self
    }

    /// Digit count an authenticator will actually use.
    pub fn effective_digits(&self) -> u32 {
        if self.digits == 0 {
            DEFAULT_DIGITS
        } else {
            self.digits
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Composed URI
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A complete, length-checked key URI. Only the composer creates these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ComposedUri(String);

impl ComposedUri {
    pub(crate) fn new(uri: String) -> Self {
        Self(uri)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ComposedUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ComposedUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ComposedUri> for String {
    fn from(uri: ComposedUri) -> String {
        uri.0
    }
}
