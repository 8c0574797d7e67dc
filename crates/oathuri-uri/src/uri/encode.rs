//! Percent-encoding of untrusted label and parameter text.
//!
//! RFC 3986 unreserved characters (`A-Z a-z 0-9 - _ . ~`) pass through, every
//! other byte of the UTF-8 input becomes an uppercase `%XX` escape. A space is
//! always `%20`, never `+`.

use std::sync::OnceLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::uri::error::{UriError, UriErrorKind, UriResult};

/// Everything except the RFC 3986 unreserved set.
const UNRESERVED_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Probe checked once at initialisation: space, label separator, slash, UTF-8.
const SELF_TEST_INPUT: &str = "a b:/~é";
const SELF_TEST_OUTPUT: &str = "a%20b%3A%2F~%C3%A9";

static GLOBAL: OnceLock<Result<Rfc3986Encoder, String>> = OnceLock::new();

/// Escapes a text field for use inside a key URI.
///
/// Implementations must be deterministic and safe to share between threads.
pub trait PercentEncoder: Send + Sync {
    fn encode(&self, input: &str) -> UriResult<String>;
}

/// Default encoder backed by the `percent-encoding` crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rfc3986Encoder;

impl Rfc3986Encoder {
    /// Process-wide instance. Initialised lazily on first use, exactly once,
    /// and never torn down.
    pub fn global() -> UriResult<&'static Rfc3986Encoder> {
        let state = GLOBAL.get_or_init(|| {
            let encoder = Rfc3986Encoder;
            let probe = encoder.escape(SELF_TEST_INPUT);
            if probe == SELF_TEST_OUTPUT {
                log::debug!("percent-encoder initialised");
                Ok(encoder)
            } else {
                log::error!("percent-encoder self-test failed: got {}", probe);
                Err(probe)
            }
        });
        match state {
            Ok(encoder) => Ok(encoder),
            Err(probe) => Err(UriError::new(
                UriErrorKind::EncodingFailure,
                "Percent-encoder failed to initialise",
            )
            .with_detail(format!("self-test produced '{}'", probe))),
        }
    }

    fn escape(&self, input: &str) -> String {
        utf8_percent_encode(input, UNRESERVED_ENCODE_SET).to_string()
    }
}

impl PercentEncoder for Rfc3986Encoder {
    fn encode(&self, input: &str) -> UriResult<String> {
        Ok(self.escape(input))
    }
}
