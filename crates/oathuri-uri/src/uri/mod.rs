//! Key URI crate: sub-modules.

pub mod types;
pub mod error;
pub mod encode;
pub mod compose;
pub mod parse;

// Re-export top-level items for convenience.
pub use types::*;
pub use error::{UriError, UriErrorKind, UriResult};
pub use encode::{PercentEncoder, Rfc3986Encoder};
pub use compose::{compose, compose_with, generate_hotp_uri, generate_totp_uri};
pub use parse::parse_key_uri;
