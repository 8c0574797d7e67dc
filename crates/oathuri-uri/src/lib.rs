//! # oathuri – OATH Key URI composition
//!
//! Builds the `otpauth://` provisioning URIs that soft-token authenticator
//! apps scan from a QR code:
//!
//! - **Composer** – validation, RFC 3986 label encoding, fixed parameter order
//! - **Length ceiling** – output always fits a byte-mode QR symbol
//! - **Percent-Encoder** – pluggable, lazily initialised process-wide default
//! - **Reader** – parse a key URI back into a request

pub mod uri;
