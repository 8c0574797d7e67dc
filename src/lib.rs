//! # oathuri
//!
//! Command-line front end for OATH key URI generation. Prints an
//! `otpauth://` URI for a shared secret, ready to be piped into a QR encoder.

pub mod cli;
pub mod logging;

pub use cli::{main_with, run, Cli, CliError};
