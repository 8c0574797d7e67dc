//! Command-line surface: argument parsing, output termination and exit
//! codes. All URI work is delegated to `oathuri_uri`.

use std::ffi::OsString;
use std::io::{self, Write};

use clap::{ArgAction, Parser};
use oathuri_uri::uri::{compose, Algorithm, OtpRequest, OtpType, UriError};

use crate::logging;

/// Exit status for command-line usage errors (sysexits `EX_USAGE`).
pub const EX_USAGE: u8 = 64;
/// Exit status when the URI cannot be written out (sysexits `EX_IOERR`).
pub const EX_IOERR: u8 = 74;

const BUG_ADDRESS: &str =
    "Report bugs to <bugs@sinustrom.info> by email or via web at <https://github.com/zpuskas/oath-uri/issues>";

/// oathuri -- Generate OATH OTP key URI for soft tokens
#[derive(Debug, Clone, Parser)]
#[command(name = "oathuri", version, after_help = BUG_ADDRESS)]
pub struct Cli {
    /// Shared secret, typically base-32 encoded
    pub secret: String,

    /// Account name, e.g. alice@example.com
    pub account: String,

    /// Issuer / service provider
    pub issuer: String,

    /// Type of the OATH token: TOTP (default), HOTP
    #[arg(short, long, value_name = "MODE", default_value = "totp", value_parser = parse_mode)]
    pub mode: OtpType,

    /// Number of digits for the OTP: 6 (default), 7, 8
    #[arg(short, long, value_name = "DIGITS", default_value_t = 0, hide_default_value = true)]
    pub digits: u32,

    /// In HOTP mode the state of the moving factor (default: 0)
    #[arg(short, long, value_name = "COUNTER")]
    pub counter: Option<u64>,

    /// In TOTP mode the window of an OTP in seconds (default: 30)
    #[arg(short, long, value_name = "PERIOD")]
    pub period: Option<u64>,

    /// Hash algorithm used for the OTP: SHA1 (default), SHA256, SHA512
    #[arg(short = 'H', long, value_name = "HASH", default_value = "SHA1", value_parser = parse_hash)]
    pub hash: Algorithm,

    /// Output URI is terminated by a null character instead of a newline.
    /// Useful when piping into qrencode.
    #[arg(short = '0', long)]
    pub null: bool,

    /// Log more to stderr (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_mode(s: &str) -> Result<OtpType, String> {
    OtpType::from_str_loose(s).ok_or_else(|| format!("Invalid OATH mode '{}'", s))
}

fn parse_hash(s: &str) -> Result<Algorithm, String> {
    Algorithm::from_str_loose(s).ok_or_else(|| format!("Invalid hash type '{}'", s))
}

impl Cli {
    /// `--counter` and `--period` share the moving factor. The flag that
    /// matches the mode wins, the other one is the fallback.
    pub fn moving_factor(&self) -> u64 {
        let (primary, fallback) = match self.mode {
            OtpType::Totp => (self.period, self.counter),
            OtpType::Hotp => (self.counter, self.period),
        };
        primary.or(fallback).unwrap_or(0)
    }

    pub fn request(&self) -> OtpRequest {
        OtpRequest {
            otp_type: self.mode,
            secret: self.secret.clone(),
            account_name: self.account.clone(),
            issuer: self.issuer.clone(),
            digits: self.digits,
            moving_factor: self.moving_factor(),
            algorithm: self.hash,
        }
    }

    pub fn terminator(&self) -> &'static [u8] {
        if self.null {
            b"\0"
        } else {
            b"\n"
        }
    }
}

/// Command-line failure, each mapped to a process exit status.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to generate OATH URI: {0}")]
    Compose(#[from] UriError),

    #[error("Failed to write OATH URI: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Compose(e) => e.kind.code(),
            Self::Output(_) => EX_IOERR,
        }
    }
}

/// Compose the URI for `cli` and write it, terminated, to `out`.
/// Nothing is written unless composition succeeds.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<(), CliError> {
    let request = cli.request();

    let mismatched = match request.otp_type {
        OtpType::Totp => cli.period.is_none() && cli.counter.is_some(),
        OtpType::Hotp => cli.counter.is_none() && cli.period.is_some(),
    };
    if mismatched {
        tracing::warn!(
            mode = %request.otp_type,
            "using the {} value as the moving factor",
            if cli.counter.is_some() { "--counter" } else { "--period" }
        );
    }

    tracing::info!(
        mode = %request.otp_type,
        algorithm = %request.algorithm,
        digits = request.digits,
        moving_factor = request.moving_factor,
        "composing key URI"
    );

    let uri = compose(&request)?;
    tracing::debug!(len = uri.len(), "key URI composed");

    out.write_all(uri.as_str().as_bytes())?;
    out.write_all(cli.terminator())?;
    out.flush()?;
    Ok(())
}

/// Parse `args`, bootstrap logging, run, and return the process exit status.
pub fn main_with<I, T>(args: I, out: &mut impl Write) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version also arrive here, on stdout
            let _ = err.print();
            return if err.use_stderr() { EX_USAGE } else { 0 };
        }
    };

    logging::init(cli.verbose);

    match run(&cli, out) {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!("{}", err);
            err.exit_code()
        }
    }
}
