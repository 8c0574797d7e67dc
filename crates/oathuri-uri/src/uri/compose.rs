//! `otpauth://` key URI composition per the Google Authenticator key-URI
//! format:
//! <https://github.com/google/google-authenticator/wiki/Key-Uri-Format>
//!
//! Format: `otpauth://TYPE/ISSUER:ACCOUNT?secret=SECRET&issuer=ISSUER[&counter=N|&period=N][&algorithm=ALGO][&digits=N]`
//!
//! The issuer is written both as the label prefix (older authenticators) and
//! as the `issuer=` parameter (newer ones). Default values are omitted except
//! the HOTP counter, which is always present, including `0`.

use crate::uri::encode::{PercentEncoder, Rfc3986Encoder};
use crate::uri::error::{UriError, UriErrorKind, UriResult};
use crate::uri::types::*;

/// Working space reserved for every composition: enough for a URI at the
/// ceiling whose every byte had to be escaped.
const SCRATCH_CAPACITY: usize = 3 * MAX_URI_LEN;

/// Upper bound of everything that is not caller text: scheme, type, label
/// separator, parameter names, a 20-digit counter, algorithm and digits.
const FIXED_OVERHEAD: usize = 128;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Entry points
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Compose a TOTP key URI. `digits == 0` and `period == 0` select the
/// authenticator defaults (6 digits, 30 s) and are left out of the URI.
pub fn generate_totp_uri(
    secret: &str,
    account_name: &str,
    issuer: &str,
    digits: u32,
    period: u64,
    algorithm: Algorithm,
) -> UriResult<ComposedUri> {
    let request = OtpRequest::totp(secret, account_name, issuer)
        .with_digits(digits)
        .with_period(period)
        .with_algorithm(algorithm);
    compose(&request)
}

/// Compose a HOTP key URI. The counter is always written.
pub fn generate_hotp_uri(
    secret: &str,
    account_name: &str,
    issuer: &str,
    digits: u32,
    counter: u64,
    algorithm: Algorithm,
) -> UriResult<ComposedUri> {
    let request = OtpRequest::hotp(secret, account_name, issuer, counter)
        .with_digits(digits)
        .with_algorithm(algorithm);
    compose(&request)
}

/// Compose a key URI with the process-wide RFC 3986 encoder.
pub fn compose(request: &OtpRequest) -> UriResult<ComposedUri> {
    let encoder = Rfc3986Encoder::global()?;
    compose_with(request, encoder)
}

/// Compose a key URI with a caller-supplied encoder.
///
/// Either a complete URI of at most `MAX_URI_LEN - 1` bytes is returned or
/// an error; nothing partial escapes.
pub fn compose_with(request: &OtpRequest, encoder: &dyn PercentEncoder) -> UriResult<ComposedUri> {
    validate(request)?;

    let issuer = encode_field(encoder, "issuer", &request.issuer)?;
    let account_name = encode_field(encoder, "account name", &request.account_name)?;

    let mut uri = String::with_capacity(scratch_capacity(request));
    uri.push_str(URI_SCHEME);
    uri.push_str("://");
    uri.push_str(request.otp_type.as_str());
    uri.push('/');

    // Label, issuer prefix kept for backward compatibility
    uri.push_str(&issuer);
    uri.push(':');
    uri.push_str(&account_name);

    uri.push('?');
    uri.push_str("secret=");
    uri.push_str(&request.secret);

    push_param(&mut uri, "issuer", &issuer);

    match request.otp_type {
        OtpType::Hotp => {
            push_param(&mut uri, "counter", &request.moving_factor.to_string());
        }
        OtpType::Totp if request.moving_factor != 0 => {
            push_param(&mut uri, "period", &request.moving_factor.to_string());
        }
        OtpType::Totp => {}
    }

    if !request.algorithm.is_default() {
        push_param(&mut uri, "algorithm", request.algorithm.uri_name());
    }

    if request.digits != 0 {
        push_param(&mut uri, "digits", &request.digits.to_string());
    }

    let limit = MAX_URI_LEN - 1;
    if uri.len() > limit {
        return Err(UriError::new(
            UriErrorKind::UriTooLong,
            "Key URI does not fit into a QR code",
        )
        .with_detail(format!("{} bytes, limit {}", uri.len(), limit)));
    }

    Ok(ComposedUri::new(uri))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn validate(request: &OtpRequest) -> UriResult<()> {
    let required = [
        ("secret", &request.secret),
        ("account name", &request.account_name),
        ("issuer", &request.issuer),
    ];
    if let Some((name, _)) = required.iter().find(|(_, value)| value.is_empty()) {
        return Err(UriError::new(
            UriErrorKind::NullParameter,
            format!("Missing required parameter: {}", name),
        ));
    }

    let labelled = [("account name", &request.account_name), ("issuer", &request.issuer)];
    if let Some((name, _)) = labelled.iter().find(|(_, value)| value.contains(':')) {
        return Err(UriError::new(
            UriErrorKind::InvalidInput,
            format!("The {} must not contain ':'", name),
        ));
    }

    if request.digits != 0 && !SUPPORTED_DIGITS.contains(&request.digits) {
        return Err(UriError::new(
            UriErrorKind::InvalidDigits,
            "Unsupported number of OTP digits",
        )
        .with_detail(format!("digits={}, expected 6, 7 or 8", request.digits)));
    }

    Ok(())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Assembly helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn encode_field(encoder: &dyn PercentEncoder, name: &str, value: &str) -> UriResult<String> {
    let encoded = encoder.encode(value).map_err(|e| {
        UriError::new(
            UriErrorKind::EncodingFailure,
            format!("Failed to encode {}", name),
        )
        .with_detail(e.to_string())
    })?;

    if encoded.is_empty() || !encoded.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(UriError::new(
            UriErrorKind::EncodingFailure,
            format!("Encoder produced unusable output for {}", name),
        ));
    }

    Ok(encoded)
}

fn push_param(uri: &mut String, key: &str, value: &str) {
    uri.push('&');
    uri.push_str(key);
    uri.push('=');
    uri.push_str(value);
}

fn scratch_capacity(request: &OtpRequest) -> usize {
    let worst = FIXED_OVERHEAD
        + request.secret.len()
        + 3 * (2 * request.issuer.len() + request.account_name.len());
    worst.max(SCRATCH_CAPACITY)
}
