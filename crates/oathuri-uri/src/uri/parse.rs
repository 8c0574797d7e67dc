//! Reading a key URI back into an [`OtpRequest`].
//!
//! Absent optional parameters map back to the composer's sentinels
//! (`digits = 0`, period `0`), so a composed URI survives a parse and
//! re-compose unchanged.

use percent_encoding::percent_decode_str;

use crate::uri::error::{UriError, UriErrorKind, UriResult};
use crate::uri::types::*;

/// Parse an `otpauth://` URI into an `OtpRequest`.
///
/// The secret is taken verbatim, mirroring the composer. Label and
/// parameter values are percent-decoded; `+` is kept as-is.
pub fn parse_key_uri(uri: &str) -> UriResult<OtpRequest> {
    let url = url::Url::parse(uri)
        .map_err(|e| invalid(format!("Invalid URI: {}", e)))?;

    if url.scheme() != URI_SCHEME {
        return Err(invalid(format!(
            "Expected scheme '{}', got '{}'",
            URI_SCHEME,
            url.scheme()
        )));
    }

    let otp_type = url
        .host_str()
        .and_then(OtpType::from_str_loose)
        .ok_or_else(|| invalid(format!("Unknown OTP type: {:?}", url.host_str())))?;

    // Path is "/ACCOUNT" or "/ISSUER:ACCOUNT"
    let path = url.path();
    let label = decode(path.strip_prefix('/').unwrap_or(path), "label")?;
    let (label_issuer, account_name) = match label.split_once(':') {
        Some((issuer, account)) => (Some(issuer.to_string()), account.to_string()),
        None => (None, label),
    };

    let mut secret = None;
    let mut param_issuer = None;
    let mut digits = 0u32;
    let mut moving_factor = 0u64;
    let mut algorithm = Algorithm::Sha1;

    for pair in url.query().unwrap_or("").split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "secret" => secret = Some(value.to_string()),
            "issuer" => param_issuer = Some(decode(value, "issuer")?),
            "digits" => {
                digits = value
                    .parse()
                    .map_err(|_| invalid(format!("Invalid digits value: '{}'", value)))?;
            }
            "algorithm" => {
                algorithm = Algorithm::from_str_loose(value)
                    .ok_or_else(|| invalid(format!("Unknown algorithm: '{}'", value)))?;
            }
            k if k == otp_type.moving_factor_param() => {
                moving_factor = value
                    .parse()
                    .map_err(|_| invalid(format!("Invalid {} value: '{}'", k, value)))?;
            }
            _ => {} // ignore unknown params
        }
    }

    let secret = secret.ok_or_else(|| invalid("Missing 'secret' parameter"))?;

    Ok(OtpRequest {
        otp_type,
        secret,
        account_name,
        issuer: param_issuer.or(label_issuer).unwrap_or_default(),
        digits,
        moving_factor,
        algorithm,
    })
}

fn decode(value: &str, what: &str) -> UriResult<String> {
    percent_decode_str(value)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| invalid(format!("The {} is not valid UTF-8", what)).with_detail(e.to_string()))
}

fn invalid(msg: impl Into<String>) -> UriError {
    UriError::new(UriErrorKind::InvalidUri, msg)
}
