use oathuri_uri::uri::*;
use percent_encoding::percent_decode_str;
use proptest::prelude::*;

/// Printable ASCII without the `:` label separator.
const LABEL_TEXT: &str = "[ -9;-~]{1,40}";

fn arbitrary_algorithm() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just(Algorithm::Sha1),
        Just(Algorithm::Sha256),
        Just(Algorithm::Sha512),
    ]
}

fn arbitrary_otp_type() -> impl Strategy<Value = OtpType> {
    prop_oneof![Just(OtpType::Totp), Just(OtpType::Hotp)]
}

fn arbitrary_digits() -> impl Strategy<Value = u32> {
    prop_oneof![Just(0u32), Just(6u32), Just(7u32), Just(8u32)]
}

fn arbitrary_request() -> impl Strategy<Value = OtpRequest> {
    (
        arbitrary_otp_type(),
        "[A-Z2-7]{16,32}",
        LABEL_TEXT,
        LABEL_TEXT,
        arbitrary_digits(),
        any::<u64>(),
        arbitrary_algorithm(),
    )
        .prop_map(
            |(otp_type, secret, account_name, issuer, digits, moving_factor, algorithm)| {
                OtpRequest {
                    otp_type,
                    secret,
                    account_name,
                    issuer,
                    digits,
                    moving_factor,
                    algorithm,
                }
            },
        )
}

/// Splits `otpauth://TYPE/ISSUER:ACCOUNT?...` into its raw label halves.
fn label_parts(uri: &str) -> (String, String) {
    let rest = uri.splitn(4, '/').nth(3).unwrap();
    let label = rest.split('?').next().unwrap();
    let (issuer, account) = label.split_once(':').unwrap();
    (issuer.to_string(), account.to_string())
}

proptest! {
    #[test]
    fn test_compose_is_deterministic(req in arbitrary_request()) {
        let first = compose(&req).unwrap();
        let second = compose(&req.clone()).unwrap();
        prop_assert_eq!(first.as_str(), second.as_str());
    }

    #[test]
    fn test_colon_always_invalid_input(
        req in arbitrary_request(),
        prefix in "[a-z]{0,8}",
        suffix in "[a-z]{0,8}",
        in_issuer in any::<bool>(),
        digits in any::<u32>(),
    ) {
        let tainted = format!("{}:{}", prefix, suffix);
        let mut req = req.with_digits(digits);
        if in_issuer {
            req.issuer = tainted;
        } else {
            req.account_name = tainted;
        }
        prop_assert_eq!(compose(&req).unwrap_err().kind, UriErrorKind::InvalidInput);
    }

    #[test]
    fn test_digits_validation(req in arbitrary_request(), digits in any::<u32>()) {
        let result = compose(&req.with_digits(digits));
        if [0, 6, 7, 8].contains(&digits) {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result.unwrap_err().kind, UriErrorKind::InvalidDigits);
        }
    }

    #[test]
    fn test_moving_factor_rules(req in arbitrary_request(), factor in prop_oneof![Just(0u64), any::<u64>()]) {
        let req = req.with_counter(factor);
        let uri = compose(&req).unwrap();
        let counter = format!("&counter={}", factor);
        let period = format!("&period={}", factor);
        match req.otp_type {
            OtpType::Hotp => {
                prop_assert!(uri.as_str().contains(&counter));
                prop_assert!(!uri.as_str().contains("&period="));
            }
            OtpType::Totp => {
                prop_assert!(!uri.as_str().contains("&counter="));
                prop_assert_eq!(uri.as_str().contains(&period), factor != 0);
                prop_assert_eq!(uri.as_str().contains("&period="), factor != 0);
            }
        }
    }

    #[test]
    fn test_algorithm_emission(req in arbitrary_request()) {
        let uri = compose(&req).unwrap();
        prop_assert!(!uri.as_str().contains("algorithm=SHA1"));
        match req.algorithm {
            Algorithm::Sha1 => prop_assert!(!uri.as_str().contains("&algorithm=")),
            other => {
                let expected = format!("&algorithm={}", other.uri_name());
                prop_assert!(uri.as_str().contains(&expected));
            }
        }
    }

    #[test]
    fn test_label_percent_decodes_to_input(req in arbitrary_request()) {
        let uri = compose(&req).unwrap();
        let (issuer, account) = label_parts(uri.as_str());
        prop_assert_eq!(percent_decode_str(&issuer).decode_utf8().unwrap(), req.issuer.as_str());
        prop_assert_eq!(percent_decode_str(&account).decode_utf8().unwrap(), req.account_name.as_str());
        let issuer_param = format!("&issuer={}", issuer);
        prop_assert!(uri.as_str().contains(&issuer_param));
    }

    #[test]
    fn test_parse_inverts_compose(req in arbitrary_request()) {
        let uri = compose(&req).unwrap();
        let parsed = parse_key_uri(uri.as_str()).unwrap();
        prop_assert_eq!(&parsed, &req);
        prop_assert_eq!(compose(&parsed).unwrap(), uri);
    }

    #[test]
    fn test_length_ceiling(
        req in arbitrary_request(),
        account in "[a-z@/ ]{900,1100}",
        issuer in "[A-Z#]{1,200}",
    ) {
        let mut req = req;
        req.account_name = account;
        req.issuer = issuer;
        let encoder = Rfc3986Encoder::global().unwrap();
        let enc_issuer = encoder.encode(&req.issuer).unwrap();
        let enc_account = encoder.encode(&req.account_name).unwrap();
        let predicted = "otpauth://totp/".len()
            + 2 * enc_issuer.len()
            + 1
            + enc_account.len()
            + "?secret=".len()
            + req.secret.len()
            + "&issuer=".len()
            + match req.otp_type {
                OtpType::Hotp => "&counter=".len() + req.moving_factor.to_string().len(),
                OtpType::Totp if req.moving_factor != 0 => "&period=".len() + req.moving_factor.to_string().len(),
                OtpType::Totp => 0,
            }
            + if req.algorithm.is_default() { 0 } else { "&algorithm=".len() + req.algorithm.uri_name().len() }
            + if req.digits == 0 { 0 } else { "&digits=".len() + 1 };

        match compose(&req) {
            Ok(uri) => {
                prop_assert!(predicted <= MAX_URI_LEN - 1);
                prop_assert_eq!(uri.len(), predicted);
            }
            Err(err) => {
                prop_assert_eq!(err.kind, UriErrorKind::UriTooLong);
                prop_assert!(predicted > MAX_URI_LEN - 1);
            }
        }
    }
}
