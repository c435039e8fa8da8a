//! OAuth 1.0a request signing (RFC 5849).
//!
//! Every REST call carries an `Authorization: OAuth ...` header whose
//! `oauth_signature` is an HMAC-SHA1 over the normalized request. The
//! normalization rules are strict: RFC 3986 percent-encoding (space as
//! `%20`, `~` untouched), parameters sorted by encoded key then encoded
//! value, and a signing key of `encoded(consumer_secret)&encoded(token_secret)`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha1 = Hmac<Sha1>;

/// Credential material for one signed request.
///
/// `token`/`token_secret` are absent only for the very first OAuth leg.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub consumer_key: &'a str,
    pub consumer_secret: &'a str,
    pub token: Option<&'a str>,
    pub token_secret: Option<&'a str>,
}

/// RFC 3986 percent-encoding as OAuth requires it.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Random nonce for one request.
pub fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Seconds since the Unix epoch.
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Build the `Authorization` header value for one request.
///
/// `request_params` are the query/body parameters of the request (they
/// participate in the signature but stay out of the header);
/// `oauth_extras` are additional `oauth_*` parameters such as
/// `oauth_callback` or `oauth_verifier` (signature and header).
pub fn authorization_header(
    method: &str,
    url: &str,
    request_params: &[(&str, &str)],
    oauth_extras: &[(&str, &str)],
    credentials: &Credentials<'_>,
    nonce: &str,
    timestamp: u64,
) -> String {
    let timestamp = timestamp.to_string();
    let mut oauth_params: Vec<(&str, &str)> = vec![
        ("oauth_consumer_key", credentials.consumer_key),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", &timestamp),
        ("oauth_version", "1.0"),
    ];
    if let Some(token) = credentials.token {
        oauth_params.push(("oauth_token", token));
    }
    oauth_params.extend_from_slice(oauth_extras);

    let signature = signature(method, url, request_params, &oauth_params, credentials);

    let mut header_params: Vec<(String, String)> = oauth_params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    header_params.push(("oauth_signature".to_string(), percent_encode(&signature)));
    header_params.sort();

    let rendered: Vec<String> = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, v))
        .collect();
    format!("OAuth {}", rendered.join(", "))
}

/// HMAC-SHA1 signature over the normalized request, base64-encoded.
fn signature(
    method: &str,
    url: &str,
    request_params: &[(&str, &str)],
    oauth_params: &[(&str, &str)],
    credentials: &Credentials<'_>,
) -> String {
    let mut pairs: Vec<(String, String)> = request_params
        .iter()
        .chain(oauth_params.iter())
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    pairs.sort();

    let parameter_string: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    let base_string = format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&parameter_string.join("&"))
    );

    let signing_key = format!(
        "{}&{}",
        percent_encode(credentials.consumer_secret),
        percent_encode(credentials.token_secret.unwrap_or(""))
    );

    let mut mac =
        HmacSha1::new_from_slice(signing_key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(base_string.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The worked signing example from the Twitter API documentation.
    fn doc_credentials() -> Credentials<'static> {
        Credentials {
            consumer_key: "xvz1evFS4wEEPTGEFPHBog",
            consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
            token: Some("370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb"),
            token_secret: Some("LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE"),
        }
    }

    const DOC_NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
    const DOC_TIMESTAMP: u64 = 1318622958;

    #[test]
    fn percent_encoding_is_rfc3986() {
        assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(percent_encode("An encoded string!"), "An%20encoded%20string%21");
        assert_eq!(percent_encode("Dogs, Cats & Mice"), "Dogs%2C%20Cats%20%26%20Mice");
        assert_eq!(percent_encode("☃"), "%E2%98%83");
        assert_eq!(percent_encode("safe-chars_are.left~alone"), "safe-chars_are.left~alone");
    }

    #[test]
    fn signature_matches_documented_example() {
        let credentials = doc_credentials();
        let timestamp = DOC_TIMESTAMP.to_string();
        let oauth_params: Vec<(&str, &str)> = vec![
            ("oauth_consumer_key", credentials.consumer_key),
            ("oauth_nonce", DOC_NONCE),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", &timestamp),
            ("oauth_version", "1.0"),
            ("oauth_token", credentials.token.unwrap()),
        ];
        let request_params = [
            ("include_entities", "true"),
            (
                "status",
                "Hello Ladies + Gentlemen, a signed OAuth request!",
            ),
        ];

        let signature = signature(
            "post",
            "https://api.twitter.com/1/statuses/update.json",
            &request_params,
            &oauth_params,
            &credentials,
        );
        assert_eq!(signature, "tnnArxj06cWHq44gCs1OSKk/jLY=");
    }

    #[test]
    fn header_carries_the_signature_and_oauth_fields() {
        let credentials = doc_credentials();
        let header = authorization_header(
            "POST",
            "https://api.twitter.com/1/statuses/update.json",
            &[
                ("include_entities", "true"),
                (
                    "status",
                    "Hello Ladies + Gentlemen, a signed OAuth request!",
                ),
            ],
            &[],
            &credentials,
            DOC_NONCE,
            DOC_TIMESTAMP,
        );

        assert!(header.starts_with("OAuth "));
        assert!(header.contains(r#"oauth_signature="tnnArxj06cWHq44gCs1OSKk%2FjLY%3D""#));
        assert!(header.contains(r#"oauth_consumer_key="xvz1evFS4wEEPTGEFPHBog""#));
        assert!(header.contains(r#"oauth_signature_method="HMAC-SHA1""#));
        assert!(!header.contains("include_entities"));
    }

    #[test]
    fn extras_participate_in_the_header() {
        let credentials = Credentials {
            consumer_key: "ck",
            consumer_secret: "cs",
            token: None,
            token_secret: None,
        };
        let header = authorization_header(
            "POST",
            "https://api.twitter.com/oauth/request_token",
            &[],
            &[("oauth_callback", "http://localhost:8080/callback")],
            &credentials,
            "fixed-nonce",
            1_000_000,
        );

        assert!(header.contains("oauth_callback="));
        assert!(!header.contains("oauth_token="));
    }

    #[test]
    fn nonces_are_distinct() {
        let a = nonce();
        let b = nonce();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }
}
