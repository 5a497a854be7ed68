//! OAuth 1.0a PLAINTEXT signing primitives.
//!
//! Trade Me accepts the PLAINTEXT signature method over HTTPS, which keeps
//! the signing step to a percent-encoded secret pair rather than an HMAC
//! base string. This module builds `Authorization: OAuth ...` headers and
//! parses the form-encoded token responses.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::{Error, Result};

/// Callback value for the out-of-band (PIN entry) flow.
pub const OOB_CALLBACK: &str = "oob";

/// RFC 5849 §3.6: everything except ALPHA / DIGIT / "-" / "." / "_" / "~"
/// is percent-encoded.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string per the OAuth 1.0 parameter encoding rules.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// A token/secret pair: either the short-lived request token or the
/// long-lived access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// The `oauth_token` value
    pub token: String,
    /// The `oauth_token_secret` value
    pub secret: String,
}

/// Compute the PLAINTEXT signature for the given secrets.
///
/// Per RFC 5849 §3.4.4 this is `encode(consumer_secret)&encode(token_secret)`,
/// with an empty token secret when no token has been issued yet.
pub fn plaintext_signature(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

/// Generate a random alphanumeric nonce.
pub fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Current Unix timestamp in seconds, as the protocol expects it.
pub fn timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}

/// Assemble an `Authorization: OAuth ...` header value from protocol
/// parameters. Values are percent-encoded; parameter order is preserved.
pub fn authorization_header(params: &[(&str, &str)]) -> String {
    let joined = params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {joined}")
}

/// Build the header for a token-endpoint request signed with only the
/// consumer credentials (the request-token step). `extra` carries
/// step-specific parameters such as `oauth_callback`.
pub fn consumer_header(
    consumer_key: &str,
    consumer_secret: &str,
    extra: &[(&str, &str)],
) -> String {
    let signature = plaintext_signature(consumer_secret, "");
    let ts = timestamp();
    let nonce = nonce();

    let mut params: Vec<(&str, &str)> = vec![
        ("oauth_consumer_key", consumer_key),
        ("oauth_signature_method", "PLAINTEXT"),
        ("oauth_timestamp", &ts),
        ("oauth_nonce", &nonce),
        ("oauth_version", "1.0"),
    ];
    params.extend_from_slice(extra);
    params.push(("oauth_signature", &signature));
    authorization_header(&params)
}

/// Build the header for a request signed with consumer credentials plus an
/// issued token (the access-token exchange and all API calls).
pub fn token_header(
    consumer_key: &str,
    consumer_secret: &str,
    token: &TokenPair,
    extra: &[(&str, &str)],
) -> String {
    let signature = plaintext_signature(consumer_secret, &token.secret);
    let ts = timestamp();
    let nonce = nonce();

    let mut params: Vec<(&str, &str)> = vec![
        ("oauth_consumer_key", consumer_key),
        ("oauth_token", &token.token),
        ("oauth_signature_method", "PLAINTEXT"),
        ("oauth_timestamp", &ts),
        ("oauth_nonce", &nonce),
        ("oauth_version", "1.0"),
    ];
    params.extend_from_slice(extra);
    params.push(("oauth_signature", &signature));
    authorization_header(&params)
}

/// Parse a form-encoded token response body into a [`TokenPair`].
///
/// # Errors
///
/// Returns [`Error::Authentication`] when `oauth_token` or
/// `oauth_token_secret` is absent.
pub fn parse_token_response(body: &str) -> Result<TokenPair> {
    let mut token = None;
    let mut secret = None;

    for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
        match key.as_ref() {
            "oauth_token" => token = Some(value.into_owned()),
            "oauth_token_secret" => secret = Some(value.into_owned()),
            _ => {}
        }
    }

    match (token, secret) {
        (Some(token), Some(secret)) => Ok(TokenPair { token, secret }),
        _ => Err(Error::Authentication(format!(
            "token response missing oauth_token/oauth_token_secret: {body:?}"
        ))),
    }
}
