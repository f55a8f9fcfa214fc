//! `VERACODE-HMAC-SHA-256` request signing.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use url::Url;

use crate::credentials::ApiCredentials;
use crate::error::{ClientError, Result};

type HmacSha256 = Hmac<Sha256>;

pub const AUTH_SCHEME: &str = "VERACODE-HMAC-SHA-256";
const REQUEST_VERSION: &[u8] = b"vcode_request_version_1";
const NONCE_LEN: usize = 16;

fn hmac(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// Build the `Authorization` header value for a request to `url`.
pub fn authorization_header(creds: &ApiCredentials, method: &str, url: &Url) -> Result<String> {
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();

    let host = url
        .host_str()
        .ok_or_else(|| ClientError::Credentials(format!("cannot sign URL without host: {url}")))?;
    let path_and_query = match url.query() {
        Some(q) => format!("{}?{}", url.path(), q),
        None => url.path().to_string(),
    };

    sign(creds, method, host, &path_and_query, timestamp, &nonce)
}

/// Deterministic part of the signature, split out so it can be checked
/// against known vectors.
pub fn sign(
    creds: &ApiCredentials,
    method: &str,
    host: &str,
    path_and_query: &str,
    timestamp: u128,
    nonce: &[u8],
) -> Result<String> {
    let key_id = creds.signing_id();
    let secret = hex::decode(creds.signing_secret())
        .map_err(|e| ClientError::Credentials(format!("API key secret is not valid hex: {e}")))?;

    let signing_data = format!(
        "id={key_id}&host={host}&url={path_and_query}&method={}",
        method.to_ascii_uppercase()
    );

    let key_nonce = hmac(&secret, nonce);
    let key_date = hmac(&key_nonce, timestamp.to_string().as_bytes());
    let signature_key = hmac(&key_date, REQUEST_VERSION);
    let signature = hex::encode(hmac(&signature_key, signing_data.as_bytes()));

    Ok(format!(
        "{AUTH_SCHEME} id={key_id},ts={timestamp},nonce={},sig={signature}",
        hex::encode(nonce)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";

    fn nonce() -> Vec<u8> {
        hex::decode("0102030405060708090a0b0c0d0e0f10").unwrap()
    }

    #[test]
    fn matches_reference_signature() {
        let creds = ApiCredentials::new("abc123", SECRET);
        let header = sign(
            &creds,
            "GET",
            "api.veracode.com",
            "/appsec/v1/applications?legacy_id=42",
            1_700_000_000_000,
            &nonce(),
        )
        .unwrap();

        assert_eq!(
            header,
            "VERACODE-HMAC-SHA-256 id=abc123,ts=1700000000000,\
             nonce=0102030405060708090a0b0c0d0e0f10,\
             sig=c1c4b1c427100f9a49a10496f69eb4687aa0307f8db0a867fabf3452b2058fee"
        );
    }

    #[test]
    fn method_is_uppercased() {
        let creds = ApiCredentials::new("abc123", SECRET);
        let lower = sign(&creds, "get", "api.veracode.com", "/x", 1, &nonce()).unwrap();
        let upper = sign(&creds, "GET", "api.veracode.com", "/x", 1, &nonce()).unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn rejects_non_hex_secret() {
        let creds = ApiCredentials::new("abc123", "not-hex!");
        let err = sign(&creds, "GET", "api.veracode.com", "/x", 1, &nonce()).unwrap_err();
        assert!(matches!(err, ClientError::Credentials(_)));
    }

    #[test]
    fn header_for_url_includes_query() {
        let creds = ApiCredentials::new("abc123", SECRET);
        let url = Url::parse("https://api.veracode.com/appsec/v1/applications?legacy_id=42").unwrap();
        let header = authorization_header(&creds, "GET", &url).unwrap();
        assert!(header.starts_with("VERACODE-HMAC-SHA-256 id=abc123,ts="));
        assert!(header.contains(",nonce="));
        assert!(header.contains(",sig="));
    }
}
