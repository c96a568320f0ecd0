//! Signed oauth-token validation.
//!
//! Callers present their oauth token as `<token>.<signature>` where
//! the signature is a hex HMAC-SHA256 of the token under a shared
//! secret. The signing party may prefix the cookie payload with `s:`;
//! validation strips it. Tokens that fail verification never reach the
//! remote API.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use claimgate_core::WithdrawalError;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the signed token on inbound requests.
pub const AUTH_HEADER: &str = "x-authorization";

/// Produce `<token>.<hex signature>` under the shared secret.
pub fn sign_token(token: &str, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("hmac accepts keys of any length");
    mac.update(token.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());
    format!("{token}.{signature}")
}

/// Verify a signed token and return the bare oauth token.
pub fn verify_signed_token(signed: &str, secret: &str) -> Result<String, WithdrawalError> {
    let signed = signed.strip_prefix("s:").unwrap_or(signed);
    let Some((token, signature_hex)) = signed.rsplit_once('.') else {
        return Err(WithdrawalError::InvalidOauthTokenSignature);
    };
    if token.is_empty() {
        return Err(WithdrawalError::MissingOauthToken);
    }
    let signature =
        hex::decode(signature_hex).map_err(|_| WithdrawalError::InvalidOauthTokenSignature)?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("hmac accepts keys of any length");
    mac.update(token.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| WithdrawalError::InvalidOauthTokenSignature)?;
    Ok(token.to_string())
}

/// Pull the signed token out of a request's header pairs.
pub fn extract_signed_token<'a, I>(headers: I) -> Result<&'a str, WithdrawalError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    headers
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(AUTH_HEADER))
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .ok_or(WithdrawalError::MissingOauthToken)
}
