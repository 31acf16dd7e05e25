use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Allowed clock skew, in seconds, between a signed request's timestamp and
/// the server wall clock. Symmetric: stale and future-dated requests are
/// rejected alike.
pub const REPLAY_WINDOW_SECS: i64 = 300;

fn keyed_mac(secret: &[u8]) -> HmacSha256 {
    HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size")
}

/// Sign `(method, path, timestamp, body)` with HMAC-SHA256, returning the
/// lowercase hex digest clients send in `X-Signature`.
///
/// The message is the byte concatenation `method ++ path ++ timestamp ++ body`
/// with the timestamp rendered as a base-10 decimal string.
pub fn sign(secret: &[u8], method: &str, path: &str, timestamp: i64, body: &[u8]) -> String {
    let mut mac = keyed_mac(secret);
    mac.update(method.as_bytes());
    mac.update(path.as_bytes());
    mac.update(timestamp.to_string().as_bytes());
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify an inbound request signature. Pure check; no side effects.
///
/// The timestamp is taken as the raw header string: it is parsed for the
/// replay-window check but fed to the MAC exactly as transmitted, and the
/// body must be the raw bytes as transmitted (re-serializing a parsed body
/// would break the signature on any whitespace or ordering difference).
pub fn verify(
    secret: &[u8],
    method: &str,
    path: &str,
    timestamp: &str,
    signature: &str,
    body: &[u8],
    now: SystemTime,
) -> Result<(), AppError> {
    let ts: i64 = timestamp
        .parse()
        .map_err(|_| AppError::forbidden_malformed_timestamp())?;

    let now_secs = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    if (now_secs - ts).abs() > REPLAY_WINDOW_SECS {
        return Err(AppError::forbidden_signature_expired());
    }

    let supplied =
        hex::decode(signature).map_err(|_| AppError::forbidden_invalid_signature())?;

    let mut mac = keyed_mac(secret);
    mac.update(method.as_bytes());
    mac.update(path.as_bytes());
    mac.update(timestamp.as_bytes());
    mac.update(body);

    // verify_slice compares in constant time.
    mac.verify_slice(&supplied)
        .map_err(|_| AppError::forbidden_invalid_signature())
}
