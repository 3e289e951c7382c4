use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// Short, non-reversible token fingerprint for log correlation.
///
/// Credentials must never reach the logs; this lets two log lines about the
/// same token be matched without storing the token.
pub fn token_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    URL_SAFE_NO_PAD.encode(&digest[..9])
}
