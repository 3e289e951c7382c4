//! Credential extraction from HTTP Basic authentication.
//!
//! git clients only speak Basic auth, so the platform token travels in the
//! password slot (`git clone https://x:<token>@host/...`). The username is
//! ignored.

use axum::http::{HeaderMap, header};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

const BASIC_PREFIX: &str = "Basic ";

/// Returns the password of a Basic `Authorization` header, or `None` when the
/// header is absent or not a well-formed Basic credential.
///
/// `user:` yields `Some("")`: the credential is present but empty and the
/// verifier decides what that means. Non UTF-8 bytes are replaced, not
/// rejected, so such a credential also reaches the verifier.
pub fn basic_auth_password(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    // scheme は大文字小文字を区別しない
    let prefix = value.get(..BASIC_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(BASIC_PREFIX) {
        return None;
    }

    let decoded = STANDARD.decode(&value[BASIC_PREFIX.len()..]).ok()?;
    let decoded = String::from_utf8_lossy(&decoded);

    let (_username, password) = decoded.split_once(':')?;
    Some(password.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(authorization: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(authorization).unwrap(),
        );
        headers
    }

    fn basic(userpass: &str) -> HeaderMap {
        headers(&format!("Basic {}", STANDARD.encode(userpass)))
    }

    #[test]
    fn password_slot_carries_the_token() {
        assert_eq!(
            basic_auth_password(&basic("git:eyJ.token.sig")),
            Some("eyJ.token.sig".to_string())
        );
    }

    #[test]
    fn username_is_ignored() {
        assert_eq!(basic_auth_password(&basic(":tok")), Some("tok".into()));
        assert_eq!(basic_auth_password(&basic("anything:tok")), Some("tok".into()));
    }

    #[test]
    fn only_the_first_colon_splits() {
        assert_eq!(basic_auth_password(&basic("u:a:b")), Some("a:b".into()));
    }

    #[test]
    fn empty_password_is_present() {
        assert_eq!(basic_auth_password(&basic("user:")), Some(String::new()));
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let encoded = STANDARD.encode("u:tok");
        assert_eq!(
            basic_auth_password(&headers(&format!("basic {encoded}"))),
            Some("tok".into())
        );
        assert_eq!(
            basic_auth_password(&headers(&format!("BASIC {encoded}"))),
            Some("tok".into())
        );
    }

    #[test]
    fn absent_header_is_none() {
        assert_eq!(basic_auth_password(&HeaderMap::new()), None);
    }

    #[test]
    fn bearer_scheme_is_not_accepted() {
        assert_eq!(basic_auth_password(&headers("Bearer eyJ.token.sig")), None);
    }

    #[test]
    fn malformed_payloads_are_none() {
        assert_eq!(basic_auth_password(&headers("Basic")), None);
        assert_eq!(basic_auth_password(&headers("Basic !!not-base64!!")), None);
        // no colon
        assert_eq!(basic_auth_password(&basic("just-a-token")), None);
    }

    #[test]
    fn non_utf8_bytes_are_still_a_credential() {
        let encoded = STANDARD.encode([0xff, 0xfe, b':', b'x']);
        assert_eq!(
            basic_auth_password(&headers(&format!("Basic {encoded}"))),
            Some("x".into())
        );

        let encoded = STANDARD.encode([b'u', b':', 0xff, b'k']);
        assert_eq!(
            basic_auth_password(&headers(&format!("Basic {encoded}"))),
            Some("\u{fffd}k".into())
        );
    }
}
