use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

use super::identity::{Identity, IdentityClaims};

/// Verification failures. The `Display` text is echoed to the client in the
/// 401 body, so it must stay generic (no key material, no internal state).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("token is malformed")]
    Malformed,
    #[error("unexpected signing method: {0}")]
    UnsupportedAlgorithm(String),
    #[error("signature is invalid")]
    InvalidSignature,
    #[error("token is expired")]
    Expired,
    #[error("token is not valid yet")]
    NotYetValid,
    #[error("token issuer is invalid")]
    InvalidIssuer,
    #[error("token is missing the '{0}' claim")]
    MissingClaim(String),
    #[error("invalid token claims: {0}")]
    InvalidClaims(String),
    #[error("token does not match the verification key")]
    Key,
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::ImmatureSignature => Self::NotYetValid,
            ErrorKind::InvalidIssuer => Self::InvalidIssuer,
            ErrorKind::MissingRequiredClaim(claim) => Self::MissingClaim(claim.clone()),
            ErrorKind::Json(err) => Self::InvalidClaims(err.to_string()),
            ErrorKind::InvalidAlgorithmName => Self::UnsupportedAlgorithm("unknown".into()),
            ErrorKind::InvalidAlgorithm => Self::UnsupportedAlgorithm("mismatch".into()),
            ErrorKind::InvalidKeyFormat => Self::Key,
            _ => Self::Malformed,
        }
    }
}

/// Key material could not be turned into a verifier at startup.
#[derive(Debug, Error)]
pub enum VerifierInitError {
    #[error("platform client secret is empty")]
    EmptySecret,
    #[error("invalid platform public key pem: {0}")]
    PublicKey(#[source] jsonwebtoken::errors::Error),
}

/// 署名方式 (credential kind)。
///
/// gate は成功/失敗しか見ないので、方式を増やす場合はここに variant を足すだけでよい。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningScheme {
    /// HMAC, keyed by the platform client secret.
    SharedSecret,
    /// RSA PKCS#1 v1.5, keyed by the platform public key.
    PublicKey,
}

impl SigningScheme {
    pub fn for_algorithm(alg: Algorithm) -> Option<Self> {
        match alg {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Some(Self::SharedSecret),
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => Some(Self::PublicKey),
            _ => None,
        }
    }
}

/// Resolves a bearer credential into an [`Identity`].
///
/// The only seam the access gate depends on. Implementations hold their key
/// material and must be safe to call from many requests at once.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Identity, VerifyError>;
}

/// Platform token verifier: HMAC tokens signed with the client secret, RSA
/// tokens signed by the identity provider.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct PlatformVerifier {
    shared_secret: DecodingKey,
    public_key: DecodingKey,
    issuer: Option<String>,
    leeway_seconds: u64,
}

impl std::fmt::Debug for PlatformVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("PlatformVerifier")
            .field("issuer", &self.issuer)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish_non_exhaustive()
    }
}

impl PlatformVerifier {
    pub fn new(
        client_secret: &str,
        public_key_pem: &str,
        issuer: Option<String>,
        leeway_seconds: u64,
    ) -> Result<Self, VerifierInitError> {
        if client_secret.is_empty() {
            return Err(VerifierInitError::EmptySecret);
        }

        let shared_secret = DecodingKey::from_secret(client_secret.as_bytes());
        let public_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(VerifierInitError::PublicKey)?;

        Ok(Self {
            shared_secret,
            public_key,
            issuer,
            leeway_seconds,
        })
    }

    fn key_for(&self, scheme: SigningScheme) -> &DecodingKey {
        match scheme {
            SigningScheme::SharedSecret => &self.shared_secret,
            SigningScheme::PublicKey => &self.public_key,
        }
    }

    // header の alg に固定した Validation を作る (alg の差し替え攻撃対策)
    fn validation_for(&self, alg: Algorithm) -> Validation {
        let mut validation = Validation::new(alg);
        validation.leeway = self.leeway_seconds;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }
        validation
    }
}

impl TokenVerifier for PlatformVerifier {
    fn verify(&self, token: &str) -> Result<Identity, VerifyError> {
        let alg = header_alg(token)?;

        let scheme = Algorithm::from_str(&alg)
            .ok()
            .and_then(|parsed| SigningScheme::for_algorithm(parsed).map(|scheme| (parsed, scheme)));
        let Some((alg, scheme)) = scheme else {
            return Err(VerifyError::UnsupportedAlgorithm(alg));
        };

        let data = jsonwebtoken::decode::<IdentityClaims>(
            token,
            self.key_for(scheme),
            &self.validation_for(alg),
        )?;

        into_identity(data.claims)
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

// header の alg を文字列のまま読む ("none" など Algorithm に無い値も理由として返すため)
fn header_alg(token: &str) -> Result<String, VerifyError> {
    let (encoded, _) = token.split_once('.').ok_or(VerifyError::Malformed)?;
    let raw = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|_| VerifyError::Malformed)?;
    let header: RawHeader = serde_json::from_slice(&raw).map_err(|_| VerifyError::Malformed)?;
    Ok(header.alg)
}

fn into_identity(claims: IdentityClaims) -> Result<Identity, VerifyError> {
    if claims.sub.trim().is_empty() {
        return Err(VerifyError::MissingClaim("sub".into()));
    }
    if claims.exp == 0 {
        return Err(VerifyError::MissingClaim("exp".into()));
    }

    let expires_at = i64::try_from(claims.exp)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .ok_or_else(|| VerifyError::InvalidClaims("exp out of range".into()))?;

    Ok(Identity {
        subject: claims.sub,
        class: claims.class,
        username: claims.username,
        customer: claims.customer,
        organization: claims.org,
        groups: claims.groups,
        expires_at,
    })
}
