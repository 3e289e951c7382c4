#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use git_gate::api::extractors::CurrentIdentity;
use git_gate::config::{AppEnv, Config};
use git_gate::middleware::auth::gate;
use git_gate::services::auth::{Identity, IdentityClass, TokenVerifier, VerifyError};
use git_gate::state::AppState;
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};

pub const SECRET: &str = "platform-client-secret";
pub const PUBLIC_PEM: &str = include_str!("../fixtures/platform_rsa_public.pem");
pub const PRIVATE_PEM: &str = include_str!("../fixtures/platform_rsa_private.pem");
pub const FOREIGN_PEM: &str = include_str!("../fixtures/foreign_rsa_private.pem");

pub const REGULAR_TOKEN: &str = "regular-token";
pub const SYSTEM_TOKEN: &str = "system-token";

/// Verifier stub: two fixed tokens, everything else has a bad signature.
pub struct StubVerifier;

impl TokenVerifier for StubVerifier {
    fn verify(&self, token: &str) -> Result<Identity, VerifyError> {
        let class = match token {
            REGULAR_TOKEN => IdentityClass::Regular,
            SYSTEM_TOKEN => IdentityClass::System,
            _ => return Err(VerifyError::InvalidSignature),
        };
        Ok(Identity {
            subject: token.to_string(),
            class,
            username: "alice".into(),
            customer: "acme".into(),
            organization: "koli".into(),
            groups: vec!["koli".into()],
            expires_at: DateTime::<Utc>::from_timestamp(4_102_444_800, 0).unwrap(),
        })
    }
}

/// A router whose only handler counts how often it ran.
pub struct Probe {
    pub app: Router,
    pub hits: Arc<AtomicUsize>,
}

impl Probe {
    pub fn with_verifier(verifier: Arc<dyn TokenVerifier>) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = AppState::new(verifier);

        let counter = hits.clone();
        let downstream = Router::new().fallback(move |CurrentIdentity(identity): CurrentIdentity| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                identity.subject
            }
        });

        let app = gate::apply(downstream, state.clone()).with_state(state);
        Self { app, hits }
    }

    pub fn stub() -> Self {
        Self::with_verifier(Arc::new(StubVerifier))
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub fn test_config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        platform_client_secret: SECRET.to_string(),
        platform_public_key_pem: PUBLIC_PEM.to_string(),
        auth_issuer: None,
        access_token_leeway_seconds: 0,
        request_timeout: Duration::from_secs(5),
        request_body_limit_bytes: 1024 * 1024,
    }
}

pub fn basic(token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("git:{token}")))
}

pub fn request(method: Method, path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, basic(token));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn claims(class: &str) -> Value {
    json!({
        "sub": "user-1",
        "exp": Utc::now().timestamp() + 3600,
        "type": class,
        "username": "alice",
        "customer": "acme",
        "org": "koli",
        "groups": ["koli"]
    })
}

pub fn hs256(secret: &str, claims: &Value) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn rs256(private_pem: &str, claims: &Value) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::RS256),
        claims,
        &EncodingKey::from_rsa_pem(private_pem.as_bytes()).unwrap(),
    )
    .unwrap()
}
