/// Factory: build the platform `TokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{PlatformVerifier, TokenVerifier, VerifierInitError};

pub fn build_verifier(config: &Config) -> Result<Arc<dyn TokenVerifier>, VerifierInitError> {
    let verifier = PlatformVerifier::new(
        &config.platform_client_secret,
        &config.platform_public_key_pem,
        config.auth_issuer.clone(),
        config.access_token_leeway_seconds,
    )?;

    tracing::info!(?verifier, "platform token verifier ready");

    Ok(Arc::new(verifier))
}
