pub mod factory;
pub mod fingerprint;
pub mod identity;
pub mod verifier;

pub use factory::build_verifier;
pub use fingerprint::token_fingerprint;
pub use identity::{Identity, IdentityClass};
pub use verifier::{PlatformVerifier, SigningScheme, TokenVerifier, VerifierInitError, VerifyError};
