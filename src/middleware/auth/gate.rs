//! Access gate: Basic auth credential → token 検証 → Identity を extensions に入れる → policy
//!
//! 順序は固定 (verify → policy → next)。どこかで失敗したら GateError を 1 つ返して終了し、
//! 後続の handler は呼ばない。

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::GateError;
use crate::middleware::auth::{credentials, policy};
use crate::services::auth::token_fingerprint;
use crate::state::AppState;

/// 保護対象の Router に gate を掛ける。
///
/// 例：
/// ```ignore
/// let protected = api::protected_routes();
/// let protected = middleware::auth::gate::apply(protected, state.clone());
/// app = app.merge(protected);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, gate_middleware))
}

async fn gate_middleware(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, GateError> {
    // nest されていても元の path で判定する
    let path = original_uri.path();
    let method = req.method().clone();

    let Some(token) = credentials::basic_auth_password(req.headers()) else {
        tracing::info!(%method, path, "no basic auth credential");
        return Err(GateError::MissingCredential);
    };

    let identity = match state.verifier.verify(&token) {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!(
                error = %err,
                token_fp = %token_fingerprint(&token),
                %method,
                path,
                "token verification failed"
            );
            return Err(GateError::InvalidCredential(err));
        }
    };

    let class = identity.class;
    let subject = identity.subject.clone();

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(identity);

    if !policy::authorize(class, &method, path).is_allowed() {
        tracing::warn!(
            subject = %subject,
            ?class,
            %method,
            path,
            "access denied by identity class policy"
        );
        return Err(GateError::PolicyDenied);
    }

    tracing::debug!(subject = %subject, ?class, %method, path, "request authorized");

    Ok(next.run(req).await)
}
