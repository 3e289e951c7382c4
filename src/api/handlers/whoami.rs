/*
 * Responsibility
 * - GET /whoami: gate が解決した Identity をそのまま返す (token の確認用)
 * - 未実装 path の fallback (git protocol handler はここに mount される想定)
 */
use axum::{
    Json,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
};
use serde_json::json;

use crate::api::extractors::CurrentIdentity;

pub async fn whoami(CurrentIdentity(identity): CurrentIdentity) -> impl IntoResponse {
    Json(identity)
}

pub async fn not_implemented(
    CurrentIdentity(identity): CurrentIdentity,
    method: Method,
    uri: Uri,
) -> impl IntoResponse {
    tracing::debug!(subject = %identity.subject, %method, path = uri.path(), "no handler mounted");

    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({
            "error": {
                "code": "NOT_IMPLEMENTED",
                "message": format!("{} {} is not served here", method, uri.path()),
            }
        })),
    )
}
