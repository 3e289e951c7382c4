/*
 * Responsibility
 * - URL 構造を定義
 * - gate が必要な範囲 (= /health 以外すべて) をここで決める
 */
use axum::{Router, routing::get};

use crate::api::handlers::{
    health::health,
    whoami::{not_implemented, whoami},
};
use crate::middleware::auth::gate;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/whoami", get(whoami))
        .fallback(not_implemented);

    // layer の後に足した route には gate が掛からない
    gate::apply(protected, state).route("/health", get(health))
}
