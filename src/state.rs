/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - verifier: 起動時に作った token verifier (読み取り専用で全リクエストから共有)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::TokenVerifier;

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }
}
