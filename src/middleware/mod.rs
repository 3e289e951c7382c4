/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: Basic auth → token 検証 → identity class policy (access gate)
 * - http: request id / trace / body limit / timeout
 */
pub mod auth;
pub mod http;
