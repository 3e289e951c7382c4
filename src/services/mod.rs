/*
 * Responsibility
 * - HTTP に依存しないドメインロジック (token 検証など)
 */
pub mod auth;
