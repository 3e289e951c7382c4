/*
 * Responsibility
 * - gate が返す GateError 定義と IntoResponse (status / challenge header / text body)
 * - 起動処理の AppError (config / key material / io)
 */
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::config::ConfigError;
use crate::services::auth::{VerifierInitError, VerifyError};

/// Terminal outcomes of the access gate. Each maps to exactly one response.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("token null")]
    MissingCredential,

    #[error(transparent)]
    InvalidCredential(#[from] VerifyError),

    #[error("Not allowed to access the resource")]
    PolicyDenied,
}

impl GateError {
    pub fn status(&self) -> StatusCode {
        match self {
            GateError::MissingCredential | GateError::InvalidCredential(_) => {
                StatusCode::UNAUTHORIZED
            }
            GateError::PolicyDenied => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let status = self.status();

        // 401 の理由 (verifier のメッセージ) は返すが、403 は固定文言のみ
        let body = match &self {
            GateError::MissingCredential | GateError::InvalidCredential(_) => {
                format!("Authentication required ({self})\n")
            }
            GateError::PolicyDenied => format!("Access Denied! {self}\n"),
        };

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
        }
        response
    }
}

/// Errors that stop the process from starting or serving.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Verifier(#[from] VerifierInitError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
