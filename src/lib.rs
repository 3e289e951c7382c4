//! Authentication and authorization gate for the platform's HTTP git service.
//!
//! Every protected request carries a platform token in the password slot of
//! HTTP Basic auth. The gate verifies it, stores the resolved
//! [`services::auth::Identity`] on the request, and applies the identity-class
//! policy before the downstream handler runs.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
