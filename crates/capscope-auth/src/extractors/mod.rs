//! Axum extractors for caller authentication.

pub mod basic_auth;
pub mod bearer;
pub mod sls_auth;

pub use basic_auth::BasicClientAuth;
pub use bearer::BearerToken;
pub use sls_auth::SlsAuth;
