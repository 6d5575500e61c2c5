//! Storage traits for authentication and authorization data.
//!
//! This module defines storage interfaces for:
//!
//! - Capability definitions (read-only at serving time)
//! - Application registrations
//! - Users and groups
//! - Access tokens
//! - Authorization code sessions
//!
//! # Implementations
//!
//! Storage implementations are provided in separate crates:
//!
//! - `capscope-memory` - in-memory backend used by tests and the dev server

pub mod application;
pub mod capability;
pub mod session;
pub mod token;
pub mod user;

pub use application::ApplicationStore;
pub use capability::CapabilityStore;
pub use session::{AuthorizationSession, SessionStore};
pub use token::TokenStore;
pub use user::UserStore;
