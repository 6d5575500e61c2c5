//! # capscope-memory
//!
//! In-memory storage backend for `capscope-auth`, used by tests and the dev
//! server. Each store is a `tokio::sync::RwLock` over a `HashMap`; record
//! creation beyond the storage traits (capability and group provisioning) is
//! exposed as inherent methods on the concrete types, mirroring the
//! administrative provisioning step of a production deployment.

pub mod application;
pub mod capability;
pub mod session;
pub mod token;
pub mod user;

use std::sync::Arc;

pub use application::MemoryApplicationStore;
pub use capability::MemoryCapabilityStore;
pub use session::MemorySessionStore;
pub use token::MemoryTokenStore;
pub use user::MemoryUserStore;

/// All in-memory stores bundled for convenient wiring.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    pub capabilities: Arc<MemoryCapabilityStore>,
    pub applications: Arc<MemoryApplicationStore>,
    pub users: Arc<MemoryUserStore>,
    pub tokens: Arc<MemoryTokenStore>,
    pub sessions: Arc<MemorySessionStore>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an [`capscope_auth::AuthState`] over this backend.
    #[must_use]
    pub fn auth_state(&self, config: capscope_auth::AuthConfig) -> capscope_auth::AuthState {
        capscope_auth::AuthState::new(
            self.capabilities.clone(),
            self.applications.clone(),
            self.users.clone(),
            self.tokens.clone(),
            self.sessions.clone(),
            config,
        )
    }
}
