//! Domain types for the capability-scoped authorization core.
//!
//! Many-to-many relations (capability ↔ group, application ↔ capability,
//! user ↔ group) are expressed as explicit id vectors resolved through the
//! storage traits, not as object graphs.

pub mod application;
pub mod capability;
pub mod token;
pub mod user;

pub use application::{Application, GrantType};
pub use capability::{Capability, ProtectedRule};
pub use token::AccessToken;
pub use user::{Group, User};
