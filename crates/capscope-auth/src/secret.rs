//! Client secret generation and verification.
//!
//! Secrets are random 256-bit values; storage uses Argon2id PHC hashes so a
//! leaked database does not leak usable credentials.
//!
//! # Example
//!
//! ```
//! use capscope_auth::secret::{generate_client_secret, hash_client_secret, verify_client_secret};
//!
//! let secret = generate_client_secret();
//! let hash = hash_client_secret(&secret).unwrap();
//! assert!(verify_client_secret(&secret, &hash));
//! ```

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rand::Rng;

/// Generates a new cryptographically secure client secret.
///
/// The secret is a 256-bit random value encoded as hexadecimal.
#[must_use]
pub fn generate_client_secret() -> String {
    let bytes: [u8; 32] = rand::thread_rng().r#gen();
    hex::encode(bytes)
}

/// Hashes a client secret for storage using Argon2id.
///
/// Returns a PHC-formatted hash string.
///
/// # Errors
///
/// Returns `argon2::password_hash::Error` if hashing fails (rare).
pub fn hash_client_secret(secret: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(secret.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verifies a client secret against a stored PHC hash.
///
/// Malformed hashes verify as `false` rather than erroring, so a corrupted
/// record degrades to an authentication failure.
#[must_use]
pub fn verify_client_secret(secret: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok()
}
