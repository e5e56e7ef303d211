//! One-way password transform applied before a password is stored.

use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use argon2::Argon2;
use argon2::password_hash::{PasswordHasher as _, SaltString};
use error_location::ErrorLocation;
use rand::RngCore;

pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing digest
    fn hash(&self, password: &str) -> AuthErrorResult<String>;
}

/// Argon2id with default parameters and a random 16-byte salt per hash
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    #[track_caller]
    fn hash(&self, password: &str) -> AuthErrorResult<String> {
        let mut salt_bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut salt_bytes);

        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hashing {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hashing {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
