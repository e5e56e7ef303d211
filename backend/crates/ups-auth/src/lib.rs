pub mod caller_identity;
pub mod claims;
pub mod error;
pub mod jwt_algorithm;
pub mod jwt_validator;
pub mod password_hasher;

pub use caller_identity::CallerIdentity;
pub use claims::Claims;
pub use error::{AuthError, Result};
pub use jwt_algorithm::JwtAlgorithm;
pub use jwt_validator::JwtValidator;
pub use password_hasher::{Argon2Hasher, PasswordHasher};
