use crate::Claims;

/// Authenticated caller, threaded explicitly into every profile operation.
/// The email is the authorization key compared against record ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub email: String,
}

impl CallerIdentity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn from_claims(claims: Claims) -> Self {
        Self { email: claims.sub }
    }
}
