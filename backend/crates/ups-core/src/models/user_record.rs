//! User account as persisted by the store.

use crate::{Address, Role};

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account. The email is unique across records and doubles as the
/// identity an authenticated caller presents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    /// One-way digest, never the plaintext
    pub password: String,
    /// Public URL of the uploaded profile picture
    pub profile_picture: Option<String>,
    pub mfa_enabled: bool,
    pub account_locked: bool,
    pub enabled: bool,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub address: Option<Address>,
    pub roles: BTreeSet<Role>,
}

impl UserRecord {
    /// Create an enabled, unlocked account holding the `USER` role.
    /// The id is assigned by the store on insert.
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: 0,
            first_name: None,
            last_name: None,
            email,
            password: password_hash,
            profile_picture: None,
            mfa_enabled: false,
            account_locked: false,
            enabled: true,
            phone_number: None,
            created_at: Utc::now(),
            address: None,
            roles: BTreeSet::from([Role::User]),
        }
    }

    /// Whether `caller_email` identifies the owner of this record
    pub fn is_owned_by(&self, caller_email: &str) -> bool {
        self.email == caller_email
    }
}
