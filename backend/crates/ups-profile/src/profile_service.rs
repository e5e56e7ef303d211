//! Profile reads and updates, keyed by the caller's email.

use crate::{PROFILE_UPDATED_MESSAGE, ProfileError, Result as ProfileErrorResult};

use ups_auth::{CallerIdentity, PasswordHasher};
use ups_core::{ProfileView, UserRecord};
use ups_db::UserStore;

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, error, info, warn};

const USER_NOT_FOUND: &str = "User not found";
const VIEW_REFUSED: &str = "You are not authorized to view this profile";
const UPDATE_REFUSED: &str = "You are not authorized to update this profile";
const UPDATE_FAILURE_PREFIX: &str = "Update Failure : ";

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    /// Fetch the public view of a user. Only the owner may read it.
    pub async fn get_profile(
        &self,
        requested_id: i64,
        caller: &CallerIdentity,
    ) -> ProfileErrorResult<ProfileView> {
        let record = self.find_user(requested_id).await?;

        if !record.is_owned_by(&caller.email) {
            warn!(
                "{} attempted to view profile {} owned by someone else",
                caller.email, requested_id
            );
            return Err(ProfileError::Unauthorized {
                message: VIEW_REFUSED.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(ProfileView::from_record(&record))
    }

    /// Overwrite the mutable profile fields of the record matching the
    /// incoming email.
    ///
    /// Lookup and ownership both key off the email, so the email itself
    /// cannot change here. Address fields are ignored.
    pub async fn update_profile(
        &self,
        caller: &CallerIdentity,
        incoming: ProfileView,
    ) -> ProfileErrorResult<&'static str> {
        let email = incoming
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or_else(|| ProfileError::Validation {
                message: "email is required".to_string(),
                field: Some("email".to_string()),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let mut record = self
            .store
            .find_by_email(email)
            .await?
            .ok_or_else(|| ProfileError::NotFound {
                message: USER_NOT_FOUND.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if !record.is_owned_by(&caller.email) {
            warn!(
                "{} attempted to update profile {} owned by someone else",
                caller.email, record.id
            );
            return Err(ProfileError::Unauthorized {
                message: UPDATE_REFUSED.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let password = incoming
            .password
            .as_deref()
            .filter(|password| !password.is_empty())
            .ok_or_else(|| ProfileError::Validation {
                message: format!("{UPDATE_FAILURE_PREFIX}password is required"),
                field: Some("password".to_string()),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if incoming.has_address_fields() {
            debug!("Ignoring address fields in update of user {}", record.id);
        }

        let digest = self.hash_password(password.to_string()).await.map_err(|message| {
            error!("Password hashing failed for user {}: {}", record.id, message);
            ProfileError::UpdateFailed {
                message: format!("{UPDATE_FAILURE_PREFIX}{message}"),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        record.account_locked = incoming.account_locked;
        record.first_name = incoming.first_name;
        record.last_name = incoming.last_name;
        record.email = email.to_string();
        record.password = digest;
        record.mfa_enabled = incoming.mfa_enabled;

        self.store.save(&record).await.map_err(|e| {
            error!("Failed to persist profile update for user {}: {}", record.id, e);
            ProfileError::UpdateFailed {
                message: format!("{UPDATE_FAILURE_PREFIX}{}", e.client_message()),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        info!("Profile {} updated by {}", record.id, caller.email);

        Ok(PROFILE_UPDATED_MESSAGE)
    }

    pub async fn find_user(&self, id: i64) -> ProfileErrorResult<UserRecord> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProfileError::NotFound {
                message: USER_NOT_FOUND.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Point the user's picture at `url`. Other fields keep their stored
    /// values, so a concurrent update is never rolled back.
    pub async fn assign_profile_picture(
        &self,
        user_id: i64,
        url: &str,
    ) -> ProfileErrorResult<()> {
        Ok(self.store.set_profile_picture(user_id, url).await?)
    }

    /// Argon2 on the blocking pool, off the async workers
    async fn hash_password(&self, password: String) -> Result<String, String> {
        let hasher = Arc::clone(&self.hasher);

        match tokio::task::spawn_blocking(move || hasher.hash(&password)).await {
            Ok(Ok(digest)) => Ok(digest),
            Ok(Err(e)) => Err(e.client_message()),
            Err(e) => Err(format!("hashing task failed: {e}")),
        }
    }
}
