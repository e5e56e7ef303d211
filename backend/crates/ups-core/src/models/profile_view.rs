//! Public projection of a user record.
//!
//! The same shape doubles as the update request body, which is why
//! `password` can be deserialized. It is never serialized.

use crate::{Role, UserRecord};

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileView {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub mfa_enabled: bool,
    pub account_locked: bool,
    pub enabled: bool,
    pub phone_number: Option<String>,
    pub created_date_time: Option<DateTime<Utc>>,
    pub roles: BTreeSet<Role>,
}

impl ProfileView {
    /// Project a record to its public view.
    ///
    /// Address parts flatten to strings; a record without an address yields
    /// no address fields at all. The password is never carried over.
    pub fn from_record(record: &UserRecord) -> Self {
        let address = record.address.as_ref();

        Self {
            id: Some(record.id.to_string()),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            profile_picture: record.profile_picture.clone(),
            street: address.and_then(|a| a.street_name.clone()),
            city: address.and_then(|a| a.city_name.clone()),
            zip_code: address.and_then(|a| a.zipcode).map(|zip| zip.to_string()),
            state: address.and_then(|a| a.state).map(|state| state.to_string()),
            country: address.and_then(|a| a.country.clone()),
            email: Some(record.email.clone()),
            password: None,
            mfa_enabled: record.mfa_enabled,
            account_locked: record.account_locked,
            enabled: record.enabled,
            phone_number: record.phone_number.clone(),
            created_date_time: Some(record.created_at),
            roles: record.roles.clone(),
        }
    }

    /// Whether any address field was supplied
    pub fn has_address_fields(&self) -> bool {
        self.street.is_some()
            || self.city.is_some()
            || self.zip_code.is_some()
            || self.state.is_some()
            || self.country.is_some()
    }
}

impl From<&UserRecord> for ProfileView {
    fn from(record: &UserRecord) -> Self {
        Self::from_record(record)
    }
}
