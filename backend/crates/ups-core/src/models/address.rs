use crate::UsState;

use serde::{Deserialize, Serialize};

/// Postal address linked to a user. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street_name: Option<String>,
    pub city_name: Option<String>,
    pub zipcode: Option<i32>,
    pub state: Option<UsState>,
    pub country: Option<String>,
}
