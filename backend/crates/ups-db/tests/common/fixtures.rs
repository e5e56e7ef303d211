use ups_core::{Address, Role, UsState, UserRecord};

/// Creates a test user with sensible defaults and no address
pub fn create_test_user(email: &str) -> UserRecord {
    let mut user = UserRecord::new(email.to_string(), "$argon2id$v=19$test".to_string());
    user.first_name = Some("Test".to_string());
    user.last_name = Some("User".to_string());
    user.phone_number = Some("555-0100".to_string());
    user
}

/// Creates a test user with a full address and an extra role
pub fn create_test_user_with_address(email: &str) -> UserRecord {
    let mut user = create_test_user(email);
    user.roles.insert(Role::Manager);
    user.address = Some(Address {
        street_name: Some("221B Baker St".to_string()),
        city_name: Some("Albany".to_string()),
        zipcode: Some(12207),
        state: Some(UsState::NewYork),
        country: Some("USA".to_string()),
    });
    user
}
