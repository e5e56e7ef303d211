use crate::{Address, ProfileView, Role, UsState, UserRecord};

fn record_with_address(address: Option<Address>) -> UserRecord {
    let mut record = UserRecord::new("jane@example.com".into(), "$argon2id$digest".into());
    record.id = 42;
    record.first_name = Some("Jane".into());
    record.last_name = Some("Doe".into());
    record.phone_number = Some("555-0100".into());
    record.roles.insert(Role::Admin);
    record.address = address;
    record
}

#[test]
fn test_from_record_flattens_address() {
    let record = record_with_address(Some(Address {
        street_name: Some("1 Main St".into()),
        city_name: Some("Springfield".into()),
        zipcode: Some(62701),
        state: Some(UsState::Illinois),
        country: Some("USA".into()),
    }));

    let view = ProfileView::from_record(&record);

    assert_eq!(view.id.as_deref(), Some("42"));
    assert_eq!(view.street.as_deref(), Some("1 Main St"));
    assert_eq!(view.city.as_deref(), Some("Springfield"));
    assert_eq!(view.zip_code.as_deref(), Some("62701"));
    assert_eq!(view.state.as_deref(), Some("IL"));
    assert_eq!(view.country.as_deref(), Some("USA"));
    assert!(view.roles.contains(&Role::Admin));
}

#[test]
fn test_from_record_without_address_has_no_address_fields() {
    let view = ProfileView::from_record(&record_with_address(None));

    assert!(!view.has_address_fields());
}

#[test]
fn test_from_record_never_carries_password() {
    let view = ProfileView::from_record(&record_with_address(None));

    assert!(view.password.is_none());
}

#[test]
fn test_serialized_view_omits_password_and_uses_camel_case() {
    let mut view = ProfileView::from_record(&record_with_address(None));
    view.password = Some("leaked".into());

    let json = serde_json::to_value(&view).unwrap();

    assert!(json.get("password").is_none());
    assert_eq!(json["firstName"], "Jane");
    assert_eq!(json["mfaEnabled"], false);
    assert_eq!(json["roles"], serde_json::json!(["USER", "ADMIN"]));
}

#[test]
fn test_update_body_deserializes_password_and_defaults() {
    let view: ProfileView = serde_json::from_str(
        r#"{"firstName":"A","lastName":"B","email":"a@b.com","password":"p"}"#,
    )
    .unwrap();

    assert_eq!(view.password.as_deref(), Some("p"));
    assert!(!view.account_locked);
    assert!(view.roles.is_empty());
}
