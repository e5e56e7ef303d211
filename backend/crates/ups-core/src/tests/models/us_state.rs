use crate::UsState;

use std::str::FromStr;

#[test]
fn test_us_state_round_trips_every_code() {
    for state in UsState::ALL {
        assert_eq!(UsState::from_str(state.as_str()).unwrap(), state);
    }
}

#[test]
fn test_us_state_from_str_ignores_case_and_whitespace() {
    assert_eq!(UsState::from_str(" ny ").unwrap(), UsState::NewYork);
}

#[test]
fn test_us_state_from_str_rejects_unknown_code() {
    assert!(UsState::from_str("ZZ").is_err());
    assert!(UsState::from_str("").is_err());
}

#[test]
fn test_us_state_serializes_as_code() {
    let json = serde_json::to_string(&UsState::DistrictOfColumbia).unwrap();
    assert_eq!(json, "\"DC\"");

    let parsed: UsState = serde_json::from_str("\"tx\"").unwrap();
    assert_eq!(parsed, UsState::Texas);
}
