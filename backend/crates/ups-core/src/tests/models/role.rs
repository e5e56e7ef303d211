use crate::{Role, roles_from_tags, roles_to_tags};

use std::collections::BTreeSet;
use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::User.as_str(), "USER");
    assert_eq!(Role::Manager.as_str(), "MANAGER");
    assert_eq!(Role::Admin.as_str(), "ADMIN");
}

#[test]
fn test_role_from_str() {
    assert_eq!(Role::from_str("ADMIN").unwrap(), Role::Admin);
    assert!(Role::from_str("admin").is_err());
    assert!(Role::from_str("ROOT").is_err());
}

#[test]
fn test_roles_from_tags_collapses_duplicates() {
    let roles = roles_from_tags(["USER", "ADMIN", "USER"]).unwrap();

    assert_eq!(roles, BTreeSet::from([Role::User, Role::Admin]));
}

#[test]
fn test_roles_from_tags_rejects_unknown_tag() {
    assert!(roles_from_tags(vec!["USER".to_string(), "GUEST".to_string()]).is_err());
}

#[test]
fn test_roles_to_tags_is_ordered() {
    let roles = BTreeSet::from([Role::Admin, Role::User]);

    assert_eq!(roles_to_tags(&roles), vec!["USER", "ADMIN"]);
}
