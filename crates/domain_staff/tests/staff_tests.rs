//! Staff account integration tests

use chrono::Utc;

use domain_staff::{Capability, StaffError, User, UserRole};

#[test]
fn login_flow_records_last_login() {
    let mut u = User::new(
        "manager1",
        "manager@hotel.example",
        "a decent password",
        "Night Manager",
        UserRole::Manager,
    )
    .unwrap();

    let first = Utc::now();
    u.authenticate("a decent password", first).unwrap();
    assert_eq!(u.last_login, Some(first));

    let second = Utc::now();
    u.authenticate("a decent password", second).unwrap();
    assert_eq!(u.last_login, Some(second));
}

#[test]
fn deactivation_blocks_login_before_password_check() {
    let mut u = User::new(
        "temp",
        "temp@hotel.example",
        "a decent password",
        "Temp",
        UserRole::Staff,
    )
    .unwrap();
    u.deactivate();

    // Even the correct password is refused for an inactive account
    let result = u.authenticate("a decent password", Utc::now());
    assert!(matches!(result, Err(StaffError::InactiveAccount(_))));
}

#[test]
fn capabilities_widen_with_seniority() {
    let staff = UserRole::Staff.capabilities();
    let receptionist = UserRole::Receptionist.capabilities();
    let manager = UserRole::Manager.capabilities();
    let admin = UserRole::Administrator.capabilities();

    assert!(staff.is_subset(&receptionist));
    assert!(receptionist.is_subset(&manager));
    assert!(manager.is_subset(&admin));
    assert!(admin.contains(&Capability::ManageUsers));
}

#[test]
fn stored_credentials_never_contain_the_password() {
    let u = User::new(
        "u1",
        "u1@hotel.example",
        "hunter2hunter2",
        "U One",
        UserRole::Staff,
    )
    .unwrap();

    assert!(!u.password_hash.contains("hunter2"));
    assert_ne!(u.password_hash, u.password_salt);
}
