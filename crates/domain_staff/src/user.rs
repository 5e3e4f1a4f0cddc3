//! User accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::UserId;

use crate::error::StaffError;
use crate::password::{hash_password, verify_password};

/// Staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Administrator,
    Manager,
    Receptionist,
    Staff,
}

/// A staff member's account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,
    /// Login name, unique across accounts
    pub username: String,
    /// Contact email, unique across accounts
    pub email: String,
    /// Hex-encoded password hash
    pub password_hash: String,
    /// Hex-encoded salt used for the hash
    pub password_salt: String,
    /// Display name
    pub full_name: String,
    /// Role driving the capability set
    pub role: UserRole,
    /// Deactivated accounts cannot log in
    pub is_active: bool,
    /// Most recent successful login
    pub last_login: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates an active account with a freshly hashed password
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: &str,
        full_name: impl Into<String>,
        role: UserRole,
    ) -> Result<Self, StaffError> {
        let username = username.into();
        let email = email.into();
        let full_name = full_name.into();

        if username.trim().is_empty() {
            return Err(StaffError::Validation(
                "Username must not be empty".to_string(),
            ));
        }
        if !email.contains('@') || !email.contains('.') {
            return Err(StaffError::Validation(format!(
                "Invalid email address: {email}"
            )));
        }
        if password.len() < 8 {
            return Err(StaffError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }
        if full_name.trim().is_empty() {
            return Err(StaffError::Validation(
                "Full name must not be empty".to_string(),
            ));
        }

        let (password_hash, password_salt) = hash_password(password);
        let now = Utc::now();
        Ok(Self {
            id: UserId::new_v7(),
            username,
            email,
            password_hash,
            password_salt,
            full_name,
            role,
            is_active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Verifies login credentials
    ///
    /// A wrong password and an unknown user produce the same error at the
    /// service layer; an inactive account is reported distinctly so the
    /// front desk can escalate.
    pub fn authenticate(&mut self, password: &str, now: DateTime<Utc>) -> Result<(), StaffError> {
        if !self.is_active {
            return Err(StaffError::InactiveAccount(self.username.clone()));
        }
        if !verify_password(password, &self.password_hash, &self.password_salt) {
            tracing::warn!(username = %self.username, "failed login attempt");
            return Err(StaffError::AuthenticationFailed);
        }
        self.last_login = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Replaces the password, re-salting
    pub fn change_password(&mut self, new_password: &str) -> Result<(), StaffError> {
        if new_password.len() < 8 {
            return Err(StaffError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }
        let (hash, salt) = hash_password(new_password);
        self.password_hash = hash;
        self.password_salt = salt;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Deactivates the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Reactivates the account
    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(
            "frontdesk1",
            "desk@hotel.example",
            "correct horse",
            "Front Desk",
            UserRole::Receptionist,
        )
        .unwrap()
    }

    #[test]
    fn test_authenticate_updates_last_login() {
        let mut u = user();
        assert!(u.last_login.is_none());

        let now = Utc::now();
        u.authenticate("correct horse", now).unwrap();
        assert_eq!(u.last_login, Some(now));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let mut u = user();
        let result = u.authenticate("wrong horse", Utc::now());
        assert!(matches!(result, Err(StaffError::AuthenticationFailed)));
        assert!(u.last_login.is_none());
    }

    #[test]
    fn test_inactive_account_cannot_log_in() {
        let mut u = user();
        u.deactivate();
        let result = u.authenticate("correct horse", Utc::now());
        assert!(matches!(result, Err(StaffError::InactiveAccount(_))));

        u.activate();
        assert!(u.authenticate("correct horse", Utc::now()).is_ok());
    }

    #[test]
    fn test_change_password_invalidates_old() {
        let mut u = user();
        u.change_password("new password").unwrap();

        assert!(u.authenticate("correct horse", Utc::now()).is_err());
        assert!(u.authenticate("new password", Utc::now()).is_ok());
    }

    #[test]
    fn test_short_password_rejected() {
        let result = User::new(
            "u",
            "u@hotel.example",
            "short",
            "U",
            UserRole::Staff,
        );
        assert!(matches!(result, Err(StaffError::Validation(_))));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let result = User::new(
            "u",
            "not-an-email",
            "long enough",
            "U",
            UserRole::Staff,
        );
        assert!(matches!(result, Err(StaffError::Validation(_))));
    }
}
