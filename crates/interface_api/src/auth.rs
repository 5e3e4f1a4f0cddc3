//! Authentication and authorization

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use domain_staff::{Capability, UserRole};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// The user's role
    pub role: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing capability: {0:?}")]
    MissingCapability(Capability),
}

/// Creates a new JWT token
pub fn create_token(
    user_id: &str,
    role: UserRole,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: user_id.to_string(),
        role: role_name(role).to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    Ok(token_data.claims)
}

/// Checks the capability the caller's role carries
///
/// An unknown role in the token grants nothing.
pub fn check_capability(claims: &Claims, capability: Capability) -> Result<(), AuthError> {
    let role = parse_role(&claims.role).ok_or(AuthError::InvalidToken)?;
    if role.can(capability) {
        Ok(())
    } else {
        Err(AuthError::MissingCapability(capability))
    }
}

pub(crate) fn role_name(role: UserRole) -> &'static str {
    match role {
        UserRole::Administrator => "administrator",
        UserRole::Manager => "manager",
        UserRole::Receptionist => "receptionist",
        UserRole::Staff => "staff",
    }
}

pub(crate) fn parse_role(role: &str) -> Option<UserRole> {
    match role {
        "administrator" => Some(UserRole::Administrator),
        "manager" => Some(UserRole::Manager),
        "receptionist" => Some(UserRole::Receptionist),
        "staff" => Some(UserRole::Staff),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let token = create_token("user-1", UserRole::Manager, "secret", 3600).unwrap();
        let claims = validate_token(&token, "secret").unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, "manager");
        assert!(check_capability(&claims, Capability::ManageBookings).is_ok());
        assert!(check_capability(&claims, Capability::ManageUsers).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("user-1", UserRole::Staff, "secret", 3600).unwrap();
        assert!(validate_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_unknown_role_grants_nothing() {
        let claims = Claims {
            sub: "user-1".to_string(),
            role: "superuser".to_string(),
            exp: 0,
            iat: 0,
        };
        assert!(check_capability(&claims, Capability::ManageBookings).is_err());
    }
}
