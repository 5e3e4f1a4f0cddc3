//! User repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::UserId;
use domain_staff::{User, UserRole};

use crate::error::DatabaseError;

/// Repository for staff accounts
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    password_salt: String,
    full_name: String,
    role: String,
    is_active: bool,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn role_to_db(role: UserRole) -> &'static str {
    match role {
        UserRole::Administrator => "administrator",
        UserRole::Manager => "manager",
        UserRole::Receptionist => "receptionist",
        UserRole::Staff => "staff",
    }
}

fn role_from_db(role: &str) -> Result<UserRole, DatabaseError> {
    match role {
        "administrator" => Ok(UserRole::Administrator),
        "manager" => Ok(UserRole::Manager),
        "receptionist" => Ok(UserRole::Receptionist),
        "staff" => Ok(UserRole::Staff),
        other => Err(DatabaseError::CorruptRow(format!(
            "unknown user role '{other}'"
        ))),
    }
}

impl TryFrom<UserRow> for User {
    type Error = DatabaseError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::from_uuid(row.user_id),
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            password_salt: row.password_salt,
            full_name: row.full_name,
            role: role_from_db(&row.role)?,
            is_active: row.is_active,
            last_login: row.last_login,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "user_id, username, email, password_hash, password_salt, \
     full_name, role, is_active, last_login, created_at, updated_at";

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a user by their identifier
    pub async fn get_by_id(&self, user_id: UserId) -> Result<User, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("User", user_id))?;

        row.try_into()
    }

    /// Retrieves a user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Returns true if a username is already registered
    pub async fn username_exists(&self, username: &str) -> Result<bool, DatabaseError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Returns true if an email is already registered
    pub async fn email_exists(&self, email: &str) -> Result<bool, DatabaseError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Retrieves all users
    pub async fn list(&self) -> Result<Vec<User>, DatabaseError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY username"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    /// Inserts a new user
    ///
    /// Duplicate usernames and emails surface as `DuplicateEntry` from the
    /// unique constraints.
    pub async fn create(&self, user: &User) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO users (user_id, username, email, password_hash, password_salt, \
             full_name, role, is_active, last_login, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.password_salt)
        .bind(&user.full_name)
        .bind(role_to_db(user.role))
        .bind(user.is_active)
        .bind(user.last_login)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Persists a user's mutable state
    pub async fn update(&self, user: &User) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE users SET email = $2, password_hash = $3, password_salt = $4, \
             full_name = $5, role = $6, is_active = $7, last_login = $8, updated_at = $9 \
             WHERE user_id = $1",
        )
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.password_salt)
        .bind(&user.full_name)
        .bind(role_to_db(user.role))
        .bind(user.is_active)
        .bind(user.last_login)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("User", user.id));
        }
        Ok(())
    }
}
