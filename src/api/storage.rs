//! User persistence: creation and credential lookup over Postgres.
//!
//! Passwords are hashed with Argon2id before storage and verified here;
//! callers never see the stored hash. Email uniqueness is enforced by the
//! database index, so two concurrent creates for the same address resolve to
//! exactly one success and one [`RepositoryError::DuplicateEmail`].

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use sqlx::{PgPool, Row};
use std::fmt;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use super::handlers::normalize_email;

/// Typed failures surfaced to the endpoint layer.
#[derive(Debug)]
pub enum RepositoryError {
    /// A user with the same normalized email already exists.
    DuplicateEmail,
    /// Unknown email or wrong password; callers cannot tell which.
    NotFound,
    /// Password hashing or verification failed.
    Hash(String),
    Database(sqlx::Error),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateEmail => write!(formatter, "email already exists"),
            Self::NotFound => write!(formatter, "no user matches the supplied credentials"),
            Self::Hash(message) => write!(formatter, "password hashing failed: {message}"),
            Self::Database(err) => write!(formatter, "database error: {err}"),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Input for [`UserRepository::create_user`]. Names are trimmed and the email
/// normalized before the insert.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Persisted user minus the credential hash.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: String,
}

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    #[must_use]
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user and return its id.
    ///
    /// # Errors
    /// `DuplicateEmail` when the normalized email is already taken, `Hash`
    /// when hashing fails, `Database` otherwise.
    pub async fn create_user(&self, user: NewUser<'_>) -> Result<Uuid, RepositoryError> {
        let email = normalize_email(user.email);

        let password = user.password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|err| RepositoryError::Hash(err.to_string()))??;

        let query = "
            INSERT INTO users (first_name, last_name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id
        ";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(user.first_name.trim())
            .bind(user.last_name.trim())
            .bind(&email)
            .bind(&password_hash)
            .fetch_one(self.pool)
            .instrument(span)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    RepositoryError::DuplicateEmail
                } else {
                    RepositoryError::Database(err)
                }
            })?;

        Ok(row.get("id"))
    }

    /// Look up a user by email and verify the supplied password.
    ///
    /// # Errors
    /// `NotFound` for both an unknown email and a wrong password, so the
    /// outcome never leaks which one occurred.
    pub async fn find_user_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, RepositoryError> {
        let email = normalize_email(email);

        let query = r#"
            SELECT
                id,
                first_name,
                last_name,
                email,
                password_hash,
                to_char(created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
            FROM users
            WHERE email = $1
        "#;
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(&email)
            .fetch_optional(self.pool)
            .instrument(span)
            .await
            .map_err(RepositoryError::Database)?;

        let Some(row) = row else {
            return Err(RepositoryError::NotFound);
        };

        let stored_hash: String = row.get("password_hash");
        let candidate = password.to_string();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&candidate, &stored_hash))
                .await
                .map_err(|err| RepositoryError::Hash(err.to_string()))??;

        if !matches {
            return Err(RepositoryError::NotFound);
        }

        Ok(UserRecord {
            id: row.get("id"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            email: row.get("email"),
            created_at: row.get("created_at"),
        })
    }
}

fn hash_password(password: &str) -> Result<String, RepositoryError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| RepositoryError::Hash(err.to_string()))
}

/// Argon2 verification compares digests in constant time.
fn verify_password(password: &str, stored_hash: &str) -> Result<bool, RepositoryError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|err| RepositoryError::Hash(err.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(RepositoryError::Hash(err.to_string())),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}
