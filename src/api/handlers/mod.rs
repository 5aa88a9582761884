//! API handlers and shared validation helpers.

pub mod health;
pub mod users;

pub(crate) use crate::email::valid_email;

/// Trim and lowercase an email before any comparison or storage.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
