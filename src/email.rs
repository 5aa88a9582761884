//! Email format check shared by the form rules and the API handlers.

use regex::Regex;
use std::sync::LazyLock;

// user@host.tld with no whitespace; compiled once.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

pub(crate) fn valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
