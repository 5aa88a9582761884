//! Pure validation rules for the login and signup forms.
//!
//! `validate` is deterministic and side-effect free: the same field values
//! always produce the same error set, and no rule performs I/O.

use crate::email::valid_email;

/// Selects which rule subset applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Signup,
}

/// Fields addressable by change events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
    AcceptedTerms,
}

/// Current form input. Mutated only through [`crate::form::FormState`]
/// change events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accepted_terms: bool,
}

/// Per-field error messages; `None` means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub terms: Option<String>,
}

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
            && self.terms.is_none()
    }

    pub(crate) fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::FirstName => self.first_name.as_deref(),
            Field::LastName => self.last_name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Password => self.password.as_deref(),
            Field::ConfirmPassword => self.confirm_password.as_deref(),
            Field::AcceptedTerms => self.terms.as_deref(),
        }
    }

    pub(crate) fn clear(&mut self, field: Field) {
        match field {
            Field::FirstName => self.first_name = None,
            Field::LastName => self.last_name = None,
            Field::Email => self.email = None,
            Field::Password => self.password = None,
            Field::ConfirmPassword => self.confirm_password = None,
            Field::AcceptedTerms => self.terms = None,
        }
    }
}

const MIN_LOGIN_PASSWORD_LENGTH: usize = 6;
const MIN_SIGNUP_PASSWORD_LENGTH: usize = 8;

/// Recompute the full error set for the given form kind.
#[must_use]
pub fn validate(fields: &FormFields, kind: FormKind) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if kind == FormKind::Signup {
        errors.first_name = check_first_name(fields);
        errors.last_name = check_last_name(fields);
    }

    errors.email = check_email(fields);
    errors.password = check_password(fields, kind);

    if kind == FormKind::Signup {
        errors.confirm_password = check_confirm_password(fields);
        errors.terms = check_terms(fields);
    }

    errors
}

/// Re-run the rule for a single field, used by the eager error-clear path.
pub(crate) fn validate_field(fields: &FormFields, kind: FormKind, field: Field) -> Option<String> {
    match field {
        Field::FirstName if kind == FormKind::Signup => check_first_name(fields),
        Field::LastName if kind == FormKind::Signup => check_last_name(fields),
        Field::Email => check_email(fields),
        Field::Password => check_password(fields, kind),
        Field::ConfirmPassword if kind == FormKind::Signup => check_confirm_password(fields),
        Field::AcceptedTerms if kind == FormKind::Signup => check_terms(fields),
        _ => None,
    }
}

fn check_first_name(fields: &FormFields) -> Option<String> {
    fields
        .first_name
        .trim()
        .is_empty()
        .then(|| "First name is required".to_string())
}

fn check_last_name(fields: &FormFields) -> Option<String> {
    fields
        .last_name
        .trim()
        .is_empty()
        .then(|| "Last name is required".to_string())
}

fn check_email(fields: &FormFields) -> Option<String> {
    let email = fields.email.trim();
    if email.is_empty() {
        return Some("Email is required".to_string());
    }
    if !valid_email(email) {
        return Some("Please enter a valid email address".to_string());
    }
    None
}

fn check_password(fields: &FormFields, kind: FormKind) -> Option<String> {
    let password = fields.password.as_str();
    if password.is_empty() {
        return Some("Password is required".to_string());
    }

    match kind {
        FormKind::Login => (password.chars().count() < MIN_LOGIN_PASSWORD_LENGTH).then(|| {
            format!("Password must be at least {MIN_LOGIN_PASSWORD_LENGTH} characters")
        }),
        FormKind::Signup => {
            if password.chars().count() < MIN_SIGNUP_PASSWORD_LENGTH {
                return Some(format!(
                    "Password must be at least {MIN_SIGNUP_PASSWORD_LENGTH} characters"
                ));
            }
            missing_character_classes(password)
        }
    }
}

/// Composite message naming exactly the character classes the password lacks.
fn missing_character_classes(password: &str) -> Option<String> {
    let mut missing = Vec::new();
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        missing.push("a lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        missing.push("an uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        missing.push("a digit");
    }

    let list = match missing.as_slice() {
        [] => return None,
        [only] => (*only).to_string(),
        [head @ .., tail] => format!("{} and {}", head.join(", "), tail),
    };
    Some(format!("Password must contain {list}"))
}

fn check_confirm_password(fields: &FormFields) -> Option<String> {
    if fields.confirm_password.is_empty() {
        return Some("Please confirm your password".to_string());
    }
    // Byte-for-byte comparison; trimming here would mask real mismatches.
    (fields.password != fields.confirm_password).then(|| "Passwords do not match".to_string())
}

fn check_terms(fields: &FormFields) -> Option<String> {
    (!fields.accepted_terms).then(|| "You must accept the terms".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_fields() -> FormFields {
        FormFields {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            password: "Abcd1234".to_string(),
            confirm_password: "Abcd1234".to_string(),
            accepted_terms: true,
        }
    }

    #[test]
    fn valid_signup_has_no_errors() {
        assert!(validate(&signup_fields(), FormKind::Signup).is_empty());
    }

    #[test]
    fn email_required_before_format() {
        let mut fields = signup_fields();
        fields.email = String::new();
        let errors = validate(&fields, FormKind::Signup);
        assert_eq!(errors.email.as_deref(), Some("Email is required"));
    }

    #[test]
    fn well_formed_emails_pass_and_malformed_fail() {
        let mut fields = signup_fields();
        for email in ["x@y.z", "name.surname@example.co", "a+b@mail.example.org"] {
            fields.email = email.to_string();
            assert!(
                validate(&fields, FormKind::Signup).email.is_none(),
                "{email} should be valid"
            );
        }
        for email in ["x.y.z", "x@yz", "x@y .z", "@y.z"] {
            fields.email = email.to_string();
            assert_eq!(
                validate(&fields, FormKind::Signup).email.as_deref(),
                Some("Please enter a valid email address"),
                "{email} should be invalid"
            );
        }
    }

    #[test]
    fn empty_password_is_required_for_both_kinds() {
        let mut fields = signup_fields();
        fields.password = String::new();
        for kind in [FormKind::Login, FormKind::Signup] {
            assert_eq!(
                validate(&fields, kind).password.as_deref(),
                Some("Password is required")
            );
        }
    }

    #[test]
    fn login_password_needs_six_characters() {
        let mut fields = FormFields {
            email: "ann@example.com".to_string(),
            password: "abc12".to_string(),
            ..FormFields::default()
        };
        assert_eq!(
            validate(&fields, FormKind::Login).password.as_deref(),
            Some("Password must be at least 6 characters")
        );
        fields.password = "abc123".to_string();
        assert!(validate(&fields, FormKind::Login).password.is_none());
    }

    #[test]
    fn signup_password_needs_eight_characters() {
        let mut fields = signup_fields();
        fields.password = "Abc1234".to_string();
        assert_eq!(
            validate(&fields, FormKind::Signup).password.as_deref(),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn signup_password_complexity_names_missing_classes() {
        let mut fields = signup_fields();

        fields.password = "abc12345".to_string();
        assert_eq!(
            validate(&fields, FormKind::Signup).password.as_deref(),
            Some("Password must contain an uppercase letter")
        );

        fields.password = "abcdefgh".to_string();
        assert_eq!(
            validate(&fields, FormKind::Signup).password.as_deref(),
            Some("Password must contain an uppercase letter and a digit")
        );

        fields.password = "!!!!!!!!".to_string();
        assert_eq!(
            validate(&fields, FormKind::Signup).password.as_deref(),
            Some("Password must contain a lowercase letter, an uppercase letter and a digit")
        );

        fields.password = "Abc12345".to_string();
        assert!(validate(&fields, FormKind::Signup).password.is_none());
    }

    #[test]
    fn confirm_password_detects_single_character_difference() {
        let mut fields = signup_fields();
        fields.confirm_password = "Abcd1235".to_string();
        assert_eq!(
            validate(&fields, FormKind::Signup)
                .confirm_password
                .as_deref(),
            Some("Passwords do not match")
        );

        fields.confirm_password = fields.password.clone();
        assert!(validate(&fields, FormKind::Signup)
            .confirm_password
            .is_none());
    }

    #[test]
    fn confirm_password_required() {
        let mut fields = signup_fields();
        fields.confirm_password = String::new();
        assert_eq!(
            validate(&fields, FormKind::Signup)
                .confirm_password
                .as_deref(),
            Some("Please confirm your password")
        );
    }

    #[test]
    fn names_required_after_trim() {
        let mut fields = signup_fields();
        fields.first_name = "  ".to_string();
        fields.last_name = "\t".to_string();
        let errors = validate(&fields, FormKind::Signup);
        assert_eq!(errors.first_name.as_deref(), Some("First name is required"));
        assert_eq!(errors.last_name.as_deref(), Some("Last name is required"));
    }

    #[test]
    fn terms_must_be_accepted() {
        let mut fields = signup_fields();
        fields.accepted_terms = false;
        assert_eq!(
            validate(&fields, FormKind::Signup).terms.as_deref(),
            Some("You must accept the terms")
        );
    }

    #[test]
    fn login_ignores_signup_only_rules() {
        let fields = FormFields {
            email: "ann@example.com".to_string(),
            password: "abc123".to_string(),
            ..FormFields::default()
        };
        assert!(validate(&fields, FormKind::Login).is_empty());
    }

    #[test]
    fn validate_is_deterministic() {
        let fields = signup_fields();
        assert_eq!(
            validate(&fields, FormKind::Signup),
            validate(&fields, FormKind::Signup)
        );
    }
}
