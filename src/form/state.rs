//! Submission state machine shared by the login and signup forms.
//!
//! A form moves `Idle -> Validating -> Submitting -> Succeeded | Failed`,
//! never skipping `Validating`. Input is frozen while a request is in
//! flight, and one submit call performs at most one network operation.

use std::future::Future;

use super::client::ClientError;
use super::validate::{validate, validate_field, Field, FieldErrors, FormFields, FormKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct FormState {
    kind: FormKind,
    fields: FormFields,
    errors: FieldErrors,
    submission: SubmissionState,
    show_password: bool,
    show_confirm_password: bool,
}

impl FormState {
    #[must_use]
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            fields: FormFields::default(),
            errors: FieldErrors::default(),
            submission: SubmissionState::default(),
            show_password: false,
            show_confirm_password: false,
        }
    }

    #[must_use]
    pub fn login() -> Self {
        Self::new(FormKind::Login)
    }

    #[must_use]
    pub fn signup() -> Self {
        Self::new(FormKind::Signup)
    }

    #[must_use]
    pub const fn kind(&self) -> FormKind {
        self.kind
    }

    #[must_use]
    pub const fn fields(&self) -> &FormFields {
        &self.fields
    }

    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub const fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionState::Submitting
    }

    #[must_use]
    pub const fn show_password(&self) -> bool {
        self.show_password
    }

    #[must_use]
    pub const fn show_confirm_password(&self) -> bool {
        self.show_confirm_password
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.set_text(Field::FirstName, value.into());
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        self.set_text(Field::LastName, value.into());
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.set_text(Field::Email, value.into());
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.set_text(Field::Password, value.into());
    }

    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        self.set_text(Field::ConfirmPassword, value.into());
    }

    pub fn set_accepted_terms(&mut self, accepted: bool) {
        if self.is_submitting() {
            return;
        }
        self.fields.accepted_terms = accepted;
        self.clear_if_satisfied(Field::AcceptedTerms);
    }

    pub fn toggle_show_password(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn toggle_show_confirm_password(&mut self) {
        self.show_confirm_password = !self.show_confirm_password;
    }

    fn set_text(&mut self, field: Field, value: String) {
        if self.is_submitting() {
            return;
        }
        match field {
            Field::FirstName => self.fields.first_name = value,
            Field::LastName => self.fields.last_name = value,
            Field::Email => self.fields.email = value,
            Field::Password => self.fields.password = value,
            Field::ConfirmPassword => self.fields.confirm_password = value,
            Field::AcceptedTerms => return,
        }
        self.clear_if_satisfied(field);
        // Editing either password field can satisfy or invalidate the match
        // rule; only the clear direction applies before the next submit.
        if matches!(field, Field::Password | Field::ConfirmPassword) {
            self.clear_if_satisfied(Field::ConfirmPassword);
        }
    }

    /// Eager error clearing: a displayed error disappears as soon as the
    /// field satisfies its rule, but new errors only appear on submit.
    fn clear_if_satisfied(&mut self, field: Field) {
        if self.errors.get(field).is_some()
            && validate_field(&self.fields, self.kind, field).is_none()
        {
            self.errors.clear(field);
        }
    }

    /// Validate, and if clean run `op` exactly once with a snapshot of the
    /// current fields.
    ///
    /// Returns `Some(value)` on success. Validation failures surface as
    /// field errors and leave the form `Idle` without calling `op`; a failed
    /// operation moves the form to `Failed` with a user-facing message and
    /// keeps the entered values. A successful signup clears the fields, a
    /// successful login keeps them.
    pub async fn submit<T, F, Fut>(&mut self, op: F) -> Option<T>
    where
        F: FnOnce(FormFields) -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        if self.is_submitting() {
            return None;
        }

        self.submission = SubmissionState::Validating;
        let errors = validate(&self.fields, self.kind);
        if !errors.is_empty() {
            self.errors = errors;
            self.submission = SubmissionState::Idle;
            return None;
        }
        self.errors = FieldErrors::default();

        self.submission = SubmissionState::Submitting;
        match op(self.fields.clone()).await {
            Ok(value) => {
                if self.kind == FormKind::Signup {
                    self.fields = FormFields::default();
                }
                self.submission = SubmissionState::Succeeded;
                Some(value)
            }
            Err(err) => {
                self.submission = SubmissionState::Failed(err.user_message());
                None
            }
        }
    }
}
