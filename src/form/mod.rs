//! Client-side form core: validation rules, the submission state machine
//! shared by the login and signup forms, and the JSON API client they submit
//! through.

pub mod client;
pub mod state;
pub mod validate;

pub use client::{ApiClient, ClientError, CreateAccountRequest, CreatedAccount, SignedInUser};
pub use state::{FormState, SubmissionState};
pub use validate::{validate, Field, FieldErrors, FormFields, FormKind};
