//! JSON API client used by the form submit operations.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::validate::FormFields;

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Failures a submit operation can report back to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    Network(String),
    Timeout,
    /// Non-success response; `message` comes from the body's `error` field
    /// when present.
    Http {
        status: u16,
        message: String,
    },
    Parse(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(message) => write!(formatter, "network error: {message}"),
            Self::Timeout => write!(formatter, "request timed out"),
            Self::Http { status, message } => write!(formatter, "HTTP {status}: {message}"),
            Self::Parse(message) => write!(formatter, "malformed response: {message}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl ClientError {
    /// Message suitable for display next to the form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            Self::Timeout => "Request timed out. Please try again.".to_string(),
            Self::Network(_) | Self::Parse(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl CreateAccountRequest {
    #[must_use]
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            first_name: fields.first_name.clone(),
            last_name: fields.last_name.clone(),
            email: fields.email.clone(),
            password: fields.password.clone(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreatedAccount {
    pub id: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SignedInUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Deserialize, Debug)]
struct SignInEnvelope {
    user: SignedInUser,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against `base_url` (scheme and host, no trailing
    /// slash required).
    ///
    /// # Errors
    /// Returns `ClientError::Network` when the underlying client cannot be
    /// constructed.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(crate::api::APP_USER_AGENT)
            .build()
            .map_err(|err| ClientError::Network(err.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST /users
    ///
    /// # Errors
    /// `Http` for non-2xx responses, `Timeout`/`Network` for transport
    /// failures, `Parse` when a success body is not the expected shape.
    pub async fn create_account(
        &self,
        request: &CreateAccountRequest,
    ) -> Result<CreatedAccount, ClientError> {
        debug!("Creating account for {}", request.email);
        let response = self
            .http
            .post(format!("{}/users", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(map_request_error)?;

        decode_json(response).await
    }

    /// GET /users?email&password
    ///
    /// # Errors
    /// `Http` with status 401 when the credentials do not match, otherwise
    /// as for [`Self::create_account`].
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignedInUser, ClientError> {
        debug!("Signing in {email}");
        let response = self
            .http
            .get(format!("{}/users", self.base_url))
            .query(&[("email", email), ("password", password)])
            .send()
            .await
            .map_err(map_request_error)?;

        let envelope: SignInEnvelope = decode_json(response).await?;
        Ok(envelope.user)
    }
}

fn map_request_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Network(err.to_string())
    }
}

async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|err| ClientError::Parse(err.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Http {
        status: status.as_u16(),
        message: extract_error_message(&body),
    })
}

/// Pull the `error` field out of a JSON failure body, falling back to a
/// generic message for opaque bodies.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(ToString::to_string))
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_error_message_reads_error_field() {
        assert_eq!(
            extract_error_message(r#"{"ok":false,"error":"Invalid credentials"}"#),
            "Invalid credentials"
        );
    }

    #[test]
    fn extract_error_message_falls_back_for_opaque_bodies() {
        assert_eq!(extract_error_message("<html>bad gateway</html>"), GENERIC_FAILURE);
        assert_eq!(extract_error_message(r#"{"ok":false}"#), GENERIC_FAILURE);
        assert_eq!(extract_error_message(""), GENERIC_FAILURE);
    }

    #[test]
    fn user_messages_match_error_kind() {
        let http = ClientError::Http {
            status: 409,
            message: "Email already exists".to_string(),
        };
        assert_eq!(http.user_message(), "Email already exists");
        assert_eq!(
            ClientError::Timeout.user_message(),
            "Request timed out. Please try again."
        );
        assert_eq!(
            ClientError::Network("connection refused".to_string()).user_message(),
            GENERIC_FAILURE
        );
        assert_eq!(
            ClientError::Parse("bad json".to_string()).user_message(),
            GENERIC_FAILURE
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
