//! Users API port and its reqwest adapter.
//!
//! The adapter owns transport details only: URL construction, status
//! handling and JSON decoding. Callers decide what a failure means to the
//! person using the dashboard.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::model::{User, UserPayload};

/// Failures talking to the users API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {message}")]
    Transport {
        /// Underlying transport error.
        message: String,
    },
    /// The server answered with a non-success status.
    #[error("server responded with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The server's message, or a preview of the body.
        message: String,
    },
    /// The response body did not have the expected shape.
    #[error("invalid response body: {message}")]
    Decode {
        /// Decoder error.
        message: String,
    },
}

impl ApiError {
    /// Build a [`ApiError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a [`ApiError::Status`].
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Build a [`ApiError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for the four user operations the dashboard performs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Fetch every user in creation order.
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// Create a user.
    async fn create_user(&self, payload: &UserPayload) -> Result<User, ApiError>;

    /// Replace the editable fields of user `id`.
    async fn update_user(&self, id: &str, payload: &UserPayload) -> Result<User, ApiError>;

    /// Delete user `id`.
    async fn delete_user(&self, id: &str) -> Result<(), ApiError>;
}

/// Users API adapter over HTTP.
pub struct HttpUsersApi {
    client: Client,
    users_url: Url,
}

impl HttpUsersApi {
    /// Build an adapter for the collection at `users_url`, for example
    /// `http://localhost:5000/api/users`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(users_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, users_url })
    }

    fn user_url(&self, id: &str) -> Result<Url, ApiError> {
        user_url(&self.users_url, id)
    }
}

fn user_url(users_url: &Url, id: &str) -> Result<Url, ApiError> {
    let mut url = users_url.clone();
    url.path_segments_mut()
        .map_err(|()| ApiError::transport(format!("{users_url} cannot carry a path")))?
        .pop_if_empty()
        .push(id);
    Ok(url)
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let response = self
            .client
            .get(self.users_url.clone())
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_response(response).await
    }

    async fn create_user(&self, payload: &UserPayload) -> Result<User, ApiError> {
        let response = self
            .client
            .post(self.users_url.clone())
            .json(payload)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_response(response).await
    }

    async fn update_user(&self, id: &str, payload: &UserPayload) -> Result<User, ApiError> {
        let response = self
            .client
            .put(self.user_url(id)?)
            .json(payload)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_response(response).await
    }

    async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.user_url(id)?)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }
}

async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    decode_body(body.as_ref())
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|error| ApiError::decode(error.to_string()))
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    ApiError::transport(error.to_string())
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .map(|decoded| decoded.message)
        .unwrap_or_else(|_| body_preview(body));
    let message = if message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_owned()
    } else {
        message
    };
    ApiError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
