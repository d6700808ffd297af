//! # API Client
//!
//! One shared HTTP client for every call to the revision API.
//!
//! ## Request interception
//!
//! Before a request leaves, the current session is read and
//! - `Authorization: Bearer <token>` is attached when a token exists,
//! - `X-User-ID: <id>` is attached when a decodable user record exists.
//!
//! A stored user that fails to decode is logged by the session store and
//! the request goes out without `X-User-ID`.
//!
//! ## Response interception
//!
//! Successful responses pass through untouched. Failures are classified,
//! never swallowed: a 403 whose `error` field mentions the student's class
//! becomes [`ApiError::ClassAccess`] and is also published once as a
//! [`Notification::ClassAccessDenied`]; everything else becomes
//! [`ApiError::Status`]. Nothing is retried.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use revisewise::egui_app::api::ApiClient;
//! use revisewise::egui_app::notifications::NotificationHub;
//! use revisewise::egui_app::session::SessionContext;
//! use revisewise::egui_app::Config;
//!
//! # async fn example() -> Result<(), revisewise::egui_app::api::ApiError> {
//! let api = ApiClient::new(Config::new(), SessionContext::in_memory(), NotificationHub::new())?;
//! let topics = api.topics(3).await?;
//! # Ok(())
//! # }
//! ```

pub mod endpoints;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::egui_app::config::Config;
use crate::egui_app::notifications::{Notification, NotificationHub};
use crate::egui_app::session::SessionContext;

/// Header carrying the logged-in user's id
pub const USER_ID_HEADER: &str = "X-User-ID";

// TODO: switch to a structured error code once the API exposes one for
// class-restricted content; today only the message text identifies it.
const CLASS_ACCESS_MARKER: &str = "class";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Connection timeout. Please check your internet connection.")]
    Timeout,

    #[error("Cannot connect to server: {0}")]
    Network(String),

    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Access Restricted: {message}")]
    ClassAccess { message: String },

    #[error("Invalid response from server: {0}")]
    Decode(String),

    #[error("Not logged in")]
    NotAuthenticated,
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::ClassAccess { .. } => Some(StatusCode::FORBIDDEN),
            _ => None,
        }
    }

    /// Message supplied by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            ApiError::ClassAccess { message } => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Error payload. The API uses `error` on most endpoints and `message` on
/// the auth endpoints.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Classify a failed response.
///
/// Only the `error` field is inspected for class-access denials, and only
/// for status 403.
pub fn classify_failure(status: StatusCode, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    if status == StatusCode::FORBIDDEN {
        if let Some(error) = parsed.error.as_deref() {
            if error.contains(CLASS_ACCESS_MARKER) {
                return ApiError::ClassAccess {
                    message: error.to_string(),
                };
            }
        }
    }

    let message = parsed.error.or(parsed.message).or_else(|| {
        let text = body.trim();
        (!text.is_empty() && !text.starts_with('{')).then(|| text.to_string())
    });
    ApiError::Status { status, message }
}

/// Shared HTTP client with credential injection and failure classification.
/// Clones share the connection pool, the session and the notification hub.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: Config,
    session: SessionContext,
    notifications: NotificationHub,
}

impl ApiClient {
    pub fn new(
        config: Config,
        session: SessionContext,
        notifications: NotificationHub,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(ApiError::from)?;

        Ok(Self {
            http,
            config,
            session,
            notifications,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn notifications(&self) -> &NotificationHub {
        &self.notifications
    }

    /// Start a request against `path` on the configured server. Credentials
    /// are added by [`ApiClient::send`], not here.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.config.api_url(path))
    }

    fn authorize(&self, mut builder: RequestBuilder) -> RequestBuilder {
        let session = self.session.get_session();

        if let Some(token) = &session.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(user) = &session.user {
            builder = builder.header(USER_ID_HEADER, user.id.to_string());
        }
        builder
    }

    /// Send through both interceptors.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authorize(builder).send().await.map_err(|e| {
            tracing::warn!(target: "revisewise::api", error = %e, "request failed");
            ApiError::from(e)
        })?;
        self.intercept(response).await
    }

    async fn intercept(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            tracing::debug!(target: "revisewise::api", url = %response.url(), %status, "ok");
            return Ok(response);
        }

        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();
        let error = classify_failure(status, &body);
        tracing::warn!(target: "revisewise::api", %url, %status, error = %error, "request rejected");

        if let ApiError::ClassAccess { message } = &error {
            self.notifications.publish(Notification::ClassAccessDenied {
                message: message.clone(),
            });
        }
        Err(error)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.send(self.request(Method::GET, path).query(query)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Self::decode(response).await
    }

    /// Send a write whose response body is not needed.
    pub(crate) async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(builder).await.map(|_| ())
    }
}
