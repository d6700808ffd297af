/**
 * Authentication Module
 *
 * Login and signup forms, their local validation, and the flows that talk
 * to the API and record the session.
 */

use thiserror::Error;

use crate::egui_app::api::{ApiClient, ApiError};
use crate::egui_app::routes::{home_for, Route};
use crate::egui_app::session::SessionError;
use crate::shared::error::{require, validate_email};
use crate::shared::models::{SignupRequest, SignupResponse};
use crate::shared::syllabus::classes;
use crate::shared::{Role, SharedError, UserProfile};

/// Minimum password length accepted by the signup form
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("could not save session: {0}")]
    Session(#[from] SessionError),
}

/// Status line shared by the login and signup pages
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub error: Option<String>,
    pub notice: Option<String>,
    pub loading: bool,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.notice = None;
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
        self.error = None;
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), SharedError> {
        require("Email", &self.email)?;
        require("Password", &self.password)
    }
}

#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
    pub student_class: String,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            role: Role::Student,
            student_class: classes().into_iter().next().unwrap_or_default(),
        }
    }
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), SharedError> {
        require("Name", &self.name)?;
        validate_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SharedError::validation(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        if self.password != self.confirm_password {
            return Err(SharedError::validation("confirm_password", "Passwords do not match"));
        }
        if self.role == Role::Student {
            require("Class", &self.student_class)?;
        }
        Ok(())
    }

    /// Only students carry a class.
    pub fn to_request(&self) -> SignupRequest {
        SignupRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
            student_class: (self.role == Role::Student).then(|| self.student_class.clone()),
        }
    }
}

/// Log in and record the session. Returns the route to show next.
pub async fn login(api: ApiClient, email: String, password: String) -> Result<(UserProfile, Route), AuthError> {
    let (token, user) = api.login(email.trim(), &password).await?;
    api.session().set_session(&token, &user)?;
    let next = home_for(user.role);
    Ok((user, next))
}

pub async fn signup(api: ApiClient, request: SignupRequest) -> Result<SignupResponse, AuthError> {
    let response = api.signup(&request).await?;
    tracing::info!(target: "revisewise::auth", user_id = ?response.user_id, role = %request.role, "account created");
    Ok(response)
}

/// Inline message for a failed login.
pub fn describe_login_error(err: &AuthError) -> String {
    match err {
        AuthError::Api(ApiError::Timeout) => {
            "Connection timeout. Please check your internet connection.".to_string()
        }
        AuthError::Api(ApiError::Network(_)) => {
            "Cannot connect to server. Please ensure the server is running.".to_string()
        }
        AuthError::Api(api) => match api.server_message() {
            Some(message) => message.to_string(),
            None if api.status().is_some() => "Login failed".to_string(),
            None => "Login failed. Please check your credentials.".to_string(),
        },
        AuthError::Session(_) => "Logged in, but the session could not be saved.".to_string(),
    }
}

pub fn describe_signup_error(err: &AuthError) -> String {
    match err {
        AuthError::Api(api) => match api.server_message() {
            Some(message) => format!("Signup failed: {}", message),
            None => "Signup failed. Try another email.".to_string(),
        },
        AuthError::Session(e) => e.to_string(),
    }
}
