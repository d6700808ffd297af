//! Login, signup and logout flows end to end

use std::time::Duration;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use revisewise::egui_app::api::{ApiClient, ApiError};
use revisewise::egui_app::auth::{self, describe_login_error, AuthError, SignupForm};
use revisewise::egui_app::notifications::NotificationHub;
use revisewise::egui_app::routes::{resolve, Route};
use revisewise::egui_app::session::{SessionContext, SessionEvent};
use revisewise::egui_app::Config;
use revisewise::shared::{AppConfig, Role};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{login_body, stored_session, test_user, TestApi};
use crate::assert_ok;

async fn mount_login(ctx: &TestApi, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_partial_json(json!({ "email": "user7@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&ctx.server)
        .await;
}

#[tokio::test]
async fn test_login_stores_session_and_picks_home() {
    let ctx = TestApi::start().await;
    let user = test_user(7, Role::Teacher);
    mount_login(&ctx, login_body("jwt-123", &user)).await;
    let mut events = ctx.api.session().subscribe();

    let (profile, next) = assert_ok!(
        auth::login(ctx.api.clone(), "  user7@example.com ".to_string(), "secret".to_string()).await
    );

    assert_eq!(profile, user);
    assert_eq!(next, Route::TeacherDashboard);

    let session = ctx.api.session().get_session();
    assert!(session.is_logged_in);
    assert_eq!(session.token.as_deref(), Some("jwt-123"));
    assert_eq!(session.user, Some(user));
    assert_eq!(
        events.try_recv(),
        Ok(SessionEvent::Started {
            user_id: 7,
            role: Role::Teacher
        })
    );

    // The new session passes the role guard of the landing route
    assert_eq!(resolve(next.clone(), &session), next);
}

#[tokio::test]
async fn test_student_lands_on_dashboard() {
    let ctx = TestApi::start().await;
    mount_login(&ctx, login_body("jwt-456", &test_user(7, Role::Student))).await;

    let (profile, next) = assert_ok!(
        auth::login(ctx.api.clone(), "user7@example.com".to_string(), "secret".to_string()).await
    );

    assert_eq!(profile.student_class.as_deref(), Some("Class 6"));
    assert_eq!(next, Route::Dashboard);
}

#[tokio::test]
async fn test_login_without_token_creates_no_session() {
    let ctx = TestApi::start().await;
    mount_login(&ctx, json!({ "access_token": "", "user": test_user(7, Role::Admin) })).await;

    let err = auth::login(ctx.api.clone(), "user7@example.com".to_string(), "secret".to_string())
        .await
        .unwrap_err();

    assert_matches!(err, AuthError::Api(ApiError::Decode(_)));
    assert!(!ctx.api.session().get_session().is_logged_in);
}

#[tokio::test]
async fn test_login_uses_its_own_timeout() {
    let server = wiremock::MockServer::start().await;
    let config = Config::with_builder(
        AppConfig::builder()
            .server_url(server.uri())
            .request_timeout(Duration::from_secs(5))
            .login_timeout(Duration::from_millis(200)),
    )
    .expect("Failed to build test config");
    let api = ApiClient::new(config, SessionContext::in_memory(), NotificationHub::new())
        .expect("Failed to build test client");

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(login_body("jwt-slow", &test_user(7, Role::Student)))
                .set_delay(Duration::from_secs(1)),
        )
        .mount(&server)
        .await;

    let err = api.login("user7@example.com", "secret").await.unwrap_err();

    assert_eq!(err, ApiError::Timeout);
    assert!(!api.session().get_session().is_logged_in);
}

#[tokio::test]
async fn test_rejected_login_shows_server_message() {
    let ctx = TestApi::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })))
        .mount(&ctx.server)
        .await;

    let err = auth::login(ctx.api.clone(), "user7@example.com".to_string(), "wrong".to_string())
        .await
        .unwrap_err();

    assert_eq!(describe_login_error(&err), "Invalid credentials");
    assert_eq!(ctx.api.session().get_session().token, None);
}

#[tokio::test]
async fn test_signup_sends_class_for_students_only() {
    let ctx = TestApi::start().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .and(body_partial_json(json!({
            "name": "Asha",
            "role": "student",
            "student_class": "Class 4"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "created", "user_id": 12 })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let form = SignupForm {
        name: " Asha ".to_string(),
        email: "asha@example.com".to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret1".to_string(),
        role: Role::Student,
        student_class: "Class 4".to_string(),
    };
    assert_ok!(form.validate());

    let response = assert_ok!(auth::signup(ctx.api.clone(), form.to_request()).await);
    assert_eq!(response.user_id, 12);
    // Signing up does not log in
    assert!(!ctx.api.session().get_session().is_logged_in);
}

#[tokio::test]
async fn test_logout_clears_and_reguards() {
    let user = test_user(3, Role::Admin);
    let ctx = TestApi::with_session(stored_session(&user)).await;
    let sessions = ctx.api.session().clone();
    let mut events = sessions.subscribe();

    assert_eq!(resolve(Route::AdminDashboard, &sessions.get_session()), Route::AdminDashboard);

    assert_ok!(sessions.clear_session());

    assert_eq!(events.try_recv(), Ok(SessionEvent::Cleared));
    let session = sessions.get_session();
    assert_eq!(session.token, None);
    assert_eq!(session.user, None);
    assert_eq!(resolve(Route::AdminDashboard, &session), Route::Landing);
    assert_eq!(resolve(Route::Progress, &session), Route::Landing);
}
