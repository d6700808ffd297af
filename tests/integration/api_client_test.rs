//! HTTP client interceptors against a mock API

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use revisewise::egui_app::api::ApiError;
use revisewise::egui_app::notifications::Notification;
use revisewise::egui_app::session::SessionContext;
use revisewise::egui_app::storage::{KeyValueStore, TOKEN_KEY, USER_KEY};
use revisewise::shared::models::{QuizQuery, Subject};
use revisewise::shared::{QuestionType, Role};
use serde_json::json;
use tokio::sync::broadcast::error::TryRecvError;
use revisewise::shared::bulk::parse_questions;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{client_for, stored_session, test_user, TestApi, TEST_TOKEN};
use crate::{assert_contains, assert_no_header, assert_ok};

fn subjects_body() -> serde_json::Value {
    json!([
        { "id": 1, "name": "Mathematics", "class_name": "6" },
        { "id": 2, "name": "Science", "class_name": "6" }
    ])
}

#[tokio::test]
async fn test_credentials_are_attached() {
    let ctx = TestApi::with_session(stored_session(&test_user(42, Role::Student))).await;

    Mock::given(method("GET"))
        .and(path("/subjects/6"))
        .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .and(header("X-User-ID", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(subjects_body()))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let subjects = assert_ok!(ctx.api.subjects("Class 6").await);
    assert_eq!(
        subjects[0],
        Subject {
            id: 1,
            name: "Mathematics".to_string(),
            class_name: Some("6".to_string()),
        }
    );
    assert_eq!(subjects.len(), 2);
}

#[tokio::test]
async fn test_anonymous_request_has_no_credentials() {
    let ctx = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/topics/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&ctx.server)
        .await;

    let topics = assert_ok!(ctx.api.topics(3).await);
    assert!(topics.is_empty());

    let requests = ctx.requests().await;
    assert_eq!(requests.len(), 1);
    assert_no_header!(requests[0], "authorization");
    assert_no_header!(requests[0], "x-user-id");
}

#[tokio::test]
async fn test_corrupt_user_keeps_token_but_drops_user_id() {
    let session = SessionContext::in_memory();
    let store = session.store();
    store.set(TOKEN_KEY, TEST_TOKEN).expect("store token");
    store.set(USER_KEY, "{not json").expect("store user");
    let ctx = TestApi::with_session(session).await;

    Mock::given(method("GET"))
        .and(path("/topics/3"))
        .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    assert_ok!(ctx.api.topics(3).await);

    let requests = ctx.requests().await;
    assert_no_header!(requests[0], "x-user-id");
}

#[tokio::test]
async fn test_minimal_stored_user_sends_user_id() {
    let session = SessionContext::in_memory();
    let store = session.store();
    store.set(TOKEN_KEY, "abc").expect("store token");
    store.set(USER_KEY, r#"{"id":7,"role":"student"}"#).expect("store user");
    let ctx = TestApi::with_session(session).await;

    Mock::given(method("GET"))
        .and(path("/topics/3"))
        .and(header("Authorization", "Bearer abc"))
        .and(header("X-User-ID", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    assert_ok!(ctx.api.topics(3).await);
}

#[tokio::test]
async fn test_class_access_denial_is_announced_once() {
    let ctx = TestApi::with_session(stored_session(&test_user(7, Role::Student))).await;
    let mut notifications = ctx.api.notifications().subscribe();

    Mock::given(method("GET"))
        .and(path("/questions"))
        .and(query_param("class", "8"))
        .and(query_param("type", "mcq"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "error": "Access restricted: wrong class" })),
        )
        .mount(&ctx.server)
        .await;

    let query = QuizQuery {
        class: "8".to_string(),
        subject_id: 2,
        topic_id: 5,
        kind: QuestionType::Mcq,
    };
    let err = ctx.api.quiz_questions(&query).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::ClassAccess {
            message: "Access restricted: wrong class".to_string()
        }
    );
    assert_eq!(
        notifications.try_recv(),
        Ok(Notification::ClassAccessDenied {
            message: "Access restricted: wrong class".to_string()
        })
    );
    assert_eq!(notifications.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn test_other_forbidden_is_not_announced() {
    let ctx = TestApi::with_session(stored_session(&test_user(7, Role::Teacher))).await;
    let mut notifications = ctx.api.notifications().subscribe();

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "error": "invalid token" })))
        .mount(&ctx.server)
        .await;

    let err = ctx.api.users().await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert_eq!(err.server_message(), Some("invalid token"));
    assert_eq!(notifications.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn test_bulk_upload_posts_parsed_rows() {
    let ctx = TestApi::with_session(stored_session(&test_user(4, Role::Teacher))).await;
    let csv = "topic_id,question,type,options,correct_ans\n\
               3,2+2?,mcq,\"3,4,5,6\",4\n\
               3,Sun is a star?,true-false,,True\n";
    let rows = assert_ok!(parse_questions(csv.as_bytes()));

    Mock::given(method("POST"))
        .and(path("/bulk-upload"))
        .and(header("X-User-ID", "4"))
        .and(body_json(json!([
            { "topic_id": 3, "question": "2+2?", "type": "mcq", "options": "3,4,5,6", "correct_ans": "4" },
            { "topic_id": 3, "question": "Sun is a star?", "type": "true-false", "options": "", "correct_ans": "True" }
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    assert_eq!(assert_ok!(ctx.api.bulk_upload(&rows).await), 2);
}

#[tokio::test]
async fn test_server_error_is_propagated() {
    let ctx = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/performance/summary"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&ctx.server)
        .await;

    let err = ctx.api.performance_summary().await.unwrap_err();

    assert_matches!(err, ApiError::Status { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR);
    assert_contains!(err.to_string(), "database unavailable");
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let ctx = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/questions/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&ctx.server)
        .await;

    let err = ctx.api.all_questions().await.unwrap_err();

    assert_matches!(err, ApiError::Decode(_));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let api = client_for("http://127.0.0.1:9", SessionContext::in_memory());

    let err = api.topics(1).await.unwrap_err();

    assert_matches!(err, ApiError::Network(_) | ApiError::Timeout);
}
