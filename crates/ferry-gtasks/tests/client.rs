//! `TasksClient` against a mock Google Tasks server.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use ferry_auth::{AccessTokenProvider, AuthError, StaticToken};
use ferry_core::entities::TaskDraft;
use ferry_core::enums::TaskStatus;
use ferry_gtasks::{TasksClient, TasksError};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> TasksClient {
    TasksClient::with_http(
        reqwest::Client::new(),
        server.uri(),
        Arc::new(StaticToken("tok".into())),
    )
}

#[tokio::test]
async fn finds_list_across_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/@me/lists"))
        .and(query_param_is_missing("pageToken"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "L1", "title": "My Tasks"}],
            "nextPageToken": "p2"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/@me/lists"))
        .and(query_param("pageToken", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "L2", "title": "General"}]
        })))
        .mount(&server)
        .await;

    let found = client(&server)
        .find_task_list("General")
        .await
        .expect("lists load")
        .expect("General exists");
    assert_eq!(found.id, "L2");
}

#[tokio::test]
async fn missing_list_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/@me/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "L1", "title": "My Tasks"}]
        })))
        .mount(&server)
        .await;

    let found = client(&server).find_task_list("General").await.expect("lists load");
    assert!(found.is_none());
}

#[tokio::test]
async fn lists_tasks_including_completed_and_hidden() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lists/L2/tasks"))
        .and(query_param("showCompleted", "true"))
        .and(query_param("showHidden", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": "t1", "title": "Write report", "status": "needsAction"},
                {"id": "t2", "title": "ENG-1 Done", "status": "completed"}
            ]
        })))
        .mount(&server)
        .await;

    let tasks = client(&server).list_tasks("L2").await.expect("tasks load");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].title, "Write report");
    assert_eq!(tasks[1].status, TaskStatus::Completed);
}

#[tokio::test]
async fn inserts_draft_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/lists/L2/tasks"))
        .and(body_partial_json(json!({
            "title": "ENG-9 Fix crash",
            "notes": "https://linear.app/acme/issue/ENG-9",
            "due": "2024-01-03T00:00:00.000Z"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "new1",
            "title": "ENG-9 Fix crash",
            "status": "needsAction",
            "due": "2024-01-03T00:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = TaskDraft {
        title: "ENG-9 Fix crash".into(),
        notes: Some("https://linear.app/acme/issue/ENG-9".into()),
        due: NaiveDate::from_ymd_opt(2024, 1, 3),
    };
    let task = client(&server).insert_task("L2", &draft).await.expect("insert");
    assert_eq!(task.id, "new1");
    assert_eq!(task.due, NaiveDate::from_ymd_opt(2024, 1, 3));
}

#[tokio::test]
async fn update_puts_to_the_task_id_with_all_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/lists/L2/tasks/t1"))
        .and(body_partial_json(json!({
            "id": "t1",
            "title": "Write report",
            "notes": "draft in docs",
            "status": "completed",
            "etag": "e1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t1",
            "title": "Write report",
            "status": "completed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let task: ferry_core::entities::Task = serde_json::from_value(json!({
        "id": "t1",
        "title": "Write report",
        "notes": "draft in docs",
        "status": "needsAction",
        "etag": "e1"
    }))
    .expect("task parses");
    let updated = client(&server)
        .update_task("L2", &task.into_completed())
        .await
        .expect("update");
    assert_eq!(updated.status, TaskStatus::Completed);
}

#[tokio::test]
async fn update_without_id_is_rejected_locally() {
    let server = MockServer::start().await;
    let err = client(&server)
        .update_task("L2", &ferry_core::entities::Task::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TasksError::MissingId { .. }));
}

#[tokio::test]
async fn rate_limit_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/@me/lists"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let err = client(&server).list_task_lists().await.unwrap_err();
    assert!(matches!(err, TasksError::RateLimited { retry_after_secs: 7 }));
}

#[tokio::test]
async fn google_error_body_becomes_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lists/gone/tasks"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "code": 404,
                "message": "Task list not found.",
                "status": "NOT_FOUND",
                "errors": [{"domain": "global", "reason": "notFound", "message": "Task list not found."}]
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server).list_tasks("gone").await.unwrap_err();
    match err {
        TasksError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "NOT_FOUND: Task list not found.");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn persistent_unauthorized_surfaces_after_one_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/@me/lists"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"code": 401, "message": "Invalid Credentials", "status": "UNAUTHENTICATED"}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let err = client(&server).list_task_lists().await.unwrap_err();
    assert!(matches!(err, TasksError::Unauthorized { .. }));
}

struct RotatingToken {
    refreshes: AtomicUsize,
}

#[async_trait]
impl AccessTokenProvider for RotatingToken {
    async fn access_token(&self) -> Result<String, AuthError> {
        if self.refreshes.load(Ordering::SeqCst) == 0 {
            Ok("stale".into())
        } else {
            Ok("fresh".into())
        }
    }

    async fn refresh(&self) -> Result<String, AuthError> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        Ok("fresh".into())
    }
}

#[tokio::test]
async fn unauthorized_triggers_one_refresh_and_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/@me/lists"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/@me/lists"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(RotatingToken {
        refreshes: AtomicUsize::new(0),
    });
    let client = TasksClient::with_http(reqwest::Client::new(), server.uri(), tokens.clone());

    let lists = client.list_task_lists().await.expect("retry succeeds");
    assert!(lists.is_empty());
    assert_eq!(tokens.refreshes.load(Ordering::SeqCst), 1);
}
