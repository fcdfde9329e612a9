//! `BotClient` against a mock Bot API server.

use ferry_sync::ports::MessageSink;
use ferry_telegram::{BotClient, OwnerChat, TelegramError};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> BotClient {
    BotClient::with_http(reqwest::Client::new(), server.uri(), "123:abc")
}

#[tokio::test]
async fn get_updates_sends_offset_and_parses_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/getUpdates"))
        .and(body_partial_json(json!({"offset": 10, "timeout": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": [
                {
                    "update_id": 10,
                    "message": {
                        "message_id": 3,
                        "from": {"id": 42, "is_bot": false, "first_name": "Sam"},
                        "chat": {"id": 42, "type": "private"},
                        "date": 1715850000,
                        "text": "/t42"
                    }
                },
                {"update_id": 11}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updates = client(&server).get_updates(10, 1).await.unwrap();

    assert_eq!(updates.len(), 2);
    let message = updates[0].message.as_ref().unwrap();
    assert_eq!(message.sender_id(), Some(42));
    assert_eq!(message.text.as_deref(), Some("/t42"));
    assert!(updates[1].message.is_none());
}

#[tokio::test]
async fn owner_chat_sends_markdown_v2() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_partial_json(json!({
            "chat_id": 42,
            "text": "*0 /tasks*",
            "parse_mode": "MarkdownV2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {"message_id": 9, "chat": {"id": 42}, "date": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    OwnerChat::new(client(&server), 42)
        .send_markdown("*0 /tasks*")
        .await
        .unwrap();
}

#[tokio::test]
async fn api_error_carries_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: can't parse entities"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .send_message(42, "oops (", Some("MarkdownV2"))
        .await
        .unwrap_err();

    match err {
        TelegramError::Api { code, description } => {
            assert_eq!(code, 400);
            assert!(description.contains("can't parse entities"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/getUpdates"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "ok": false,
            "error_code": 429,
            "description": "Too Many Requests: retry after 7",
            "parameters": {"retry_after": 7}
        })))
        .mount(&server)
        .await;

    let err = client(&server).get_updates(0, 1).await.unwrap_err();

    assert!(matches!(
        err,
        TelegramError::RateLimited {
            retry_after_secs: 7
        }
    ));
}

#[tokio::test]
async fn non_json_error_body_uses_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/getUpdates"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client(&server).get_updates(0, 1).await.unwrap_err();

    assert!(matches!(err, TelegramError::Api { code: 502, .. }));
}
