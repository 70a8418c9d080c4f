mod fixtures;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use chathub_client::{CompletionClient, CompletionError};
use chathub_models::Message;
use fixtures::{RouterMockServer, COMPLETIONS_PATH, TEST_API_KEY};

fn test_client(api_url: String) -> CompletionClient {
    CompletionClient::new(
        Some(TEST_API_KEY.to_string()),
        api_url,
        "https://chathub.local".to_string(),
        "ChatHub".to_string(),
    )
}

fn test_messages() -> Vec<Message> {
    vec![
        Message::system("You are a helpful assistant."),
        Message::user("Hello"),
    ]
}

#[tokio::test]
async fn test_complete_returns_first_choice_content() {
    let server = RouterMockServer::new().await;
    server.mock_completion_success("Hi there").await;

    let client = test_client(server.completions_url());
    let reply = client
        .complete("openai/gpt-4o", &test_messages())
        .await
        .unwrap();

    assert_eq!(reply, "Hi there");
}

#[tokio::test]
async fn test_complete_only_consumes_first_choice() {
    let server = RouterMockServer::new().await;
    server
        .mock_completion_raw(
            200,
            json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "first" } },
                    { "message": { "role": "assistant", "content": "second" } }
                ]
            }),
        )
        .await;

    let client = test_client(server.completions_url());
    let reply = client
        .complete("openai/gpt-4o", &test_messages())
        .await
        .unwrap();

    assert_eq!(reply, "first");
}

#[tokio::test]
async fn test_complete_sends_expected_request_shape() {
    let server = RouterMockServer::new().await;
    server
        .mount_mock(
            Mock::given(method("POST"))
                .and(path(COMPLETIONS_PATH))
                .and(header(
                    "Authorization",
                    format!("Bearer {}", TEST_API_KEY).as_str(),
                ))
                .and(header("Content-Type", "application/json"))
                .and(header("HTTP-Referer", "https://chathub.local"))
                .and(header("X-Title", "ChatHub"))
                .and(body_partial_json(json!({
                    "model": "anthropic/claude-3.5-sonnet",
                    "stream": false,
                    "messages": [
                        { "role": "system", "content": "You are a helpful assistant." },
                        { "role": "user", "content": "Hello" }
                    ]
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "choices": [{ "message": { "role": "assistant", "content": "ok" } }]
                })))
                .expect(1),
        )
        .await;

    let client = test_client(server.completions_url());
    let reply = client
        .complete("anthropic/claude-3.5-sonnet", &test_messages())
        .await
        .unwrap();

    assert_eq!(reply, "ok");
}

#[tokio::test]
async fn test_missing_api_key_short_circuits_without_network() {
    let server = RouterMockServer::new().await;
    server.mock_completion_success("never seen").await;

    let client = CompletionClient::new(
        None,
        server.completions_url(),
        "https://chathub.local".to_string(),
        "ChatHub".to_string(),
    );
    let err = client
        .complete("openai/gpt-4o", &test_messages())
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::Config));
    assert_eq!(server.request_count().await, 0);
}

#[tokio::test]
async fn test_http_500_maps_to_transport_with_status_detail() {
    let server = RouterMockServer::new().await;
    server
        .mock_completion_raw(500, json!({ "error": "internal server error" }))
        .await;

    let client = test_client(server.completions_url());
    let err = client
        .complete("openai/gpt-4o", &test_messages())
        .await
        .unwrap_err();

    match err {
        CompletionError::Transport { detail } => {
            assert!(detail.contains("500"), "detail was: {}", detail);
            assert!(detail.contains("internal server error"), "detail was: {}", detail);
        }
        other => panic!("expected Transport error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_body_maps_to_protocol() {
    let server = RouterMockServer::new().await;
    server.mock_completion_raw(200, json!({})).await;

    let client = test_client(server.completions_url());
    let err = client
        .complete("openai/gpt-4o", &test_messages())
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::Protocol { .. }));
}

#[tokio::test]
async fn test_empty_choices_maps_to_protocol() {
    let server = RouterMockServer::new().await;
    server
        .mock_completion_raw(200, json!({ "choices": [] }))
        .await;

    let client = test_client(server.completions_url());
    let err = client
        .complete("openai/gpt-4o", &test_messages())
        .await
        .unwrap_err();

    match err {
        CompletionError::Protocol { detail } => {
            assert!(detail.contains("no choices"), "detail was: {}", detail);
        }
        other => panic!("expected Protocol error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_null_content_yields_empty_reply() {
    let server = RouterMockServer::new().await;
    server
        .mock_completion_raw(
            200,
            json!({
                "choices": [{ "message": { "role": "assistant", "content": null } }]
            }),
        )
        .await;

    let client = test_client(server.completions_url());
    let reply = client
        .complete("openai/gpt-4o", &test_messages())
        .await
        .unwrap();

    assert_eq!(reply, "");
}
