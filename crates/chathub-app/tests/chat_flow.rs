use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chathub::config::{get_system_prompt, ClientConfig};
use chathub::models::Role;
use chathub::ChatHub;

const COMPLETIONS_PATH: &str = "/api/v1/chat/completions";

fn test_config(api_url: String) -> ClientConfig {
    ClientConfig {
        api_key: Some("test-api-key".to_string()),
        api_url,
        ..ClientConfig::default()
    }
}

async fn mock_reply(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })))
        .mount(server)
        .await;
}

fn completions_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), COMPLETIONS_PATH)
}

#[test]
fn test_new_session_starts_with_system_preamble() {
    let hub = ChatHub::new_with_config(ClientConfig::default());

    assert_eq!(hub.messages.len(), 1);
    assert_eq!(hub.messages[0].role, Role::System);
    assert_eq!(hub.messages[0].content, get_system_prompt());
    assert_eq!(
        hub.selected_model,
        hub.catalog.default_entry().display_name
    );
}

#[test]
fn test_select_model_updates_selection_and_keeps_transcript() {
    let mut hub = ChatHub::new_with_config(ClientConfig::default());

    let entry = hub.select_model("Mistral Large").unwrap();
    assert_eq!(entry.backend_id, "mistralai/mistral-large");
    assert_eq!(hub.selected_model, "Mistral Large");
    assert_eq!(hub.selected_entry().backend_id, "mistralai/mistral-large");

    // Selection changes never touch the transcript
    assert_eq!(hub.messages.len(), 1);
    assert_eq!(hub.messages[0].role, Role::System);
}

#[test]
fn test_select_unknown_model_is_rejected() {
    let mut hub = ChatHub::new_with_config(ClientConfig::default());
    let before = hub.selected_model.clone();

    let err = hub.select_model("No Such Model").unwrap_err();
    assert!(err.to_string().contains("Unknown model"));
    assert_eq!(hub.selected_model, before);
}

#[tokio::test]
async fn test_successful_turn_appends_user_and_assistant() {
    let server = MockServer::start().await;
    mock_reply(&server, "Hi there").await;

    let mut hub = ChatHub::new_with_config(test_config(completions_url(&server)));
    let reply = hub.submit("Hello").await.unwrap();

    assert_eq!(reply, "Hi there");
    assert_eq!(hub.messages.len(), 3);
    assert_eq!(hub.messages[0].role, Role::System);
    assert_eq!(hub.messages[1].role, Role::User);
    assert_eq!(hub.messages[1].content, "Hello");
    assert_eq!(hub.messages[2].role, Role::Assistant);
    assert_eq!(hub.messages[2].content, "Hi there");
}

#[tokio::test]
async fn test_failed_turn_keeps_user_message_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "upstream exploded" })),
        )
        .mount(&server)
        .await;

    let mut hub = ChatHub::new_with_config(test_config(completions_url(&server)));
    let err = hub.submit("Hello").await.unwrap_err();
    let err_text = err.to_string();

    // Only the user's own message was appended; the error text never is
    assert_eq!(hub.messages.len(), 2);
    assert_eq!(hub.messages[1].role, Role::User);
    assert_eq!(hub.messages[1].content, "Hello");
    assert!(hub.messages.iter().all(|m| m.content != err_text));
}

#[tokio::test]
async fn test_multi_turn_transcript_order() {
    let server = MockServer::start().await;
    mock_reply(&server, "reply").await;

    let mut hub = ChatHub::new_with_config(test_config(completions_url(&server)));
    hub.submit("first question").await.unwrap();
    hub.submit("second question").await.unwrap();

    let roles: Vec<Role> = hub.messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::System,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant
        ]
    );
}

#[tokio::test]
async fn test_clear_history_resets_to_single_system_message() {
    let server = MockServer::start().await;
    mock_reply(&server, "reply").await;

    let mut hub = ChatHub::new_with_config(test_config(completions_url(&server)));
    hub.submit("one").await.unwrap();
    hub.submit("two").await.unwrap();
    assert!(hub.messages.len() > 1);

    hub.clear_history();

    assert_eq!(hub.messages.len(), 1);
    assert_eq!(hub.messages[0].role, Role::System);
    assert_eq!(hub.messages[0].content, get_system_prompt());
}

#[tokio::test]
async fn test_missing_credential_fails_without_touching_transcript_history() {
    let server = MockServer::start().await;
    mock_reply(&server, "never seen").await;

    let config = ClientConfig {
        api_key: None,
        api_url: completions_url(&server),
        ..ClientConfig::default()
    };
    let mut hub = ChatHub::new_with_config(config);
    let err = hub.submit("Hello").await.unwrap_err();

    assert!(matches!(err, chathub::CompletionError::Config));
    assert_eq!(hub.messages.len(), 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}
