use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";
pub const COMPLETIONS_PATH: &str = "/api/v1/chat/completions";

/// Mock server utilities for testing the completion client
pub struct RouterMockServer {
    server: MockServer,
}

impl RouterMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Endpoint URL to point a `CompletionClient` at
    pub fn completions_url(&self) -> String {
        format!("{}{}", self.server.uri(), COMPLETIONS_PATH)
    }

    /// Mock a successful completion response with the given reply text
    pub async fn mock_completion_success(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .and(header("Authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "gen-test123",
                "object": "chat.completion",
                "model": "openai/gpt-4o",
                "choices": [{
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": content
                    },
                    "finish_reason": "stop"
                }],
                "usage": {
                    "prompt_tokens": 10,
                    "completion_tokens": 20,
                    "total_tokens": 30
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock an arbitrary status code and JSON body
    pub async fn mock_completion_raw(&self, status: u16, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Register an expectation-carrying mock (verified on drop)
    pub async fn mount_mock(&self, mock: Mock) {
        mock.mount(&self.server).await;
    }

    /// Number of requests the server has received so far
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}
