use chathub_logging::{log_request, log_request_to_file, log_response};
use chathub_models::{ChatRequest, ChatResponse, Message};

use crate::error::CompletionError;

/// Default OpenRouter chat-completions endpoint
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Client for the OpenRouter chat-completions API.
///
/// Holds the credential and the two application-identifying header values.
/// The credential is optional: a client without one short-circuits every call
/// into [`CompletionError::Config`] without touching the network.
pub struct CompletionClient {
    api_key: Option<String>,
    api_url: String,
    referer: String,
    title: String,
    verbose: bool,
    client: reqwest::Client,
}

impl CompletionClient {
    pub fn new(api_key: Option<String>, api_url: String, referer: String, title: String) -> Self {
        Self {
            api_key,
            api_url,
            referer,
            title,
            verbose: false,
            client: reqwest::Client::new(),
        }
    }

    /// Enable verbose HTTP debug output on the console
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send the full message sequence to the given backend model and return
    /// the text of the first generated choice.
    ///
    /// One POST per call: non-2xx statuses and connection failures map to
    /// [`CompletionError::Transport`], a 2xx body without the expected nested
    /// fields maps to [`CompletionError::Protocol`].
    pub async fn complete(
        &self,
        backend_id: &str,
        messages: &[Message],
    ) -> Result<String, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or(CompletionError::Config)?;

        let request = ChatRequest {
            model: backend_id.to_string(),
            messages: messages.to_vec(),
            stream: false,
        };

        log_request(&self.api_url, &request, api_key, self.verbose);
        let _ = log_request_to_file(&self.api_url, &request, backend_id, api_key);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            log_response(&status, &headers, &error_body, self.verbose);
            return Err(CompletionError::Transport {
                detail: format!("API request failed with status {}: {}", status, error_body),
            });
        }

        let response_text = response.text().await?;
        log_response(&status, &headers, &response_text, self.verbose);

        let chat_response: ChatResponse =
            serde_json::from_str(&response_text).map_err(|e| CompletionError::Protocol {
                detail: format!("failed to parse API response: {}", e),
            })?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::Protocol {
                detail: "response contained no choices".to_string(),
            })?;

        Ok(choice.message.content)
    }
}
