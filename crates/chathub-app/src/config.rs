use std::env;

use chathub_client::OPENROUTER_API_URL;

/// Environment variable holding the OpenRouter credential
pub const OPENROUTER_API_KEY_VAR: &str = "OPENROUTER_API_KEY";

const DEFAULT_REFERER: &str = "https://chathub.local";
const DEFAULT_TITLE: &str = "ChatHub";

/// Configuration for the ChatHub completion client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// OpenRouter credential. Absence is recoverable: completions fail with
    /// a configuration error, the server still starts.
    pub api_key: Option<String>,
    /// Chat-completions endpoint URL
    pub api_url: String,
    /// Value for the HTTP-Referer identifying header
    pub referer: String,
    /// Value for the X-Title identifying header
    pub title: String,
    /// Verbose HTTP debug output
    pub verbose: bool,
}

impl ClientConfig {
    /// Read configuration from the environment (call after dotenv loading)
    pub fn from_env() -> Self {
        let api_key = env::var(OPENROUTER_API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty());
        let api_url = env::var("OPENROUTER_BASE_URL")
            .map(|url| normalize_api_url(&url))
            .unwrap_or_else(|_| OPENROUTER_API_URL.to_string());
        let referer = env::var("CHATHUB_REFERER").unwrap_or_else(|_| DEFAULT_REFERER.to_string());
        let title = env::var("CHATHUB_TITLE").unwrap_or_else(|_| DEFAULT_TITLE.to_string());

        Self {
            api_key,
            api_url,
            referer,
            title,
            verbose: false,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: OPENROUTER_API_URL.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            title: DEFAULT_TITLE.to_string(),
            verbose: false,
        }
    }
}

/// The fixed instruction preamble every transcript starts with
pub fn get_system_prompt() -> String {
    "You are ChatHub, a helpful and friendly AI assistant. \
    Your responses should be polite, concise, and professional. \
    Do not mention OpenRouter or the underlying model providers unless directly asked about them. \
    Focus on providing accurate and high-quality information."
        .to_string()
}

/// Normalize an endpoint URL by ensuring it carries the chat-completions path
pub fn normalize_api_url(url: &str) -> String {
    // If URL already contains a completions path, use it as-is
    if url.contains("/completions") || url.contains("/chat") {
        return url.to_string();
    }

    if url.ends_with('/') {
        format!("{}api/v1/chat/completions", url)
    } else {
        format!("{}/api/v1/chat/completions", url)
    }
}
