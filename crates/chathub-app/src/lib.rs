//! ChatHub Application Library
//!
//! Per-session chat state and the web front-end for the multi-model chat UI.

use anyhow::Result;

// Re-export workspace crates
pub use chathub_client::{self as client, CompletionClient, CompletionError, OPENROUTER_API_URL};
pub use chathub_models::{self as models, Message, ModelCatalog, ModelEntry, Role};

// Local modules
pub mod cli;
pub mod config;
pub mod web;

// Re-exports from local modules
pub use cli::Cli;
pub use config::{get_system_prompt, normalize_api_url, ClientConfig};

/// Per-session chat state: the transcript and the selected model.
///
/// One instance per browser session. The transcript always starts with the
/// fixed system preamble, and the selection defaults to the catalog's first
/// entry. All mutation is append-only or full-replace on the owned transcript.
pub struct ChatHub {
    pub client: CompletionClient,
    pub catalog: ModelCatalog,
    pub messages: Vec<Message>,
    pub selected_model: String,
}

impl ChatHub {
    pub fn new_with_config(config: ClientConfig) -> Self {
        let catalog = ModelCatalog::builtin();
        let selected_model = catalog.default_entry().display_name.clone();
        let client =
            CompletionClient::new(config.api_key, config.api_url, config.referer, config.title)
                .with_verbose(config.verbose);

        let mut hub = Self {
            client,
            catalog,
            messages: Vec::new(),
            selected_model,
        };
        hub.messages.push(Message::system(config::get_system_prompt()));
        hub
    }

    /// Catalog entry for the current selection
    pub fn selected_entry(&self) -> &ModelEntry {
        // The selection is only ever set to validated catalog names
        self.catalog
            .get(&self.selected_model)
            .unwrap_or_else(|| self.catalog.default_entry())
    }

    /// Select a model by display name. The transcript is left untouched.
    pub fn select_model(&mut self, display_name: &str) -> Result<ModelEntry> {
        let entry = match self.catalog.get(display_name) {
            Some(entry) => entry.clone(),
            None => anyhow::bail!(
                "Unknown model: {}. Available models: {}",
                display_name,
                self.catalog
                    .entries()
                    .iter()
                    .map(|e| e.display_name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        };
        self.selected_model = entry.display_name.clone();
        Ok(entry)
    }

    /// Reset the transcript to just the system preamble
    pub fn clear_history(&mut self) {
        self.messages.clear();
        self.messages
            .push(Message::system(config::get_system_prompt()));
    }

    /// Run one user turn: append the user message, call the completion API
    /// with the full transcript, and append the reply on success.
    ///
    /// A failed turn keeps the user message but never records the error in
    /// the transcript; error text must not pollute future model context.
    pub async fn submit(&mut self, content: &str) -> Result<String, CompletionError> {
        self.messages.push(Message::user(content));
        let backend_id = self.selected_entry().backend_id.clone();
        let reply = self.client.complete(&backend_id, &self.messages).await?;
        self.messages.push(Message::assistant(reply.clone()));
        Ok(reply)
    }
}
