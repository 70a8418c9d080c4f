//! # chathub-client
//!
//! The outbound half of ChatHub: one chat-completion call per user turn
//! against the OpenRouter routing API.
//!
//! The client performs a single POST per call - no retry, no streaming, no
//! timeout beyond the HTTP client's default - and returns either the text of
//! the first generated choice or a [`CompletionError`] describing what went
//! wrong. Callers branch on the error variant, never on response text.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chathub_client::{CompletionClient, OPENROUTER_API_URL};
//! use chathub_models::Message;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = CompletionClient::new(
//!         Some("your-api-key".to_string()),
//!         OPENROUTER_API_URL.to_string(),
//!         "https://chathub.local".to_string(),
//!         "ChatHub".to_string(),
//!     );
//!
//!     let messages = vec![
//!         Message::system("You are a helpful assistant."),
//!         Message::user("Hello!"),
//!     ];
//!
//!     match client.complete("openai/gpt-4o", &messages).await {
//!         Ok(reply) => println!("{}", reply),
//!         Err(err) => eprintln!("completion failed: {}", err),
//!     }
//! }
//! ```

pub mod client;
pub mod error;

pub use client::{CompletionClient, OPENROUTER_API_URL};
pub use error::CompletionError;
