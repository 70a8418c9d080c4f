use serde::Serialize;

use super::types::Message;

/// Chat API request structure
///
/// The message sequence is sent verbatim, system message included. `stream`
/// is always false: the whole response is awaited as one unit.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub stream: bool,
}
