use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chathub_models::{Message, ModelEntry};

/// Session ID type
pub type SessionId = Uuid;

/// Configuration for creating a new session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Initial model selection (catalog display name); catalog default when omitted
    #[serde(default)]
    pub model: Option<String>,
}

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    // Chat interaction
    SendMessage { content: String },

    // Session control
    SelectModel { model: String },
    ClearHistory,
    ListSessions,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Session lifecycle
    SessionJoined {
        session_id: SessionId,
        created_at: String,
        selected_model: String,
        catalog: Vec<ModelEntry>,
        history: Vec<Message>,
    },
    SessionList {
        sessions: Vec<SessionInfo>,
    },

    // Chat responses
    AssistantMessage {
        content: String,
    },

    // State updates
    ModelSelected {
        model: String,
        backend_id: String,
        description: String,
    },
    HistoryCleared,

    // Failed turns are surfaced here and never enter the history
    Error {
        message: String,
        recoverable: bool,
    },
}

/// Session information for listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: SessionId,
    pub created_at: String,
    pub last_activity: String,
    pub active_clients: usize,
    pub message_count: usize,
    pub selected_model: String,
}
