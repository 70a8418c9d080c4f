use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex, RwLock};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::web::protocol::{ServerMessage, SessionConfig, SessionId, SessionInfo};
use crate::ChatHub;

/// A client connection to a session
#[derive(Debug)]
pub struct ClientConnection {
    pub client_id: Uuid,
    pub ws_sender: mpsc::UnboundedSender<ServerMessage>,
    pub joined_at: DateTime<Utc>,
}

/// A chat session
///
/// Owns one [`ChatHub`] behind a mutex; the mutex serializes turns so a
/// session only ever runs one completion at a time.
pub struct Session {
    pub id: SessionId,
    pub chathub: Arc<Mutex<ChatHub>>,
    pub clients: Arc<RwLock<Vec<ClientConnection>>>,
    pub created_at: DateTime<Utc>,
    pub last_activity: Arc<Mutex<DateTime<Utc>>>,
}

impl Session {
    pub fn new(id: SessionId, chathub: ChatHub) -> Self {
        Self {
            id,
            chathub: Arc::new(Mutex::new(chathub)),
            clients: Arc::new(RwLock::new(Vec::new())),
            created_at: Utc::now(),
            last_activity: Arc::new(Mutex::new(Utc::now())),
        }
    }

    pub async fn add_client(
        &self,
        client_id: Uuid,
        ws_sender: mpsc::UnboundedSender<ServerMessage>,
    ) {
        let conn = ClientConnection {
            client_id,
            ws_sender,
            joined_at: Utc::now(),
        };
        self.clients.write().await.push(conn);
        self.update_activity().await;
    }

    pub async fn remove_client(&self, client_id: Uuid) {
        self.clients.write().await.retain(|c| c.client_id != client_id);
        self.update_activity().await;
    }

    pub async fn broadcast(&self, message: ServerMessage) {
        let clients = self.clients.read().await;
        for client in clients.iter() {
            let _ = client.ws_sender.send(message.clone());
        }
    }

    pub async fn send_to_client(&self, client_id: Uuid, message: ServerMessage) {
        let clients = self.clients.read().await;
        if let Some(client) = clients.iter().find(|c| c.client_id == client_id) {
            let _ = client.ws_sender.send(message);
        }
    }

    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }

    pub async fn update_activity(&self) {
        *self.last_activity.lock().await = Utc::now();
    }

    pub async fn get_info(&self) -> SessionInfo {
        let chathub = self.chathub.lock().await;
        let clients = self.clients.read().await;
        let last_activity = *self.last_activity.lock().await;

        SessionInfo {
            id: self.id,
            created_at: self.created_at.to_rfc3339(),
            last_activity: last_activity.to_rfc3339(),
            active_clients: clients.len(),
            message_count: chathub.messages.len(),
            selected_model: chathub.selected_model.clone(),
        }
    }
}

/// Manages all active sessions
///
/// Each browser session owns an independent state instance; nothing mutable
/// is shared across sessions.
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<SessionId, Arc<Session>>>>,
    client_config: ClientConfig,
}

impl SessionManager {
    pub fn new(client_config: ClientConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            client_config,
        }
    }

    /// Create a new session, optionally with an initial model selection
    pub async fn create_session(&self, config: SessionConfig) -> Result<SessionId> {
        let session_id = Uuid::new_v4();

        let mut chathub = ChatHub::new_with_config(self.client_config.clone());
        if let Some(ref model) = config.model {
            chathub.select_model(model)?;
        }

        let session = Arc::new(Session::new(session_id, chathub));
        self.sessions.write().await.insert(session_id, session);

        Ok(session_id)
    }

    /// Get a session by ID
    pub async fn get_session(&self, session_id: &SessionId) -> Option<Arc<Session>> {
        self.sessions.read().await.get(session_id).cloned()
    }

    /// List all active sessions, most recently active first
    pub async fn list_sessions(&self) -> Vec<SessionInfo> {
        let sessions = self.sessions.read().await;
        let mut infos = Vec::new();

        for session in sessions.values() {
            infos.push(session.get_info().await);
        }

        infos.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));

        infos
    }

    /// Remove a session
    pub async fn remove_session(&self, session_id: &SessionId) -> Result<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }
}
