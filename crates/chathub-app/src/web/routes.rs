use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::web::{
    protocol::{ClientMessage, ServerMessage, SessionConfig, SessionId, SessionInfo},
    session_manager::{Session, SessionManager},
};

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub session_manager: Arc<SessionManager>,
}

/// Create router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // API routes
        .route("/api/sessions", get(list_sessions).post(create_session))
        .route(
            "/api/sessions/:id",
            get(get_session_details).delete(close_session),
        )
        // WebSocket endpoint
        .route("/ws/:session_id", get(websocket_handler))
        // Embedded UI
        .route("/", get(serve_index))
        .with_state(state)
}

/// GET /api/sessions - List all active sessions
async fn list_sessions(State(state): State<AppState>) -> Json<serde_json::Value> {
    let sessions = state.session_manager.list_sessions().await;
    Json(serde_json::json!({ "sessions": sessions }))
}

/// POST /api/sessions - Create a new session
async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, AppError> {
    let config: SessionConfig = serde_json::from_value(
        payload
            .get("config")
            .cloned()
            .unwrap_or(serde_json::json!({})),
    )?;

    let session_id = state.session_manager.create_session(config).await?;

    Ok(Json(serde_json::json!({
        "session_id": session_id,
        "created_at": chrono::Utc::now().to_rfc3339(),
        "websocket_url": format!("/ws/{}", session_id),
    })))
}

/// GET /api/sessions/:id - Get session details
async fn get_session_details(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionInfo>, AppError> {
    let session = state
        .session_manager
        .get_session(&id)
        .await
        .ok_or_else(|| AppError::NotFound("Session not found".into()))?;

    Ok(Json(session.get_info().await))
}

/// DELETE /api/sessions/:id - Close a session
async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.session_manager.remove_session(&id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Session closed successfully",
    })))
}

/// GET /ws/:session_id - WebSocket endpoint
async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Response {
    ws.on_upgrade(move |socket| handle_websocket(socket, state, session_id))
}

/// Handle WebSocket connection
async fn handle_websocket(socket: WebSocket, state: AppState, session_id: SessionId) {
    let client_id = Uuid::new_v4();

    let session = match state.session_manager.get_session(&session_id).await {
        Some(s) => s,
        None => {
            eprintln!("WebSocket: Session {} not found", session_id);
            return;
        }
    };

    // Create channel for sending messages to this client
    let (ws_sender, mut ws_receiver) = mpsc::unbounded_channel();

    // Add client to session
    session.add_client(client_id, ws_sender).await;

    // Send SessionJoined with a snapshot of the session state
    let chathub = session.chathub.lock().await;
    let join_msg = ServerMessage::SessionJoined {
        session_id,
        created_at: session.created_at.to_rfc3339(),
        selected_model: chathub.selected_model.clone(),
        catalog: chathub.catalog.entries().to_vec(),
        history: chathub.messages.clone(),
    };
    drop(chathub);

    session.send_to_client(client_id, join_msg).await;

    // Split socket
    let (mut ws_sink, mut ws_stream) = socket.split();

    // Spawn task to send messages from channel to WebSocket
    let session_clone = session.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = ws_receiver.recv().await {
            if let Ok(json) = serde_json::to_string(&msg) {
                if ws_sink.send(WsMessage::Text(json)).await.is_err() {
                    break;
                }
            }
        }
    });

    // Handle incoming WebSocket messages
    while let Some(Ok(msg)) = ws_stream.next().await {
        if let WsMessage::Text(text) = msg {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => {
                    handle_client_message(client_id, client_msg, &session_clone, &state).await;
                }
                Err(e) => {
                    eprintln!("Failed to parse client message: {} - Error: {}", text, e);
                }
            }
        }
    }

    // Client disconnected
    session_clone.remove_client(client_id).await;
    send_task.abort();
}

/// Handle a message from a client
async fn handle_client_message(
    client_id: Uuid,
    message: ClientMessage,
    session: &Arc<Session>,
    state: &AppState,
) {
    use ClientMessage::*;

    match message {
        SendMessage { content } => {
            // Spawn the turn in a separate task so the WebSocket reader keeps
            // draining while the completion call is in flight
            let session_clone = Arc::clone(session);
            tokio::spawn(async move {
                handle_send_message(content, &session_clone).await;
            });
        }
        SelectModel { model } => {
            handle_select_model(model, session).await;
        }
        ClearHistory => {
            handle_clear_history(session).await;
        }
        ListSessions => {
            let sessions = state.session_manager.list_sessions().await;
            session
                .send_to_client(client_id, ServerMessage::SessionList { sessions })
                .await;
        }
    }
}

/// Run one user turn and broadcast the outcome.
///
/// A successful reply is persisted into the transcript by `submit`; a failed
/// turn is broadcast as an Error and never enters the history.
async fn handle_send_message(content: String, session: &Arc<Session>) {
    let mut chathub = session.chathub.lock().await;
    let result = chathub.submit(&content).await;
    drop(chathub);

    match result {
        Ok(reply) => {
            session
                .broadcast(ServerMessage::AssistantMessage { content: reply })
                .await;
        }
        Err(err) => {
            session
                .broadcast(ServerMessage::Error {
                    message: err.to_string(),
                    recoverable: true,
                })
                .await;
        }
    }

    session.update_activity().await;
}

/// Handle SelectModel
async fn handle_select_model(model: String, session: &Arc<Session>) {
    let mut chathub = session.chathub.lock().await;
    let result = chathub.select_model(&model);
    drop(chathub);

    match result {
        Ok(entry) => {
            session
                .broadcast(ServerMessage::ModelSelected {
                    model: entry.display_name,
                    backend_id: entry.backend_id,
                    description: entry.description,
                })
                .await;
        }
        Err(e) => {
            session
                .broadcast(ServerMessage::Error {
                    message: format!("Model selection failed: {}", e),
                    recoverable: true,
                })
                .await;
        }
    }
}

/// Handle ClearHistory
async fn handle_clear_history(session: &Arc<Session>) {
    session.chathub.lock().await.clear_history();
    session.broadcast(ServerMessage::HistoryCleared).await;
    session.update_activity().await;
}

/// GET / - Serve the embedded chat page
async fn serve_index() -> Html<&'static str> {
    Html(include_str!("../../web/index.html"))
}

/// Error handling
#[derive(Debug)]
enum AppError {
    Anyhow(anyhow::Error),
    NotFound(String),
    SerdeJson(serde_json::Error),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Anyhow(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerdeJson(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Anyhow(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::SerdeJson(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        };

        let body = Json(serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
