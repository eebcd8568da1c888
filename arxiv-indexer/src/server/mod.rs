//! HTTP front door.
//!
//! Serves a status probe and the latest stored papers. The chat endpoint
//! only exposes its request shape and answers 501.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::IndexingError;
use arxiv_indexer_repository::PaperStore;
use arxiv_indexer_shared::PaperRecord;

/// Number of papers returned by `/news/latest`.
pub const LATEST_LIMIT: usize = 20;

/// Shared state for the request handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PaperStore>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct StatusBody {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Request accepted by `/chat/stream`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub paper_id: String,
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

/// Build the front door router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/news/latest", get(latest_news))
        .route("/chat/stream", post(chat_stream))
        .with_state(state)
}

/// Serve the front door until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, state: AppState, shutdown: F) -> Result<(), IndexingError>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Front door listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn status() -> Json<StatusBody> {
    Json(StatusBody {
        status: "running",
        service: "Arxiv Agent",
    })
}

async fn latest_news(
    State(state): State<AppState>,
) -> Result<Json<Vec<PaperRecord>>, (StatusCode, Json<ErrorBody>)> {
    state.store.latest(LATEST_LIMIT).await.map(Json).map_err(|e| {
        error!(error = %e, "Failed to load latest papers");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                message: "failed to load latest papers".to_string(),
            }),
        )
    })
}

async fn chat_stream(Json(request): Json<ChatRequest>) -> (StatusCode, Json<ErrorBody>) {
    info!(
        paper_id = %request.paper_id,
        message_len = request.message.len(),
        history = request.history.len(),
        "Chat request received"
    );
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(ErrorBody {
            message: "chat is not available".to_string(),
        }),
    )
}
