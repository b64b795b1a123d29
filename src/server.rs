//! HTTP server.
//!
//! Exposes the chat backend over a small JSON API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Static status payload |
//! | `POST` | `/v1/chat/answer` | Answer a question, persisting the exchange |
//!
//! # Error Contract
//!
//! Error responses carry a JSON body:
//!
//! ```json
//! { "error": { "code": "internal", "message": "Completion API error ..." } }
//! ```
//!
//! Error codes: `bad_request` (400), `internal` (500). Malformed JSON and
//! a missing `question` field are rejected by the extractor before the
//! handler runs.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::answer;
use crate::config::Config;
use crate::migrate;
use crate::models::{ChatRequest, ChatResponse};
use crate::provider::{ChatProvider, OpenAiProvider};
use crate::seed;

/// Shared application state passed to route handlers via Axum's `State`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
    pub provider: Arc<dyn ChatProvider>,
}

/// Starts the HTTP server.
///
/// Runs migrations and document seeding, constructs the completion
/// provider (resolving the API credential from the environment once),
/// binds to `[server].bind`, and serves until the process is terminated.
pub async fn run_server(config: &Config, pool: SqlitePool) -> anyhow::Result<()> {
    migrate::run_migrations(&pool).await?;
    let seeded = seed::seed_documents(&pool, config).await?;
    if seeded > 0 {
        println!("Seeded {} document chunks from {}", seeded, config.seed.path.display());
    }

    let provider = Arc::new(OpenAiProvider::new(&config.provider)?);
    println!("Provider model: {}", provider.model_name());

    let bind_addr = config.server.bind.clone();
    let state = AppState {
        config: Arc::new(config.clone()),
        pool,
        provider,
    };

    let app = router(state);

    println!("docchat listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the router. Separated from [`run_server`] so tests can mount the
/// routes over an in-memory pool and a fake provider.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_status))
        .route("/v1/chat/answer", post(handle_chat_answer))
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
pub struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 500 error. Database, provider, and credential faults all
/// land here — nothing in the pipeline is classified as recoverable.
fn internal_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ GET / ============

/// JSON response body for `GET /`.
#[derive(Serialize)]
struct StatusResponse {
    status: String,
    version: String,
    message: String,
}

/// Handler for `GET /`.
async fn handle_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "docchat is running. Use POST /v1/chat/answer.".to_string(),
    })
}

// ============ POST /v1/chat/answer ============

/// Handler for `POST /v1/chat/answer`.
///
/// Runs the answer pipeline for the given question. Any pipeline fault
/// surfaces as a 500 with a generic error body.
async fn handle_chat_answer(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let response = answer::answer_question(
        &state.pool,
        state.provider.as_ref(),
        &state.config,
        &request,
    )
    .await
    .map_err(|e| internal_error(e.to_string()))?;

    Ok(Json(response))
}
