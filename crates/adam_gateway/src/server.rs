use crate::fingerprint::fingerprint;
use crate::types::{ChatRequest, ChatResponse, ErrorBody};
use adam_core::SessionStore;
use adam_expression::Pacer;
use adam_reasoning::{DialogueEngine, EngineError};
use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};

/// Shared state for the chat handlers.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<DialogueEngine>,
    sessions: Arc<SessionStore>,
    pacer: Pacer,
}

impl AppState {
    pub fn new(engine: DialogueEngine, sessions: SessionStore, pacer: Pacer) -> Self {
        Self {
            engine: Arc::new(engine),
            sessions: Arc::new(sessions),
            pacer,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

/// Build the HTTP surface:
/// - `POST /api/chat`: one dialogue turn
/// - `OPTIONS /api/chat`: answered by the CORS layer before routing
/// - `GET /health`: health check
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat).fallback(method_not_allowed))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .with_state(state)
}

/// The chat HTTP server.
pub struct GatewayServer {
    state: AppState,
    host: String,
    port: u16,
}

impl GatewayServer {
    pub fn new(state: AppState, host: &str, port: u16) -> Self {
        Self {
            state,
            host: host.to_string(),
            port,
        }
    }

    /// Bind and serve until the listener fails.
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Gateway failed to bind {}", addr))?;
        tracing::info!("Gateway listening on {}", addr);

        let app = router(self.state).into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .await
            .context("Gateway server error")
    }
}

// ============================================================================
// Route handlers
// ============================================================================

async fn health() -> &'static str {
    "ok"
}

async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorBody::new("Method not allowed"),
    )
}

/// POST /api/chat: one turn for the caller's session.
///
/// The body is parsed leniently: anything without a usable `message` is a 400
/// rather than axum's default JSON rejection.
async fn chat(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request: ChatRequest = serde_json::from_slice(&body).unwrap_or_default();
    let Some(message) = request.text() else {
        return error_response(StatusCode::BAD_REQUEST, ErrorBody::new("Missing 'message'"));
    };

    let key = fingerprint(&headers, peer.map(|ConnectInfo(addr)| addr));
    let handle = state.sessions.handle(&key);

    // Overlapping turns for one fingerprint queue here.
    let result = {
        let mut session = handle.lock().await;
        state
            .engine
            .respond(&mut session, message, chrono::Utc::now())
            .await
    };

    match result {
        Ok(reply) => {
            state.pacer.pause(reply.pacing).await;
            (StatusCode::OK, Json(ChatResponse { reply: reply.text })).into_response()
        }
        Err(e) => engine_error(e),
    }
}

// ============================================================================
// Error mapping
// ============================================================================

fn error_response(status: StatusCode, body: ErrorBody) -> Response {
    (status, Json(body)).into_response()
}

fn engine_error(err: EngineError) -> Response {
    let status =
        StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match err {
        EngineError::Upstream {
            message, details, ..
        } => {
            tracing::warn!(status = status.as_u16(), "Completion upstream failed: {}", message);
            error_response(status, ErrorBody::new(message).with_details(details))
        }
        other => {
            tracing::error!("Chat turn failed: {}", other);
            error_response(status, ErrorBody::new(other.to_string()))
        }
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Chat handler panicked: {}", detail);
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorBody::new("Internal server error"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use adam_core::AdamConfig;
    use adam_reasoning::providers::mock::MockProvider;

    fn state() -> AppState {
        let engine = DialogueEngine::new(
            Box::new(MockProvider::new("test")),
            &AdamConfig::default(),
        );
        AppState::new(engine, SessionStore::new(16), Pacer::disabled())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let result = health().await;
        assert_eq!(result, "ok");
    }

    #[tokio::test]
    async fn test_gateway_server_creates() {
        let server = GatewayServer::new(state(), "127.0.0.1", 0);
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 0);
    }

    #[test]
    fn test_upstream_error_keeps_status() {
        let resp = engine_error(EngineError::Upstream {
            status: 429,
            message: "Rate limit".into(),
            details: serde_json::json!({}),
        });
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

        let resp = engine_error(EngineError::Decode("bad".into()));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_panic_maps_to_500() {
        let resp = handle_panic(Box::new("boom"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
