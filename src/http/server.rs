//! HTTP server setup and request dispatch.
//!
//! Axum provides the transport: two catch-all routes feed every request
//! into the crate's own route table, which performs all path matching and
//! parameter extraction. Handlers never see an unmatched request; the
//! dispatcher answers those with the standard not-found body.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::http::error::ApiError;
use crate::http::handlers;
use crate::http::request::{RequestIdExt, RequestIdLayer};
use crate::routing::{parse_query, RouteTable};
use crate::storage::Database;

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application state injected into the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub store: Arc<Database>,
}

/// Everything a handler gets for one matched request.
pub struct RequestContext {
    pub store: Arc<Database>,
    pub params: HashMap<String, String>,
    pub query: HashMap<String, String>,
    pub body: Option<serde_json::Value>,
}

/// HTTP server for the task API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server over the given store.
    pub fn new(store: Arc<Database>) -> Self {
        let state = AppState { routes: Arc::new(task_routes()), store };

        let router = Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Accept connections until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// The API surface, in declaration order. First match wins, so ordering
/// among overlapping templates is decided here.
fn task_routes() -> RouteTable {
    RouteTable::builder()
        .route(Method::POST, "/tasks", |ctx| Box::pin(handlers::create_task(ctx)))
        .route(Method::GET, "/tasks", |ctx| Box::pin(handlers::list_tasks(ctx)))
        .route(Method::PATCH, "/tasks/:id", |ctx| Box::pin(handlers::update_task(ctx)))
        .route(Method::DELETE, "/tasks/:id", |ctx| Box::pin(handlers::delete_task(ctx)))
        .build()
}

/// Catch-all handler: match the route table, extract params and query,
/// parse the body, invoke the matched handler.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let method = request.method().clone();
    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let request_id = request.request_id().unwrap_or("unknown").to_string();

    let Some(matched) = state.routes.lookup(&method, &target) else {
        tracing::debug!(request_id = %request_id, method = %method, target = %target, "no route matched");
        return ApiError::NotFound.into_response();
    };

    tracing::debug!(request_id = %request_id, method = %method, target = %target, "dispatching request");

    let query = parse_query(matched.raw_query);
    let handler = matched.handler;
    let params = matched.params;
    let body = read_json_body(request.into_body()).await;

    let ctx = RequestContext { store: Arc::clone(&state.store), params, query, body };
    match handler(ctx).await {
        Ok(response) => response,
        Err(error) => error.into_response(),
    }
}

/// Byte-to-object transform for request bodies. Empty, oversized, or
/// non-JSON bodies all decode to `None`; handlers decide whether a body
/// was required.
async fn read_json_body(body: Body) -> Option<serde_json::Value> {
    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES).await.ok()?;
    if bytes.is_empty() {
        return None;
    }
    serde_json::from_slice(&bytes).ok()
}
