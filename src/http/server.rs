//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the match and resolve endpoints
//! - Wire up middleware (request ID, tracing, timeout)
//! - Swap in rebuilt routing runtimes from the config watcher
//! - Bind server to listener and stop on shutdown
//!
//! # Endpoints
//! - `GET /{*path}`: match the request path on the request host
//! - `GET /_routing/resolve?address=<token>`: resolve a content address

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::document::RouteTags;
use crate::frontend::{MatchOutcome, ResolveOutcome, RoutingError};
use crate::http::request::{self, MakeRequestUuid};
use crate::lifecycle::startup::RoutingRuntime;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<ArcSwap<RoutingRuntime>>,
}

/// HTTP front service for the router.
pub struct HttpServer {
    router: Router,
    runtime: Arc<ArcSwap<RoutingRuntime>>,
}

#[derive(Debug, Serialize)]
struct MatchResponse {
    address: String,
    tags: RouteTags,
    remaining_request_path: String,
}

#[derive(Debug, Serialize)]
struct ResolveResponse {
    uri: String,
    path: String,
    tags: RouteTags,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub address: String,
}

impl HttpServer {
    pub fn new(runtime: RoutingRuntime) -> Self {
        let request_timeout = Duration::from_secs(runtime.config().timeouts.request_secs);
        let runtime = Arc::new(ArcSwap::from_pointee(runtime));
        let state = AppState {
            runtime: runtime.clone(),
        };

        Self {
            router: Self::build_router(state, request_timeout),
            runtime,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, request_timeout: Duration) -> Router {
        Router::new()
            .route("/_routing/resolve", get(resolve_handler))
            .route("/", get(match_handler))
            .route("/{*path}", get(match_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(request_timeout)),
            )
    }

    /// The router, for serving or for driving it directly in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Shared handle to the runtime currently serving requests.
    pub fn runtime(&self) -> Arc<ArcSwap<RoutingRuntime>> {
        self.runtime.clone()
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Runtimes arriving on `updates` replace the current one atomically;
    /// requests in flight finish on the runtime they started with.
    pub async fn run(
        self,
        listener: TcpListener,
        mut updates: mpsc::UnboundedReceiver<RoutingRuntime>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let runtime = self.runtime.clone();
        tokio::spawn(async move {
            while let Some(next) = updates.recv().await {
                runtime.store(Arc::new(next));
                tracing::info!("Routing runtime reloaded");
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn match_handler(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let runtime = state.runtime.load();
    let host = request::request_host(&headers);
    let request_id = request::request_id(&headers);

    // Rendered links are percent-encoded; documents store decoded paths.
    let path = match percent_decode_str(uri.path()).decode_utf8() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(request_id = %request_id, path = %uri.path(), error = %e, "Request path is not UTF-8");
            metrics::record_http_request("match", 400);
            return error_response(StatusCode::BAD_REQUEST, "invalid_path");
        }
    };

    match runtime.match_request(host, &path) {
        Ok(MatchOutcome::Matched(result)) => {
            metrics::record_http_request("match", 200);
            Json(MatchResponse {
                address: result.matched_value,
                tags: result.tags,
                remaining_request_path: result.remaining_request_path,
            })
            .into_response()
        }
        Ok(MatchOutcome::NoMatch) => {
            tracing::debug!(request_id = %request_id, path = %path, "No document matched");
            metrics::record_http_request("match", 404);
            error_response(StatusCode::NOT_FOUND, "no_match")
        }
        Err(e) => routing_error("match", request_id, e),
    }
}

async fn resolve_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ResolveQuery>,
) -> Response {
    let runtime = state.runtime.load();
    let host = request::request_host(&headers);
    let request_id = request::request_id(&headers);

    let result = match runtime.resolve_token(host, &query.address) {
        Ok(ResolveOutcome::Resolved(result)) => result,
        Ok(ResolveOutcome::CannotResolve) => {
            metrics::record_http_request("resolve", 404);
            return error_response(StatusCode::NOT_FOUND, "cannot_resolve");
        }
        Err(e) => return routing_error("resolve", request_id, e),
    };

    let uri = request::base_url(host)
        .map_err(|e| e.to_string())
        .and_then(|base| {
            result
                .constraints
                .render(&result.resolved_value, &base)
                .map_err(|e| e.to_string())
        });
    match uri {
        Ok(uri) => {
            metrics::record_http_request("resolve", 200);
            Json(ResolveResponse {
                uri,
                path: result.resolved_value,
                tags: result.tags,
            })
            .into_response()
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Cannot render resolved URI");
            metrics::record_http_request("resolve", 400);
            error_response(StatusCode::BAD_REQUEST, &e)
        }
    }
}

fn routing_error(endpoint: &'static str, request_id: &str, error: RoutingError) -> Response {
    let status = match &error {
        RoutingError::SiteNotDetected => StatusCode::NOT_FOUND,
        RoutingError::Lookup(_) | RoutingError::Address(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::error!(request_id = %request_id, error = %error, endpoint, "Routing failed");
    metrics::record_http_request(endpoint, status.as_u16());
    error_response(status, &error.to_string())
}

fn error_response(status: StatusCode, error: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}
