//! Site shell HTTP server.
//!
//! # Responsibilities
//! - Create the Axum Router with the page handler and service endpoints
//! - Wire up middleware (request ID, tracing, timeout)
//! - Resolve every page request through the route table
//! - Mount the matched view, or the Not-Found view with status 404
//!
//! # Design Decisions
//! - Route table, base and registry are shared read-only via Arc
//! - Unmatched paths answer 404 explicitly; no redirect to home
//! - Paths outside the base never match, even if they name a route;
//!   the check runs on the normalised path

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::SiteConfig;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::http::response::render_document;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::pages::{Component, ComponentRegistry};
use crate::routing::{Resolver, RouteError, RouterError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub registry: Arc<ComponentRegistry>,
}

/// Site shell server.
pub struct SiteServer {
    router: Router,
    config: SiteConfig,
}

impl SiteServer {
    /// Fails if a route refers to a component missing from `registry`.
    pub fn new(
        config: SiteConfig,
        resolver: Resolver,
        registry: ComponentRegistry,
    ) -> Result<Self, RouterError> {
        resolver.check_components(&registry)?;

        let state = AppState {
            resolver: Arc::new(resolver),
            registry: Arc::new(registry),
        };
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    #[allow(deprecated)]
    fn build_router(config: &SiteConfig, state: AppState) -> Router {
        Router::new()
            .route("/healthz", get(health))
            .route("/routes.json", get(route_listing))
            .fallback(page_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.server.request_timeout_secs,
                    ))),
            )
    }

    /// Serve until `shutdown` is triggered.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            timeout_secs = self.config.server.request_timeout_secs,
            "Site shell starting"
        );

        let mut stop = shutdown.subscribe();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = stop.recv().await;
            })
            .await?;

        tracing::info!("Site shell stopped");
        Ok(())
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}

/// Resolve the request path and mount the matched view.
async fn page_handler(State(state): State<AppState>, request: Request) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let id = request_id(&request).to_string();

    if method != Method::GET && method != Method::HEAD {
        metrics::record_request(method.as_str(), 405, start);
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "GET, HEAD")],
            "Method Not Allowed",
        )
            .into_response();
    }

    let uri = request.uri();
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let base = state.resolver.base();

    let (status, body) = match state.resolver.resolve(target) {
        Ok(resolved) => match state.registry.get(resolved.component()) {
            Some(view) => (
                StatusCode::OK,
                render_document(view.as_ref(), base, Some(&resolved)),
            ),
            None => {
                tracing::error!(request_id = %id, component = %resolved.component(), "Component not registered");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    render_document(state.registry.not_found().as_ref(), base, None),
                )
            }
        },
        Err(e) => {
            match &e {
                RouteError::InvalidUrl { .. } => {
                    tracing::warn!(request_id = %id, error = %e, "Unroutable request")
                }
                _ => tracing::debug!(request_id = %id, error = %e, "Serving Not-Found view"),
            }
            (
                StatusCode::NOT_FOUND,
                render_document(state.registry.not_found().as_ref(), base, None),
            )
        }
    };

    metrics::record_request(method.as_str(), status.as_u16(), start);
    (status, Html(body)).into_response()
}

async fn health() -> &'static str {
    "ok"
}

/// One row of the route listing served at `/routes.json` and printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub path: String,
    pub name: String,
    pub component: Component,
    pub href: String,
}

impl RouteEntry {
    /// Rows for every route, in declaration order.
    pub fn listing(resolver: &Resolver) -> Vec<RouteEntry> {
        resolver
            .table()
            .iter()
            .map(|route| RouteEntry {
                path: route.path.clone(),
                name: route.name.clone(),
                component: route.component,
                href: resolver.base().join(&route.path),
            })
            .collect()
    }
}

async fn route_listing(State(state): State<AppState>) -> Json<Vec<RouteEntry>> {
    Json(RouteEntry::listing(&state.resolver))
}
