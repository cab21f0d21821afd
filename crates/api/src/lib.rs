//! HTTP API server for order management.
//!
//! Provides REST endpoints to create, read, cancel and list orders behind a
//! bearer-token gate, with structured logging (tracing) and Prometheus
//! metrics.

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};
use domain::OrderService;
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::OrderStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use auth::TokenVerifier;
use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
///
/// With a verifier, every `/orders` route requires a valid bearer token;
/// `/health` and `/metrics` stay open.
pub fn create_app<S: OrderStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
    verifier: Option<Arc<dyn TokenVerifier>>,
) -> Router {
    let mut orders_router = Router::new()
        .route("/orders", post(routes::orders::create::<S>))
        .route("/orders", get(routes::orders::list::<S>))
        .route("/orders/{id}", get(routes::orders::get::<S>))
        .route("/orders/{id}/cancel", put(routes::orders::cancel::<S>))
        .with_state(state);

    if let Some(verifier) = verifier {
        orders_router =
            orders_router.route_layer(middleware::from_fn_with_state(verifier, auth::require_auth));
    } else {
        tracing::warn!("authentication disabled, /orders is open");
    }

    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .merge(orders_router)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state around the given store.
pub fn create_default_state<S: OrderStore + 'static>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        order_service: OrderService::new(store),
    })
}
