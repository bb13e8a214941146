// HTTP surface of the race service

pub mod error;
mod routes;
mod state;

pub use state::AppState;

use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};
use tower_http::trace::TraceLayer;
use tracing::instrument;

/// The full route table, ready to serve or to drive in tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/ready", get(ready))
        .merge(routes::raceplans::router())
        .merge(routes::races::router())
        .merge(routes::startlists::router())
        .merge(routes::time_events::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// --- /ping (service liveness) ---
#[instrument(name = "ping")]
async fn ping() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

// --- /ready (readiness; the in-process store is always reachable) ---
#[instrument(name = "ready")]
async fn ready() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
