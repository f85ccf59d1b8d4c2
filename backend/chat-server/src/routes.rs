use crate::health;

use chat_ws::AppState;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;

/// `/ws` for chat plus the probe endpoints, all sharing one [`AppState`].
pub fn build_router(state: AppState) -> Router {
    let probes = Router::new()
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness));

    Router::new()
        .route("/ws", get(chat_ws::handler))
        .merge(probes)
        .with_state(state)
        // Browser clients connect from any origin.
        .layer(CorsLayer::permissive())
}
