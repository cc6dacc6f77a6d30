pub mod config;
pub mod eval;
pub mod llm;
pub mod routes;
pub mod state;
pub mod translate;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router with CORS and HTTP tracing layers
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
