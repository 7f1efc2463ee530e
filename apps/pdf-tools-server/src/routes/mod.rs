//! Route modules for the PDF Tools server

pub mod documents;
pub mod form;
pub mod health;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let server = &state.config().server;

    let mut router = Router::new()
        .merge(health::router())
        .merge(documents::router())
        .layer(DefaultBodyLimit::max(server.max_upload_bytes()))
        .layer(TraceLayer::new_for_http());

    if server.cors_allow_any {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router = router.layer(cors);
    }

    router.with_state(state)
}
