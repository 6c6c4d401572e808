pub mod analyze;
pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/api/health", get(health::health_check))
        .route(
            "/api/analyze",
            post(analyze::analyze)
                .layer(DefaultBodyLimit::max(state.config.server.max_upload_bytes())),
        );

    #[cfg(feature = "openapi")]
    let router = {
        use utoipa::OpenApi;
        use utoipa_redoc::{Redoc, Servable};
        router.merge(Redoc::with_url(
            "/docs",
            crate::openapi::ApiDoc::openapi(),
        ))
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
