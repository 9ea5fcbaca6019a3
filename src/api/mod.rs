//! HTTP API of the metadata refiner

pub mod health;
pub mod openapi;
pub mod refine;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let refinement = Router::new()
        .route("/cbs", post(refine::refine_cbs))
        .route("/cid", post(refine::refine_cid))
        .route("/liss", post(refine::refine_liss))
        .route("/datastation", post(refine::refine_datastation))
        .route("/dataverse-nl", post(refine::refine_dataverse_nl))
        .route("/sicada", post(refine::refine_sicada));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/version", get(health::version))
        .nest("/metadata-refinement", refinement)
        .with_state(state)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
