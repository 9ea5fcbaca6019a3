//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, refine};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Metadata Refiner API",
        description = "Normalizes Dataverse dataset metadata per source system"
    ),
    paths(
        // Health
        health::health_check,
        health::version,
        // Refinement
        refine::refine_cbs,
        refine::refine_cid,
        refine::refine_liss,
        refine::refine_datastation,
        refine::refine_dataverse_nl,
        refine::refine_sicada,
    ),
    components(
        schemas(
            health::HealthResponse,
            health::VersionResponse,
            refine::RefinerInput,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "refinement", description = "Per-source metadata refinement")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
