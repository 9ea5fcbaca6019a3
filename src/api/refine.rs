//! Metadata refinement endpoints

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    error::{AppResult, ErrorResponse},
    refine::Pipeline,
    AppState,
};

/// Refinement request
#[derive(Deserialize, ToSchema)]
pub struct RefinerInput {
    /// Dataset document, or a list of documents refined with the same rules
    #[schema(value_type = Object)]
    pub metadata: Value,
}

async fn refine_with(
    state: AppState,
    pipeline: Pipeline,
    input: RefinerInput,
) -> AppResult<Json<Value>> {
    let refined = state.services.refinement.refine(pipeline, input.metadata).await?;
    Ok(Json(refined))
}

/// Refine CBS metadata
#[utoipa::path(
    post,
    path = "/metadata-refinement/cbs",
    tag = "refinement",
    request_body = RefinerInput,
    responses(
        (status = 200, description = "Refined metadata"),
        (status = 422, description = "Citation fields missing", body = ErrorResponse),
        (status = 500, description = "Reference table unavailable", body = ErrorResponse)
    )
)]
pub async fn refine_cbs(
    State(state): State<AppState>,
    Json(input): Json<RefinerInput>,
) -> AppResult<Json<Value>> {
    refine_with(state, Pipeline::Cbs, input).await
}

/// Refine CID metadata
#[utoipa::path(
    post,
    path = "/metadata-refinement/cid",
    tag = "refinement",
    request_body = RefinerInput,
    responses(
        (status = 200, description = "Refined metadata"),
        (status = 400, description = "Malformed distribution date", body = ErrorResponse),
        (status = 422, description = "Metadata blocks missing", body = ErrorResponse)
    )
)]
pub async fn refine_cid(
    State(state): State<AppState>,
    Json(input): Json<RefinerInput>,
) -> AppResult<Json<Value>> {
    refine_with(state, Pipeline::Cid, input).await
}

/// Refine LISS metadata
#[utoipa::path(
    post,
    path = "/metadata-refinement/liss",
    tag = "refinement",
    request_body = RefinerInput,
    responses(
        (status = 200, description = "Refined metadata"),
        (status = 400, description = "DOI missing or not a doi.org link", body = ErrorResponse),
        (status = 422, description = "Metadata blocks missing", body = ErrorResponse)
    )
)]
pub async fn refine_liss(
    State(state): State<AppState>,
    Json(input): Json<RefinerInput>,
) -> AppResult<Json<Value>> {
    refine_with(state, Pipeline::Liss, input).await
}

/// Refine DANS Data Station metadata
#[utoipa::path(
    post,
    path = "/metadata-refinement/datastation",
    tag = "refinement",
    request_body = RefinerInput,
    responses(
        (status = 200, description = "Refined metadata"),
        (status = 400, description = "DOI missing", body = ErrorResponse),
        (status = 422, description = "Dataset version missing", body = ErrorResponse)
    )
)]
pub async fn refine_datastation(
    State(state): State<AppState>,
    Json(input): Json<RefinerInput>,
) -> AppResult<Json<Value>> {
    refine_with(state, Pipeline::Datastation, input).await
}

/// Refine DataverseNL metadata
#[utoipa::path(
    post,
    path = "/metadata-refinement/dataverse-nl",
    tag = "refinement",
    request_body = RefinerInput,
    responses(
        (status = 200, description = "Refined metadata"),
        (status = 422, description = "Citation fields missing", body = ErrorResponse)
    )
)]
pub async fn refine_dataverse_nl(
    State(state): State<AppState>,
    Json(input): Json<RefinerInput>,
) -> AppResult<Json<Value>> {
    refine_with(state, Pipeline::DataverseNl, input).await
}

/// Refine Sicada metadata
#[utoipa::path(
    post,
    path = "/metadata-refinement/sicada",
    tag = "refinement",
    request_body = RefinerInput,
    responses(
        (status = 200, description = "Refined metadata"),
        (status = 422, description = "Citation fields missing", body = ErrorResponse)
    )
)]
pub async fn refine_sicada(
    State(state): State<AppState>,
    Json(input): Json<RefinerInput>,
) -> AppResult<Json<Value>> {
    refine_with(state, Pipeline::Sicada, input).await
}
