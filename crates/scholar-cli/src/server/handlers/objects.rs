//! Object and citation handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use scholar::detail::ObjectDetail;
use scholar::CitationSet;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// GET /api/objects/:id
pub async fn get_object(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ObjectDetail>, ApiError> {
    let detail = state.run_blocking(move |scholar| scholar.get_object(&id)).await?;
    Ok(Json(detail))
}

/// GET /api/objects/:id/citations
pub async fn get_citations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CitationSet>, ApiError> {
    let citations = state.run_blocking(move |scholar| scholar.citations(&id)).await?;
    Ok(Json(citations))
}
