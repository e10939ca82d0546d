//! Author network and works handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use scholar::{CollaborationGraph, DisplayMode, WorksPage};
use serde::Deserialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

const DEFAULT_PAGE_SIZE: usize = 25;

/// Query parameters for the works endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct WorksQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub display: Option<String>,
}

/// GET /api/authors/:id/network
///
/// The page walk stops if the client goes away.
pub async fn get_network(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CollaborationGraph>, ApiError> {
    let graph = state
        .run_cancellable(move |scholar, cancel| scholar.author_network_with_cancel(&id, cancel))
        .await?;
    Ok(Json(graph))
}

/// GET /api/authors/:id/works?page=&page_size=&display=
pub async fn get_works(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<WorksQuery>,
) -> Result<Json<WorksPage>, ApiError> {
    let display = match query.display.as_deref() {
        Some(raw) => raw
            .parse::<DisplayMode>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => DisplayMode::default(),
    };
    let page = query.page.unwrap_or(1);
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

    let works = state
        .run_blocking(move |scholar| scholar.personal_works(&id, page, page_size, display))
        .await?;
    Ok(Json(works))
}
