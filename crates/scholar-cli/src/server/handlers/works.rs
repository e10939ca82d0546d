//! Most-viewed works handler.

use axum::{
    extract::{Query, State},
    Json,
};
use scholar::store::WorkView;
use scholar::DEFAULT_HOT_WORKS;
use serde::Deserialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct HotQuery {
    pub limit: Option<usize>,
}

/// GET /api/works/hot?limit=
pub async fn get_hot_works(
    State(state): State<AppState>,
    Query(query): Query<HotQuery>,
) -> Result<Json<Vec<WorkView>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_HOT_WORKS);
    let hot = state.run_blocking(move |scholar| scholar.hot_works(limit)).await?;
    Ok(Json(hot))
}
