//! Published section documents.

use axum::{
    extract::{Path, State},
    http::header::CONTENT_TYPE,
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Serve `/content/<document>.json` as published.
#[instrument(skip(state))]
pub async fn document(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse> {
    let name = file
        .strip_suffix(".json")
        .ok_or_else(|| AppError::NotFound(file.clone()))?;
    let bytes = state.documents().fetch_raw(name).await?;

    Ok(([(CONTENT_TYPE, "application/json")], bytes))
}
