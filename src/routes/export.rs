use crate::error::{AppError, Result};
use crate::services::export::{ExportFormat, ExportSource, ExportedDocument};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
    /// json (default) or html
    #[serde(default)]
    pub format: Option<String>,
}

impl ExportParams {
    pub fn parse_format(&self) -> Result<ExportFormat> {
        match &self.format {
            None => Ok(ExportFormat::default()),
            Some(f) => f.parse().map_err(AppError::InvalidRequest),
        }
    }
}

fn into_download(doc: ExportedDocument) -> Response {
    (
        [
            (header::CONTENT_TYPE, doc.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", doc.filename),
            ),
        ],
        doc.body,
    )
        .into_response()
}

/// GET /route/export - Report for the route under construction
pub async fn export_current(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> Result<Response> {
    let format = params.parse_format()?;
    let doc = state
        .planner
        .export(ExportSource::InProgress, format)
        .await?;
    Ok(into_download(doc))
}

/// GET /routes/{id}/export - Report for a saved route
pub async fn export_saved(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<ExportParams>,
) -> Result<Response> {
    let format = params.parse_format()?;
    let saved = state
        .store
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Saved route {} not found", id)))?;

    let doc = state
        .planner
        .export(ExportSource::Saved(saved), format)
        .await?;
    Ok(into_download(doc))
}
