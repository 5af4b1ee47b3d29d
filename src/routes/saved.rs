use crate::error::{AppError, Result};
use crate::models::{RouteUpdate, SaveRouteRequest, SavedRoute};
use crate::planner::PlannerResponse;
use crate::services::export;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

async fn fetch(state: &AppState, id: Uuid) -> Result<SavedRoute> {
    state
        .store
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Saved route {} not found", id)))
}

/// POST /routes - Save the route under construction
pub async fn save_route(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveRouteRequest>,
) -> Result<(StatusCode, Json<SavedRoute>)> {
    let snapshot = state
        .planner
        .snapshot(req.name.trim(), req.description)
        .await;

    let id = state.store.create(&snapshot).await?;
    tracing::info!("Saved route '{}' as {}", snapshot.name, id);

    Ok((StatusCode::CREATED, Json(fetch(&state, id).await?)))
}

/// GET /routes - Saved routes, newest first
pub async fn list_routes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<SavedRoute>>> {
    Ok(Json(state.store.get_all().await?))
}

/// GET /routes/{id}
pub async fn get_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SavedRoute>> {
    Ok(Json(fetch(&state, id).await?))
}

/// PUT /routes/{id} - Rename, re-describe or replace a saved route
pub async fn update_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(update): Json<RouteUpdate>,
) -> Result<Json<SavedRoute>> {
    if update.is_empty() {
        return Err(AppError::InvalidRequest(
            "Update must change name, description or route".to_string(),
        ));
    }

    if state.store.update(id, &update).await? == 0 {
        return Err(AppError::NotFound(format!("Saved route {} not found", id)));
    }

    Ok(Json(fetch(&state, id).await?))
}

/// DELETE /routes/{id}
pub async fn delete_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if state.store.delete(id).await? == 0 {
        return Err(AppError::NotFound(format!("Saved route {} not found", id)));
    }
    tracing::info!("Deleted saved route {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /routes/{id}/load - Continue editing a saved route
pub async fn load_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlannerResponse>> {
    let saved = fetch(&state, id).await?;
    Ok(Json(state.planner.load(&saved).await?))
}

/// POST /routes/import - Store a route from a JSON export
pub async fn import_route(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<(StatusCode, Json<SavedRoute>)> {
    let snapshot = export::import_json(&body)?;
    let id = state.store.create(&snapshot).await?;
    tracing::info!("Imported route '{}' as {}", snapshot.name, id);

    Ok((StatusCode::CREATED, Json(fetch(&state, id).await?)))
}
