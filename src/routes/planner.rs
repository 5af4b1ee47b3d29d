use crate::error::{AppError, Result};
use crate::models::{AddWaypointRequest, MoveWaypointRequest, OptimizeRequest, SetModeRequest};
use crate::planner::PlannerResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

/// GET /route - The route under construction
pub async fn get_route(State(state): State<Arc<AppState>>) -> Json<PlannerResponse> {
    Json(state.planner.current().await)
}

/// POST /route/waypoints - Append a catalog POI or a custom waypoint
pub async fn add_waypoint(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddWaypointRequest>,
) -> Result<Json<PlannerResponse>> {
    let response = match (req.poi_id, req.waypoint) {
        (Some(poi_id), None) => state.planner.add_poi(&poi_id).await?,
        (None, Some(waypoint)) => state.planner.add_waypoint(waypoint).await?,
        _ => {
            return Err(AppError::InvalidRequest(
                "Provide exactly one of poi_id or waypoint".to_string(),
            ))
        }
    };
    Ok(Json(response))
}

/// DELETE /route/waypoints/{index}
pub async fn remove_waypoint(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<PlannerResponse>> {
    Ok(Json(state.planner.remove_waypoint(index).await?))
}

/// POST /route/waypoints/move
pub async fn move_waypoint(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MoveWaypointRequest>,
) -> Result<Json<PlannerResponse>> {
    Ok(Json(state.planner.move_waypoint(req.from, req.to).await?))
}

/// PUT /route/mode
pub async fn set_mode(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetModeRequest>,
) -> Result<Json<PlannerResponse>> {
    Ok(Json(state.planner.set_mode(req.mode).await?))
}

/// POST /route/optimize - Nearest-first reordering
pub async fn optimize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<PlannerResponse>> {
    Ok(Json(state.planner.optimize(req.start_index).await?))
}

/// POST /route/clear
pub async fn clear(State(state): State<Arc<AppState>>) -> Json<PlannerResponse> {
    Json(state.planner.clear().await)
}
