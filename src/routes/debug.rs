use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Check if services are working
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    status["checks"]["poi_count"] = json!(state.catalog.len());
    status["checks"]["routing_backend"] = json!(state.planner.routing_backend());

    // Check saved-route store
    status["checks"]["route_store"] = json!(state.store.backend());
    match state.store.get_all().await {
        Ok(routes) => {
            status["checks"]["saved_routes"] = json!(routes.len());
        }
        Err(e) => {
            status["checks"]["saved_routes"] = json!({"error": e.to_string()});
            status["status"] = json!("error");
        }
    }

    Json(status)
}
