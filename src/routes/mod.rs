pub mod debug;
pub mod export;
pub mod planner;
pub mod pois;
pub mod saved;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/pois", get(pois::list_pois))
        .route("/pois/categories", get(pois::list_categories))
        .route("/pois/{id}", get(pois::get_poi))
        .route("/route", get(planner::get_route))
        .route("/route/waypoints", post(planner::add_waypoint))
        .route("/route/waypoints/move", post(planner::move_waypoint))
        .route("/route/waypoints/{index}", delete(planner::remove_waypoint))
        .route("/route/mode", put(planner::set_mode))
        .route("/route/optimize", post(planner::optimize))
        .route("/route/clear", post(planner::clear))
        .route("/route/export", get(export::export_current))
        .route("/routes", post(saved::save_route).get(saved::list_routes))
        .route("/routes/import", post(saved::import_route))
        .route(
            "/routes/{id}",
            get(saved::get_route)
                .put(saved::update_route)
                .delete(saved::delete_route),
        )
        .route("/routes/{id}/load", post(saved::load_route))
        .route("/routes/{id}/export", get(export::export_saved))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
