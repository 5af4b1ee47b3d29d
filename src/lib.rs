// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod planner;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use db::RouteStore;
use planner::RoutePlanner;
use services::poi_catalog::PoiCatalog;
use std::sync::Arc;

// App state for sharing across the application
pub struct AppState {
    pub planner: RoutePlanner,
    pub store: Arc<dyn RouteStore>,
    pub catalog: Arc<PoiCatalog>,
}
