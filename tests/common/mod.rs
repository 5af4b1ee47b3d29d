use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
};
use geoportal::config::PlannerConfig;
use geoportal::db::{MemoryRouteStore, RouteStore};
use geoportal::models::{Coordinates, RouteResult, TransportMode, Waypoint};
use geoportal::planner::RoutePlanner;
use geoportal::services::poi_catalog::PoiCatalog;
use geoportal::services::route_calculator::{RouteCalculator, RoutingBackend};
use geoportal::{AppError, AppState};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Routing backend answering 5 km and 10 minutes per leg, or failing while
/// `available` is false.
#[allow(dead_code)]
pub struct TestBackend {
    pub calls: AtomicUsize,
    pub available: AtomicBool,
}

#[allow(dead_code)]
impl TestBackend {
    pub fn new() -> Self {
        TestBackend {
            calls: AtomicUsize::new(0),
            available: AtomicBool::new(true),
        }
    }

    pub fn unavailable() -> Self {
        let backend = Self::new();
        backend.available.store(false, Ordering::SeqCst);
        backend
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoutingBackend for TestBackend {
    async fn route(
        &self,
        waypoints: &[Coordinates],
        _mode: TransportMode,
    ) -> geoportal::Result<RouteResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.available.load(Ordering::SeqCst) {
            return Err(AppError::RoutingServiceUnavailable(
                "test backend offline".to_string(),
            ));
        }

        let legs = waypoints.len().saturating_sub(1) as f64;
        Ok(RouteResult {
            distance_m: 5_000.0 * legs,
            duration_s: 600.0 * legs,
            geometry: waypoints.to_vec(),
            legs: vec![],
            is_fallback: false,
        })
    }

    fn name(&self) -> &'static str {
        "test"
    }
}

/// Application state with the embedded catalog and an in-memory store
#[allow(dead_code)]
pub fn setup_test_state(backend: Arc<dyn RoutingBackend>) -> Arc<AppState> {
    setup_test_state_with_store(backend, Arc::new(MemoryRouteStore::new()))
}

#[allow(dead_code)]
pub fn setup_test_state_with_store(
    backend: Arc<dyn RoutingBackend>,
    store: Arc<dyn RouteStore>,
) -> Arc<AppState> {
    let catalog = Arc::new(PoiCatalog::embedded().expect("Embedded catalog must load"));
    let calculator = RouteCalculator::new(backend, PlannerConfig::default());

    Arc::new(AppState {
        planner: RoutePlanner::new(calculator, catalog.clone()),
        store,
        catalog,
    })
}

#[allow(dead_code)]
pub fn setup_test_app(backend: Arc<dyn RoutingBackend>) -> axum::Router {
    geoportal::routes::create_router(setup_test_state(backend))
}

/// Build a request with an optional JSON body
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[allow(dead_code)]
pub async fn read_body(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[allow(dead_code)]
pub async fn read_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&read_body(response).await).unwrap()
}

/// Create a test waypoint
#[allow(dead_code)]
pub fn create_test_waypoint(id: &str, lat: f64, lng: f64) -> Waypoint {
    Waypoint::new(id, id, Coordinates::new(lat, lng).unwrap(), "custom")
}
