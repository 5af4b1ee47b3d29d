//! Application controller for the route under construction.
//!
//! Commands mutate the [`RouteAggregate`] under a short lock, then compute
//! the route without holding it. When the result comes back it is applied
//! only if no newer command has changed the route in the meantime.

pub mod aggregate;

use crate::error::{AppError, Result};
use crate::models::{Coordinates, RouteSnapshot, SavedRoute, TransportMode, Waypoint};
use crate::services::export::{self, ExportFormat, ExportSource, ExportedDocument};
use crate::services::poi_catalog::PoiCatalog;
use crate::services::route_calculator::RouteCalculator;
use crate::services::sequencer::optimize_order;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

pub use aggregate::{AddOutcome, RecalcTicket, RouteAggregate, RouteView};

/// Name given to the in-progress route when it is exported without saving.
pub const UNSAVED_ROUTE_NAME: &str = "Current route";

const FALLBACK_NOTICE: &str =
    "Routing service unavailable; distance and duration are straight-line estimates";

#[derive(Debug, Clone, Serialize)]
pub struct PlannerResponse {
    #[serde(flatten)]
    pub route: RouteView,
    /// Non-blocking messages for the user
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<String>,
}

pub struct RoutePlanner {
    aggregate: Mutex<RouteAggregate>,
    calculator: RouteCalculator,
    catalog: Arc<PoiCatalog>,
}

impl RoutePlanner {
    pub fn new(calculator: RouteCalculator, catalog: Arc<PoiCatalog>) -> Self {
        Self::with_mode(calculator, catalog, TransportMode::default())
    }

    pub fn with_mode(
        calculator: RouteCalculator,
        catalog: Arc<PoiCatalog>,
        mode: TransportMode,
    ) -> Self {
        RoutePlanner {
            aggregate: Mutex::new(RouteAggregate::new(mode)),
            calculator,
            catalog,
        }
    }

    pub fn routing_backend(&self) -> &'static str {
        self.calculator.backend_name()
    }

    pub async fn current(&self) -> PlannerResponse {
        self.respond(Vec::new()).await
    }

    /// Add a catalog POI as the next stop.
    pub async fn add_poi(&self, poi_id: &str) -> Result<PlannerResponse> {
        let poi = self
            .catalog
            .get(poi_id)
            .ok_or_else(|| AppError::NotFound(format!("POI '{}' not found", poi_id)))?;
        self.add_waypoint(Waypoint::from(poi)).await
    }

    pub async fn add_waypoint(&self, waypoint: Waypoint) -> Result<PlannerResponse> {
        Coordinates::new(waypoint.coordinates.lat, waypoint.coordinates.lng)
            .map_err(AppError::InvalidRequest)?;
        if waypoint.id.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "waypoint id must not be empty".to_string(),
            ));
        }

        let name = waypoint.name.clone();
        let outcome = self.aggregate.lock().await.add_waypoint(waypoint);

        match outcome {
            AddOutcome::Added(ticket) => {
                tracing::info!("Added waypoint '{}'", name);
                Ok(self.recompute(ticket, Vec::new()).await)
            }
            AddOutcome::Duplicate => Ok(self
                .respond(vec![format!("{} is already part of the route", name)])
                .await),
        }
    }

    pub async fn remove_waypoint(&self, index: usize) -> Result<PlannerResponse> {
        let (removed, ticket) = self.aggregate.lock().await.remove_waypoint(index)?;
        tracing::info!("Removed waypoint '{}' at position {}", removed.name, index);
        Ok(self.recompute(ticket, Vec::new()).await)
    }

    pub async fn move_waypoint(&self, from: usize, to: usize) -> Result<PlannerResponse> {
        let ticket = self.aggregate.lock().await.move_waypoint(from, to)?;
        Ok(self.recompute(ticket, Vec::new()).await)
    }

    pub async fn set_mode(&self, mode: TransportMode) -> Result<PlannerResponse> {
        let ticket = self.aggregate.lock().await.set_transport_mode(mode);
        tracing::info!("Transport mode set to {}", mode);
        Ok(self.recompute(ticket, Vec::new()).await)
    }

    /// Reorder stops nearest-first starting from `start_index`.
    pub async fn optimize(&self, start_index: usize) -> Result<PlannerResponse> {
        let ticket = {
            let mut aggregate = self.aggregate.lock().await;
            if aggregate.waypoints().len() <= 2 {
                None
            } else {
                let ordered = optimize_order(aggregate.waypoints(), start_index);
                aggregate.replace_waypoints(ordered)?
            }
        };
        Ok(self.recompute(ticket, Vec::new()).await)
    }

    pub async fn clear(&self) -> PlannerResponse {
        self.aggregate.lock().await.clear();
        tracing::info!("Route cleared");
        self.respond(Vec::new()).await
    }

    /// Make a saved route the route under construction and recompute it.
    pub async fn load(&self, saved: &SavedRoute) -> Result<PlannerResponse> {
        let ticket = {
            let mut aggregate = self.aggregate.lock().await;
            let ticket = aggregate.replace_waypoints(saved.route.waypoints.clone())?;
            if aggregate.mode() == saved.route.mode {
                ticket
            } else {
                aggregate.set_transport_mode(saved.route.mode)
            }
        };
        tracing::info!("Loaded saved route '{}' ({})", saved.route.name, saved.id);
        Ok(self.recompute(ticket, Vec::new()).await)
    }

    pub async fn snapshot(&self, name: &str, description: Option<String>) -> RouteSnapshot {
        self.aggregate.lock().await.snapshot(name, description)
    }

    pub async fn export(
        &self,
        source: ExportSource,
        format: ExportFormat,
    ) -> Result<ExportedDocument> {
        let route = match source {
            ExportSource::InProgress => {
                let snapshot = self.snapshot(UNSAVED_ROUTE_NAME, None).await;
                if snapshot.waypoints.is_empty() {
                    return Err(AppError::InvalidRequest(
                        "Nothing to export: the route has no waypoints".to_string(),
                    ));
                }
                snapshot
            }
            ExportSource::Saved(saved) => saved.route,
        };
        export::export(&route, format)
    }

    async fn recompute(
        &self,
        ticket: Option<RecalcTicket>,
        mut notices: Vec<String>,
    ) -> PlannerResponse {
        if let Some(ticket) = ticket {
            match self
                .calculator
                .compute_route(&ticket.waypoints, ticket.mode)
                .await
            {
                Ok(result) => {
                    let is_fallback = result.is_fallback;
                    let applied = self
                        .aggregate
                        .lock()
                        .await
                        .apply_result(ticket.generation, result);
                    if applied && is_fallback {
                        notices.push(FALLBACK_NOTICE.to_string());
                    }
                }
                Err(e) => {
                    tracing::error!("Route computation failed: {}", e);
                }
            }
        }

        self.respond(notices).await
    }

    async fn respond(&self, notices: Vec<String>) -> PlannerResponse {
        PlannerResponse {
            route: self.aggregate.lock().await.view(),
            notices,
        }
    }
}
