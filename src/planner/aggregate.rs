use crate::error::{AppError, Result};
use crate::models::{
    Bounds, Coordinates, RouteLeg, RouteResult, RouteSnapshot, RouteState, TransportMode, Waypoint,
};
use serde::Serialize;
use std::collections::HashSet;

/// A request to recompute the route, tagged with the generation it was
/// issued for. Results for an older generation are discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct RecalcTicket {
    pub generation: u64,
    pub waypoints: Vec<Coordinates>,
    pub mode: TransportMode,
}

#[derive(Debug, PartialEq)]
pub enum AddOutcome {
    Added(Option<RecalcTicket>),
    /// A waypoint with the same id is already part of the route
    Duplicate,
}

/// Read-only view of the route for the presentation layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteView {
    pub state: RouteState,
    pub mode: TransportMode,
    pub waypoints: Vec<Waypoint>,
    pub distance_m: Option<f64>,
    pub duration_s: Option<f64>,
    pub geometry: Vec<Coordinates>,
    pub legs: Vec<RouteLeg>,
    pub is_fallback: bool,
    /// Box around all waypoints, for fitting the map view
    pub bounds: Option<Bounds>,
    pub generation: u64,
}

/// The route under construction.
///
/// Every change to the waypoint list or the mode bumps `generation` and drops
/// the previous result. When two or more waypoints remain, the change hands
/// out a [`RecalcTicket`]; the caller computes the route and brings the
/// result back through [`RouteAggregate::apply_result`].
#[derive(Debug, Default)]
pub struct RouteAggregate {
    waypoints: Vec<Waypoint>,
    mode: TransportMode,
    result: Option<RouteResult>,
    pending: bool,
    generation: u64,
}

impl RouteAggregate {
    pub fn new(mode: TransportMode) -> Self {
        RouteAggregate {
            mode,
            ..Default::default()
        }
    }

    pub fn state(&self) -> RouteState {
        match self.waypoints.len() {
            0 => RouteState::Empty,
            1 => RouteState::Incomplete,
            _ if self.pending || self.result.is_none() => RouteState::Pending,
            _ => RouteState::Ready,
        }
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn result(&self) -> Option<&RouteResult> {
        self.result.as_ref()
    }

    pub fn contains(&self, waypoint_id: &str) -> bool {
        self.waypoints.iter().any(|w| w.id == waypoint_id)
    }

    pub fn add_waypoint(&mut self, waypoint: Waypoint) -> AddOutcome {
        if self.contains(&waypoint.id) {
            tracing::debug!("Waypoint '{}' already in route, ignoring", waypoint.id);
            return AddOutcome::Duplicate;
        }

        self.waypoints.push(waypoint);
        self.invalidate();
        AddOutcome::Added(self.ticket())
    }

    pub fn remove_waypoint(&mut self, index: usize) -> Result<(Waypoint, Option<RecalcTicket>)> {
        self.check_index(index)?;
        let removed = self.waypoints.remove(index);
        self.invalidate();
        Ok((removed, self.ticket()))
    }

    /// Move the waypoint at `from` so that it ends up at position `to`.
    pub fn move_waypoint(&mut self, from: usize, to: usize) -> Result<Option<RecalcTicket>> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(None);
        }

        let waypoint = self.waypoints.remove(from);
        self.waypoints.insert(to, waypoint);
        self.invalidate();
        Ok(self.ticket())
    }

    /// Replace the whole waypoint list, e.g. after reordering or loading a
    /// saved route.
    pub fn replace_waypoints(&mut self, waypoints: Vec<Waypoint>) -> Result<Option<RecalcTicket>> {
        let mut seen = HashSet::new();
        if let Some(dup) = waypoints.iter().find(|w| !seen.insert(w.id.as_str())) {
            return Err(AppError::InvalidRequest(format!(
                "duplicate waypoint id '{}'",
                dup.id
            )));
        }

        self.waypoints = waypoints;
        self.invalidate();
        Ok(self.ticket())
    }

    pub fn set_transport_mode(&mut self, mode: TransportMode) -> Option<RecalcTicket> {
        self.mode = mode;
        self.invalidate();
        self.ticket()
    }

    /// Back to `Empty`. The transport mode is kept.
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.invalidate();
    }

    /// Store a computed route if it belongs to the current generation.
    /// Returns whether the result was applied.
    pub fn apply_result(&mut self, generation: u64, result: RouteResult) -> bool {
        if generation != self.generation || self.waypoints.len() < 2 {
            tracing::debug!(
                ticket = generation,
                current = self.generation,
                "Discarding stale route result"
            );
            return false;
        }

        self.result = Some(result);
        self.pending = false;
        true
    }

    pub fn view(&self) -> RouteView {
        let result = self.result.as_ref();
        RouteView {
            state: self.state(),
            mode: self.mode,
            waypoints: self.waypoints.clone(),
            distance_m: result.map(|r| r.distance_m),
            duration_s: result.map(|r| r.duration_s),
            geometry: result.map(|r| r.geometry.clone()).unwrap_or_default(),
            legs: result.map(|r| r.legs.clone()).unwrap_or_default(),
            is_fallback: result.is_some_and(|r| r.is_fallback),
            bounds: Bounds::enclosing(
                &self
                    .waypoints
                    .iter()
                    .map(|w| w.coordinates)
                    .collect::<Vec<_>>(),
            ),
            generation: self.generation,
        }
    }

    /// Copy of the route for saving or exporting. Stats that are not yet
    /// computed are reported as zero.
    pub fn snapshot(&self, name: &str, description: Option<String>) -> RouteSnapshot {
        let result = self.result.as_ref();
        RouteSnapshot {
            name: name.to_string(),
            description,
            waypoints: self.waypoints.clone(),
            distance_m: result.map_or(0.0, |r| r.distance_m),
            duration_s: result.map_or(0.0, |r| r.duration_s),
            mode: self.mode,
            geometry: result.map(|r| r.geometry.clone()).unwrap_or_default(),
            is_fallback: result.is_some_and(|r| r.is_fallback),
        }
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.result = None;
        self.pending = self.waypoints.len() >= 2;
    }

    fn ticket(&self) -> Option<RecalcTicket> {
        if self.waypoints.len() < 2 {
            return None;
        }
        Some(RecalcTicket {
            generation: self.generation,
            waypoints: self.waypoints.iter().map(|w| w.coordinates).collect(),
            mode: self.mode,
        })
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.waypoints.len() {
            return Err(AppError::InvalidRequest(format!(
                "waypoint index {} out of range (route has {} waypoints)",
                index,
                self.waypoints.len()
            )));
        }
        Ok(())
    }
}
