use crate::constants::MAX_ROUTE_NAME_LEN;
use crate::models::{Coordinates, Waypoint};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Driving,
    Cycling,
    Walking,
}

impl TransportMode {
    /// Returns the OSRM profile name for this transport mode
    pub fn osrm_profile(&self) -> &'static str {
        match self {
            TransportMode::Driving => "driving",
            TransportMode::Cycling => "cycling",
            TransportMode::Walking => "foot",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Driving => write!(f, "driving"),
            TransportMode::Cycling => write!(f, "cycling"),
            TransportMode::Walking => write!(f, "walking"),
        }
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "driving" | "drive" | "car" => Ok(TransportMode::Driving),
            "cycling" | "bike" | "bicycle" => Ok(TransportMode::Cycling),
            "walking" | "walk" | "foot" => Ok(TransportMode::Walking),
            _ => Err(format!("Invalid transport mode: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteStep {
    pub instruction: String,
    /// Road or path name, empty when unnamed
    #[serde(default)]
    pub name: String,
    pub distance_m: f64,
    pub duration_s: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteLeg {
    pub distance_m: f64,
    pub duration_s: f64,
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

/// Outcome of a route computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteResult {
    pub distance_m: f64,
    pub duration_s: f64,
    pub geometry: Vec<Coordinates>,
    pub legs: Vec<RouteLeg>,
    /// Computed locally because the routing service could not answer
    pub is_fallback: bool,
}

impl RouteResult {
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    pub fn duration_minutes(&self) -> u32 {
        (self.duration_s / 60.0).round() as u32
    }
}

/// Lifecycle of the route under construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RouteState {
    /// No waypoints
    Empty,
    /// A single waypoint, nothing to compute
    Incomplete,
    /// Two or more waypoints, a computation is outstanding
    Pending,
    /// Two or more waypoints with distance and duration available
    Ready,
}

/// Self-consistent copy of a route handed to persistence and export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteSnapshot {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub waypoints: Vec<Waypoint>,
    pub distance_m: f64,
    pub duration_s: f64,
    pub mode: TransportMode,
    #[serde(default)]
    pub geometry: Vec<Coordinates>,
    #[serde(default)]
    pub is_fallback: bool,
}

impl RouteSnapshot {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.name.chars().count() > MAX_ROUTE_NAME_LEN {
            return Err(format!(
                "name must be at most {} characters",
                MAX_ROUTE_NAME_LEN
            ));
        }
        if !self.distance_m.is_finite() || self.distance_m < 0.0 {
            return Err("distance_m must be a non-negative number".to_string());
        }
        if !self.duration_s.is_finite() || self.duration_s < 0.0 {
            return Err("duration_s must be a non-negative number".to_string());
        }

        if self.waypoints.is_empty() {
            return Err("route must have at least one waypoint".to_string());
        }

        let mut seen = HashSet::new();
        for wp in &self.waypoints {
            if wp.id.trim().is_empty() {
                return Err("waypoint id must not be empty".to_string());
            }
            if !seen.insert(wp.id.as_str()) {
                return Err(format!("duplicate waypoint id '{}'", wp.id));
            }
            Coordinates::new(wp.coordinates.lat, wp.coordinates.lng)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedRoute {
    pub id: Uuid,
    #[serde(flatten)]
    pub route: RouteSnapshot,
    /// RFC 3339
    pub created_at: String,
    /// RFC 3339
    pub updated_at: String,
}

/// Fields to change on a saved route. Absent fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub route: Option<RouteSnapshot>,
}

impl RouteUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.route.is_none()
    }

    /// Produce the snapshot that results from applying this update.
    pub fn apply_to(&self, current: &RouteSnapshot) -> RouteSnapshot {
        let mut next = self.route.clone().unwrap_or_else(|| current.clone());
        // A replaced route keeps its stored name unless one is supplied
        if self.route.is_some() {
            next.name = current.name.clone();
            next.description = current.description.clone();
        }
        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(description) = &self.description {
            next.description = Some(description.clone());
        }
        next
    }
}

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
pub struct AddWaypointRequest {
    #[serde(default)]
    pub poi_id: Option<String>,
    #[serde(default)]
    pub waypoint: Option<Waypoint>,
}

#[derive(Debug, Deserialize)]
pub struct MoveWaypointRequest {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Deserialize)]
pub struct SetModeRequest {
    pub mode: TransportMode,
}

#[derive(Debug, Default, Deserialize)]
pub struct OptimizeRequest {
    #[serde(default)]
    pub start_index: usize,
}

#[derive(Debug, Deserialize)]
pub struct SaveRouteRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
