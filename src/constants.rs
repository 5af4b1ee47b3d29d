//! Stable application-wide constants.
//!
//! Values here are structural invariants, algorithm coefficients, and default
//! fallbacks for env-var-based configuration. Tuning knobs that operators may
//! want to adjust live in [`PlannerConfig`](crate::config::PlannerConfig).

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Routing service ---

/// Public OSRM demo server. Overridden by `ROUTING_BASE_URL`.
pub const DEFAULT_ROUTING_BASE_URL: &str = "https://router.project-osrm.org";
/// Request timeout before the calculator gives up and falls back.
/// Overridden by `ROUTING_TIMEOUT_SECS` (validated 1..=60).
pub const DEFAULT_ROUTING_TIMEOUT_SECS: u64 = 8;
/// OSRM rejects requests with more coordinates than this on the demo server.
pub const MAX_ROUTING_WAYPOINTS: usize = 100;

// --- Geo math ---

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// --- Fallback route approximation ---

/// Ratio of real road distance to straight-line distance.
pub const DEFAULT_ROAD_FACTOR: f64 = 1.3;
/// Average speeds (km/h) used only when the routing service is unavailable.
pub const DEFAULT_DRIVING_SPEED_KMH: f64 = 70.0;
pub const DEFAULT_CYCLING_SPEED_KMH: f64 = 15.0;
pub const DEFAULT_WALKING_SPEED_KMH: f64 = 5.0;

// --- Iceland bounding box (degrees) ---

pub const ICELAND_NORTH: f64 = 66.6;
pub const ICELAND_SOUTH: f64 = 63.3;
pub const ICELAND_EAST: f64 = -13.4;
pub const ICELAND_WEST: f64 = -24.6;

// --- Saved routes ---

/// Maximum length of a saved route name.
pub const MAX_ROUTE_NAME_LEN: usize = 120;
