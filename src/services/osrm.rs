use crate::constants::{DEFAULT_ROUTING_BASE_URL, DEFAULT_ROUTING_TIMEOUT_SECS, MAX_ROUTING_WAYPOINTS};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, RouteLeg, RouteResult, RouteStep, TransportMode};
use crate::services::route_calculator::RoutingBackend;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Client for an OSRM-compatible `route/v1` HTTP service.
#[derive(Clone)]
pub struct OsrmClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl OsrmClient {
    pub fn new() -> Self {
        Self::with_config(
            DEFAULT_ROUTING_BASE_URL.to_string(),
            Duration::from_secs(DEFAULT_ROUTING_TIMEOUT_SECS),
        )
    }

    pub fn with_config(base_url: String, timeout: Duration) -> Self {
        OsrmClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn route_url(&self, waypoints: &[Coordinates], mode: TransportMode) -> String {
        // Format coordinates as "lng,lat;lng,lat;..."
        let coordinates_str = waypoints
            .iter()
            .map(Coordinates::to_lng_lat)
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}",
            self.base_url,
            mode.osrm_profile(),
            coordinates_str
        )
    }

    /// Request a route through the waypoints in the given order, with full
    /// GeoJSON geometry and per-leg steps.
    pub async fn get_route(
        &self,
        waypoints: &[Coordinates],
        mode: TransportMode,
    ) -> Result<RouteResult> {
        if waypoints.len() < 2 {
            return Err(AppError::InsufficientWaypoints(waypoints.len()));
        }

        if waypoints.len() > MAX_ROUTING_WAYPOINTS {
            return Err(AppError::RoutingServiceUnavailable(format!(
                "Maximum {} waypoints allowed",
                MAX_ROUTING_WAYPOINTS
            )));
        }

        let url = self.route_url(waypoints, mode);

        tracing::debug!(
            waypoints = waypoints.len(),
            profile = mode.osrm_profile(),
            "Routing request: {} waypoints, profile {}",
            waypoints.len(),
            mode.osrm_profile()
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("overview", "full"),
                ("geometries", "geojson"),
                ("steps", "true"),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::RoutingServiceUnavailable(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::RoutingServiceUnavailable(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                waypoints = waypoints.len(),
                "Routing service HTTP error {}: {}",
                status,
                body
            );
            return Err(AppError::RoutingServiceUnavailable(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let result = parse_route_response(&body)?;

        tracing::debug!(
            distance_km = %format!("{:.2}", result.distance_km()),
            duration_min = result.duration_minutes(),
            path_points = result.geometry.len(),
            "Routing response: {:.2}km, {}min, {} path points",
            result.distance_km(),
            result.duration_minutes(),
            result.geometry.len()
        );

        Ok(result)
    }
}

impl Default for OsrmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoutingBackend for OsrmClient {
    async fn route(&self, waypoints: &[Coordinates], mode: TransportMode) -> Result<RouteResult> {
        self.get_route(waypoints, mode).await
    }

    fn name(&self) -> &'static str {
        "osrm"
    }
}

/// Convert an OSRM `route/v1` response body into a [`RouteResult`].
/// Only the first route is used.
pub fn parse_route_response(body: &str) -> Result<RouteResult> {
    let response: OsrmRouteResponse = serde_json::from_str(body).map_err(|e| {
        AppError::RoutingServiceUnavailable(format!("Failed to parse response: {}", e))
    })?;

    if response.code != "Ok" {
        return Err(AppError::RoutingServiceUnavailable(format!(
            "Routing service answered {}: {}",
            response.code,
            response.message.unwrap_or_default()
        )));
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| AppError::RoutingServiceUnavailable("No routes found".to_string()))?;

    let geometry = route
        .geometry
        .coordinates
        .iter()
        .map(|pair| {
            Coordinates::new(pair[1], pair[0]).map_err(|e| {
                AppError::RoutingServiceUnavailable(format!("Invalid route geometry: {}", e))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let legs = route
        .legs
        .into_iter()
        .map(|leg| RouteLeg {
            distance_m: leg.distance,
            duration_s: leg.duration,
            steps: leg
                .steps
                .into_iter()
                .map(|step| RouteStep {
                    instruction: describe_maneuver(&step.maneuver, &step.name),
                    name: step.name,
                    distance_m: step.distance,
                    duration_s: step.duration,
                })
                .collect(),
        })
        .collect();

    Ok(RouteResult {
        distance_m: route.distance,
        duration_s: route.duration,
        geometry,
        legs,
        is_fallback: false,
    })
}

/// Human-readable instruction for an OSRM maneuver.
fn describe_maneuver(maneuver: &OsrmManeuver, road: &str) -> String {
    let onto = if road.is_empty() {
        String::new()
    } else {
        format!(" onto {}", road)
    };
    let direction = maneuver.modifier.as_deref().unwrap_or("straight");

    match maneuver.maneuver_type.as_str() {
        "depart" if road.is_empty() => "Depart".to_string(),
        "depart" => format!("Head out on {}", road),
        "arrive" => "Arrive at destination".to_string(),
        "roundabout" | "rotary" => match maneuver.exit {
            Some(exit) => format!("Enter the roundabout and take exit {}{}", exit, onto),
            None => format!("Enter the roundabout{}", onto),
        },
        "continue" | "new name" => format!("Continue {}{}", direction, onto),
        "merge" => format!("Merge {}{}", direction, onto),
        "fork" => format!("Keep {} at the fork{}", direction, onto),
        "end of road" => format!("Turn {} at the end of the road{}", direction, onto),
        "on ramp" => format!("Take the ramp{}", onto),
        "off ramp" => format!("Take the exit{}", onto),
        _ if direction == "straight" => format!("Go straight{}", onto),
        _ if direction == "uturn" => format!("Make a U-turn{}", onto),
        _ => format!("Turn {}{}", direction, onto),
    }
}

// OSRM API response types

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64, // meters
    duration: f64, // seconds
    geometry: OsrmGeometry,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>, // [lng, lat] pairs
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    distance: f64,
    duration: f64,
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    distance: f64,
    duration: f64,
    #[serde(default)]
    name: String,
    maneuver: OsrmManeuver,
}

#[derive(Debug, Deserialize)]
struct OsrmManeuver {
    #[serde(rename = "type")]
    maneuver_type: String,
    #[serde(default)]
    modifier: Option<String>,
    #[serde(default)]
    exit: Option<u32>,
}
