use crate::config::PlannerConfig;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, RouteLeg, RouteResult, TransportMode};
use async_trait::async_trait;
use std::sync::Arc;

/// A source of road-network routes.
#[async_trait]
pub trait RoutingBackend: Send + Sync {
    /// Route through `waypoints` in order. Any error is treated as the
    /// service being unavailable.
    async fn route(&self, waypoints: &[Coordinates], mode: TransportMode) -> Result<RouteResult>;

    fn name(&self) -> &'static str;
}

/// Computes routes with the routing backend and degrades to a straight-line
/// estimate when it cannot answer.
#[derive(Clone)]
pub struct RouteCalculator {
    backend: Arc<dyn RoutingBackend>,
    config: PlannerConfig,
}

impl RouteCalculator {
    pub fn new(backend: Arc<dyn RoutingBackend>, config: PlannerConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// One attempt against the backend, then the local approximation.
    /// Fails only when fewer than two waypoints are supplied.
    pub async fn compute_route(
        &self,
        waypoints: &[Coordinates],
        mode: TransportMode,
    ) -> Result<RouteResult> {
        if waypoints.len() < 2 {
            return Err(AppError::InsufficientWaypoints(waypoints.len()));
        }

        match self.backend.route(waypoints, mode).await {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::warn!(
                    backend = self.backend.name(),
                    waypoints = waypoints.len(),
                    mode = %mode,
                    "Routing backend failed, using straight-line estimate: {}",
                    e
                );
                Ok(self.fallback_route(waypoints, mode))
            }
        }
    }

    /// Straight-line distance between consecutive waypoints scaled by the
    /// road factor, timed at the mode's average speed.
    pub fn fallback_route(&self, waypoints: &[Coordinates], mode: TransportMode) -> RouteResult {
        let speed_kmh = self.config.speed_kmh(mode);

        let legs: Vec<RouteLeg> = waypoints
            .windows(2)
            .map(|pair| {
                let km = pair[0].distance_to(&pair[1]) * self.config.road_factor;
                RouteLeg {
                    distance_m: km * 1000.0,
                    duration_s: km / speed_kmh * 3600.0,
                    steps: Vec::new(),
                }
            })
            .collect();

        RouteResult {
            distance_m: legs.iter().map(|l| l.distance_m).sum(),
            duration_s: legs.iter().map(|l| l.duration_s).sum(),
            geometry: waypoints.to_vec(),
            legs,
            is_fallback: true,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_backends {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Always fails, counting how often it was asked.
    #[derive(Default)]
    pub struct UnavailableBackend {
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl RoutingBackend for UnavailableBackend {
        async fn route(&self, _: &[Coordinates], _: TransportMode) -> Result<RouteResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AppError::RoutingServiceUnavailable(
                "connection refused".to_string(),
            ))
        }

        fn name(&self) -> &'static str {
            "unavailable"
        }
    }

    /// Answers with a fixed distance per kilometer of straight line,
    /// tagging the mode into the duration so tests can tell results apart.
    #[derive(Default)]
    pub struct StubBackend {
        pub calls: AtomicUsize,
    }

    pub fn stub_duration(mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Driving => 100.0,
            TransportMode::Cycling => 200.0,
            TransportMode::Walking => 300.0,
        }
    }

    #[async_trait]
    impl RoutingBackend for StubBackend {
        async fn route(&self, waypoints: &[Coordinates], mode: TransportMode) -> Result<RouteResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RouteResult {
                distance_m: 1000.0 * waypoints.len() as f64,
                duration_s: stub_duration(mode),
                geometry: waypoints.to_vec(),
                legs: vec![],
                is_fallback: false,
            })
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }
}
