use crate::constants::*;
use crate::models::TransportMode;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// SQLite URL for saved routes. Falls back to an in-memory store when unset.
    pub database_url: Option<String>,
    pub routing_base_url: String,
    pub routing_timeout_secs: u64,
    pub planner: PlannerConfig,
}

/// Coefficients for the local route approximation used when the routing
/// service cannot answer.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Road distance over straight-line distance
    pub road_factor: f64,
    pub driving_speed_kmh: f64,
    pub cycling_speed_kmh: f64,
    pub walking_speed_kmh: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            road_factor: DEFAULT_ROAD_FACTOR,
            driving_speed_kmh: DEFAULT_DRIVING_SPEED_KMH,
            cycling_speed_kmh: DEFAULT_CYCLING_SPEED_KMH,
            walking_speed_kmh: DEFAULT_WALKING_SPEED_KMH,
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let config = Self {
            road_factor: env::var("PLANNER_ROAD_FACTOR")
                .unwrap_or_else(|_| defaults.road_factor.to_string())
                .parse()
                .map_err(|_| "Invalid PLANNER_ROAD_FACTOR")?,

            driving_speed_kmh: env::var("PLANNER_DRIVING_SPEED_KMH")
                .unwrap_or_else(|_| defaults.driving_speed_kmh.to_string())
                .parse()
                .map_err(|_| "Invalid PLANNER_DRIVING_SPEED_KMH")?,

            cycling_speed_kmh: env::var("PLANNER_CYCLING_SPEED_KMH")
                .unwrap_or_else(|_| defaults.cycling_speed_kmh.to_string())
                .parse()
                .map_err(|_| "Invalid PLANNER_CYCLING_SPEED_KMH")?,

            walking_speed_kmh: env::var("PLANNER_WALKING_SPEED_KMH")
                .unwrap_or_else(|_| defaults.walking_speed_kmh.to_string())
                .parse()
                .map_err(|_| "Invalid PLANNER_WALKING_SPEED_KMH")?,
        };

        if !config.road_factor.is_finite() || config.road_factor < 1.0 {
            return Err("PLANNER_ROAD_FACTOR must be a finite number of at least 1.0".to_string());
        }
        for mode in [
            TransportMode::Driving,
            TransportMode::Cycling,
            TransportMode::Walking,
        ] {
            let speed = config.speed_kmh(mode);
            if !speed.is_finite() || speed <= 0.0 {
                return Err(format!("Average speed for {} must be a positive finite number", mode));
            }
        }

        Ok(config)
    }

    /// Average speed assumed for a mode when estimating durations locally
    pub fn speed_kmh(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Driving => self.driving_speed_kmh,
            TransportMode::Cycling => self.cycling_speed_kmh,
            TransportMode::Walking => self.walking_speed_kmh,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let routing_timeout_secs: u64 = env::var("ROUTING_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_ROUTING_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| "Invalid ROUTING_TIMEOUT_SECS")?;

        if !(1..=60).contains(&routing_timeout_secs) {
            return Err("ROUTING_TIMEOUT_SECS must be between 1 and 60 seconds".to_string());
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            routing_base_url: env::var("ROUTING_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_ROUTING_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            routing_timeout_secs,
            planner: PlannerConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn routing_timeout(&self) -> Duration {
        Duration::from_secs(self.routing_timeout_secs)
    }
}
