use crate::constants::EARTH_RADIUS_KM;
use crate::models::geo::to_radians;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(Coordinates { lat, lng })
    }

    /// Great-circle distance using the haversine formula.
    /// Returns distance in kilometers
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let lat1_rad = to_radians(self.lat);
        let lat2_rad = to_radians(other.lat);
        let delta_lat = to_radians(other.lat - self.lat);
        let delta_lng = to_radians(other.lng - self.lng);

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// "lng,lat" as expected in routing service URLs
    pub fn to_lng_lat(&self) -> String {
        format!("{},{}", self.lng, self.lat)
    }
}

/// Anything that sits at a point on the map.
pub trait HasCoordinates {
    fn coordinates(&self) -> Coordinates;
}

impl HasCoordinates for Coordinates {
    fn coordinates(&self) -> Coordinates {
        *self
    }
}

/// Sum of haversine distances between consecutive points, in kilometers.
pub fn path_length_km(points: &[Coordinates]) -> f64 {
    points
        .windows(2)
        .map(|pair| pair[0].distance_to(&pair[1]))
        .sum()
}
