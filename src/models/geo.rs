use crate::constants::{ICELAND_EAST, ICELAND_NORTH, ICELAND_SOUTH, ICELAND_WEST};
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// Rectangular region in geographic coordinates.
///
/// Containment is inclusive on every edge. Regions crossing the antimeridian
/// are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

pub const ICELAND_BOUNDS: Bounds = Bounds {
    north: ICELAND_NORTH,
    south: ICELAND_SOUTH,
    east: ICELAND_EAST,
    west: ICELAND_WEST,
};

impl Bounds {
    pub fn contains(&self, point: &Coordinates) -> bool {
        point.lat <= self.north
            && point.lat >= self.south
            && point.lng <= self.east
            && point.lng >= self.west
    }

    /// Smallest bounds enclosing every point, or `None` for an empty slice.
    pub fn enclosing(points: &[Coordinates]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Bounds {
            north: first.lat,
            south: first.lat,
            east: first.lng,
            west: first.lng,
        };

        for p in &points[1..] {
            bounds.north = bounds.north.max(p.lat);
            bounds.south = bounds.south.min(p.lat);
            bounds.east = bounds.east.max(p.lng);
            bounds.west = bounds.west.min(p.lng);
        }

        Some(bounds)
    }
}

/// Advisory check used to flag POIs or waypoints outside the covered region.
pub fn is_in_iceland(point: &Coordinates) -> bool {
    ICELAND_BOUNDS.contains(point)
}

pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}
