use crate::models::{Coordinates, HasCoordinates, Poi};
use serde::{Deserialize, Serialize};

/// A stop on a planned route. Position in the containing list is the visit
/// order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Waypoint {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub category: String,
}

impl Waypoint {
    pub fn new(id: &str, name: &str, coordinates: Coordinates, category: &str) -> Self {
        Waypoint {
            id: id.to_string(),
            name: name.to_string(),
            coordinates,
            category: category.to_string(),
        }
    }
}

impl From<&Poi> for Waypoint {
    fn from(poi: &Poi) -> Self {
        Waypoint {
            id: poi.id.clone(),
            name: poi.name.clone(),
            coordinates: poi.coordinates,
            category: poi.category.to_string(),
        }
    }
}

impl HasCoordinates for Waypoint {
    fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}
