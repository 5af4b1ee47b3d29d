use crate::models::{Coordinates, HasCoordinates};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PoiCategory {
    // Natural
    Waterfall,
    Glacier,
    Geothermal,
    Volcano,
    Beach,
    Canyon,
    NationalPark,

    // Cultural
    Museum,
    Church,
    Historic,

    // Practical
    Town,
    Viewpoint,
}

impl PoiCategory {
    pub const ALL: [PoiCategory; 12] = [
        PoiCategory::Waterfall,
        PoiCategory::Glacier,
        PoiCategory::Geothermal,
        PoiCategory::Volcano,
        PoiCategory::Beach,
        PoiCategory::Canyon,
        PoiCategory::NationalPark,
        PoiCategory::Museum,
        PoiCategory::Church,
        PoiCategory::Historic,
        PoiCategory::Town,
        PoiCategory::Viewpoint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PoiCategory::Waterfall => "waterfall",
            PoiCategory::Glacier => "glacier",
            PoiCategory::Geothermal => "geothermal",
            PoiCategory::Volcano => "volcano",
            PoiCategory::Beach => "beach",
            PoiCategory::Canyon => "canyon",
            PoiCategory::NationalPark => "national_park",
            PoiCategory::Museum => "museum",
            PoiCategory::Church => "church",
            PoiCategory::Historic => "historic",
            PoiCategory::Town => "town",
            PoiCategory::Viewpoint => "viewpoint",
        }
    }
}

impl fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PoiCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        PoiCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("Invalid POI category: {}", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Poi {
    pub id: String,
    pub name: String,
    pub category: PoiCategory,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl Poi {
    pub fn new(id: &str, name: &str, category: PoiCategory, coordinates: Coordinates) -> Self {
        Poi {
            id: id.to_string(),
            name: name.to_string(),
            category,
            coordinates,
            description: None,
            region: None,
        }
    }
}

impl HasCoordinates for Poi {
    fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}
