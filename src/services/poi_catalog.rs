use crate::error::{AppError, Result};
use crate::models::geo::is_in_iceland;
use crate::models::{Bounds, Coordinates, Poi, PoiCategory};
use std::collections::HashMap;

const EMBEDDED_POIS: &str = include_str!("../../data/pois.json");

/// Filters for catalog queries. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct PoiFilter {
    pub categories: Option<Vec<PoiCategory>>,
    pub search: Option<String>,
    pub bounds: Option<Bounds>,
}

/// Read-only catalog of points of interest, loaded once at startup.
pub struct PoiCatalog {
    pois: Vec<Poi>,
    index: HashMap<String, usize>,
}

impl PoiCatalog {
    /// Catalog shipped with the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_POIS)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let pois: Vec<Poi> = serde_json::from_str(json)
            .map_err(|e| AppError::Internal(format!("Invalid POI catalog: {}", e)))?;
        Self::from_pois(pois)
    }

    pub fn from_pois(pois: Vec<Poi>) -> Result<Self> {
        let mut index = HashMap::with_capacity(pois.len());

        for (i, poi) in pois.iter().enumerate() {
            // Deserialized coordinates bypass Coordinates::new
            Coordinates::new(poi.coordinates.lat, poi.coordinates.lng).map_err(|e| {
                AppError::Internal(format!("POI '{}' has invalid coordinates: {}", poi.id, e))
            })?;

            if index.insert(poi.id.clone(), i).is_some() {
                return Err(AppError::Internal(format!(
                    "Duplicate POI id in catalog: {}",
                    poi.id
                )));
            }

            if !is_in_iceland(&poi.coordinates) {
                tracing::warn!(
                    "POI '{}' ({:.4}, {:.4}) lies outside Iceland",
                    poi.name,
                    poi.coordinates.lat,
                    poi.coordinates.lng
                );
            }
        }

        tracing::debug!("Loaded POI catalog with {} entries", pois.len());

        Ok(PoiCatalog { pois, index })
    }

    pub fn all(&self) -> &[Poi] {
        &self.pois
    }

    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Poi> {
        self.index.get(id).map(|&i| &self.pois[i])
    }

    /// POIs matching every set filter, in catalog order.
    pub fn query(&self, filter: &PoiFilter) -> Vec<Poi> {
        let needle = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        self.pois
            .iter()
            .filter(|poi| match &filter.categories {
                Some(cats) => cats.contains(&poi.category),
                None => true,
            })
            .filter(|poi| match &filter.bounds {
                Some(bounds) => bounds.contains(&poi.coordinates),
                None => true,
            })
            .filter(|poi| match &needle {
                Some(n) => poi.name.to_lowercase().contains(n.as_str()),
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Categories present in the catalog with their POI counts, in
    /// declaration order.
    pub fn categories(&self) -> Vec<(PoiCategory, usize)> {
        PoiCategory::ALL
            .into_iter()
            .map(|cat| (cat, self.pois.iter().filter(|p| p.category == cat).count()))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}
