use crate::error::{AppError, Result};
use crate::models::{Poi, PoiCategory, ICELAND_BOUNDS};
use crate::services::poi_catalog::PoiFilter;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query parameters for browsing the catalog
#[derive(Debug, Default, Deserialize)]
pub struct PoiQueryParams {
    /// Comma-separated list of categories to filter by
    #[serde(default)]
    pub category: Option<String>,
    /// Case-insensitive name search
    #[serde(default)]
    pub q: Option<String>,
    /// Only POIs inside Iceland's bounding box
    #[serde(default)]
    pub in_iceland: bool,
}

impl PoiQueryParams {
    /// Parse categories from comma-separated string
    pub fn parse_categories(&self) -> Result<Option<Vec<PoiCategory>>> {
        match &self.category {
            None => Ok(None),
            Some(cats_str) => {
                let categories: std::result::Result<Vec<PoiCategory>, _> = cats_str
                    .split(',')
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(|s| s.parse::<PoiCategory>())
                    .collect();

                match categories {
                    Ok(cats) if cats.is_empty() => Ok(None),
                    Ok(cats) => Ok(Some(cats)),
                    Err(e) => Err(AppError::InvalidRequest(e)),
                }
            }
        }
    }

    pub fn to_filter(&self) -> Result<PoiFilter> {
        Ok(PoiFilter {
            categories: self.parse_categories()?,
            search: self.q.clone(),
            bounds: self.in_iceland.then_some(ICELAND_BOUNDS),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PoiListResponse {
    pub pois: Vec<Poi>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: PoiCategory,
    pub count: usize,
}

/// GET /pois - Browse the catalog
pub async fn list_pois(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PoiQueryParams>,
) -> Result<Json<PoiListResponse>> {
    let filter = params.to_filter()?;
    let pois = state.catalog.query(&filter);

    tracing::debug!(
        "POI query (category={:?}, q={:?}, in_iceland={}) matched {}",
        params.category,
        params.q,
        params.in_iceland,
        pois.len()
    );

    Ok(Json(PoiListResponse {
        count: pois.len(),
        pois,
    }))
}

/// GET /pois/{id}
pub async fn get_poi(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Poi>> {
    state
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("POI '{}' not found", id)))
}

/// GET /pois/categories - Categories with at least one POI
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<CategoryCount>> {
    Json(
        state
            .catalog
            .categories()
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect(),
    )
}
