use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use super::route_store::{check_snapshot, timestamp_now, RouteStore};
use crate::error::{AppError, Result};
use crate::models::{RouteSnapshot, RouteUpdate, SavedRoute, TransportMode};

#[derive(sqlx::FromRow)]
struct SavedRouteRow {
    id: String,
    name: String,
    description: Option<String>,
    mode: String,
    waypoints: String, // JSON array
    geometry: String,  // JSON array
    distance_m: f64,
    duration_s: f64,
    is_fallback: bool,
    created_at: String,
    updated_at: String,
}

impl SavedRouteRow {
    fn into_saved_route(self) -> Result<SavedRoute> {
        let id = self
            .id
            .parse::<Uuid>()
            .map_err(|e| AppError::Persistence(format!("Invalid route id '{}': {}", self.id, e)))?;

        let mode = self.mode.parse::<TransportMode>().unwrap_or_else(|e| {
            tracing::warn!("{} for saved route {}, defaulting to driving", e, id);
            TransportMode::Driving
        });

        let waypoints = serde_json::from_str(&self.waypoints).map_err(|e| {
            AppError::Persistence(format!("Corrupt waypoints for route {}: {}", id, e))
        })?;
        let geometry = serde_json::from_str(&self.geometry).map_err(|e| {
            AppError::Persistence(format!("Corrupt geometry for route {}: {}", id, e))
        })?;

        Ok(SavedRoute {
            id,
            route: RouteSnapshot {
                name: self.name,
                description: self.description,
                waypoints,
                distance_m: self.distance_m,
                duration_s: self.duration_s,
                mode,
                geometry,
                is_fallback: self.is_fallback,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize route: {}", e)))
}

const SELECT_COLUMNS: &str = "SELECT id, name, description, mode, waypoints, geometry,
        distance_m, duration_s, is_fallback, created_at, updated_at
 FROM saved_routes";

pub struct SqliteRouteStore {
    pool: SqlitePool,
}

impl SqliteRouteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `database_url` and make
    /// sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(5));
        // Every connection to an in-memory database is a separate database,
        // and it vanishes when its connection closes
        if database_url.contains(":memory:") {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            pool_options = pool_options.max_connections(5);
        }

        let pool = pool_options.connect_with(options).await?;

        Self::create_schema(&pool).await?;
        Ok(Self::new(pool))
    }

    /// Create the `saved_routes` table. Idempotent.
    pub async fn create_schema(pool: &SqlitePool) -> std::result::Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS saved_routes (
                rowid INTEGER PRIMARY KEY,
                id TEXT UNIQUE NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                mode TEXT NOT NULL,
                waypoints TEXT NOT NULL,
                geometry TEXT NOT NULL DEFAULT '[]',
                distance_m REAL NOT NULL,
                duration_s REAL NOT NULL,
                is_fallback INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl RouteStore for SqliteRouteStore {
    async fn create(&self, route: &RouteSnapshot) -> Result<Uuid> {
        check_snapshot(route)?;
        let id = Uuid::new_v4();
        let now = timestamp_now()?;

        sqlx::query(
            "INSERT INTO saved_routes (id, name, description, mode, waypoints, geometry,
                                       distance_m, duration_s, is_fallback, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
        )
        .bind(id.to_string())
        .bind(&route.name)
        .bind(&route.description)
        .bind(route.mode.to_string())
        .bind(to_json(&route.waypoints)?)
        .bind(to_json(&route.geometry)?)
        .bind(route.distance_m)
        .bind(route.duration_s)
        .bind(route.is_fallback)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Stored route '{}' as {}", route.name, id);
        Ok(id)
    }

    async fn get_all(&self) -> Result<Vec<SavedRoute>> {
        let rows: Vec<SavedRouteRow> =
            sqlx::query_as(&format!("{} ORDER BY rowid DESC", SELECT_COLUMNS))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(SavedRouteRow::into_saved_route).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<SavedRoute>> {
        let row: Option<SavedRouteRow> =
            sqlx::query_as(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(SavedRouteRow::into_saved_route).transpose()
    }

    async fn update(&self, id: Uuid, update: &RouteUpdate) -> Result<u64> {
        // Take the write lock before reading so concurrent updates serialize
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let row: Option<SavedRouteRow> =
            sqlx::query_as(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
                .bind(id.to_string())
                .fetch_optional(&mut *tx)
                .await?;
        let Some(current) = row.map(SavedRouteRow::into_saved_route).transpose()? else {
            return Ok(0);
        };

        let next = update.apply_to(&current.route);
        check_snapshot(&next)?;

        let result = sqlx::query(
            "UPDATE saved_routes
             SET name = ?2, description = ?3, mode = ?4, waypoints = ?5, geometry = ?6,
                 distance_m = ?7, duration_s = ?8, is_fallback = ?9, updated_at = ?10
             WHERE id = ?1",
        )
        .bind(id.to_string())
        .bind(&next.name)
        .bind(&next.description)
        .bind(next.mode.to_string())
        .bind(to_json(&next.waypoints)?)
        .bind(to_json(&next.geometry)?)
        .bind(next.distance_m)
        .bind(next.duration_s)
        .bind(next.is_fallback)
        .bind(timestamp_now()?)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM saved_routes WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
#[path = "sqlite_store_tests.rs"]
mod sqlite_store_tests;
