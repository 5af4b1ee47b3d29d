use crate::error::{AppError, Result};
use crate::models::{RouteSnapshot, RouteUpdate, SavedRoute};
use async_trait::async_trait;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

/// Storage for named routes.
#[async_trait]
pub trait RouteStore: Send + Sync {
    /// Store a validated snapshot and return its new id.
    async fn create(&self, route: &RouteSnapshot) -> Result<Uuid>;

    /// All saved routes, newest first.
    async fn get_all(&self) -> Result<Vec<SavedRoute>>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<SavedRoute>>;

    /// Apply `update` to the route with `id`. Returns the number of rows
    /// changed (0 when the route does not exist).
    async fn update(&self, id: Uuid, update: &RouteUpdate) -> Result<u64>;

    /// Returns the number of rows removed.
    async fn delete(&self, id: Uuid) -> Result<u64>;

    /// Short backend name for health reporting
    fn backend(&self) -> &'static str;
}

pub(super) fn check_snapshot(route: &RouteSnapshot) -> Result<()> {
    route.validate().map_err(AppError::InvalidRequest)
}

pub(super) fn timestamp_now() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| AppError::Internal(format!("Failed to format timestamp: {}", e)))
}
