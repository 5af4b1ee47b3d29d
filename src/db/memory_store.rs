use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::route_store::{check_snapshot, timestamp_now, RouteStore};
use crate::error::Result;
use crate::models::{RouteSnapshot, RouteUpdate, SavedRoute};

struct Entry {
    /// Insertion order, used for newest-first listing
    seq: u64,
    route: SavedRoute,
}

#[derive(Default)]
struct Inner {
    next_seq: u64,
    entries: HashMap<Uuid, Entry>,
}

/// Process-local store used when no database is configured. Contents are
/// lost on restart.
#[derive(Default)]
pub struct MemoryRouteStore {
    inner: RwLock<Inner>,
}

impl MemoryRouteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RouteStore for MemoryRouteStore {
    async fn create(&self, route: &RouteSnapshot) -> Result<Uuid> {
        check_snapshot(route)?;
        let now = timestamp_now()?;
        let id = Uuid::new_v4();

        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.insert(
            id,
            Entry {
                seq,
                route: SavedRoute {
                    id,
                    route: route.clone(),
                    created_at: now.clone(),
                    updated_at: now,
                },
            },
        );

        tracing::debug!("Stored route '{}' as {}", route.name, id);
        Ok(id)
    }

    async fn get_all(&self) -> Result<Vec<SavedRoute>> {
        let inner = self.inner.read().await;
        let mut entries: Vec<&Entry> = inner.entries.values().collect();
        entries.sort_by(|a, b| b.seq.cmp(&a.seq));
        Ok(entries.into_iter().map(|e| e.route.clone()).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<SavedRoute>> {
        Ok(self
            .inner
            .read()
            .await
            .entries
            .get(&id)
            .map(|e| e.route.clone()))
    }

    async fn update(&self, id: Uuid, update: &RouteUpdate) -> Result<u64> {
        let mut inner = self.inner.write().await;
        let Some(entry) = inner.entries.get_mut(&id) else {
            return Ok(0);
        };

        let next = update.apply_to(&entry.route.route);
        check_snapshot(&next)?;

        entry.route.route = next;
        entry.route.updated_at = timestamp_now()?;
        Ok(1)
    }

    async fn delete(&self, id: Uuid) -> Result<u64> {
        let removed = self.inner.write().await.entries.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
