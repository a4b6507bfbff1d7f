use std::sync::Arc;

use chrono::Utc;

use crate::{error::StoreError, id::IdGenerator, models::ShortLink, store::LinkStore};

/// How many fresh ids `insert` tries before giving up on a run of conflicts.
pub const MAX_INSERT_ATTEMPTS: usize = 5;

/// Ids that collide with fixed routes and would never redirect.
pub const RESERVED_IDS: &[&str] = &["api", "health"];

/// Short-link operations on top of an injected store and id generator.
#[derive(Clone)]
pub struct LinkService {
    store: Arc<dyn LinkStore>,
    ids: Arc<dyn IdGenerator>,
}

impl LinkService {
    pub fn new(store: Arc<dyn LinkStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// Generate an id and persist `{id, original_url, created_at}`.
    ///
    /// A conflicting id is regenerated up to [`MAX_INSERT_ATTEMPTS`] times;
    /// an existing record is never overwritten. Reserved ids count as
    /// conflicts.
    pub async fn insert(&self, original_url: &str) -> Result<ShortLink, StoreError> {
        let mut last_conflict = None;

        for _ in 0..MAX_INSERT_ATTEMPTS {
            let id = self.ids.generate();
            if RESERVED_IDS.contains(&id.as_str()) {
                tracing::warn!("Short id '{}' is reserved, regenerating", id);
                last_conflict = Some(id);
                continue;
            }

            let link = ShortLink {
                id,
                original_url: original_url.to_owned(),
                created_at: Utc::now(),
            };

            match self.store.insert(&link).await {
                Ok(()) => return Ok(link),
                Err(StoreError::Conflict(id)) => {
                    tracing::warn!("Short id '{}' already taken, regenerating", id);
                    last_conflict = Some(id);
                }
                Err(e) => return Err(e),
            }
        }

        Err(StoreError::Conflict(last_conflict.unwrap_or_default()))
    }

    pub async fn list_all(&self) -> Result<Vec<ShortLink>, StoreError> {
        self.store.list_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<ShortLink, StoreError> {
        self.store.get_by_id(id).await?.ok_or(StoreError::NotFound)
    }

    /// Replace the target URL; `id` and `created_at` are left alone.
    pub async fn update_original_url(
        &self,
        id: &str,
        new_url: &str,
    ) -> Result<ShortLink, StoreError> {
        self.store
            .update_original_url(id, new_url)
            .await?
            .ok_or(StoreError::NotFound)
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    /// The current redirect target for `id`.
    pub async fn resolve(&self, id: &str) -> Result<String, StoreError> {
        self.get_by_id(id).await.map(|link| link.original_url)
    }
}
