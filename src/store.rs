use std::sync::Arc;

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};

use crate::{error::StoreError, models::ShortLink};

/// Persistence for [`ShortLink`] records. Every call is an independent unit
/// of work; concurrent updates to the same id are last-write-wins.
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Persist a new record. Fails with `Conflict` if the id is taken.
    async fn insert(&self, link: &ShortLink) -> Result<(), StoreError>;

    /// Every record. Ordering is not part of the contract.
    async fn list_all(&self) -> Result<Vec<ShortLink>, StoreError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Replace `original_url` in place and return the updated record.
    async fn update_original_url(
        &self,
        id: &str,
        original_url: &str,
    ) -> Result<Option<ShortLink>, StoreError>;

    /// Returns `true` if a record was removed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

/// In-process store backed by a DashMap. Used by tests and by
/// `STORE_BACKEND=memory`; nothing survives a restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, ShortLink>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn insert(&self, link: &ShortLink) -> Result<(), StoreError> {
        match self.inner.entry(link.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(link.id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(link.clone());
                Ok(())
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<ShortLink>, StoreError> {
        let mut links: Vec<ShortLink> = self.inner.iter().map(|e| e.value().clone()).collect();
        links.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(links)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<ShortLink>, StoreError> {
        Ok(self.inner.get(id).map(|e| e.value().clone()))
    }

    async fn update_original_url(
        &self,
        id: &str,
        original_url: &str,
    ) -> Result<Option<ShortLink>, StoreError> {
        Ok(self.inner.get_mut(id).map(|mut e| {
            e.original_url = original_url.to_owned();
            e.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.inner.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn link(id: &str, url: &str) -> ShortLink {
        ShortLink {
            id: id.into(),
            original_url: url.into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let store = MemoryStore::new();
        store.insert(&link("abc12345", "http://a.com")).await.unwrap();

        let err = store
            .insert(&link("abc12345", "http://b.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(id) if id == "abc12345"));

        // the first record is untouched
        let stored = store.get_by_id("abc12345").await.unwrap().unwrap();
        assert_eq!(stored.original_url, "http://a.com");
    }

    #[tokio::test]
    async fn update_keeps_id_and_created_at() {
        let store = MemoryStore::new();
        let original = link("abc12345", "http://example.com");
        store.insert(&original).await.unwrap();

        let updated = store
            .update_original_url("abc12345", "http://example.org")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.original_url, "http://example.org");
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);

        assert!(store
            .update_original_url("missing", "http://x.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn delete_and_list() {
        let store = MemoryStore::new();
        store.insert(&link("one", "http://1.com")).await.unwrap();
        store.insert(&link("two", "http://2.com")).await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 2);

        assert!(store.delete("one").await.unwrap());
        assert!(!store.delete("one").await.unwrap());
        assert!(store.get_by_id("one").await.unwrap().is_none());
        assert_eq!(store.len(), 1);
    }
}
