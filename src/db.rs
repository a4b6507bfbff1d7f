use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

use crate::{error::StoreError, models::ShortLink, store::LinkStore};

// ── Pool setup ─────────────────────────────────────────────────────────────

/// Open (creating if missing) the SQLite database at `database_url` and run
/// the embedded migrations.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            database_url
                .parse::<SqliteConnectOptions>()?
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal),
        )
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

// ── Store ──────────────────────────────────────────────────────────────────

/// `LinkStore` over the `short_links` table.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkStore for SqliteStore {
    async fn insert(&self, link: &ShortLink) -> Result<(), StoreError> {
        let result =
            sqlx::query("INSERT INTO short_links (id, original_url, created_at) VALUES (?1, ?2, ?3)")
                .bind(&link.id)
                .bind(&link.original_url)
                .bind(link.created_at)
                .execute(&self.pool)
                .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::Conflict(link.id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_all(&self) -> Result<Vec<ShortLink>, StoreError> {
        let links: Vec<ShortLink> = sqlx::query_as(
            "SELECT id, original_url, created_at FROM short_links ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<ShortLink>, StoreError> {
        let link: Option<ShortLink> =
            sqlx::query_as("SELECT id, original_url, created_at FROM short_links WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(link)
    }

    async fn update_original_url(
        &self,
        id: &str,
        original_url: &str,
    ) -> Result<Option<ShortLink>, StoreError> {
        let link: Option<ShortLink> = sqlx::query_as(
            "UPDATE short_links SET original_url = ?1 WHERE id = ?2
             RETURNING id, original_url, created_at",
        )
        .bind(original_url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(link)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let affected = sqlx::query("DELETE FROM short_links WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// A private in-memory database. One connection, since every
    /// `sqlite::memory:` connection would otherwise get its own database.
    async fn test_store() -> SqliteStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        SqliteStore::new(pool)
    }

    fn link(id: &str, url: &str, secs: i64) -> ShortLink {
        ShortLink {
            id: id.into(),
            original_url: url.into(),
            created_at: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn insert_then_get_round_trips_the_record() {
        let store = test_store().await;
        let original = link("abc12345", "http://example.com", 0);
        store.insert(&original).await.unwrap();

        let fetched = store.get_by_id("abc12345").await.unwrap().unwrap();
        assert_eq!(fetched, original);
        assert!(store.get_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_primary_key_is_a_conflict() {
        let store = test_store().await;
        store
            .insert(&link("abc12345", "http://a.com", 0))
            .await
            .unwrap();

        let err = store
            .insert(&link("abc12345", "http://b.com", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_returns_new_url_with_same_identity() {
        let store = test_store().await;
        let original = link("abc12345", "http://example.com", 0);
        store.insert(&original).await.unwrap();

        let updated = store
            .update_original_url("abc12345", "http://example.org")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.original_url, "http://example.org");
        assert_eq!(updated.created_at, original.created_at);

        let missing = store
            .update_original_url("missing1", "http://example.org")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn list_and_delete() {
        let store = test_store().await;
        store.insert(&link("second00", "http://2.com", 10)).await.unwrap();
        store.insert(&link("first000", "http://1.com", 0)).await.unwrap();

        let ids: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, ["first000", "second00"]);

        assert!(store.delete("first000").await.unwrap());
        assert!(!store.delete("first000").await.unwrap());
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }
}
