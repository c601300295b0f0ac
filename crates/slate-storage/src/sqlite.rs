//! SQLite-backed page store.
//!
//! Pages live in a single `pages` table. Timestamps are stored as RFC 3339
//! text and identifiers as UUID text, so rows stay readable with plain
//! `sqlite3` tooling.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slate_pages::{Page, PageId};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use crate::store::{PageStore, StoreError};

/// Schema bootstrap, applied on connect.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS pages (
    id               TEXT PRIMARY KEY,
    slug             TEXT NOT NULL,
    title            TEXT NOT NULL,
    content          TEXT,
    css              TEXT,
    js               TEXT,
    meta_title       TEXT,
    meta_description TEXT,
    meta_keywords    TEXT,
    host             TEXT,
    locale           TEXT,
    homepage         INTEGER NOT NULL DEFAULT 0,
    enabled          INTEGER NOT NULL DEFAULT 0,
    deleted_at       TEXT,
    parent_id        TEXT,
    created_at       TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_pages_parent ON pages(parent_id);
";

/// SQLite page store.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to a SQLite database and bootstrap the schema.
    ///
    /// Accepts the usual sqlx URLs (`sqlite:pages.db`, `sqlite::memory:`).
    /// File databases are created if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the URL is invalid, the
    /// connection fails, or the schema cannot be applied.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        // A single connection keeps in-memory databases coherent; file
        // databases do not need more for an administrative write load.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// The underlying pool, for callers that need raw queries (tests).
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PageStore for SqliteStore {
    async fn load_pages(&self) -> Result<Vec<Page>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, slug, title, content, css, js, meta_title, meta_description, \
             meta_keywords, host, locale, homepage, enabled, deleted_at, parent_id, created_at \
             FROM pages WHERE deleted_at IS NULL ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(page_from_row).collect()
    }

    async fn save_page(&self, page: &Page) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO pages (id, slug, title, content, css, js, meta_title, \
             meta_description, meta_keywords, host, locale, homepage, enabled, \
             deleted_at, parent_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET \
             slug = excluded.slug, title = excluded.title, content = excluded.content, \
             css = excluded.css, js = excluded.js, meta_title = excluded.meta_title, \
             meta_description = excluded.meta_description, \
             meta_keywords = excluded.meta_keywords, host = excluded.host, \
             locale = excluded.locale, homepage = excluded.homepage, \
             enabled = excluded.enabled, deleted_at = excluded.deleted_at, \
             parent_id = excluded.parent_id",
        )
        .bind(page.id.as_uuid().to_string())
        .bind(&page.slug)
        .bind(&page.title)
        .bind(page.content.as_deref())
        .bind(page.css.as_deref())
        .bind(page.js.as_deref())
        .bind(page.meta_title.as_deref())
        .bind(page.meta_description.as_deref())
        .bind(page.meta_keywords.as_deref())
        .bind(page.host.as_deref())
        .bind(page.locale.as_deref())
        .bind(page.homepage)
        .bind(page.enabled)
        .bind(page.deleted_at.map(|at| at.to_rfc3339()))
        .bind(page.parent.map(|id| id.as_uuid().to_string()))
        .bind(page.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn soft_delete(&self, id: PageId, at: DateTime<Utc>) -> Result<(), StoreError> {
        sqlx::query("UPDATE pages SET deleted_at = ? WHERE id = ?")
            .bind(at.to_rfc3339())
            .bind(id.as_uuid().to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn remove_page(&self, id: PageId) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let id = id.as_uuid().to_string();
        sqlx::query("UPDATE pages SET parent_id = NULL WHERE parent_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

/// Map a row back to a [`Page`].
fn page_from_row(row: &SqliteRow) -> Result<Page, StoreError> {
    let id: String = row.try_get("id")?;

    let corrupt = |message: String| StoreError::Corrupt {
        id: id.clone(),
        message,
    };

    let uuid = Uuid::parse_str(&id).map_err(|e| corrupt(format!("invalid id: {e}")))?;
    let parent: Option<String> = row.try_get("parent_id")?;
    let parent = parent
        .map(|p| Uuid::parse_str(&p).map(PageId::from_uuid))
        .transpose()
        .map_err(|e| corrupt(format!("invalid parent id: {e}")))?;
    let created_at: String = row.try_get("created_at")?;
    let created_at = parse_timestamp(&created_at)
        .map_err(|e| corrupt(format!("invalid created_at: {e}")))?;
    let deleted_at: Option<String> = row.try_get("deleted_at")?;
    let deleted_at = deleted_at
        .map(|at| parse_timestamp(&at))
        .transpose()
        .map_err(|e| corrupt(format!("invalid deleted_at: {e}")))?;

    Ok(Page {
        id: PageId::from_uuid(uuid),
        slug: row.try_get("slug")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        css: row.try_get("css")?,
        js: row.try_get("js")?,
        meta_title: row.try_get("meta_title")?,
        meta_description: row.try_get("meta_description")?,
        meta_keywords: row.try_get("meta_keywords")?,
        host: row.try_get("host")?,
        locale: row.try_get("locale")?,
        homepage: row.try_get("homepage")?,
        enabled: row.try_get("enabled")?,
        deleted_at,
        parent,
        created_at,
    })
}

/// Parse an RFC 3339 timestamp into UTC.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|at| at.with_timezone(&Utc))
}
