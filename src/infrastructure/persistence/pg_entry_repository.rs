//! PostgreSQL implementation of the entry repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::cursor::EntryPosition;
use crate::domain::entities::{Entry, EntryPatch, NewEntry};
use crate::domain::repositories::{EntryPage, EntryRepository};
use crate::error::AppError;

const ENTRY_COLUMNS: &str = "id, author, title, slug, body, tags, published, updated, hidden";

#[derive(FromRow)]
struct EntryRow {
    id: i64,
    author: String,
    title: String,
    slug: String,
    body: String,
    tags: Vec<String>,
    published: DateTime<Utc>,
    updated: DateTime<Utc>,
    hidden: bool,
}

impl From<EntryRow> for Entry {
    fn from(r: EntryRow) -> Self {
        Entry {
            id: r.id,
            author: r.author,
            title: r.title,
            slug: r.slug,
            body: r.body,
            tags: r.tags,
            published: r.published,
            updated: r.updated,
            hidden: r.hidden,
        }
    }
}

/// PostgreSQL repository for entry storage and retrieval.
///
/// Uses SQLx prepared statements for SQL injection protection. Slug uniqueness
/// is backed by the `entries_slug_key` constraint.
pub struct PgEntryRepository {
    pool: Arc<PgPool>,
}

impl PgEntryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryRepository for PgEntryRepository {
    async fn create(&self, new_entry: NewEntry) -> Result<Entry, AppError> {
        let row: EntryRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO entries (author, title, slug, body, tags, hidden)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(&new_entry.author)
        .bind(&new_entry.title)
        .bind(&new_entry.slug)
        .bind(&new_entry.body)
        .bind(&new_entry.tags)
        .bind(new_entry.hidden)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn get(&self, id: i64) -> Result<Option<Entry>, AppError> {
        let row: Option<EntryRow> =
            sqlx::query_as(&format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Entry::from))
    }

    async fn update(&self, id: i64, patch: EntryPatch) -> Result<Entry, AppError> {
        // GREATEST keeps `updated` from ever falling behind `published`.
        let row: Option<EntryRow> = sqlx::query_as(&format!(
            r#"
            UPDATE entries
            SET title   = COALESCE($2, title),
                body    = COALESCE($3, body),
                tags    = COALESCE($4, tags),
                hidden  = COALESCE($5, hidden),
                updated = GREATEST(NOW(), published)
            WHERE id = $1
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.title)
        .bind(patch.body)
        .bind(patch.tags)
        .bind(patch.hidden)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Entry::from)
            .ok_or_else(|| AppError::not_found("Entry not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_published(
        &self,
        limit: i64,
        after: Option<EntryPosition>,
    ) -> Result<EntryPage, AppError> {
        let rows: Vec<EntryRow> = sqlx::query_as(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM entries
            WHERE hidden = FALSE
              AND ($1::timestamptz IS NULL OR (published, id) < ($1, $2))
            ORDER BY published DESC, id DESC
            LIMIT $3
            "#
        ))
        .bind(after.map(|p| p.published))
        .bind(after.map(|p| p.id))
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(EntryPage::from_entries(
            rows.into_iter().map(Entry::from).collect(),
            limit,
        ))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Entry>, AppError> {
        let row: Option<EntryRow> =
            sqlx::query_as(&format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE slug = $1"))
                .bind(slug)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Entry::from))
    }

    async fn find_by_tag(&self, tag: &str, limit: i64) -> Result<Vec<Entry>, AppError> {
        let rows: Vec<EntryRow> = sqlx::query_as(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM entries
            WHERE hidden = FALSE AND $1 = ANY(tags)
            ORDER BY published DESC, id DESC
            LIMIT $2
            "#
        ))
        .bind(tag)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Entry::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM entries")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
