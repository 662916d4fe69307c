//! Repository trait for blog entry data access.

use crate::domain::cursor::EntryPosition;
use crate::domain::entities::{Entry, EntryPatch, NewEntry};
use crate::error::AppError;
use async_trait::async_trait;

/// One page of a keyset-paginated listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPage {
    pub entries: Vec<Entry>,
    /// Position of the last entry, present only when the page is full.
    pub next: Option<EntryPosition>,
}

impl EntryPage {
    /// Builds a page from up to `limit` entries ordered `published DESC, id DESC`.
    pub fn from_entries(entries: Vec<Entry>, limit: i64) -> Self {
        let full = i64::try_from(entries.len()).is_ok_and(|n| n == limit) && limit > 0;
        let next = if full {
            entries.last().map(|e| EntryPosition {
                published: e.published,
                id: e.id,
            })
        } else {
            None
        };
        Self { entries, next }
    }
}

/// Repository interface for managing blog entries.
///
/// Listing queries never return hidden entries and are ordered by
/// `published` descending, ties broken by `id` descending.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgEntryRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryEntryRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Persists a new entry, stamping `published` and `updated`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_entry: NewEntry) -> Result<Entry, AppError>;

    /// Finds an entry by its store key.
    async fn get(&self, id: i64) -> Result<Option<Entry>, AppError>;

    /// Applies a patch and stamps `updated`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry has this id.
    async fn update(&self, id: i64, patch: EntryPatch) -> Result<Entry, AppError>;

    /// Removes an entry. Returns `Ok(false)` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Lists visible entries after `after` (exclusive), newest first.
    async fn list_published(
        &self,
        limit: i64,
        after: Option<EntryPosition>,
    ) -> Result<EntryPage, AppError>;

    /// Finds an entry by slug, hidden or not.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Entry>, AppError>;

    /// Lists visible entries carrying `tag`, newest first.
    async fn find_by_tag(&self, tag: &str, limit: i64) -> Result<Vec<Entry>, AppError>;

    /// Counts all entries, hidden included.
    async fn count(&self) -> Result<i64, AppError>;
}
