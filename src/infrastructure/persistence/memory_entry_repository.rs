//! In-process entry store.
//!
//! Backs `DATABASE_URL=memory://` and the HTTP integration tests. Ordering,
//! visibility and slug uniqueness match [`super::PgEntryRepository`].

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::cursor::EntryPosition;
use crate::domain::entities::{Entry, EntryPatch, NewEntry};
use crate::domain::repositories::{EntryPage, EntryRepository};
use crate::error::AppError;

#[derive(Default)]
struct Store {
    next_id: i64,
    entries: BTreeMap<i64, Entry>,
}

#[derive(Default)]
pub struct MemoryEntryRepository {
    store: RwLock<Store>,
}

impl MemoryEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn position(entry: &Entry) -> EntryPosition {
    EntryPosition {
        published: entry.published,
        id: entry.id,
    }
}

/// Visible entries sorted `published DESC, id DESC`.
fn visible_newest_first<'a>(entries: impl Iterator<Item = &'a Entry>) -> Vec<&'a Entry> {
    let mut visible: Vec<&Entry> = entries.filter(|e| !e.hidden).collect();
    visible.sort_by(|a, b| (b.published, b.id).cmp(&(a.published, a.id)));
    visible
}

fn take(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}

#[async_trait]
impl EntryRepository for MemoryEntryRepository {
    async fn create(&self, new_entry: NewEntry) -> Result<Entry, AppError> {
        let mut store = self.store.write().await;

        if store.entries.values().any(|e| e.slug == new_entry.slug) {
            return Err(AppError::conflict(
                "Slug already exists",
                json!({ "slug": new_entry.slug }),
            ));
        }

        store.next_id += 1;
        let now = Utc::now();
        let entry = Entry {
            id: store.next_id,
            author: new_entry.author,
            title: new_entry.title,
            slug: new_entry.slug,
            body: new_entry.body,
            tags: new_entry.tags,
            published: now,
            updated: now,
            hidden: new_entry.hidden,
        };
        store.entries.insert(entry.id, entry.clone());

        Ok(entry)
    }

    async fn get(&self, id: i64) -> Result<Option<Entry>, AppError> {
        Ok(self.store.read().await.entries.get(&id).cloned())
    }

    async fn update(&self, id: i64, patch: EntryPatch) -> Result<Entry, AppError> {
        let mut store = self.store.write().await;
        let entry = store
            .entries
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Entry not found", json!({ "id": id })))?;

        patch.apply(entry, Utc::now());
        Ok(entry.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.store.write().await.entries.remove(&id).is_some())
    }

    async fn list_published(
        &self,
        limit: i64,
        after: Option<EntryPosition>,
    ) -> Result<EntryPage, AppError> {
        let store = self.store.read().await;
        let entries = visible_newest_first(store.entries.values())
            .into_iter()
            .filter(|e| match after {
                Some(after) => {
                    let pos = position(e);
                    (pos.published, pos.id) < (after.published, after.id)
                }
                None => true,
            })
            .take(take(limit))
            .cloned()
            .collect();

        Ok(EntryPage::from_entries(entries, limit))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Entry>, AppError> {
        let store = self.store.read().await;
        Ok(store.entries.values().find(|e| e.slug == slug).cloned())
    }

    async fn find_by_tag(&self, tag: &str, limit: i64) -> Result<Vec<Entry>, AppError> {
        let store = self.store.read().await;
        Ok(visible_newest_first(store.entries.values())
            .into_iter()
            .filter(|e| e.has_tag(tag))
            .take(take(limit))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let store = self.store.read().await;
        Ok(i64::try_from(store.entries.len()).unwrap_or(i64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_entry(slug: &str, tags: &[&str], hidden: bool) -> NewEntry {
        NewEntry {
            author: "writer@example.com".to_string(),
            title: slug.to_string(),
            slug: slug.to_string(),
            body: "body".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            hidden,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_slug() {
        let repo = MemoryEntryRepository::new();
        repo.create(new_entry("hello", &[], false)).await.unwrap();

        let err = repo
            .create(new_entry("hello", &[], false))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_published_pages_newest_first() {
        let repo = MemoryEntryRepository::new();
        for slug in ["one", "two", "three"] {
            repo.create(new_entry(slug, &[], false)).await.unwrap();
        }
        repo.create(new_entry("secret", &[], true)).await.unwrap();

        let first = repo.list_published(2, None).await.unwrap();
        let slugs: Vec<_> = first.entries.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["three", "two"]);

        let second = repo.list_published(2, first.next).await.unwrap();
        let slugs: Vec<_> = second.entries.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["one"]);
        assert!(second.next.is_none());
    }

    #[tokio::test]
    async fn test_find_by_tag_skips_hidden() {
        let repo = MemoryEntryRepository::new();
        repo.create(new_entry("a", &["rust"], false)).await.unwrap();
        repo.create(new_entry("b", &["rust"], true)).await.unwrap();
        repo.create(new_entry("c", &["go"], false)).await.unwrap();

        let tagged = repo.find_by_tag("rust", 100).await.unwrap();
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].slug, "a");
    }

    #[tokio::test]
    async fn test_update_keeps_slug_and_published() {
        let repo = MemoryEntryRepository::new();
        let created = repo.create(new_entry("a", &[], false)).await.unwrap();

        let patch = EntryPatch {
            title: Some("Renamed".to_string()),
            ..EntryPatch::default()
        };
        let updated = repo.update(created.id, patch).await.unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.slug, created.slug);
        assert_eq!(updated.published, created.published);
        assert!(updated.updated >= created.updated);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = MemoryEntryRepository::new();
        let err = repo.update(9, EntryPatch::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert!(!repo.delete(9).await.unwrap());
    }
}
