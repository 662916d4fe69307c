//! Public listings: home, archive, tag and single-entry lookups.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::BlogSettings;
use crate::domain::cursor::{self, QueryShape};
use crate::domain::entities::Entry;
use crate::domain::repositories::EntryRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// A page of entries plus the cursor of the following page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    pub entries: Vec<Entry>,
    pub next_cursor: Option<String>,
}

/// Cache key of a home page: `home_entries:{cursor|None}:{limit}`.
pub fn home_cache_key(cursor: Option<&str>, limit: i64) -> String {
    format!("home_entries:{}:{}", cursor.unwrap_or("None"), limit)
}

/// Read side of the blog.
///
/// Only the home page goes through the cache. Writers invalidate the canonical
/// first-page key; pages addressed by a cursor are left to expire.
pub struct ListingService<R: EntryRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    settings: Arc<BlogSettings>,
}

impl<R: EntryRepository + ?Sized> ListingService<R> {
    pub fn new(
        repository: Arc<R>,
        cache: Arc<dyn CacheService>,
        settings: Arc<BlogSettings>,
    ) -> Self {
        Self {
            repository,
            cache,
            settings,
        }
    }

    /// Home page, read through the cache.
    ///
    /// An unusable cursor is treated as absent, so it shares the first-page key.
    pub async fn home(&self, cursor: Option<&str>) -> Result<ListingPage, AppError> {
        let shape = QueryShape::visible(self.settings.home_page_size);
        let cursor = cursor.filter(|token| Self::cursor_is_valid(token, &shape));
        let key = home_cache_key(cursor, shape.limit);

        if let Ok(Some(cached)) = self.cache.get(&key).await {
            match serde_json::from_str::<ListingPage>(&cached) {
                Ok(page) => return Ok(page),
                Err(e) => warn!("Discarding unreadable cache value for {}: {}", key, e),
            }
        }

        let page = self.page(&shape, cursor).await?;

        match serde_json::to_string(&page) {
            Ok(serialized) => {
                if let Err(e) = self.cache.set(&key, &serialized, None).await {
                    warn!("Cache SET failed for {}: {}", key, e);
                }
            }
            Err(e) => warn!("Failed to serialize listing page for {}: {}", key, e),
        }

        Ok(page)
    }

    /// Archive page, always from the store.
    pub async fn archive(&self, cursor: Option<&str>) -> Result<ListingPage, AppError> {
        let shape = QueryShape::visible(self.settings.archive_page_size);
        self.page(&shape, cursor).await
    }

    /// Visible entries carrying `tag`. An unknown tag yields an empty list.
    pub async fn tagged(&self, tag: &str) -> Result<Vec<Entry>, AppError> {
        self.repository
            .find_by_tag(tag, self.settings.tag_page_size)
            .await
    }

    /// Entries for the "recent entries" sidebar: the canonical home page.
    pub async fn recent(&self) -> Result<Vec<Entry>, AppError> {
        Ok(self.home(None).await?.entries)
    }

    /// Looks up an entry by slug, hidden entries included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry has this slug.
    pub async fn entry_by_slug(&self, slug: &str) -> Result<Entry, AppError> {
        self.repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Entry not found", json!({ "slug": slug })))
    }

    fn cursor_is_valid(token: &str, shape: &QueryShape) -> bool {
        match cursor::decode(token, shape) {
            Ok(_) => true,
            Err(e) => {
                debug!("Ignoring cursor: {}", e);
                false
            }
        }
    }

    async fn page(&self, shape: &QueryShape, token: Option<&str>) -> Result<ListingPage, AppError> {
        let after = match token.map(|t| cursor::decode(t, shape)) {
            Some(Ok(position)) => Some(position),
            Some(Err(e)) => {
                debug!("Ignoring cursor: {}", e);
                None
            }
            None => None,
        };

        let page = self.repository.list_published(shape.limit, after).await?;

        Ok(ListingPage {
            entries: page.entries,
            next_cursor: page.next.map(|position| cursor::encode(shape, position)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cursor::EntryPosition;
    use crate::domain::repositories::{EntryPage, MockEntryRepository};
    use crate::infrastructure::cache::{CacheError, MemoryCache, MockCacheService};
    use chrono::Utc;

    fn settings() -> Arc<BlogSettings> {
        Arc::new(BlogSettings {
            home_page_size: 2,
            archive_page_size: 3,
            ..BlogSettings::default()
        })
    }

    fn entry(id: i64) -> Entry {
        let now = Utc::now();
        Entry {
            id,
            author: "writer@example.com".to_string(),
            title: format!("Entry {id}"),
            slug: format!("entry-{id}"),
            body: "body".to_string(),
            tags: Vec::new(),
            published: now,
            updated: now,
            hidden: false,
        }
    }

    #[test]
    fn test_home_cache_key() {
        assert_eq!(home_cache_key(None, 5), "home_entries:None:5");
        assert_eq!(home_cache_key(Some("abc"), 5), "home_entries:abc:5");
    }

    #[tokio::test]
    async fn test_home_reads_through_cache() {
        let mut repo = MockEntryRepository::new();
        repo.expect_list_published()
            .times(1)
            .returning(|limit, _| Ok(EntryPage::from_entries(vec![entry(2), entry(1)], limit)));

        let service = ListingService::new(
            Arc::new(repo),
            Arc::new(MemoryCache::new(60)),
            settings(),
        );

        let first = service.home(None).await.unwrap();
        let second = service.home(None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.entries.len(), 2);
        assert!(first.next_cursor.is_some());
    }

    #[tokio::test]
    async fn test_home_falls_back_when_cache_fails() {
        let mut repo = MockEntryRepository::new();
        repo.expect_list_published()
            .times(1)
            .returning(|limit, _| Ok(EntryPage::from_entries(vec![entry(1)], limit)));

        let mut cache = MockCacheService::new();
        cache
            .expect_get()
            .returning(|_| Err(CacheError::ConnectionError("down".to_string())));
        cache
            .expect_set()
            .returning(|_, _, _| Err(CacheError::OperationError("down".to_string())));

        let service = ListingService::new(Arc::new(repo), Arc::new(cache), settings());
        let page = service.home(None).await.unwrap();

        assert_eq!(page.entries.len(), 1);
        assert!(page.next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_home_invalid_cursor_uses_first_page_key() {
        let mut repo = MockEntryRepository::new();
        repo.expect_list_published()
            .withf(|limit, after| *limit == 2 && after.is_none())
            .times(1)
            .returning(|limit, _| Ok(EntryPage::from_entries(vec![entry(1)], limit)));

        let mut cache = MockCacheService::new();
        cache
            .expect_get()
            .withf(|key| key == "home_entries:None:2")
            .returning(|_| Ok(None));
        cache
            .expect_set()
            .withf(|key, _, _| key == "home_entries:None:2")
            .returning(|_, _, _| Ok(()));

        let service = ListingService::new(Arc::new(repo), Arc::new(cache), settings());
        service.home(Some("bogus")).await.unwrap();
    }

    #[tokio::test]
    async fn test_archive_ignores_cursor_from_other_shape() {
        let position = EntryPosition {
            published: Utc::now(),
            id: 7,
        };
        let home_cursor = cursor::encode(&QueryShape::visible(2), position);
        let archive_cursor = cursor::encode(&QueryShape::visible(3), position);

        let mut repo = MockEntryRepository::new();
        repo.expect_list_published()
            .withf(|_, after| after.is_none())
            .times(1)
            .returning(|limit, _| Ok(EntryPage::from_entries(Vec::new(), limit)));
        repo.expect_list_published()
            .withf(move |_, after| *after == Some(position))
            .times(1)
            .returning(|limit, _| Ok(EntryPage::from_entries(Vec::new(), limit)));

        let service = ListingService::new(
            Arc::new(repo),
            Arc::new(MemoryCache::new(60)),
            settings(),
        );

        service.archive(Some(&home_cursor)).await.unwrap();
        service.archive(Some(&archive_cursor)).await.unwrap();
    }

    #[tokio::test]
    async fn test_entry_by_slug_not_found() {
        let mut repo = MockEntryRepository::new();
        repo.expect_find_by_slug().returning(|_| Ok(None));

        let service = ListingService::new(
            Arc::new(repo),
            Arc::new(MemoryCache::new(60)),
            settings(),
        );

        let err = service.entry_by_slug("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
