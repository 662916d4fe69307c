//! Entry authoring: compose, edit, hide and delete.

use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::services::listing_service::home_cache_key;
use crate::application::services::notify_service::{NotifyService, PingReport};
use crate::config::BlogSettings;
use crate::domain::entities::{Entry, EntryPatch, Identity, NewEntry};
use crate::domain::repositories::EntryRepository;
use crate::domain::slug::{normalize_tags, slugify, with_suffix};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::suffix::random_suffix;

/// Attempts per slug resolution round, and rounds per create.
const MAX_SLUG_ATTEMPTS: usize = 32;

/// Editor input for a new or existing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub body: String,
    /// Comma-separated tag labels.
    pub tags: String,
    pub hidden: bool,
}

/// Result of a compose request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOutcome {
    pub entry: Entry,
    pub created: bool,
    /// Present only when the new entry was announced.
    pub pings: Option<PingReport>,
}

/// Service for authoring entries.
///
/// Every successful write invalidates the canonical home page cache key.
/// New visible entries are announced through [`NotifyService`].
pub struct EntryService<R: EntryRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    notifier: Arc<NotifyService>,
    settings: Arc<BlogSettings>,
}

impl<R: EntryRepository + ?Sized> EntryService<R> {
    pub fn new(
        repository: Arc<R>,
        cache: Arc<dyn CacheService>,
        notifier: Arc<NotifyService>,
        settings: Arc<BlogSettings>,
    ) -> Self {
        Self {
            repository,
            cache,
            notifier,
            settings,
        }
    }

    /// Retrieves an entry by key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry has this key.
    pub async fn get(&self, id: i64) -> Result<Entry, AppError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Entry not found", json!({ "key": id })))
    }

    /// Creates a new entry (`key = None`) or edits an existing one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty title or body and
    /// [`AppError::NotFound`] for an unknown key.
    pub async fn compose(
        &self,
        author: &Identity,
        key: Option<i64>,
        draft: Draft,
    ) -> Result<ComposeOutcome, AppError> {
        match key {
            Some(id) => {
                let entry = self.update(id, draft).await?;
                Ok(ComposeOutcome {
                    entry,
                    created: false,
                    pings: None,
                })
            }
            None => {
                let entry = self.create(author, draft).await?;
                let pings = if entry.hidden {
                    None
                } else {
                    Some(self.notifier.announce().await)
                };
                Ok(ComposeOutcome {
                    entry,
                    created: true,
                    pings,
                })
            }
        }
    }

    /// Persists a new entry under a fresh unique slug.
    ///
    /// A unique-index conflict at insert time triggers another resolution round.
    pub async fn create(&self, author: &Identity, draft: Draft) -> Result<Entry, AppError> {
        let (title, body) = validate_draft(&draft)?;
        let base = slugify(&title);
        let tags = normalize_tags(&draft.tags);

        for _ in 0..MAX_SLUG_ATTEMPTS {
            let slug = self.unique_slug(&base).await?;
            let new_entry = NewEntry {
                author: author.email.clone(),
                title: title.clone(),
                slug: slug.clone(),
                body: body.clone(),
                tags: tags.clone(),
                hidden: draft.hidden,
            };

            match self.repository.create(new_entry).await {
                Ok(entry) => {
                    info!("Created entry {} ({})", entry.slug, entry.id);
                    self.invalidate_home().await;
                    return Ok(entry);
                }
                Err(AppError::Conflict { .. }) => {
                    warn!("Slug {} was taken concurrently, retrying", slug);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to allocate a unique slug",
            json!({ "slug": base, "reason": "Too many collisions" }),
        ))
    }

    /// Rewrites title, body, tags and visibility. The slug never changes.
    pub async fn update(&self, id: i64, draft: Draft) -> Result<Entry, AppError> {
        let (title, body) = validate_draft(&draft)?;
        let patch = EntryPatch {
            title: Some(title),
            body: Some(body),
            tags: Some(normalize_tags(&draft.tags)),
            hidden: Some(draft.hidden),
        };

        let entry = self.repository.update(id, patch).await?;
        info!("Updated entry {} ({})", entry.slug, entry.id);
        self.invalidate_home().await;
        Ok(entry)
    }

    /// Hides or reveals an entry.
    pub async fn set_hidden(&self, id: i64, hidden: bool) -> Result<Entry, AppError> {
        let entry = self
            .repository
            .update(id, EntryPatch::visibility(hidden))
            .await?;
        info!(
            "{} entry {} ({})",
            if hidden { "Hid" } else { "Revealed" },
            entry.slug,
            entry.id
        );
        self.invalidate_home().await;
        Ok(entry)
    }

    /// Deletes an entry, returning what was removed.
    pub async fn delete(&self, id: i64) -> Result<Entry, AppError> {
        let entry = self.get(id).await?;
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found("Entry not found", json!({ "key": id })));
        }

        info!("Deleted entry {} ({})", entry.slug, entry.id);
        self.invalidate_home().await;
        Ok(entry)
    }

    /// Returns `candidate` if no entry uses it, otherwise the first free
    /// `candidate-XX` with `XX` two random hex characters.
    ///
    /// The check is not atomic with the insert; the unique index catches races.
    pub async fn unique_slug(&self, candidate: &str) -> Result<String, AppError> {
        if self.repository.find_by_slug(candidate).await?.is_none() {
            return Ok(candidate.to_string());
        }

        for _ in 0..MAX_SLUG_ATTEMPTS {
            let slug = with_suffix(candidate, &random_suffix()?);
            if self.repository.find_by_slug(&slug).await?.is_none() {
                return Ok(slug);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique slug",
            json!({ "slug": candidate, "reason": "Too many collisions" }),
        ))
    }

    async fn invalidate_home(&self) {
        let key = home_cache_key(None, self.settings.home_page_size);
        if let Err(e) = self.cache.invalidate(&key).await {
            warn!("Cache invalidation failed for {}: {}", key, e);
        }
    }
}

/// Trims title and body, rejecting blank values.
fn validate_draft(draft: &Draft) -> Result<(String, String), AppError> {
    let title = draft.title.trim();
    let body = draft.body.trim();

    let mut missing = Vec::new();
    if title.is_empty() {
        missing.push("title");
    }
    if body.is_empty() {
        missing.push("body");
    }
    if !missing.is_empty() {
        return Err(AppError::bad_request(
            "Title and body are required",
            json!({ "missing": missing }),
        ));
    }

    Ok((title.to_string(), body.to_string()))
}
