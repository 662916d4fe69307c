//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, EntryService, ListingService, NotifyService};
use crate::config::BlogSettings;
use crate::domain::repositories::EntryRepository;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::ping::Pinger;

/// Cheap-to-clone handle on the services and immutable settings.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<BlogSettings>,
    pub repository: Arc<dyn EntryRepository>,
    pub cache: Arc<dyn CacheService>,
    pub entry_service: Arc<EntryService<dyn EntryRepository>>,
    pub listing_service: Arc<ListingService<dyn EntryRepository>>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wires services around a store, a cache and a pinger.
    pub fn new(
        settings: BlogSettings,
        session_secret: String,
        repository: Arc<dyn EntryRepository>,
        cache: Arc<dyn CacheService>,
        pinger: Arc<dyn Pinger>,
    ) -> Self {
        let settings = Arc::new(settings);
        let notifier = Arc::new(NotifyService::new(pinger, settings.clone()));

        let entry_service = Arc::new(EntryService::new(
            repository.clone(),
            cache.clone(),
            notifier,
            settings.clone(),
        ));
        let listing_service = Arc::new(ListingService::new(
            repository.clone(),
            cache.clone(),
            settings.clone(),
        ));
        let auth_service = Arc::new(AuthService::new(session_secret, &settings));

        Self {
            settings,
            repository,
            cache,
            entry_service,
            listing_service,
            auth_service,
        }
    }
}
