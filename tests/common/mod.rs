#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use ledger_blog::config::{BlogSettings, PingSettings};
use ledger_blog::domain::entities::{Entry, NewEntry};
use ledger_blog::domain::repositories::EntryRepository;
use ledger_blog::infrastructure::cache::MemoryCache;
use ledger_blog::infrastructure::persistence::MemoryEntryRepository;
use ledger_blog::infrastructure::ping::{NullPinger, PingError, PingRequest, Pinger};
use ledger_blog::routes::blog_router;
use ledger_blog::state::AppState;
use std::sync::{Arc, Mutex};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const READER_EMAIL: &str = "reader@example.com";
pub const BASE_URL: &str = "http://blog.test";

/// Records ping names instead of sending them.
#[derive(Default)]
pub struct RecordingPinger {
    pub sent: Mutex<Vec<&'static str>>,
}

impl RecordingPinger {
    pub fn sent(&self) -> Vec<&'static str> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pinger for RecordingPinger {
    async fn send(&self, request: &PingRequest) -> Result<(), PingError> {
        self.sent.lock().unwrap().push(request.name);
        Ok(())
    }
}

pub fn test_settings() -> BlogSettings {
    BlogSettings {
        title: "Test Blog".to_string(),
        author: "Admin".to_string(),
        base_url: BASE_URL.to_string(),
        admin_emails: vec![ADMIN_EMAIL.to_string()],
        sup_url: format!("{BASE_URL}/sup"),
        ping: PingSettings {
            enabled: false,
            ..PingSettings::default()
        },
        ..BlogSettings::default()
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub repository: Arc<MemoryEntryRepository>,
}

impl TestApp {
    pub fn admin_cookie(&self) -> String {
        self.cookie_for(ADMIN_EMAIL)
    }

    pub fn reader_cookie(&self) -> String {
        self.cookie_for(READER_EMAIL)
    }

    fn cookie_for(&self, email: &str) -> String {
        let value = self.state.auth_service.issue_session(email).unwrap();
        format!("blog_session={value}")
    }

    /// Stores an entry directly, bypassing the cache invalidation of the
    /// compose path.
    pub async fn insert_entry(&self, title: &str, slug: &str, tags: &[&str]) -> Entry {
        self.repository
            .create(NewEntry {
                author: ADMIN_EMAIL.to_string(),
                title: title.to_string(),
                slug: slug.to_string(),
                body: format!("<p>{title} body</p>"),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                hidden: false,
            })
            .await
            .unwrap()
    }
}

pub fn spawn_app_with(settings: BlogSettings, pinger: Arc<dyn Pinger>) -> TestApp {
    let repository = Arc::new(MemoryEntryRepository::new());
    let state = AppState::new(
        settings,
        "test-session-secret".to_string(),
        repository.clone(),
        Arc::new(MemoryCache::new(300)),
        pinger,
    );

    let server = TestServer::new(blog_router(state.clone())).unwrap();

    TestApp {
        server,
        state,
        repository,
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(test_settings(), Arc::new(NullPinger::new()))
}
