//! Typed view models for every HTML page.
//!
//! Handlers build one of these structs per request; the matching askama
//! template under `templates/` renders it.

mod admin;
mod pages;

pub use admin::{ComposePage, DeletePage, HidePage};
pub use pages::{AboutPage, ArchivePage, EntryPage, HomePage, TagPage};

use crate::config::BlogSettings;
use crate::domain::entities::{Entry, Identity};

/// Display form of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub key: i64,
    pub title: String,
    pub slug: String,
    /// Trusted author markup, rendered unescaped.
    pub body: String,
    pub author: String,
    pub published: String,
    pub published_iso: String,
    pub tags: Vec<String>,
    pub hidden: bool,
}

impl EntryView {
    pub fn permalink(&self) -> String {
        format!("/e/{}", self.slug)
    }
}

impl From<&Entry> for EntryView {
    fn from(entry: &Entry) -> Self {
        Self {
            key: entry.id,
            title: entry.title.clone(),
            slug: entry.slug.clone(),
            body: entry.body.clone(),
            author: entry.author_nickname().to_string(),
            published: entry.published.format("%B %-d, %Y").to_string(),
            published_iso: entry.published.to_rfc3339(),
            tags: entry.tags.clone(),
            hidden: entry.hidden,
        }
    }
}

pub fn entry_views(entries: &[Entry]) -> Vec<EntryView> {
    entries.iter().map(EntryView::from).collect()
}

/// Data the shared page chrome (`base.html`) needs.
#[derive(Debug, Clone)]
pub struct Layout {
    pub blog_title: String,
    pub blog_author: String,
    /// Text for `<title>`; the blog title alone when `None`.
    pub page_title: Option<String>,
    pub feed_url: String,
    pub is_admin: bool,
    /// Pre-rendered "recent entries" sidebar.
    pub sidebar: String,
}

impl Layout {
    pub fn new(settings: &BlogSettings, identity: Option<&Identity>, sidebar: String) -> Self {
        Self {
            blog_title: settings.title.clone(),
            blog_author: settings.author.clone(),
            page_title: None,
            feed_url: "/?format=atom".to_string(),
            is_admin: identity.is_some_and(|i| i.is_admin),
            sidebar,
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.page_title = Some(title.into());
        self
    }

    pub fn document_title(&self) -> String {
        match &self.page_title {
            Some(title) => format!("{} - {}", title, self.blog_title),
            None => self.blog_title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_entry_view_from_entry() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 10, 0, 0).unwrap();
        let entry = Entry {
            id: 4,
            author: "jane@example.com".to_string(),
            title: "Title".to_string(),
            slug: "title".to_string(),
            body: "<p>x</p>".to_string(),
            tags: vec!["a".to_string()],
            published: at,
            updated: at,
            hidden: true,
        };

        let view = EntryView::from(&entry);
        assert_eq!(view.author, "jane");
        assert_eq!(view.published, "March 9, 2024");
        assert_eq!(view.permalink(), "/e/title");
        assert!(view.hidden);
    }

    #[test]
    fn test_layout_document_title() {
        let settings = BlogSettings {
            title: "Blog".to_string(),
            ..BlogSettings::default()
        };
        let layout = Layout::new(&settings, None, String::new());
        assert_eq!(layout.document_title(), "Blog");
        assert!(!layout.is_admin);
        assert_eq!(layout.titled("Archive").document_title(), "Archive - Blog");
    }
}
