//! Pure feed serializers.
//!
//! Output depends only on the entries and [`FeedMeta`], so identical input
//! always yields byte-identical documents.

mod atom;
mod json;
mod media;

pub use atom::render_atom;
pub use json::render_json;
pub use media::{Thumbnail, thumbnails};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::BlogSettings;

/// Blog-level data a feed needs besides the entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedMeta {
    pub title: String,
    pub author: String,
    /// Absolute base URL without a trailing slash.
    pub base_url: String,
    /// Absolute URL the feed was requested at.
    pub self_url: String,
    pub hub_url: Option<String>,
}

impl FeedMeta {
    pub fn from_settings(settings: &BlogSettings, self_url: String) -> Self {
        Self {
            title: settings.title.clone(),
            author: settings.author.clone(),
            base_url: settings.base_url.clone(),
            self_url,
            hub_url: settings.ping.hub_url.clone().filter(|_| settings.ping.enabled),
        }
    }

    pub fn permalink(&self, slug: &str) -> String {
        format!("{}/e/{}", self.base_url, slug)
    }
}

pub(crate) fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
