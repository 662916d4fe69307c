//! Entry entity, the only persisted domain object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog entry.
///
/// `slug` is assigned once at creation and never changes; `published` likewise.
/// `updated` moves forward on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub author: String,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub tags: Vec<String>,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub hidden: bool,
}

impl Entry {
    /// Display name of the author: the local part of their e-mail address.
    pub fn author_nickname(&self) -> &str {
        nickname(&self.author)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Returns the part of an e-mail address before `@`, or the whole value.
pub fn nickname(email: &str) -> &str {
    email.split_once('@').map_or(email, |(local, _)| local)
}

/// Input data for creating a new entry.
///
/// The store stamps `published` and `updated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub author: String,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub tags: Vec<String>,
    pub hidden: bool,
}

/// In-place edit of an existing entry.
///
/// `None` fields are left unchanged. The slug is not editable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
    pub hidden: Option<bool>,
}

impl EntryPatch {
    /// Patch that only flips the `hidden` flag.
    pub fn visibility(hidden: bool) -> Self {
        Self {
            hidden: Some(hidden),
            ..Self::default()
        }
    }

    /// Applies the patch to `entry`, stamping `updated` with `now`.
    pub fn apply(self, entry: &mut Entry, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            entry.title = title;
        }
        if let Some(body) = self.body {
            entry.body = body;
        }
        if let Some(tags) = self.tags {
            entry.tags = tags;
        }
        if let Some(hidden) = self.hidden {
            entry.hidden = hidden;
        }
        entry.updated = now.max(entry.published);
    }
}
