//! Admin page templates.

use askama::Template;
use askama_web::WebTemplate;

use super::{EntryView, Layout};
use crate::domain::entities::Entry;

/// Editor for a new entry, or pre-filled for an existing one.
#[derive(Template, WebTemplate)]
#[template(path = "compose.html")]
pub struct ComposePage {
    pub layout: Layout,
    pub key: Option<i64>,
    pub title: String,
    pub body: String,
    /// Comma-separated for the text input.
    pub tags: String,
    pub hidden: bool,
    pub permalink: Option<String>,
}

impl ComposePage {
    pub fn new(layout: Layout, entry: Option<&Entry>) -> Self {
        match entry {
            Some(entry) => Self {
                layout,
                key: Some(entry.id),
                title: entry.title.clone(),
                body: entry.body.clone(),
                tags: entry.tags.join(", "),
                hidden: entry.hidden,
                permalink: Some(format!("/e/{}", entry.slug)),
            },
            None => Self {
                layout,
                key: None,
                title: String::new(),
                body: String::new(),
                tags: String::new(),
                hidden: false,
                permalink: None,
            },
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "delete.html")]
pub struct DeletePage {
    pub layout: Layout,
    pub entry: EntryView,
}

#[derive(Template, WebTemplate)]
#[template(path = "hide.html")]
pub struct HidePage {
    pub layout: Layout,
    pub entry: EntryView,
    pub unhide: bool,
}
