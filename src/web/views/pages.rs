//! Public page templates.

use askama::Template;
use askama_web::WebTemplate;

use super::Layout;

/// `GET /`: full entries, newest first.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomePage {
    pub layout: Layout,
    /// Rendered [`crate::web::fragments::Fragment::Entry`] blocks.
    pub entries: Vec<String>,
    pub navigation: String,
}

/// `GET /archive`: dated title list.
#[derive(Template, WebTemplate)]
#[template(path = "archive.html")]
pub struct ArchivePage {
    pub layout: Layout,
    pub entries: Vec<String>,
    pub navigation: String,
}

/// `GET /t/{tag}`.
#[derive(Template, WebTemplate)]
#[template(path = "tag.html")]
pub struct TagPage {
    pub layout: Layout,
    pub tag: String,
    pub entries: Vec<String>,
}

/// `GET /e/{slug}`.
#[derive(Template, WebTemplate)]
#[template(path = "entry.html")]
pub struct EntryPage {
    pub layout: Layout,
    pub canonical_url: String,
    pub entry: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub layout: Layout,
}
