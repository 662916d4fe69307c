//! Reusable page fragments.
//!
//! Each variant renders its own template; pages embed the resulting markup.

use askama::Template;

use crate::web::views::EntryView;

/// A piece of markup shared between pages.
pub enum Fragment<'a> {
    /// Full entry with body and tags; `admin` adds edit controls.
    Entry { entry: &'a EntryView, admin: bool },
    /// Title line, optionally dated.
    EntrySmall { entry: &'a EntryView, show_date: bool },
    /// Sidebar list of the newest entries.
    RecentEntries { entries: &'a [EntryView] },
    /// Link to the next page of `path`; empty without a cursor.
    Navigation { path: &'a str, cursor: Option<&'a str> },
}

#[derive(Template)]
#[template(path = "fragments/entry.html")]
struct EntryFragment<'a> {
    entry: &'a EntryView,
    admin: bool,
}

#[derive(Template)]
#[template(path = "fragments/entry_small.html")]
struct EntrySmallFragment<'a> {
    entry: &'a EntryView,
    show_date: bool,
}

#[derive(Template)]
#[template(path = "fragments/recent_entries.html")]
struct RecentEntriesFragment<'a> {
    entries: &'a [EntryView],
}

#[derive(Template)]
#[template(path = "fragments/navigation.html")]
struct NavigationFragment {
    older: String,
}

impl Fragment<'_> {
    pub fn render(&self) -> Result<String, askama::Error> {
        match *self {
            Fragment::Entry { entry, admin } => EntryFragment { entry, admin }.render(),
            Fragment::EntrySmall { entry, show_date } => {
                EntrySmallFragment { entry, show_date }.render()
            }
            Fragment::RecentEntries { entries } => RecentEntriesFragment { entries }.render(),
            Fragment::Navigation { path, cursor } => match cursor {
                Some(cursor) => NavigationFragment {
                    older: older_link(path, cursor),
                }
                .render(),
                None => Ok(String::new()),
            },
        }
    }
}

fn older_link(path: &str, cursor: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("cursor", cursor)
        .finish();
    format!("{path}?{query}")
}

/// Renders a list of entries with the same fragment variant.
pub fn render_all<'a>(
    entries: &'a [EntryView],
    fragment: impl Fn(&'a EntryView) -> Fragment<'a>,
) -> Result<Vec<String>, askama::Error> {
    entries.iter().map(|e| fragment(e).render()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> EntryView {
        EntryView {
            key: 7,
            title: "Hello & Bye".to_string(),
            slug: "hello-bye".to_string(),
            body: "<p>Body</p>".to_string(),
            author: "jane".to_string(),
            published: "March 9, 2024".to_string(),
            published_iso: "2024-03-09T10:00:00+00:00".to_string(),
            tags: vec!["rust".to_string()],
            hidden: false,
        }
    }

    #[test]
    fn test_entry_fragment_renders_body_unescaped() {
        let entry = view();
        let html = Fragment::Entry {
            entry: &entry,
            admin: false,
        }
        .render()
        .unwrap();

        assert!(html.contains("<p>Body</p>"));
        assert!(html.contains("Hello &amp; Bye") || html.contains("Hello &#38; Bye"));
        assert!(html.contains("/t/rust"));
        assert!(!html.contains("/compose?key=7"));
    }

    #[test]
    fn test_entry_fragment_admin_controls() {
        let entry = view();
        let html = Fragment::Entry {
            entry: &entry,
            admin: true,
        }
        .render()
        .unwrap();

        assert!(html.contains("/compose?key=7"));
        assert!(html.contains("/delete?key=7"));
        assert!(html.contains("/hide?key=7"));
    }

    #[test]
    fn test_navigation_without_cursor_is_empty() {
        let html = Fragment::Navigation {
            path: "/archive",
            cursor: None,
        }
        .render()
        .unwrap();
        assert!(html.is_empty());
    }

    #[test]
    fn test_older_link_encodes_cursor() {
        assert_eq!(older_link("/", "a+b="), "/?cursor=a%2Bb%3D");
    }
}
