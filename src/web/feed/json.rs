//! JSON listing serializer.

use serde::Serialize;
use serde_json::{Map, Value, json, ser::PrettyFormatter};

use super::{FeedMeta, timestamp};
use crate::domain::entities::Entry;

/// Renders entries as `{"cursor"?, "entries": [...]}` with sorted keys.
///
/// `cursor` is `None` for listings without pagination; `Some(None)` writes an
/// explicit `null` for a paginated listing on its last page.
pub fn render_json(
    entries: &[Entry],
    cursor: Option<Option<&str>>,
    meta: &FeedMeta,
    pretty: bool,
) -> Result<String, serde_json::Error> {
    // Keys are inserted alphabetically so the order holds with or without
    // serde_json's `preserve_order`.
    let mut document = Map::new();
    if let Some(cursor) = cursor {
        document.insert("cursor".to_string(), json!(cursor));
    }
    document.insert(
        "entries".to_string(),
        Value::Array(entries.iter().map(|e| entry_value(e, meta)).collect()),
    );
    let document = Value::Object(document);

    if pretty {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        document.serialize(&mut serializer)?;
        // serde_json only emits valid UTF-8.
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    } else {
        serde_json::to_string(&document)
    }
}

fn entry_value(entry: &Entry, meta: &FeedMeta) -> Value {
    json!({
        "author": entry.author_nickname(),
        "body": entry.body,
        "link": meta.permalink(&entry.slug),
        "published": timestamp(&entry.published),
        "slug": entry.slug,
        "tags": entry.tags,
        "title": entry.title,
        "updated": timestamp(&entry.updated),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn meta() -> FeedMeta {
        FeedMeta {
            title: "Blog".to_string(),
            author: "Jane".to_string(),
            base_url: "https://blog.example.com".to_string(),
            self_url: "https://blog.example.com/?format=json".to_string(),
            hub_url: None,
        }
    }

    fn entry() -> Entry {
        let at = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        Entry {
            id: 3,
            author: "jane@example.com".to_string(),
            title: "Title".to_string(),
            slug: "title".to_string(),
            body: "<p>Body</p>".to_string(),
            tags: vec!["rust".to_string()],
            published: at,
            updated: at,
            hidden: false,
        }
    }

    #[test]
    fn test_render_json_compact_with_sorted_keys() {
        let out = render_json(&[entry()], Some(Some("abc")), &meta(), false).unwrap();
        assert_eq!(
            out,
            concat!(
                r#"{"cursor":"abc","entries":[{"author":"jane","body":"<p>Body</p>","#,
                r#""link":"https://blog.example.com/e/title","published":"2024-05-06T07:08:09Z","#,
                r#""slug":"title","tags":["rust"],"title":"Title","updated":"2024-05-06T07:08:09Z"}]}"#
            )
        );
    }

    #[test]
    fn test_render_json_cursor_presence() {
        let without = render_json(&[], None, &meta(), false).unwrap();
        assert_eq!(without, r#"{"entries":[]}"#);

        let last_page = render_json(&[], Some(None), &meta(), false).unwrap();
        assert_eq!(last_page, r#"{"cursor":null,"entries":[]}"#);
    }

    #[test]
    fn test_render_json_pretty() {
        let out = render_json(&[], Some(None), &meta(), true).unwrap();
        assert_eq!(out, "{\n    \"cursor\": null,\n    \"entries\": []\n}");
    }
}
