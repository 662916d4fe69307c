//! Atom 1.0 serializer with MediaRSS thumbnails.

use chrono::{DateTime, Utc};
use std::fmt::Write as _;

use super::media::{Thumbnail, thumbnails};
use super::{FeedMeta, timestamp};
use crate::domain::entities::Entry;

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const MEDIA_NS: &str = "http://search.yahoo.com/mrss/";

/// Renders `entries` (already ordered) as an Atom document.
///
/// The feed `updated` is the latest entry update, or the Unix epoch for an
/// empty feed.
pub fn render_atom(entries: &[Entry], meta: &FeedMeta) -> String {
    let updated = entries
        .iter()
        .map(|e| e.updated)
        .max()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    let _ = writeln!(out, "<feed xmlns=\"{ATOM_NS}\" xmlns:media=\"{MEDIA_NS}\">");
    let _ = writeln!(out, "  <title>{}</title>", xml_escape(&meta.title));
    let _ = writeln!(
        out,
        "  <link rel=\"alternate\" type=\"text/html\" href=\"{}/\"/>",
        xml_escape(&meta.base_url)
    );
    let _ = writeln!(
        out,
        "  <link rel=\"self\" type=\"application/atom+xml\" href=\"{}\"/>",
        xml_escape(&meta.self_url)
    );
    if let Some(hub) = &meta.hub_url {
        let _ = writeln!(out, "  <link rel=\"hub\" href=\"{}\"/>", xml_escape(hub));
    }
    let _ = writeln!(out, "  <id>{}/</id>", xml_escape(&meta.base_url));
    let _ = writeln!(out, "  <updated>{}</updated>", timestamp(&updated));
    let _ = writeln!(
        out,
        "  <author><name>{}</name></author>",
        xml_escape(&meta.author)
    );

    for entry in entries {
        write_entry(&mut out, entry, meta);
    }

    out.push_str("</feed>\n");
    out
}

fn write_entry(out: &mut String, entry: &Entry, meta: &FeedMeta) {
    let link = xml_escape(&meta.permalink(&entry.slug));

    out.push_str("  <entry>\n");
    let _ = writeln!(out, "    <title>{}</title>", xml_escape(&entry.title));
    let _ = writeln!(
        out,
        "    <link rel=\"alternate\" type=\"text/html\" href=\"{link}\"/>"
    );
    let _ = writeln!(out, "    <id>{link}</id>");
    let _ = writeln!(out, "    <published>{}</published>", timestamp(&entry.published));
    let _ = writeln!(out, "    <updated>{}</updated>", timestamp(&entry.updated));
    let _ = writeln!(
        out,
        "    <author><name>{}</name></author>",
        xml_escape(entry.author_nickname())
    );
    for tag in &entry.tags {
        let _ = writeln!(out, "    <category term=\"{}\"/>", xml_escape(tag));
    }
    let _ = writeln!(
        out,
        "    <content type=\"html\">{}</content>",
        xml_escape(&entry.body)
    );
    for thumbnail in thumbnails(&entry.body) {
        write_thumbnail(out, &thumbnail, meta);
    }
    out.push_str("  </entry>\n");
}

fn write_thumbnail(out: &mut String, thumbnail: &Thumbnail, meta: &FeedMeta) {
    let url = xml_escape(&absolute_url(&thumbnail.url, &meta.base_url));

    let mut dimensions = String::new();
    if !thumbnail.width.is_empty() {
        let _ = write!(dimensions, " width=\"{}\"", xml_escape(&thumbnail.width));
    }
    if !thumbnail.height.is_empty() {
        let _ = write!(dimensions, " height=\"{}\"", xml_escape(&thumbnail.height));
    }

    let _ = writeln!(out, "    <media:content url=\"{url}\" medium=\"image\">");
    if !thumbnail.title.is_empty() {
        let _ = writeln!(
            out,
            "      <media:title type=\"plain\">{}</media:title>",
            xml_escape(&thumbnail.title)
        );
    }
    let _ = writeln!(out, "      <media:thumbnail url=\"{url}\"{dimensions}/>");
    out.push_str("    </media:content>\n");
}

/// Resolves root-relative image paths against the blog base URL.
fn absolute_url(src: &str, base_url: &str) -> String {
    if src.starts_with('/') && !src.starts_with("//") {
        format!("{base_url}{src}")
    } else {
        src.to_string()
    }
}

pub(crate) fn xml_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn meta() -> FeedMeta {
        FeedMeta {
            title: "Notes & Thoughts".to_string(),
            author: "Jane".to_string(),
            base_url: "https://blog.example.com".to_string(),
            self_url: "https://blog.example.com/?format=atom".to_string(),
            hub_url: Some("https://hub.example.com/".to_string()),
        }
    }

    fn entry() -> Entry {
        Entry {
            id: 1,
            author: "jane@example.com".to_string(),
            title: "Hello <World>".to_string(),
            slug: "hello-world".to_string(),
            body: r#"<p>Hi</p><img src="/pic.png" width="64" alt="Pic"><img class="nomediarss" src="/icon.png">"#
                .to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
            published: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            updated: Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap(),
            hidden: false,
        }
    }

    #[test]
    fn test_render_atom_document() {
        let xml = render_atom(&[entry()], &meta());

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("<title>Notes &amp; Thoughts</title>"));
        assert!(xml.contains("<link rel=\"hub\" href=\"https://hub.example.com/\"/>"));
        assert!(xml.contains("<updated>2024-01-03T00:00:00Z</updated>"));
        assert!(xml.contains("<title>Hello &lt;World&gt;</title>"));
        assert!(xml.contains("<id>https://blog.example.com/e/hello-world</id>"));
        assert!(xml.contains("<published>2024-01-02T03:04:05Z</published>"));
        assert!(xml.contains("<author><name>jane</name></author>"));
        assert!(xml.contains("<category term=\"a\"/>"));
        assert!(xml.contains("<content type=\"html\">&lt;p&gt;Hi&lt;/p&gt;"));
        assert!(xml.contains(
            "<media:thumbnail url=\"https://blog.example.com/pic.png\" width=\"64\"/>"
        ));
        assert!(xml.contains("<media:title type=\"plain\">Pic</media:title>"));
        assert!(!xml.contains("icon.png\" medium"));
        assert!(xml.trim_end().ends_with("</feed>"));
    }

    #[test]
    fn test_render_atom_is_deterministic() {
        let entries = vec![entry()];
        assert_eq!(render_atom(&entries, &meta()), render_atom(&entries, &meta()));
    }

    #[test]
    fn test_empty_feed_uses_epoch() {
        let xml = render_atom(&[], &meta());
        assert!(xml.contains("<updated>1970-01-01T00:00:00Z</updated>"));
        assert!(!xml.contains("<entry>"));
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&apos;&amp;&apos;&lt;/a&gt;");
    }
}
