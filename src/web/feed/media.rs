//! MediaRSS thumbnails extracted from entry bodies.

use lol_html::{RewriteStrSettings, element, rewrite_str};
use std::cell::RefCell;
use std::rc::Rc;

/// Opt-out class for images that should not become thumbnails.
const OPT_OUT_CLASS: &str = "nomediarss";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: String,
    /// `title` attribute, falling back to `alt`.
    pub title: String,
    pub width: String,
    pub height: String,
}

/// Returns a thumbnail for every `<img>` with a `src`, in document order,
/// skipping images with class `nomediarss`.
///
/// Bodies the tokenizer rejects yield the thumbnails found before the error.
pub fn thumbnails(body: &str) -> Vec<Thumbnail> {
    let found = Rc::new(RefCell::new(Vec::new()));

    let result = rewrite_str(
        body,
        RewriteStrSettings {
            element_content_handlers: vec![element!("img", {
                let found = Rc::clone(&found);
                move |el| {
                    let opted_out = el
                        .get_attribute("class")
                        .is_some_and(|class| class.split_whitespace().any(|c| c == OPT_OUT_CLASS));
                    if opted_out {
                        return Ok(());
                    }

                    if let Some(url) = el.get_attribute("src") {
                        found.borrow_mut().push(Thumbnail {
                            url,
                            title: el
                                .get_attribute("title")
                                .or_else(|| el.get_attribute("alt"))
                                .unwrap_or_default(),
                            width: el.get_attribute("width").unwrap_or_default(),
                            height: el.get_attribute("height").unwrap_or_default(),
                        });
                    }
                    Ok(())
                }
            })],
            ..RewriteStrSettings::default()
        },
    );

    if let Err(e) = result {
        tracing::warn!(error = %e, "Failed to scan entry body for images");
    }

    found.take()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_images_in_order() {
        let body = r#"<p>Intro</p><img src="/a.png" title="First" width="10" height="20">
            <IMG SRC='/b.jpg' alt="Second"/>"#;
        let thumbs = thumbnails(body);

        assert_eq!(
            thumbs,
            vec![
                Thumbnail {
                    url: "/a.png".to_string(),
                    title: "First".to_string(),
                    width: "10".to_string(),
                    height: "20".to_string(),
                },
                Thumbnail {
                    url: "/b.jpg".to_string(),
                    title: "Second".to_string(),
                    width: String::new(),
                    height: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_skips_opted_out_and_sourceless_images() {
        let body = r#"<img class="wide nomediarss" src="/skip.png"><img alt="no src"><img src=/keep.png>"#;
        let thumbs = thumbnails(body);

        assert_eq!(thumbs.len(), 1);
        assert_eq!(thumbs[0].url, "/keep.png");
    }

    #[test]
    fn test_title_prefers_title_over_alt() {
        let thumbs = thumbnails(r#"<img src="x.png" alt="alt text" title="title text">"#);
        assert_eq!(thumbs[0].title, "title text");
    }

    #[test]
    fn test_angle_bracket_inside_attribute() {
        let thumbs = thumbnails(r#"<img alt="a > b" src="/x.png">"#);

        assert_eq!(thumbs.len(), 1);
        assert_eq!(thumbs[0].url, "/x.png");
        assert_eq!(thumbs[0].title, "a > b");
    }

    #[test]
    fn test_commented_out_image_is_ignored() {
        let body = r#"<!-- <img src="/draft.png"> --><p>Text</p><img src="/live.png">"#;
        let thumbs = thumbnails(body);

        assert_eq!(thumbs.len(), 1);
        assert_eq!(thumbs[0].url, "/live.png");
    }
}
