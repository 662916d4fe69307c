//! Slug and tag normalization.
//!
//! Titles are transliterated to ASCII by the `slug` crate, lowercased, and
//! every run of non-word characters collapses into a single `-`. Underscores
//! count as word characters and are kept.
//! Uniqueness against the store lives in
//! [`crate::application::services::EntryService::unique_slug`].

use std::collections::BTreeSet;

/// Slug used when a title has no representable characters.
pub const FALLBACK_SLUG: &str = "entry";

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits on runs of non-word characters and joins the words with `-`.
/// Inside a word, each `_`-separated part is slugified on its own so
/// underscores survive transliteration.
fn slug_words(text: &str) -> String {
    let slug = text
        .split(|c: char| !is_word_char(c))
        .filter(|word| !word.is_empty())
        .map(|word| {
            word.split('_')
                .map(::slug::slugify)
                .collect::<Vec<_>>()
                .join("_")
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.bytes().any(|b| b.is_ascii_alphanumeric()) {
        slug
    } else {
        String::new()
    }
}

/// Derives a URL-safe slug from a title, falling back to [`FALLBACK_SLUG`].
pub fn slugify(title: &str) -> String {
    let slug = slug_words(title);
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Normalizes a comma-separated tag list into a sorted, de-duplicated set.
///
/// Each label is slugified; labels that normalize to nothing are dropped.
pub fn normalize_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(slug_words)
        .filter(|tag| !tag.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Appends a disambiguating suffix to a base slug.
pub fn with_suffix(base: &str, suffix: &str) -> String {
    format!("{base}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic_title() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  Rust -- and   Axum  "), "rust-and-axum");
    }

    #[test]
    fn test_slugify_strips_accents() {
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
    }

    #[test]
    fn test_slugify_empty_fallback() {
        assert_eq!(slugify(""), FALLBACK_SLUG);
        assert_eq!(slugify("   "), FALLBACK_SLUG);
        assert_eq!(slugify("!!!"), FALLBACK_SLUG);
        assert_eq!(slugify("_ _"), FALLBACK_SLUG);
        assert_eq!(slugify(""), slugify("   "));
    }

    #[test]
    fn test_slugify_output_is_url_safe() {
        let slug = slugify("What's new in 2024? (Part 2/3)");
        assert!(
            slug.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        );
        assert!(!slug.starts_with('-'));
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_slugify_keeps_underscores() {
        assert_eq!(slugify("snake_case rocks"), "snake_case-rocks");
        assert_eq!(slugify("__init__ Explained"), "__init__-explained");
        assert_eq!(slugify("Über_Größe"), "uber_grosse");
    }

    #[test]
    fn test_normalize_tags() {
        assert_eq!(normalize_tags("a, b"), vec!["a", "b"]);
    }

    #[test]
    fn test_normalize_tags_dedupes_and_sorts() {
        assert_eq!(
            normalize_tags("Rust, web,rust , WEB,axum"),
            vec!["axum", "rust", "web"]
        );
    }

    #[test]
    fn test_normalize_tags_drops_empty_labels() {
        assert!(normalize_tags("").is_empty());
        assert!(normalize_tags(" , ,, ").is_empty());
        assert_eq!(normalize_tags("Open Source, "), vec!["open-source"]);
    }

    #[test]
    fn test_normalize_tags_keeps_underscores() {
        assert_eq!(normalize_tags("my_tag, My Tag"), vec!["my-tag", "my_tag"]);
    }

    #[test]
    fn test_with_suffix() {
        assert_eq!(with_suffix("hello-world", "3f"), "hello-world-3f");
    }
}
