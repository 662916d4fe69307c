//! Form and query payloads of the admin pages.

use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::application::services::Draft;
use crate::error::AppError;

/// Submitted by the compose editor.
///
/// A present `key` edits that entry; without one a new entry is created.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ComposeForm {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Body is required"))]
    pub body: String,
    #[serde(default)]
    pub tags: String,
    /// Checkbox; any non-empty value marks the entry hidden.
    #[serde(default)]
    pub hidden: Option<String>,
}

impl ComposeForm {
    pub fn draft(&self) -> Draft {
        Draft {
            title: self.title.clone(),
            body: self.body.clone(),
            tags: self.tags.clone(),
            hidden: flag(self.hidden.as_deref()),
        }
    }
}

/// `key` (and `unhide` for the hide page), from a query string or form body.
#[derive(Debug, Default, Deserialize)]
pub struct KeyParams {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub unhide: Option<String>,
}

impl KeyParams {
    pub fn unhide(&self) -> bool {
        flag(self.unhide.as_deref())
    }

    /// Fields present in `self` win over `fallback`.
    pub fn or(self, fallback: KeyParams) -> KeyParams {
        KeyParams {
            key: self.key.or(fallback.key),
            unhide: self.unhide.or(fallback.unhide),
        }
    }
}

/// How an entry `key` argument parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKey {
    Missing,
    Invalid,
    Id(i64),
}

impl EntryKey {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => EntryKey::Missing,
            Some(value) => value.parse().map_or(EntryKey::Invalid, EntryKey::Id),
        }
    }

    /// A required key: missing is a bad request, unparseable is not found.
    pub fn require(raw: Option<&str>) -> Result<i64, AppError> {
        match Self::parse(raw) {
            EntryKey::Id(id) => Ok(id),
            EntryKey::Missing => Err(AppError::bad_request(
                "Missing argument key",
                json!({ "field": "key" }),
            )),
            EntryKey::Invalid => Err(AppError::not_found(
                "Entry not found",
                json!({ "key": raw }),
            )),
        }
    }
}

fn flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}
