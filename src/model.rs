use serde::{Deserialize, Serialize};

/// A row of the `bookmarks` table, and also the shape handed to clients once
/// it has been through [`crate::sanitize::sanitize_bookmark`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub about: String,
    pub rating: String,
}

/// A bookmark that has passed create validation but has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub about: String,
    pub rating: String,
}

/// Column changes for a partial update. `Some(None)` writes SQL `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkChanges {
    pub title: Option<Option<String>>,
    pub url: Option<Option<String>>,
    pub about: Option<Option<String>>,
    pub rating: Option<Option<String>>,
}

impl BookmarkChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.about.is_none() && self.rating.is_none()
    }
}
