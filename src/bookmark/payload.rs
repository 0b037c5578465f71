use std::fmt;

use serde::{
    Deserialize, Deserializer,
    de::{self, Visitor},
};

use crate::error::ApiError;
use crate::model::{BookmarkChanges, NewBookmark};

pub const EMPTY_UPDATE_MESSAGE: &str = "Request body must contain either title, url, about, or rating";

/// A JSON body field that tells apart "key absent" from "key set to null".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Missing
    }
}

impl<T> Patch<T> {
    pub fn is_value(&self) -> bool {
        matches!(self, Patch::Value(_))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

/// A text column value. JSON numbers and booleans are accepted and stored in
/// their textual form, so `"rating": 3` and `"rating": "3"` are the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text(pub String);

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TextVisitor;

        impl<'de> Visitor<'de> for TextVisitor {
            type Value = Text;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or a number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Text, E> {
                Ok(Text(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Text, E> {
                Ok(Text(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Text, E> {
                Ok(Text(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Text, E> {
                Ok(Text(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Text, E> {
                Ok(Text(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Text, E> {
                Ok(Text(v.to_string()))
            }
        }

        deserializer.deserialize_any(TextVisitor)
    }
}

/// Request body for both create and partial update. Keys other than the four
/// bookmark fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct BookmarkPayload {
    #[serde(default)]
    pub title: Patch<Text>,
    #[serde(default)]
    pub url: Patch<Text>,
    #[serde(default)]
    pub about: Patch<Text>,
    #[serde(default)]
    pub rating: Patch<Text>,
}

impl BookmarkPayload {
    /// Checks title, url, about, rating in that order; the first one missing
    /// or null names the error.
    pub fn into_new_bookmark(self) -> Result<NewBookmark, ApiError> {
        Ok(NewBookmark {
            title: required("title", self.title)?,
            url: required("url", self.url)?,
            about: required("about", self.about)?,
            rating: required("rating", self.rating)?,
        })
    }

    /// A field counts as supplied when its key carries a non-null value, even
    /// an empty string or zero. Nulls are passed through next to a supplied
    /// field but never satisfy the check on their own.
    pub fn into_changes(self) -> Result<BookmarkChanges, ApiError> {
        let supplied = [&self.title, &self.url, &self.about, &self.rating]
            .into_iter()
            .filter(|field| field.is_value())
            .count();

        if supplied == 0 {
            return Err(ApiError::Validation(EMPTY_UPDATE_MESSAGE.to_string()));
        }

        Ok(BookmarkChanges {
            title: column(self.title),
            url: column(self.url),
            about: column(self.about),
            rating: column(self.rating),
        })
    }
}

fn required(field: &str, value: Patch<Text>) -> Result<String, ApiError> {
    match value {
        Patch::Value(Text(v)) => Ok(v),
        Patch::Missing | Patch::Null => Err(ApiError::Validation(format!("Missing '{field}' in request body"))),
    }
}

fn column(value: Patch<Text>) -> Option<Option<String>> {
    match value {
        Patch::Missing => None,
        Patch::Null => Some(None),
        Patch::Value(Text(v)) => Some(Some(v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> BookmarkPayload {
        serde_json::from_str(json).unwrap()
    }

    fn validation_message(err: ApiError) -> String {
        match err {
            ApiError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn tells_missing_from_null() {
        let p = payload(r#"{"title": null, "url": "u"}"#);
        assert_eq!(p.title, Patch::Null);
        assert_eq!(p.url, Patch::Value(Text("u".into())));
        assert_eq!(p.about, Patch::Missing);
    }

    #[test]
    fn numbers_become_text() {
        let p = payload(r#"{"rating": 3, "title": 1.5, "about": true}"#);
        assert_eq!(p.rating, Patch::Value(Text("3".into())));
        assert_eq!(p.title, Patch::Value(Text("1.5".into())));
        assert_eq!(p.about, Patch::Value(Text("true".into())));
    }

    #[test]
    fn objects_are_rejected() {
        let err = serde_json::from_str::<BookmarkPayload>(r#"{"title": {"nested": 1}}"#).unwrap_err();
        assert!(err.to_string().contains("a string or a number"));
    }

    #[test]
    fn create_names_first_missing_field_in_order() {
        let err = payload(r#"{"about": "a"}"#).into_new_bookmark().unwrap_err();
        assert_eq!(validation_message(err), "Missing 'title' in request body");

        let err = payload(r#"{"title": "t", "url": "u", "about": "a", "rating": null}"#)
            .into_new_bookmark()
            .unwrap_err();
        assert_eq!(validation_message(err), "Missing 'rating' in request body");
    }

    #[test]
    fn create_accepts_complete_payload() {
        let new = payload(r#"{"title": "t", "url": "u", "about": "a", "rating": "3", "extra": 1}"#)
            .into_new_bookmark()
            .unwrap();
        assert_eq!(
            new,
            NewBookmark {
                title: "t".into(),
                url: "u".into(),
                about: "a".into(),
                rating: "3".into(),
            }
        );
    }

    #[test]
    fn update_needs_at_least_one_recognized_field() {
        let err = payload(r#"{"irrelevantField": "foo"}"#).into_changes().unwrap_err();
        assert_eq!(validation_message(err), EMPTY_UPDATE_MESSAGE);

        let err = payload(r#"{"title": null}"#).into_changes().unwrap_err();
        assert_eq!(validation_message(err), EMPTY_UPDATE_MESSAGE);
    }

    #[test]
    fn update_counts_empty_string_and_zero_as_supplied() {
        let changes = payload(r#"{"about": ""}"#).into_changes().unwrap();
        assert_eq!(changes.about, Some(Some(String::new())));

        let changes = payload(r#"{"rating": 0}"#).into_changes().unwrap();
        assert_eq!(changes.rating, Some(Some("0".into())));
    }

    #[test]
    fn update_keeps_explicit_nulls_next_to_values() {
        let changes = payload(r#"{"title": "new", "url": null}"#).into_changes().unwrap();
        assert_eq!(changes.title, Some(Some("new".into())));
        assert_eq!(changes.url, Some(None));
        assert_eq!(changes.about, None);
        assert_eq!(changes.rating, None);
    }
}
