//! Domain DTOs for the post API.
//!
//! # Design
//! `Post` is always fully populated: text fields absent from a response, or
//! sent as `null`, decode as empty strings so editors never see a partial
//! record. Ids are opaque; the wire may carry them as numbers or strings.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned identifier of a post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => PostId(n.to_string()),
            Raw::Text(s) => PostId(s),
        })
    }
}

/// A blog post as held by a screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    #[serde(default, deserialize_with = "text_or_null")]
    pub title: String,
    #[serde(default, deserialize_with = "text_or_null")]
    pub description: String,
    #[serde(default, deserialize_with = "text_or_null")]
    pub content: String,
}

impl Post {
    /// Returns a new post with `field` replaced by `value`; `self` is left
    /// untouched.
    pub fn with_field(&self, field: Field, value: impl Into<String>) -> Post {
        let mut next = self.clone();
        *next.field_mut(field) = value.into();
        next
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Content => &self.content,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Content => &mut self.content,
        }
    }

    /// The editable part of the post, as sent by create and update.
    pub fn fields(&self) -> PostFields<'_> {
        PostFields {
            title: &self.title,
            description: &self.description,
            content: &self.content,
        }
    }
}

/// Request payload for create and update: exactly the three editable fields.
/// The id is never part of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PostFields<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub content: &'a str,
}

/// One of the client-editable fields of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Content,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Title, Field::Description, Field::Content];

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Content => "content",
        }
    }
}

/// Whatever subset of a post record a mutation response carries.
///
/// The reference server answers create and update with `{"id", "read"}`; a
/// richer server may echo the whole record. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ServerRecord {
    #[serde(default)]
    pub id: Option<PostId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ServerRecord {
    /// Overlay the server's values onto the submitted post. Server values
    /// win; fields it omits keep what the client sent.
    pub fn canonicalize(self, submitted: &Post) -> Post {
        Post {
            id: self.id.or_else(|| submitted.id.clone()),
            title: self.title.unwrap_or_else(|| submitted.title.clone()),
            description: self.description.unwrap_or_else(|| submitted.description.clone()),
            content: self.content.unwrap_or_else(|| submitted.content.clone()),
        }
    }
}

fn text_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
