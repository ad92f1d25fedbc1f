//! Book model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Book record as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Server-generated identifier, immutable once assigned
    pub id: String,
    pub title: String,
    pub author: String,
    /// Empty when never set
    pub description: String,
    /// Empty when never set
    pub cover_image_url: String,
}

/// Create book request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    /// Required, must not be empty
    #[serde(default)]
    pub title: Option<String>,
    /// Required, must not be empty
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

/// Update book request.
///
/// `title` and `author` are only replaced by non-empty values. `description`
/// and `coverImageUrl` are replaced whenever the key is present, so an
/// explicit `""` clears them.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

/// Treat an empty string the same as a missing value
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl CreateBook {
    /// Title and author, if both are present and non-empty
    pub fn required_fields(&self) -> Option<(&str, &str)> {
        Some((non_empty(&self.title)?, non_empty(&self.author)?))
    }
}

impl UpdateBook {
    /// Apply this update to `book` in place
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(title) = non_empty(&self.title) {
            book.title = title.to_string();
        }
        if let Some(author) = non_empty(&self.author) {
            book.author = author.to_string();
        }
        if let Some(description) = &self.description {
            book.description = description.clone();
        }
        if let Some(cover_image_url) = &self.cover_image_url {
            book.cover_image_url = cover_image_url.clone();
        }
    }
}
