use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fields sent when creating or updating a document in the ESG library.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LibraryBookDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Local file to attach; switches the request to multipart
    #[serde(skip)]
    pub file: Option<PathBuf>,
}

impl LibraryBookDraft {
    /// Text fields as `(name, value)` pairs for a multipart form.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("title", self.title.clone())];
        if let Some(author) = &self.author {
            fields.push(("author", author.clone()));
        }
        if let Some(category) = &self.category {
            fields.push(("category", category.clone()));
        }
        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }
        fields
    }
}

/// Document record as returned by the library endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryBook {
    #[serde(deserialize_with = "crate::de::string_or_number")]
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub file_url: Option<String>,
}
