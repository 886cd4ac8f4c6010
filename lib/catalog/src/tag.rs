//! Tags attached to programs.

use campus_core::TagId;
use serde::{Deserialize, Serialize};

/// A label that can be attached to programs, with an optional display
/// color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique tag ID.
    id: TagId,
    /// Tag title, unique within the catalog.
    title: String,
    /// Display color as a hex code, e.g. "#2E86AB".
    hex_code: Option<String>,
}

impl Tag {
    /// Creates a new tag.
    #[must_use]
    pub fn new(title: String, hex_code: Option<String>) -> Self {
        Self {
            id: TagId::new(),
            title,
            hex_code,
        }
    }

    /// Creates a tag with all fields specified, for reconstitution from
    /// storage.
    #[must_use]
    pub fn with_id(id: TagId, title: String, hex_code: Option<String>) -> Self {
        Self {
            id,
            title,
            hex_code,
        }
    }

    /// Returns the tag's ID.
    #[must_use]
    pub fn id(&self) -> TagId {
        self.id
    }

    /// Returns the tag title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the display color, if set.
    #[must_use]
    pub fn hex_code(&self) -> Option<&str> {
        self.hex_code.as_deref()
    }

    /// Applies an incoming patch: provided fields overwrite, absent
    /// fields are left alone.
    pub fn apply(&mut self, input: &TagInput) {
        if let Some(title) = &input.title {
            self.title = title.clone();
        }
        if let Some(hex) = &input.hex_code {
            self.hex_code = Some(hex.clone());
        }
    }
}

/// An incoming tag reference, as submitted with a program.
///
/// May reference an existing tag by ID, by title, or describe a brand
/// new tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInput {
    /// Existing tag ID, when known to the caller.
    pub id: Option<TagId>,
    /// Tag title.
    pub title: Option<String>,
    /// Display color.
    pub hex_code: Option<String>,
}

impl TagInput {
    /// Creates an input describing a new tag by title.
    #[must_use]
    pub fn titled(title: &str) -> Self {
        Self {
            id: None,
            title: Some(title.to_string()),
            hex_code: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_overwrites_provided_fields_only() {
        let mut tag = Tag::new("rust".to_string(), Some("#B7410E".to_string()));

        tag.apply(&TagInput {
            id: None,
            title: Some("systems".to_string()),
            hex_code: None,
        });

        assert_eq!(tag.title(), "systems");
        assert_eq!(tag.hex_code(), Some("#B7410E"));
    }

    #[test]
    fn apply_can_set_hex_code() {
        let mut tag = Tag::new("rust".to_string(), None);

        tag.apply(&TagInput {
            id: None,
            title: None,
            hex_code: Some("#000000".to_string()),
        });

        assert_eq!(tag.title(), "rust");
        assert_eq!(tag.hex_code(), Some("#000000"));
    }
}
