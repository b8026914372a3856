//! Image set payloads as served by the gallery API.

use std::fmt;

use serde::Deserialize;

/// Identifier of an image set.
///
/// The API uses folder names, but numeric ids are accepted too and kept in
/// their decimal text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawSetId")]
pub struct SetId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSetId {
    Text(String),
    Integer(i64),
}

impl From<RawSetId> for SetId {
    fn from(raw: RawSetId) -> Self {
        match raw {
            RawSetId::Text(text) => SetId(text),
            RawSetId::Integer(n) => SetId(n.to_string()),
        }
    }
}

impl SetId {
    pub fn new(id: impl Into<String>) -> Self {
        SetId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named collection of images with associated tags.
///
/// `GET /api/sets` returns these without `images` (summary form);
/// `GET /api/sets/{id}` returns one with the full image list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageSet {
    /// Unique identifier (folder name on the server)
    pub id: SetId,
    /// Display title
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// URL of the cover image, absent for empty sets
    #[serde(default)]
    pub preview_image: Option<String>,
    /// Tags used by the filter bar
    #[serde(default)]
    pub tags: Vec<String>,
    /// People shown in the set
    #[serde(default)]
    pub people: Vec<String>,
    /// Full image URLs, only present in the detail payload
    #[serde(default)]
    pub images: Vec<String>,
    /// Image count reported by the summary payload
    #[serde(default)]
    image_count: Option<usize>,
}

impl ImageSet {
    /// Create a set with a title and no images.
    pub fn new(id: impl Into<String>, title: &str) -> Self {
        Self {
            id: SetId::new(id),
            title: title.to_string(),
            description: String::new(),
            preview_image: None,
            tags: Vec::new(),
            people: Vec::new(),
            images: Vec::new(),
            image_count: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_people<I, S>(mut self, people: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.people = people.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `person` appears in the set, ignoring case.
    pub fn has_person(&self, person: &str) -> bool {
        self.people
            .iter()
            .any(|p| p.to_lowercase() == person.to_lowercase())
    }

    /// Whether the set carries `tag` (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Number of images, preferring the server-reported count.
    pub fn image_count(&self) -> usize {
        self.image_count.unwrap_or(self.images.len())
    }

    /// Cover image URL, falling back to the first image.
    pub fn cover(&self) -> Option<&str> {
        self.preview_image
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_payload() {
        let json = r#"{
            "id": "beach-2024",
            "title": "Beach",
            "tags": ["outdoor", "summer"],
            "description": "",
            "image_count": 12,
            "preview_image": "/images/sets/beach-2024/001.jpg",
            "created": 1718000000.5
        }"#;
        let set: ImageSet = serde_json::from_str(json).unwrap();

        assert_eq!(set.id.as_str(), "beach-2024");
        assert_eq!(set.image_count(), 12);
        assert!(set.images.is_empty());
        assert_eq!(set.cover(), Some("/images/sets/beach-2024/001.jpg"));
        assert!(set.has_tag("summer"));
        assert!(!set.has_tag("Summer"));
    }

    #[test]
    fn test_detail_payload_defaults() {
        let json = r#"{"id": 7, "title": "Studio", "images": ["/a.jpg", "/b.jpg"]}"#;
        let set: ImageSet = serde_json::from_str(json).unwrap();

        assert_eq!(set.id.to_string(), "7");
        assert!(set.tags.is_empty());
        assert!(set.people.is_empty());
        assert_eq!(set.image_count(), 2);
        assert_eq!(set.cover(), Some("/a.jpg"));
    }

    #[test]
    fn test_null_preview_image() {
        let json = r#"{"id": "empty", "title": "Empty", "preview_image": null, "image_count": 0}"#;
        let set: ImageSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.cover(), None);
        assert_eq!(set.image_count(), 0);
    }

    #[test]
    fn test_people_match_ignores_case() {
        let json = r#"{"id": "x", "title": "X", "people": ["Anna", "Jörg"],
                       "description": "Studio day"}"#;
        let set: ImageSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.description, "Studio day");
        assert!(set.has_person("anna"));
        assert!(set.has_person("JÖRG"));
        assert!(!set.has_person("ann"));
    }

    #[test]
    fn test_missing_title_is_an_error() {
        let json = r#"{"id": "x"}"#;
        assert!(serde_json::from_str::<ImageSet>(json).is_err());
    }
}
