//! Blog records, editable form state and the wire payload.
//!
//! The backend stores tags as a single comma-separated column but older
//! records come back as arrays, so [`Tags`] accepts either shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::sanitize::sanitize_for_backend;

/// Tags as returned by the backend or typed into a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tags {
    List(Vec<String>),
    Text(String),
}

impl Default for Tags {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Tags {
    /// Flatten to the comma-joined form shown in edit fields.
    pub fn joined(&self) -> String {
        match self {
            Self::List(items) => items.join(", "),
            Self::Text(text) => text.clone(),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::List(items) => json!(items),
            Self::Text(text) => json!(text),
        }
    }
}

/// A blog post as served by the public and admin endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Blog {
    pub id: Option<u64>,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub summary: Option<String>,
    pub author: String,
    pub image_url: Option<String>,
    pub tags: Option<Tags>,
    pub published: bool,
    pub featured: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Editable state of the admin blog form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogForm {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub summary: String,
    pub author: String,
    pub image_url: String,
    pub tags: Tags,
    pub published: bool,
    pub featured: bool,
}

impl BlogForm {
    /// Prefill the form from an existing post.
    pub fn from_blog(blog: &Blog) -> Self {
        Self {
            title: blog.title.clone(),
            slug: blog.slug.clone(),
            content: blog.content.clone(),
            summary: blog.summary.clone().unwrap_or_default(),
            author: blog.author.clone(),
            image_url: blog.image_url.clone().unwrap_or_default(),
            tags: Tags::Text(blog.tags.as_ref().map(Tags::joined).unwrap_or_default()),
            published: blog.published,
            featured: blog.featured,
        }
    }

    /// Loosely typed view of the form, keyed by backend field names.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("title".into(), json!(self.title));
        fields.insert("slug".into(), json!(self.slug));
        fields.insert("content".into(), json!(self.content));
        fields.insert("summary".into(), json!(self.summary));
        fields.insert("author".into(), json!(self.author));
        fields.insert("imageUrl".into(), json!(self.image_url));
        fields.insert("tags".into(), self.tags.to_value());
        fields.insert("published".into(), json!(self.published));
        fields.insert("featured".into(), json!(self.featured));
        fields
    }

    /// Normalize the form into the payload sent to the backend.
    pub fn to_payload(&self) -> BlogPayload {
        sanitize_for_backend(&self.to_fields())
    }
}

/// Backend-ready blog payload.
///
/// Produced only by [`sanitize_for_backend`]; every text field is trimmed and
/// within its column limit, and `imageUrl` is left out entirely when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPayload {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub summary: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub tags: String,
    pub published: bool,
    pub featured: bool,
}

impl BlogPayload {
    /// Loosely typed view of the payload, suitable for feeding back into
    /// [`sanitize_for_backend`] or [`crate::blog_model::validate_against_model`].
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("title".into(), json!(self.title));
        fields.insert("slug".into(), json!(self.slug));
        fields.insert("content".into(), json!(self.content));
        fields.insert("summary".into(), json!(self.summary));
        fields.insert("author".into(), json!(self.author));
        if let Some(url) = &self.image_url {
            fields.insert("imageUrl".into(), json!(url));
        }
        fields.insert("tags".into(), json!(self.tags));
        fields.insert("published".into(), json!(self.published));
        fields.insert("featured".into(), json!(self.featured));
        fields
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_blog_with_array_tags() {
        let json = r#"{
            "id": 7,
            "title": "Dosha basics",
            "slug": "dosha-basics",
            "content": "Vata, pitta, kapha.",
            "author": "Dr. Rao",
            "tags": ["ayurveda", "doshas"],
            "published": true,
            "featured": false,
            "createdAt": "2026-09-01T10:00:00"
        }"#;
        let blog: Blog = serde_json::from_str(json).unwrap();
        assert_eq!(blog.id, Some(7));
        assert_eq!(
            blog.tags,
            Some(Tags::List(vec!["ayurveda".into(), "doshas".into()]))
        );
        assert!(blog.image_url.is_none());
    }

    #[test]
    fn deserialize_blog_with_string_tags() {
        let json = r#"{"title": "t", "slug": "s", "content": "c", "author": "a", "tags": "x, y"}"#;
        let blog: Blog = serde_json::from_str(json).unwrap();
        assert_eq!(blog.tags, Some(Tags::Text("x, y".into())));
        assert!(!blog.published);
    }

    #[test]
    fn form_from_blog_flattens_tags_and_fills_blanks() {
        let blog = Blog {
            title: "Title".into(),
            tags: Some(Tags::List(vec!["a".into(), "b".into()])),
            published: true,
            ..Default::default()
        };
        let form = BlogForm::from_blog(&blog);
        assert_eq!(form.tags, Tags::Text("a, b".into()));
        assert_eq!(form.summary, "");
        assert_eq!(form.image_url, "");
        assert!(form.published);
    }

    #[test]
    fn payload_without_image_url_omits_key() {
        let payload = BlogPayload::default();
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("imageUrl").is_none());
        assert!(!payload.to_fields().contains_key("imageUrl"));
    }

    #[test]
    fn payload_with_image_url_serializes_camel_case() {
        let payload = BlogPayload {
            image_url: Some("http://x".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["imageUrl"], "http://x");
    }
}
