//! Input sanitization and backend payload normalization.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::blog::{BlogForm, BlogPayload};

/// Column limits of the backend `blogs` table, in characters.
pub mod limits {
    pub const TITLE: usize = 255;
    pub const SLUG: usize = 255;
    pub const SUMMARY: usize = 500;
    pub const AUTHOR: usize = 100;
    pub const IMAGE_URL: usize = 1000;
    pub const TAGS: usize = 500;
}

/// Strip `<` and `>` and trim surrounding whitespace.
///
/// Used on every keystroke in public forms. This only blunts the most obvious
/// markup injection and is **not** a security boundary: the backend must
/// validate and escape everything it stores or renders.
pub fn sanitize_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '<' | '>'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalize loosely typed blog form state into a [`BlogPayload`].
///
/// Applying this to the fields of its own output yields the same payload.
pub fn sanitize_for_backend(fields: &Map<String, Value>) -> BlogPayload {
    let text = |key: &str, limit: Option<usize>| {
        let value = coerce_text(fields.get(key));
        let trimmed = value.trim();
        match limit {
            Some(limit) => clip(trimmed, limit),
            None => trimmed.to_string(),
        }
    };

    let image_url = text("imageUrl", Some(limits::IMAGE_URL));

    BlogPayload {
        title: text("title", Some(limits::TITLE)),
        slug: text("slug", Some(limits::SLUG)),
        content: text("content", None),
        summary: text("summary", Some(limits::SUMMARY)),
        author: text("author", Some(limits::AUTHOR)),
        image_url: (!image_url.is_empty()).then_some(image_url),
        tags: flatten_tags(fields.get("tags")),
        published: is_truthy(fields.get("published")),
        featured: is_truthy(fields.get("featured")),
    }
}

fn flatten_tags(value: Option<&Value>) -> String {
    let joined = match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| is_truthy(Some(item)))
            .map(|item| coerce_text(Some(item)).trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => coerce_text(other).trim().to_string(),
    };
    clip(&joined, limits::TAGS)
}

/// Truncate to `limit` characters without leaving trailing whitespace.
fn clip(value: &str, limit: usize) -> String {
    let truncated: String = value.chars().take(limit).collect();
    truncated.trim_end().to_string()
}

/// Stringify a form value the way a browser form library would, treating
/// `null`, `false` and `0` as empty.
pub fn coerce_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => String::new(),
        Some(Value::Bool(true)) => "true".into(),
        Some(Value::Number(n)) => {
            if n.as_f64() == Some(0.0) {
                String::new()
            } else {
                n.to_string()
            }
        }
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| coerce_text(Some(item)))
            .collect::<Vec<_>>()
            .join(","),
        Some(obj @ Value::Object(_)) => obj.to_string(),
    }
}

/// Truthiness of a loosely typed value.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Check form fields against the backend column limits before submitting.
///
/// Returns field name to message; empty when everything fits.
pub fn validate_blog_lengths(form: &BlogForm) -> BTreeMap<&'static str, String> {
    let tags = form.tags.joined();
    let checks: [(&'static str, &str, &str, usize); 6] = [
        ("title", "Title is", &form.title, limits::TITLE),
        ("slug", "Slug is", &form.slug, limits::SLUG),
        ("summary", "Summary is", &form.summary, limits::SUMMARY),
        ("author", "Author name is", &form.author, limits::AUTHOR),
        ("imageUrl", "Image URL is", &form.image_url, limits::IMAGE_URL),
        ("tags", "Tags are", &tags, limits::TAGS),
    ];

    checks
        .into_iter()
        .filter_map(|(field, label, value, limit)| {
            let len = value.chars().count();
            (len > limit).then(|| (field, format!("{label} too long ({len}/{limit} characters)")))
        })
        .collect()
}

/// How close a field is to its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterLevel {
    Success,
    Warning,
    Danger,
}

/// Character counter state for a limited field.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterStatus {
    pub length: usize,
    pub limit: usize,
    pub remaining: i64,
    pub percentage: f64,
    pub is_over_limit: bool,
    pub level: CharacterLevel,
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
pub fn character_status(text: &str, limit: usize) -> CharacterStatus {
    let length = text.chars().count();
    let percentage = if limit == 0 {
        100.0
    } else {
        length as f64 / limit as f64 * 100.0
    };
    let level = if percentage > 90.0 {
        CharacterLevel::Danger
    } else if percentage > 75.0 {
        CharacterLevel::Warning
    } else {
        CharacterLevel::Success
    };
    CharacterStatus {
        length,
        limit,
        remaining: limit as i64 - length as i64,
        percentage,
        is_over_limit: length > limit,
        level,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::blog::Tags;
    use proptest::prelude::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn sanitize_input_strips_angle_brackets() {
        assert_eq!(sanitize_input("  <script>hi</script> "), "scripthi/script");
        assert_eq!(sanitize_input("plain"), "plain");
        assert_eq!(sanitize_input(""), "");
    }

    #[test]
    fn empty_image_url_is_omitted() {
        let payload = sanitize_for_backend(&fields(json!({"imageUrl": ""})));
        assert!(payload.image_url.is_none());
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.as_object().unwrap().get("imageUrl").is_none());

        let blank = sanitize_for_backend(&fields(json!({"imageUrl": "   "})));
        assert!(blank.image_url.is_none());
    }

    #[test]
    fn present_image_url_is_kept() {
        let payload = sanitize_for_backend(&fields(json!({"imageUrl": " http://x "})));
        assert_eq!(payload.image_url.as_deref(), Some("http://x"));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["imageUrl"], "http://x");
    }

    #[test]
    fn text_fields_are_trimmed_and_truncated() {
        let payload = sanitize_for_backend(&fields(json!({
            "title": format!("  {}  ", "t".repeat(300)),
            "author": "a".repeat(150),
            "summary": "s".repeat(600),
            "content": format!(" {} ", "c".repeat(5000)),
        })));
        assert_eq!(payload.title.chars().count(), 255);
        assert_eq!(payload.author.chars().count(), 100);
        assert_eq!(payload.summary.chars().count(), 500);
        assert_eq!(payload.content.chars().count(), 5000);
    }

    #[test]
    fn truncation_does_not_leave_trailing_space() {
        let title = format!("{} tail", "t".repeat(254));
        let payload = sanitize_for_backend(&fields(json!({"title": title})));
        assert_eq!(payload.title, "t".repeat(254));
    }

    #[test]
    fn tag_list_is_filtered_and_joined() {
        let payload = sanitize_for_backend(&fields(json!({
            "tags": ["ayurveda", "  ", "", null, " detox "]
        })));
        assert_eq!(payload.tags, "ayurveda, detox");
    }

    #[test]
    fn scalar_tags_are_trimmed() {
        let payload = sanitize_for_backend(&fields(json!({"tags": "  a, b  "})));
        assert_eq!(payload.tags, "a, b");
        let numeric = sanitize_for_backend(&fields(json!({"tags": 42})));
        assert_eq!(numeric.tags, "42");
    }

    #[test]
    fn tags_are_truncated_to_column_limit() {
        let many: Vec<String> = (0..200).map(|i| format!("tag{i}")).collect();
        let payload = sanitize_for_backend(&fields(json!({"tags": many})));
        assert!(payload.tags.chars().count() <= limits::TAGS);
        assert!(!payload.tags.ends_with(' '));
    }

    #[test]
    fn flags_use_truthiness() {
        let payload = sanitize_for_backend(&fields(json!({
            "published": "yes",
            "featured": 0,
        })));
        assert!(payload.published);
        assert!(!payload.featured);

        let missing = sanitize_for_backend(&Map::new());
        assert!(!missing.published);
        assert!(!missing.featured);
    }

    #[test]
    fn falsy_values_coerce_to_empty_text() {
        assert_eq!(coerce_text(None), "");
        assert_eq!(coerce_text(Some(&json!(null))), "");
        assert_eq!(coerce_text(Some(&json!(false))), "");
        assert_eq!(coerce_text(Some(&json!(0))), "");
        assert_eq!(coerce_text(Some(&json!(12))), "12");
        assert_eq!(coerce_text(Some(&json!(["a", "b"]))), "a,b");
    }

    #[test]
    fn blog_lengths_report_each_overflow() {
        let form = BlogForm {
            title: "t".repeat(256),
            author: "a".repeat(101),
            tags: Tags::Text("x".repeat(501)),
            ..Default::default()
        };
        let errors = validate_blog_lengths(&form);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors["title"], "Title is too long (256/255 characters)");
        assert_eq!(errors["author"], "Author name is too long (101/100 characters)");
        assert_eq!(errors["tags"], "Tags are too long (501/500 characters)");
    }

    #[test]
    fn blog_lengths_accept_exact_limits() {
        let form = BlogForm {
            title: "t".repeat(255),
            summary: "s".repeat(500),
            ..Default::default()
        };
        assert!(validate_blog_lengths(&form).is_empty());
    }

    #[test]
    fn character_status_levels() {
        assert_eq!(character_status("", 100).level, CharacterLevel::Success);
        assert_eq!(character_status(&"x".repeat(80), 100).level, CharacterLevel::Warning);
        let over = character_status(&"x".repeat(120), 100);
        assert_eq!(over.level, CharacterLevel::Danger);
        assert!(over.is_over_limit);
        assert_eq!(over.remaining, -20);
    }

    fn loose_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(|n| json!(n)),
            "[ a-zA-Z0-9,-]{0,600}".prop_map(Value::String),
            prop::collection::vec("[ a-z]{0,12}", 0..60).prop_map(|v| json!(v)),
        ]
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(
            title in loose_value(),
            slug in loose_value(),
            content in loose_value(),
            summary in loose_value(),
            author in loose_value(),
            image_url in loose_value(),
            tags in loose_value(),
            published in loose_value(),
            featured in loose_value(),
        ) {
            let mut input = Map::new();
            input.insert("title".into(), title);
            input.insert("slug".into(), slug);
            input.insert("content".into(), content);
            input.insert("summary".into(), summary);
            input.insert("author".into(), author);
            input.insert("imageUrl".into(), image_url);
            input.insert("tags".into(), tags);
            input.insert("published".into(), published);
            input.insert("featured".into(), featured);

            let once = sanitize_for_backend(&input);
            let twice = sanitize_for_backend(&once.to_fields());
            prop_assert_eq!(once, twice);
        }
    }
}
