//! Declarative description of the backend blog table.
//!
//! The same table drives local validation, schema-drift warnings and the
//! generation of minimal payloads for exercising the backend directly.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value, json};

use crate::blog::BlogForm;
use crate::sanitize::{coerce_text, is_truthy, limits, validate_blog_lengths};

/// Allowed slug shape: lowercase letters, digits and hyphens.
pub const SLUG_PATTERN: &str = r"^[a-z0-9-]+$";

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SLUG_PATTERN).expect("static regex is valid"));

/// Value type expected in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Boolean,
}

/// Constraints on a single backend column.
#[derive(Debug, Clone, Copy)]
pub struct FieldConstraint {
    pub name: &'static str,
    pub max_length: Option<usize>,
    pub required: bool,
    /// Enforced by the backend only.
    pub unique: bool,
    pub pattern: Option<&'static str>,
    pub kind: FieldKind,
    pub default: Option<bool>,
}

impl FieldConstraint {
    const fn text(name: &'static str, max_length: Option<usize>, required: bool) -> Self {
        Self {
            name,
            max_length,
            required,
            unique: false,
            pattern: None,
            kind: FieldKind::Text,
            default: None,
        }
    }

    const fn flag(name: &'static str) -> Self {
        Self {
            name,
            max_length: None,
            required: false,
            unique: false,
            pattern: None,
            kind: FieldKind::Boolean,
            default: Some(false),
        }
    }

    fn matches_pattern(&self, value: &str) -> bool {
        match self.pattern {
            Some(SLUG_PATTERN) => SLUG_RE.is_match(value),
            Some(other) => Regex::new(other).is_ok_and(|re| re.is_match(value)),
            None => true,
        }
    }
}

/// The backend blog model.
#[derive(Debug)]
pub struct BlogModel {
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    pub constraints: &'static [FieldConstraint],
}

pub static BLOG_MODEL: BlogModel = BlogModel {
    required: &["title", "slug", "content", "author"],
    optional: &["summary", "imageUrl", "tags", "published", "featured"],
    constraints: &[
        FieldConstraint::text("title", Some(limits::TITLE), true),
        FieldConstraint {
            unique: true,
            pattern: Some(SLUG_PATTERN),
            ..FieldConstraint::text("slug", Some(limits::SLUG), true)
        },
        FieldConstraint::text("content", None, true),
        FieldConstraint::text("summary", Some(limits::SUMMARY), false),
        FieldConstraint::text("author", Some(limits::AUTHOR), true),
        FieldConstraint::text("imageUrl", Some(limits::IMAGE_URL), false),
        FieldConstraint::text("tags", Some(limits::TAGS), false),
        FieldConstraint::flag("published"),
        FieldConstraint::flag("featured"),
    ],
};

impl BlogModel {
    pub fn constraint(&self, field: &str) -> Option<&FieldConstraint> {
        self.constraints.iter().find(|c| c.name == field)
    }

    fn is_known(&self, field: &str) -> bool {
        self.required.contains(&field) || self.optional.contains(&field)
    }
}

/// Outcome of [`validate_against_model`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Check a loosely typed payload against [`BLOG_MODEL`].
///
/// Missing, over-long and badly shaped values are errors. Non-boolean flags
/// and fields the model does not know about are only warnings.
pub fn validate_against_model(fields: &Map<String, Value>) -> ModelReport {
    let model = &BLOG_MODEL;
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for field in model.required {
        let value = fields.get(*field);
        if !is_truthy(value) || coerce_text(value).trim().is_empty() {
            errors.push(format!("Missing required field: {field}"));
        }
    }

    for constraint in model.constraints {
        let value = fields.get(constraint.name);
        let present = is_truthy(value);

        if let Some(max) = constraint.max_length {
            if present && coerce_text(value).chars().count() > max {
                errors.push(format!(
                    "{} exceeds max length of {max} characters",
                    constraint.name
                ));
            }
        }

        if constraint.pattern.is_some()
            && present
            && !constraint.matches_pattern(&coerce_text(value))
        {
            errors.push(format!("{} does not match required pattern", constraint.name));
        }

        if constraint.kind == FieldKind::Boolean {
            if let Some(v) = value.filter(|v| !v.is_boolean()) {
                warnings.push(format!(
                    "{} should be boolean, got {}",
                    constraint.name,
                    type_name(v)
                ));
            }
        }
    }

    for field in fields.keys() {
        if !model.is_known(field) {
            warnings.push(format!("Unexpected field: {field}"));
        }
    }

    ModelReport {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null | Value::Array(_) | Value::Object(_) => "object",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
    }
}

/// A minimal payload the backend must accept: required fields only, so the
/// backend applies its own defaults for the rest.
pub fn generate_valid_test_data() -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("title".into(), json!("Valid Test Blog"));
    fields.insert("slug".into(), json!("valid-test-blog"));
    fields.insert(
        "content".into(),
        json!("This is valid test content for the blog post."),
    );
    fields.insert("author".into(), json!("TestUser"));
    fields
}

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Validate the admin blog form before it is sanitized and submitted.
pub fn validate_blog_form(form: &BlogForm) -> BTreeMap<&'static str, String> {
    let mut errors = BTreeMap::new();

    if form.title.trim().is_empty() {
        errors.insert("title", "Title is required".to_string());
    }
    if form.slug.trim().is_empty() {
        errors.insert("slug", "Slug is required".to_string());
    }
    if form.content.trim().is_empty() {
        errors.insert("content", "Content is required".to_string());
    }
    if form.author.trim().is_empty() {
        errors.insert("author", "Author is required".to_string());
    }

    if !form.slug.is_empty() && !is_valid_slug(&form.slug) {
        errors.insert(
            "slug",
            "Slug can only contain lowercase letters, numbers, and hyphens".to_string(),
        );
    }

    errors.extend(validate_blog_lengths(form));
    errors
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn minimal_required_payload_is_valid() {
        let report = validate_against_model(&fields(json!({
            "title": "t", "slug": "s", "content": "c", "author": "a"
        })));
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn missing_author_is_named() {
        let report = validate_against_model(&fields(json!({
            "title": "t", "slug": "s", "content": "c"
        })));
        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e.contains("author")));
        assert_eq!(report.errors, vec!["Missing required field: author"]);
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let report = validate_against_model(&fields(json!({
            "title": "   ", "slug": "s", "content": "c", "author": "a"
        })));
        assert_eq!(report.errors, vec!["Missing required field: title"]);
    }

    #[test]
    fn max_length_and_pattern_are_errors() {
        let report = validate_against_model(&fields(json!({
            "title": "t".repeat(256),
            "slug": "Not A Slug",
            "content": "c",
            "author": "a",
        })));
        assert!(!report.is_valid);
        assert!(report
            .errors
            .contains(&"title exceeds max length of 255 characters".to_string()));
        assert!(report
            .errors
            .contains(&"slug does not match required pattern".to_string()));
    }

    #[test]
    fn content_has_no_length_limit() {
        let report = validate_against_model(&fields(json!({
            "title": "t", "slug": "s", "content": "c".repeat(100_000), "author": "a"
        })));
        assert!(report.is_valid);
    }

    #[test]
    fn non_boolean_flags_and_unknown_fields_warn() {
        let report = validate_against_model(&fields(json!({
            "title": "t", "slug": "s", "content": "c", "author": "a",
            "published": "true",
            "category": "news",
        })));
        assert!(report.is_valid);
        assert_eq!(
            report.warnings,
            vec![
                "published should be boolean, got string".to_string(),
                "Unexpected field: category".to_string(),
            ]
        );
    }

    #[test]
    fn generated_test_data_passes_model() {
        let data = generate_valid_test_data();
        assert_eq!(data.len(), BLOG_MODEL.required.len());
        assert!(validate_against_model(&data).is_valid);
    }

    #[test]
    fn model_table_is_consistent() {
        for field in BLOG_MODEL.required {
            assert!(BLOG_MODEL.constraint(field).unwrap().required);
        }
        assert!(BLOG_MODEL.constraint("slug").unwrap().unique);
        assert_eq!(
            BLOG_MODEL.constraint("featured").unwrap().kind,
            FieldKind::Boolean
        );
        assert!(BLOG_MODEL.constraint("content").unwrap().max_length.is_none());
    }

    #[test]
    fn slug_rules() {
        assert!(is_valid_slug("panchakarma-101"));
        assert!(!is_valid_slug("Panchakarma"));
        assert!(!is_valid_slug("with space"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn blog_form_requires_core_fields() {
        let errors = validate_blog_form(&BlogForm::default());
        assert_eq!(errors.len(), 4);
        assert_eq!(errors["author"], "Author is required");
    }

    #[test]
    fn blog_form_reports_slug_shape() {
        let form = BlogForm {
            title: "Title".into(),
            slug: "Bad_Slug".into(),
            content: "Body".into(),
            author: "Dr. Rao".into(),
            ..Default::default()
        };
        let errors = validate_blog_form(&form);
        assert_eq!(
            errors["slug"],
            "Slug can only contain lowercase letters, numbers, and hyphens"
        );
    }
}
