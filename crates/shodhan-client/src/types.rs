//! Catalogue records returned by the public API.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use shodhan_core::blog::{Blog, Tags};

/// Category label used for diseases the backend did not categorise.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryRef {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Disease {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub symptoms: Option<String>,
    pub treatment: Option<String>,
    pub causes: Option<String>,
    pub faqs: Option<Faqs>,
    /// Older records carry a single free-text FAQ instead of `faqs`.
    pub faq: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<CategoryRef>,
}

/// FAQ content, either `Q1: ... A: ...` text or structured pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Faqs {
    Text(String),
    List(Vec<FaqEntry>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

static QUESTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Q\d+:").expect("static regex is valid"));

impl Faqs {
    /// Question/answer pairs; text chunks without an `A:` marker are skipped.
    pub fn entries(&self) -> Vec<FaqEntry> {
        match self {
            Self::List(items) => items.clone(),
            Self::Text(text) => QUESTION_MARKER
                .split(text)
                .filter(|chunk| !chunk.trim().is_empty())
                .filter_map(|chunk| {
                    let (question, answer) = chunk.split_once("A:")?;
                    Some(FaqEntry {
                        question: question.trim().to_string(),
                        answer: answer.trim().to_string(),
                    })
                })
                .collect(),
        }
    }
}

impl Disease {
    /// FAQs in display order, falling back to the legacy single field.
    pub fn faq_entries(&self) -> Vec<FaqEntry> {
        match (&self.faqs, &self.faq) {
            (Some(faqs), _) => faqs.entries(),
            (None, Some(text)) if !text.trim().is_empty() => vec![FaqEntry {
                question: String::new(),
                answer: text.trim().to_string(),
            }],
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub diseases: Vec<Disease>,
}

/// Group diseases by their category name, in first-seen order.
pub fn group_by_category(diseases: Vec<Disease>) -> Vec<Category> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: BTreeMap<String, Category> = BTreeMap::new();
    for disease in diseases {
        let (id, name) = disease
            .category
            .as_ref()
            .filter(|c| !c.name.is_empty())
            .map_or((0, UNCATEGORIZED.to_string()), |c| (c.id, c.name.clone()));
        let group = groups.entry(name.clone()).or_insert_with(|| {
            order.push(name.clone());
            Category {
                id,
                name,
                ..Category::default()
            }
        });
        group.diseases.push(disease);
    }
    order
        .into_iter()
        .filter_map(|name| groups.remove(&name))
        .collect()
}

/// Keep categories with a disease whose name contains `term`, case-insensitively.
pub fn filter_categories(categories: &[Category], term: &str) -> Vec<Category> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return categories.to_vec();
    }
    categories
        .iter()
        .filter_map(|category| {
            let diseases: Vec<Disease> = category
                .diseases
                .iter()
                .filter(|d| d.name.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            (!diseases.is_empty()).then(|| Category {
                diseases,
                ..category.clone()
            })
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Clinic {
    pub id: u64,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub image_urls: Vec<String>,
}

/// Result of `GET /api/blogs/admin/generate-slug`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugSuggestion {
    pub slug: String,
}

/// Result of `GET /api/blogs/admin/check-slug`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugAvailability {
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn disease(name: &str, category: Option<(u64, &str)>) -> Disease {
        Disease {
            name: name.into(),
            category: category.map(|(id, n)| CategoryRef {
                id,
                name: n.into(),
            }),
            ..Disease::default()
        }
    }

    #[test]
    fn disease_deserializes_camel_case() {
        let d: Disease = serde_json::from_str(
            r#"{"id":4,"name":"Migraine","imageUrl":"/m.png","category":{"id":2,"name":"Neuro"},"faqs":"Q1: Why? A: Because."}"#,
        )
        .unwrap();
        assert_eq!(d.image_url.as_deref(), Some("/m.png"));
        assert_eq!(d.category.unwrap().name, "Neuro");
        assert!(matches!(d.faqs, Some(Faqs::Text(_))));
    }

    #[test]
    fn text_faqs_split_into_pairs() {
        let faqs = Faqs::Text(
            "Q1: Is it safe? A: Yes. Q2: How long? A: Two weeks, A: roughly. Q3: no answer".into(),
        );
        let entries = faqs.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].question, "Is it safe?");
        assert_eq!(entries[0].answer, "Yes.");
        assert_eq!(entries[1].answer, "Two weeks, A: roughly.");
    }

    #[test]
    fn list_faqs_and_legacy_field() {
        let d: Disease = serde_json::from_str(
            r#"{"id":1,"name":"x","faqs":[{"question":"Q","answer":"A"}]}"#,
        )
        .unwrap();
        assert_eq!(d.faq_entries().len(), 1);

        let legacy = Disease {
            faq: Some("Drink warm water.".into()),
            ..Disease::default()
        };
        assert_eq!(legacy.faq_entries()[0].answer, "Drink warm water.");
        assert!(Disease::default().faq_entries().is_empty());
    }

    #[test]
    fn grouping_keeps_first_seen_order_and_uncategorized() {
        let groups = group_by_category(vec![
            disease("Eczema", Some((3, "Skin"))),
            disease("Mystery", None),
            disease("Acne", Some((3, "Skin"))),
            disease("Asthma", Some((1, "Respiratory"))),
        ]);
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Skin", UNCATEGORIZED, "Respiratory"]);
        assert_eq!(groups[0].diseases.len(), 2);
        assert_eq!(groups[1].id, 0);
    }

    #[test]
    fn filter_matches_disease_names() {
        let groups = group_by_category(vec![
            disease("Eczema", Some((3, "Skin"))),
            disease("Asthma", Some((1, "Respiratory"))),
        ]);
        let hits = filter_categories(&groups, "ecz");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].diseases[0].name, "Eczema");
        assert_eq!(filter_categories(&groups, "  ").len(), 2);
    }

    #[test]
    fn password_change_wire_names() {
        let body = serde_json::to_value(PasswordChange {
            current_password: "old".into(),
            new_password: "newpass".into(),
        })
        .unwrap();
        assert_eq!(body["currentPassword"], "old");
        assert_eq!(body["newPassword"], "newpass");
    }
}
