//! Markdown preprocessing for service and treatment descriptions.
//!
//! Descriptions are authored as emoji-decorated plain text. A fixed list of
//! rewrite rules turns the known section markers into markdown headings and
//! list items. The rules are heuristic: text that does not follow the usual
//! authoring conventions passes through mostly unchanged.

use std::sync::LazyLock;

use regex::Regex;

/// A single `pattern -> replacement` rewrite.
struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

const RULE_TABLE: &[(&str, &str)] = &[
    (r"🌿\s*(.*?)\s*✨", "## 🌿 ${1} ✨\n\n"),
    (r"🌸\s*(.*?):", "### 🌸 ${1}:\n\n"),
    (r"🌺\s*(.*?):", "### 🌺 ${1}:\n\n"),
    (r"🧘‍♀️\s*(.*?):", "### 🧘‍♀️ ${1}:\n\n"),
    (r"⚖️\s*(.*?):", "### ⚖️ ${1}:\n\n"),
    (r"🕐\s*(.*?):", "### 🕐 ${1}:\n\n"),
    (r"🏥\s*(.*?):", "### 🏥 ${1}:\n\n"),
    (r"👩‍⚕️\s*(.*?):", "### 👩‍⚕️ ${1}:\n\n"),
    (r"([1-5]️⃣)\s*\*\*(.*?)\*\*", "\n- **${1} ${2}**"),
    (r"(?m)✅\s*(.*?)$", "- ✅ ${1}"),
    (r"(?m)•\s*(.*?)$", "- ${1}"),
    (r"\n\s*\n\s*\n", "\n\n"),
];

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    RULE_TABLE
        .iter()
        .map(|&(pattern, replacement)| Rule {
            pattern: Regex::new(pattern).expect("static regex is valid"),
            replacement,
        })
        .collect()
});

/// Rewrite a description into markdown with one paragraph per block.
pub fn preprocess_description(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let rewritten = RULES.iter().fold(text.to_string(), |acc, rule| {
        rule.pattern
            .replace_all(&acc, rule.replacement)
            .into_owned()
    });

    rewritten
        .trim()
        .split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
