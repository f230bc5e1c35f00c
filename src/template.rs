use crate::placeholder::PlaceholderSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One file of the bundle before substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Output path relative to the output root, `/`-separated
    pub path: String,
    /// Template text, possibly containing placeholder tokens
    pub content: String,
}

impl TemplateEntry {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn relative_path(&self) -> &Path {
        Path::new(&self.path)
    }

    /// Renders this entry with the given bindings
    pub fn render(&self, placeholders: &PlaceholderSet) -> String {
        render(&self.content, placeholders)
    }
}

/// Replaces every occurrence of every bound token with its value.
///
/// Bindings are applied in insertion order as literal substring replacements.
/// Tokens without a binding are left verbatim.
pub fn render(template: &str, placeholders: &PlaceholderSet) -> String {
    let mut result = template.to_string();
    for placeholder in placeholders {
        if placeholder.token.is_empty() || !result.contains(&placeholder.token) {
            continue;
        }
        result = result.replace(&placeholder.token, &placeholder.value);
    }
    result
}
