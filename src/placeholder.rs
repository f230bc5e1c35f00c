use crate::error::{Result, StackgenError};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Pattern for placeholder tokens, e.g. `<REPLACE_DB_HOST>`
pub const TOKEN_PATTERN: &str = r"<[A-Z][A-Z0-9_]*>";

/// A user-configurable value embedded in templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    /// Token text as it appears in templates, including the angle brackets
    pub token: String,
    /// Value substituted for the token
    pub value: String,
    /// Human-readable prompt written to the guidance file
    #[serde(default)]
    pub prompt: String,
}

impl Placeholder {
    pub fn new(token: impl Into<String>, value: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            value: value.into(),
            prompt: prompt.into(),
        }
    }
}

/// Ordered token-to-value mapping, keyed by token.
///
/// Iteration order is insertion order. Inserting a token that is already
/// present replaces the binding in its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Placeholder>", into = "Vec<Placeholder>")]
pub struct PlaceholderSet {
    entries: Vec<Placeholder>,
}

impl PlaceholderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the binding for `placeholder.token`
    pub fn insert(&mut self, placeholder: Placeholder) {
        match self.entries.iter_mut().find(|p| p.token == placeholder.token) {
            Some(existing) => *existing = placeholder,
            None => self.entries.push(placeholder),
        }
    }

    /// Rebinds an existing token's value, keeping its prompt. Unknown tokens
    /// are appended with an empty prompt.
    pub fn set_value(&mut self, token: &str, value: &str) {
        match self.entries.iter_mut().find(|p| p.token == token) {
            Some(existing) => existing.value = value.to_string(),
            None => self.entries.push(Placeholder::new(token, value, "")),
        }
    }

    pub fn get(&self, token: &str) -> Option<&Placeholder> {
        self.entries.iter().find(|p| p.token == token)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Placeholder> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs of bound tokens where the first is a substring of the second
    pub fn overlapping_tokens(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for inner in &self.entries {
            for outer in &self.entries {
                if inner.token != outer.token && outer.token.contains(&inner.token) {
                    pairs.push((inner.token.clone(), outer.token.clone()));
                }
            }
        }
        pairs
    }
}

impl From<Vec<Placeholder>> for PlaceholderSet {
    fn from(placeholders: Vec<Placeholder>) -> Self {
        let mut set = Self::new();
        for placeholder in placeholders {
            set.insert(placeholder);
        }
        set
    }
}

impl From<PlaceholderSet> for Vec<Placeholder> {
    fn from(set: PlaceholderSet) -> Self {
        set.entries
    }
}

impl<'a> IntoIterator for &'a PlaceholderSet {
    type Item = &'a Placeholder;
    type IntoIter = std::slice::Iter<'a, Placeholder>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Finds all distinct placeholder tokens in `text`, in order of first appearance
///
/// # Errors
///
/// Returns `StackgenError::Regex` if the token pattern fails to compile.
pub fn find_tokens(text: &str) -> Result<Vec<String>> {
    let pattern = Regex::new(TOKEN_PATTERN)?;
    let mut tokens: Vec<String> = Vec::new();

    for found in pattern.find_iter(text) {
        let token = found.as_str();
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }

    Ok(tokens)
}

/// Parses a `TOKEN=VALUE` override. The value may itself contain `=`.
///
/// # Errors
///
/// Returns `StackgenError::InvalidBinding` if there is no `=` or the token is empty.
pub fn parse_binding(binding: &str) -> Result<(String, String)> {
    match binding.split_once('=') {
        Some((token, value)) if !token.trim().is_empty() => {
            Ok((token.trim().to_string(), value.to_string()))
        }
        _ => Err(StackgenError::InvalidBinding {
            binding: binding.to_string(),
        }),
    }
}
