//! Category rules and the in-memory rule set.
//!
//! A [`CategoryRule`] maps a folder name to the file extensions that belong
//! in it. Rules are only ever built through normalization, so every rule in
//! a [`RuleSet`] has a non-empty trimmed name and at least one extension,
//! each starting with `.` and unique within the rule.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons raw category input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("Category name must not be empty")]
    EmptyName,

    #[error("Category must have at least one file extension")]
    NoExtensions,

    #[error("A category named '{0}' already exists")]
    DuplicateName(String),
}

// ---------------------------------------------------------------------------
// CategoryRule
// ---------------------------------------------------------------------------

/// A named group of file extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRule {
    name: String,
    extensions: Vec<String>,
}

impl CategoryRule {
    /// Build a rule from raw user input, without checking it against any
    /// existing rule set.
    ///
    /// The name is trimmed; the extensions string is normalized with
    /// [`normalize_extensions`].
    pub fn parse(raw_name: &str, raw_extensions: &str) -> Result<Self, RuleError> {
        let name = raw_name.trim();
        if name.is_empty() {
            return Err(RuleError::EmptyName);
        }

        let extensions = normalize_extensions(raw_extensions);
        if extensions.is_empty() {
            return Err(RuleError::NoExtensions);
        }

        Ok(Self {
            name: name.to_string(),
            extensions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Case-insensitive name comparison used for uniqueness.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

/// Normalize a comma-separated extension list.
///
/// Tokens are trimmed, empty tokens dropped, a leading `.` is added where
/// missing, and duplicates are removed keeping the first occurrence.
/// A token made only of a dot carries no extension and is dropped.
pub fn normalize_extensions(raw: &str) -> Vec<String> {
    let mut extensions: Vec<String> = Vec::new();

    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() || token == "." {
            continue;
        }

        let ext = if token.starts_with('.') {
            token.to_string()
        } else {
            format!(".{token}")
        };

        if !extensions.contains(&ext) {
            extensions.push(ext);
        }
    }

    extensions
}

/// Normalize raw input into a rule that can be added to `rules`.
///
/// Rejects empty names, empty extension lists, and names that collide
/// case-insensitively with an existing rule. Does not modify `rules`.
pub fn normalize_rule(
    rules: &RuleSet,
    raw_name: &str,
    raw_extensions: &str,
) -> Result<CategoryRule, RuleError> {
    let rule = CategoryRule::parse(raw_name, raw_extensions)?;
    if rules.contains_name(rule.name()) {
        return Err(RuleError::DuplicateName(rule.name));
    }
    Ok(rule)
}

// ---------------------------------------------------------------------------
// RuleSet
// ---------------------------------------------------------------------------

/// Insertion-ordered collection of rules, unique by case-insensitive name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<CategoryRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A rule set seeded with [`crate::defaults::default_rules`].
    pub fn with_defaults() -> Self {
        let mut set = Self::new();
        for rule in crate::defaults::default_rules() {
            set.add(rule);
        }
        set
    }

    /// Append `rule` unless its name collides or it has no extensions.
    ///
    /// Returns `true` when the rule was inserted.
    pub fn add(&mut self, rule: CategoryRule) -> bool {
        if rule.extensions.is_empty() || self.contains_name(&rule.name) {
            return false;
        }
        self.rules.push(rule);
        true
    }

    /// Remove the rule whose name matches `name` exactly.
    ///
    /// Returns `false` (and leaves the set untouched) when no rule matches.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|rule| rule.name != name);
        self.rules.len() != before
    }

    pub fn list(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.has_name(name))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryRule> {
        self.rules.iter()
    }
}
