//! Alias table for resolving entity GUIDs to readable names
//!
//! Conversation conditionals refer to companions by GUID. The table maps
//! both ways so search facets can show names while matching raw ids.

use std::collections::HashMap;

/// Companion GUIDs shipped with the game
pub const COMPANIONS: &[(&str, &str)] = &[
    ("Edér", "b1a7e800-0000-0000-0000-000000000000"),
    ("Durance", "b1a7e801-0000-0000-0000-000000000000"),
    ("Aloth", "b1a7e803-0000-0000-0000-000000000000"),
    ("Kana Rua", "b1a7e804-0000-0000-0000-000000000000"),
    ("Sagani", "b1a7e805-0000-0000-0000-000000000000"),
    ("Pallegina", "b1a7e806-0000-0000-0000-000000000000"),
    ("Grieving Mother", "b1a7e807-0000-0000-0000-000000000000"),
    ("Hiravias", "b1a7e808-0000-0000-0000-000000000000"),
    ("Calisca", "b1a7e809-0000-0000-0000-000000000000"),
    ("Heodan", "b1a7e810-0000-0000-0000-000000000000"),
];

/// Bidirectional id ↔ alias mapping
///
/// Ids are matched ASCII case-insensitively; aliases exactly.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    /// Lowercased id -> alias
    by_id: HashMap<String, String>,
    /// Alias -> id as given
    by_alias: HashMap<String, String>,
}

impl AliasTable {
    /// Create an empty table (every value passes through unchanged)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table preloaded with the companion GUIDs
    #[must_use]
    pub fn companions() -> Self {
        Self::from_pairs(COMPANIONS.iter().copied())
    }

    /// Build from `(alias, id)` pairs
    pub fn from_pairs<A: Into<String>, I: Into<String>>(pairs: impl IntoIterator<Item = (A, I)>) -> Self {
        let mut table = Self::new();
        for (alias, id) in pairs {
            table.insert(alias, id);
        }
        table
    }

    /// Add one `(alias, id)` pair, replacing any previous mapping of either side
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>, id: impl Into<String>) -> Self {
        self.insert(alias, id);
        self
    }

    pub fn insert(&mut self, alias: impl Into<String>, id: impl Into<String>) {
        let alias = alias.into();
        let id = id.into();
        self.by_id.insert(id.to_ascii_lowercase(), alias.clone());
        self.by_alias.insert(alias, id);
    }

    /// Alias for a known id
    #[must_use]
    pub fn alias_for(&self, id: &str) -> Option<&str> {
        self.by_id.get(&id.to_ascii_lowercase()).map(String::as_str)
    }

    /// Id for a known alias
    #[must_use]
    pub fn id_for(&self, alias: &str) -> Option<&str> {
        self.by_alias.get(alias).map(String::as_str)
    }

    /// Display form of a value: its alias when the value is a known id,
    /// otherwise the value itself
    #[must_use]
    pub fn canonical<'a>(&'a self, value: &'a str) -> &'a str {
        self.alias_for(value).unwrap_or(value)
    }

    /// Whether two raw or aliased values denote the same thing
    #[must_use]
    pub fn same_value(&self, a: &str, b: &str) -> bool {
        self.canonical(a) == self.canonical(b)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_alias.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }
}
