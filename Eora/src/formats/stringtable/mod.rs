//! String table format module
//!
//! Each conversation has a localized `.stringtable` keyed by node id.

mod reader;

pub use reader::{parse_string_table, read_string_table};

use std::collections::HashMap;
use std::fmt;

/// A single localized line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringEntry {
    /// Node id this line belongs to
    pub id: i32,
    pub default_text: String,
    pub female_text: Option<String>,
}

impl fmt::Display for StringEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.default_text)
    }
}

/// Localized text for one conversation
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    /// Table name as recorded in the file
    pub name: String,
    entries: HashMap<i32, StringEntry>,
}

impl StringTable {
    /// Create an empty table (every lookup misses)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries; the first entry for an id wins
    pub fn from_entries(entries: impl IntoIterator<Item = StringEntry>) -> Self {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry);
        }
        table
    }

    /// Add an entry unless one already exists for its id
    pub fn insert(&mut self, entry: StringEntry) {
        self.entries.entry(entry.id).or_insert(entry);
    }

    #[must_use]
    pub fn get(&self, id: i32) -> Option<&StringEntry> {
        self.entries.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
