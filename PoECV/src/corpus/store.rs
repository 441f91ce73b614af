//! Cache of parsed conversations and their string tables
//!
//! Loading is idempotent: the first load of a path parses the file, later
//! loads hand out the same `Arc`. Caching is an optimization only.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use eora::formats::conversation::STRING_TABLE_EXTENSION;
use eora::formats::{ConversationData, StringTable, read_conversation, read_string_table};

use super::ConversationFile;
use crate::error::{Error, Result};

/// Derive the localized string table path of a conversation
///
/// The last `conversations` directory becomes
/// `localized/{language}/text/conversations` and the extension becomes
/// `.stringtable`. Paths without a `conversations` directory keep their
/// directory and only change extension.
#[must_use]
pub fn string_table_path(conversation: &Path, language: &str) -> PathBuf {
    let components: Vec<Component<'_>> = conversation.components().collect();
    let split = components
        .iter()
        .rposition(|c| c.as_os_str().to_string_lossy().eq_ignore_ascii_case("conversations"));

    let mut out = PathBuf::new();
    for (i, component) in components.iter().enumerate() {
        if Some(i) == split {
            out.push("localized");
            out.push(language);
            out.push("text");
        }
        out.push(component.as_os_str());
    }
    out.set_extension(STRING_TABLE_EXTENSION);
    out
}

/// Loads and caches conversation data and string tables per file path
#[derive(Debug, Clone)]
pub struct ConversationStore {
    language: String,
    /// Overrides the derived string table location: tables are looked up
    /// as `{localized_root}/{display}.stringtable`
    localized_root: Option<PathBuf>,
    conversations: HashMap<PathBuf, Arc<ConversationData>>,
    string_tables: HashMap<PathBuf, Arc<StringTable>>,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new("en")
    }
}

impl ConversationStore {
    /// Create an empty store reading string tables for `language`
    #[must_use]
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            localized_root: None,
            conversations: HashMap::new(),
            string_tables: HashMap::new(),
        }
    }

    /// Read string tables from a fixed localized root instead of deriving it
    #[must_use]
    pub fn with_localized_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.localized_root = Some(root.into());
        self
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Number of cached conversations
    #[must_use]
    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Drop every cached conversation and string table
    pub fn clear(&mut self) {
        self.conversations.clear();
        self.string_tables.clear();
    }

    /// Pre-seed the cache with already parsed data
    pub fn insert(&mut self, path: impl Into<PathBuf>, data: ConversationData) {
        self.conversations.insert(path.into(), Arc::new(data));
    }

    /// Pre-seed the string table of the conversation at `path`
    pub fn insert_string_table(&mut self, path: impl Into<PathBuf>, table: StringTable) {
        self.string_tables.insert(path.into(), Arc::new(table));
    }

    /// Load a conversation of the corpus
    ///
    /// # Errors
    /// Returns [`Error::Format`] if the file is missing or malformed.
    pub fn load(&mut self, file: &ConversationFile) -> Result<Arc<ConversationData>> {
        self.load_path(&file.path)
    }

    /// Load a conversation by path
    ///
    /// # Errors
    /// Returns [`Error::Format`] if the file is missing or malformed.
    pub fn load_path(&mut self, path: &Path) -> Result<Arc<ConversationData>> {
        if let Some(data) = self.conversations.get(path) {
            tracing::trace!("Conversation cache hit: {}", path.display());
            return Ok(Arc::clone(data));
        }

        let data = read_conversation(path).map_err(|source| Error::Format {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded {} ({} nodes)", path.display(), data.node_count());

        let data = Arc::new(data);
        self.conversations.insert(path.to_path_buf(), Arc::clone(&data));
        Ok(data)
    }

    /// Where the string table of `file` is read from
    #[must_use]
    pub fn string_table_location(&self, file: &ConversationFile) -> PathBuf {
        match &self.localized_root {
            Some(root) => root.join(format!("{}.{STRING_TABLE_EXTENSION}", file.display)),
            None => string_table_path(&file.path, &self.language),
        }
    }

    /// Load the localized text of a conversation
    ///
    /// A missing table is not an error: every node then shows its
    /// placeholder text.
    ///
    /// # Errors
    /// Returns [`Error::Format`] if the table exists but cannot be parsed.
    pub fn load_string_table(&mut self, file: &ConversationFile) -> Result<Arc<StringTable>> {
        if let Some(table) = self.string_tables.get(&file.path) {
            return Ok(Arc::clone(table));
        }

        let location = self.string_table_location(file);
        let table = if location.is_file() {
            read_string_table(&location).map_err(|source| Error::Format {
                path: location.clone(),
                source,
            })?
        } else {
            tracing::warn!("No string table for {} at {}", file.display, location.display());
            StringTable::new()
        };

        let table = Arc::new(table);
        self.string_tables.insert(file.path.clone(), Arc::clone(&table));
        Ok(table)
    }
}
