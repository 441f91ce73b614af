#![allow(non_snake_case)]
//! # `PoECV`
//!
//! Pillars of Eternity conversation viewer.
//!
//! Builds navigable display trees from `.conversation` flowcharts (with
//! cycle, bank and cross-file trigger handling) and answers faceted
//! searches over the conditional script calls of a whole corpus.
//!
//! ## Quick Start
//!
//! ```no_run
//! use poecv::prelude::*;
//!
//! let config = ViewerConfig {
//!     corpus_root: Some("PillarsOfEternity_Data/data/conversations".into()),
//!     ..Default::default()
//! };
//! let mut viewer = Viewer::open(config)?;
//!
//! let file = viewer.corpus().find("companion_eder")?.clone();
//! let tree = viewer.build_display_tree(&file)?;
//! println!("{} entries", tree.count_expanded());
//!
//! viewer.build_script_call_index();
//! let query = SearchQuery::new("Boolean IsInParty(Guid)", 1).select(0, "Edér");
//! for hit in viewer.search(&query)? {
//!     println!("{hit}");
//! }
//! # Ok::<(), poecv::Error>(())
//! ```

use std::sync::Arc;

// Re-export eora
pub use eora;

pub mod config;
pub mod corpus;
pub mod dialog;
pub mod error;
pub mod search;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::ViewerConfig;
pub use error::{Error, Result};

use corpus::{ConversationFile, ConversationStore, Corpus};
use dialog::{AliasTable, DisplayTree, GraphBuilder};
use eora::formats::ConversationData;
use search::{IndexProgressCallback, ScriptCallIndex, SearchEngine, SearchHit, SearchQuery};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::Viewer;
    pub use crate::config::ViewerConfig;
    pub use crate::corpus::{ConversationFile, ConversationStore, Corpus};
    pub use crate::dialog::{AliasTable, DisplayNode, DisplayTree, GraphBuilder, Jump, NodeDescriptor};
    pub use crate::error::{Error, Result};
    pub use crate::search::{ScriptCallIndex, SearchEngine, SearchHit, SearchQuery};
}

/// One viewing session over a conversation corpus
///
/// Owns the corpus, the conversation cache, the alias table and the
/// current search index. The index is replaced wholesale on rebuild, so
/// holders of an earlier `Arc` keep a consistent snapshot.
pub struct Viewer {
    config: ViewerConfig,
    corpus: Corpus,
    store: ConversationStore,
    aliases: AliasTable,
    index: Option<Arc<ScriptCallIndex>>,
}

impl Viewer {
    /// Create a session over an already discovered corpus
    #[must_use]
    pub fn new(corpus: Corpus, config: ViewerConfig) -> Self {
        let mut store = ConversationStore::new(&config.language);
        if let Some(root) = &config.localized_root {
            store = store.with_localized_root(root);
        }
        Self {
            aliases: config.alias_table(),
            config,
            corpus,
            store,
            index: None,
        }
    }

    /// Discover the corpus under `config.corpus_root`
    ///
    /// # Errors
    /// Returns [`Error::Config`] if no corpus root is configured, or an
    /// error if the folder cannot be walked.
    pub fn open(config: ViewerConfig) -> Result<Self> {
        let root = config
            .corpus_root
            .clone()
            .ok_or_else(|| Error::Config("no corpus root configured".to_string()))?;
        let corpus = Corpus::discover(&root)?;
        Ok(Self::new(corpus, config))
    }

    /// Replace the conversation cache (e.g. with pre-seeded data)
    #[must_use]
    pub fn with_store(mut self, store: ConversationStore) -> Self {
        self.store = store;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[must_use]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[must_use]
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn store_mut(&mut self) -> &mut ConversationStore {
        &mut self.store
    }

    /// Current search index, if one was built
    #[must_use]
    pub fn index(&self) -> Option<Arc<ScriptCallIndex>> {
        self.index.clone()
    }

    /// Load (or fetch from cache) one conversation
    ///
    /// # Errors
    /// Returns [`Error::Format`] if the file is missing or malformed.
    pub fn load_conversation(&mut self, file: &ConversationFile) -> Result<Arc<ConversationData>> {
        self.store.load(file)
    }

    /// Build the display tree of `file` from node 0
    ///
    /// # Errors
    /// Fails if the file or its string table cannot be parsed, a link is
    /// dangling, or a trigger cannot be resolved.
    pub fn build_display_tree(&mut self, file: &ConversationFile) -> Result<DisplayTree> {
        let data = self.store.load(file)?;
        let text = self.store.load_string_table(file)?;
        GraphBuilder::new(&self.corpus, file, &data, &text).build()
    }

    /// Rebuild the search index from the whole corpus
    pub fn build_script_call_index(&mut self) -> Arc<ScriptCallIndex> {
        self.build_script_call_index_with_progress(&|_| {})
    }

    /// Rebuild the search index, reporting progress per file
    pub fn build_script_call_index_with_progress(
        &mut self,
        progress: IndexProgressCallback<'_>,
    ) -> Arc<ScriptCallIndex> {
        let index = Arc::new(ScriptCallIndex::build_with_progress(
            &self.corpus,
            &mut self.store,
            &self.aliases,
            progress,
        ));
        self.index = Some(Arc::clone(&index));
        index
    }

    /// Run a search against the current index
    ///
    /// # Errors
    /// Returns [`Error::IndexNotBuilt`] before the first index build, and
    /// [`Error::SchemaMismatch`] for queries that do not fit the index.
    pub fn search(&mut self, query: &SearchQuery) -> Result<Vec<SearchHit>> {
        let index = self.index.clone().ok_or(Error::IndexNotBuilt)?;
        SearchEngine::new(&self.corpus, &index, &self.aliases).search(&mut self.store, query)
    }
}
