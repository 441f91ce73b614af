//! Facet index over every conditional script call in the corpus
//!
//! Built in one full pass over all conversation files. For each method
//! (keyed by its full name) the index keeps one value set per parameter
//! position, holding every alias-resolved value seen at that position.

use std::collections::{BTreeMap, BTreeSet};

use eora::formats::ConversationData;
use serde::Serialize;

use super::alphanum::NaturalString;
use crate::corpus::{ConversationFile, ConversationStore, Corpus};
use crate::dialog::AliasTable;

/// Progress report for index building
#[derive(Debug, Clone)]
pub struct IndexProgress<'a> {
    pub current: usize,
    pub total: usize,
    pub file: &'a ConversationFile,
}

/// Progress callback type
pub type IndexProgressCallback<'a> = &'a dyn Fn(&IndexProgress<'_>);

/// A corpus file the index build could not load
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub file: ConversationFile,
    pub reason: String,
}

/// Method full name -> per-position value sets
///
/// Immutable once built; a rebuild produces a new index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScriptCallIndex {
    methods: BTreeMap<String, Vec<BTreeSet<NaturalString>>>,
    files_scanned: usize,
    calls_indexed: usize,
    skipped_files: Vec<SkippedFile>,
}

impl ScriptCallIndex {
    /// Scan every corpus file
    ///
    /// Files that fail to load are logged and listed in
    /// [`skipped_files`](Self::skipped_files); they never abort the build.
    pub fn build(corpus: &Corpus, store: &mut ConversationStore, aliases: &AliasTable) -> Self {
        Self::build_with_progress(corpus, store, aliases, &|_| {})
    }

    /// Scan every corpus file, reporting each file before it is loaded
    pub fn build_with_progress(
        corpus: &Corpus,
        store: &mut ConversationStore,
        aliases: &AliasTable,
        progress: IndexProgressCallback<'_>,
    ) -> Self {
        let start = std::time::Instant::now();
        let total = corpus.len();
        let mut index = Self::default();

        for (i, file) in corpus.iter().enumerate() {
            progress(&IndexProgress {
                current: i + 1,
                total,
                file,
            });

            match store.load(file) {
                Ok(data) => {
                    index.add_conversation(&data, aliases);
                    index.files_scanned += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to index {}: {}", file, e);
                    index.skipped_files.push(SkippedFile {
                        file: file.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Indexed {} conditional calls to {} methods from {} files in {:.2}s",
            index.calls_indexed,
            index.methods.len(),
            index.files_scanned,
            start.elapsed().as_secs_f64()
        );
        index
    }

    /// Index the conditional calls of one already loaded conversation
    pub fn add_conversation(&mut self, data: &ConversationData, aliases: &AliasTable) {
        for node in data.iter() {
            for call in node.conditionals.script_calls() {
                let positions = self.methods.entry(call.full_name.clone()).or_default();
                if positions.len() < call.parameters.len() {
                    positions.resize_with(call.parameters.len(), BTreeSet::new);
                }
                for (values, raw) in positions.iter_mut().zip(&call.parameters) {
                    values.insert(NaturalString::from(aliases.canonical(raw)));
                }
                self.calls_indexed += 1;
            }
        }
    }

    /// Indexed method full names, ascending
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    /// Value sets per parameter position of `method`
    #[must_use]
    pub fn parameters(&self, method: &str) -> Option<&[BTreeSet<NaturalString>]> {
        self.methods.get(method).map(Vec::as_slice)
    }

    /// Widest parameter list recorded for `method`
    #[must_use]
    pub fn schema_width(&self, method: &str) -> Option<usize> {
        self.methods.get(method).map(Vec::len)
    }

    /// Number of indexed methods
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    #[must_use]
    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    #[must_use]
    pub fn calls_indexed(&self) -> usize {
        self.calls_indexed
    }

    #[must_use]
    pub fn skipped_files(&self) -> &[SkippedFile] {
        &self.skipped_files
    }
}
