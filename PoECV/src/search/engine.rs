//! Faceted search over conditional script calls
//!
//! A query names a method and pins zero or more parameter positions.
//! Unpinned positions are wildcards. Values are compared after resolving
//! both sides through the alias table.

use std::fmt;

use eora::formats::ScriptCall;
use serde::Serialize;

use super::index::ScriptCallIndex;
use crate::corpus::{ConversationFile, ConversationStore, Corpus};
use crate::dialog::AliasTable;
use crate::error::{Error, Result};

/// Method plus one optional selection per parameter position
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SearchQuery {
    method: String,
    selections: Vec<Option<String>>,
}

impl SearchQuery {
    /// Query with `positions` unset selections
    #[must_use]
    pub fn new(method: impl Into<String>, positions: usize) -> Self {
        Self {
            method: method.into(),
            selections: vec![None; positions],
        }
    }

    /// Query sized to the schema recorded for `method`
    ///
    /// # Errors
    /// Returns [`Error::UnknownMethod`] if the index has no such method.
    pub fn for_method(index: &ScriptCallIndex, method: &str) -> Result<Self> {
        let width = index
            .schema_width(method)
            .ok_or_else(|| Error::UnknownMethod(method.to_string()))?;
        Ok(Self::new(method, width))
    }

    /// Pin `position` to `value`, growing the selection list if needed
    #[must_use]
    pub fn select(mut self, position: usize, value: impl Into<String>) -> Self {
        if self.selections.len() <= position {
            self.selections.resize(position + 1, None);
        }
        self.selections[position] = Some(value.into());
        self
    }

    /// Make `position` a wildcard again
    pub fn clear(&mut self, position: usize) {
        if let Some(selection) = self.selections.get_mut(position) {
            *selection = None;
        }
    }

    pub fn clear_all(&mut self) {
        self.selections.fill(None);
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub fn selections(&self) -> &[Option<String>] {
        &self.selections
    }

    fn pinned(&self) -> impl Iterator<Item = (usize, &str)> {
        self.selections
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_deref().map(|s| (i, s)))
    }
}

/// A node with a matching conditional call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub file: ConversationFile,
    pub node_id: i32,
}

impl fmt::Display for SearchHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.node_id, self.file)
    }
}

/// Answers search queries by re-scanning the corpus conditionals
pub struct SearchEngine<'a> {
    corpus: &'a Corpus,
    index: &'a ScriptCallIndex,
    aliases: &'a AliasTable,
}

impl<'a> SearchEngine<'a> {
    pub fn new(corpus: &'a Corpus, index: &'a ScriptCallIndex, aliases: &'a AliasTable) -> Self {
        Self { corpus, index, aliases }
    }

    /// One hit per matching call, in file, node and call order
    ///
    /// Files that fail to load are logged and skipped.
    ///
    /// # Errors
    /// Returns [`Error::SchemaMismatch`] if the method is not indexed, a
    /// selection lies beyond its recorded schema, or a matching call has
    /// fewer parameters than a pinned position.
    pub fn search(&self, store: &mut ConversationStore, query: &SearchQuery) -> Result<Vec<SearchHit>> {
        self.check_schema(query)?;

        let start = std::time::Instant::now();
        let mut hits = Vec::new();
        for file in self.corpus.iter() {
            let data = match store.load(file) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!("Skipping {} during search: {}", file, e);
                    continue;
                }
            };

            for node in data.iter() {
                // Components are flattened one at a time, in order
                for component in node.conditionals.components() {
                    for call in component.script_calls() {
                        if call.full_name != query.method {
                            continue;
                        }
                        if self.matches(call, query, file, node.node_id)? {
                            hits.push(SearchHit {
                                file: file.clone(),
                                node_id: node.node_id,
                            });
                        }
                    }
                }
            }
        }

        tracing::info!(
            "Search for {} found {} hits in {:.2}s",
            query.method,
            hits.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(hits)
    }

    fn check_schema(&self, query: &SearchQuery) -> Result<()> {
        let width = self.index.schema_width(&query.method).ok_or_else(|| Error::SchemaMismatch {
            method: query.method.clone(),
            position: 0,
            detail: "method has no recorded parameter schema".to_string(),
        })?;

        if let Some((position, _)) = query.pinned().find(|(i, _)| *i >= width) {
            return Err(Error::SchemaMismatch {
                method: query.method.clone(),
                position,
                detail: format!("schema has {width} parameters"),
            });
        }
        Ok(())
    }

    fn matches(&self, call: &ScriptCall, query: &SearchQuery, file: &ConversationFile, node_id: i32) -> Result<bool> {
        for (position, wanted) in query.pinned() {
            let Some(value) = call.parameters.get(position) else {
                return Err(Error::SchemaMismatch {
                    method: query.method.clone(),
                    position,
                    detail: format!(
                        "call in node {node_id} of {file} has {} parameters",
                        call.parameters.len()
                    ),
                });
            };
            if !self.aliases.same_value(wanted, value) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{call, conversation, node, root, session};
    use eora::formats::ConditionalExpression;
    use pretty_assertions::assert_eq;

    const FOO: &str = "Boolean Foo(Int32, String)";
    const IN_PARTY: &str = "Boolean IsInParty(Guid)";
    const EDER: &str = "b1a7e800-0000-0000-0000-000000000000";

    fn run(
        files: Vec<(&str, eora::formats::ConversationData)>,
        aliases: &AliasTable,
        query: impl FnOnce(&ScriptCallIndex) -> SearchQuery,
    ) -> Result<Vec<String>> {
        let (corpus, mut store) = session(files);
        let index = ScriptCallIndex::build(&corpus, &mut store, aliases);
        let query = query(&index);
        let hits = SearchEngine::new(&corpus, &index, aliases).search(&mut store, &query)?;
        Ok(hits.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn test_wildcard_and_pinned_positions() {
        let files = || {
            vec![(
                "A",
                conversation(vec![
                    root().with_link(1).with_link(2),
                    node(1).with_conditional(call(FOO, &["1", "x"])),
                    node(2).with_conditional(call(FOO, &["2", "x"])),
                ]),
            )]
        };
        let all = AliasTable::new();

        let hits = run(files(), &all, |i| SearchQuery::for_method(i, FOO).unwrap().select(1, "x")).unwrap();
        assert_eq!(hits, ["1 in A", "2 in A"]);

        let hits = run(files(), &all, |i| {
            SearchQuery::for_method(i, FOO).unwrap().select(0, "2").select(1, "x")
        })
        .unwrap();
        assert_eq!(hits, ["2 in A"]);

        let hits = run(files(), &all, |i| SearchQuery::for_method(i, FOO).unwrap()).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_alias_matches_raw_guid() {
        let files = vec![(
            "companions/eder",
            conversation(vec![root().with_conditional(call(IN_PARTY, &[EDER]))]),
        )];
        let hits = run(files, &AliasTable::companions(), |_| {
            SearchQuery::new(IN_PARTY, 1).select(0, "Edér")
        })
        .unwrap();
        assert_eq!(hits, ["0 in companions/eder"]);
    }

    #[test]
    fn test_hits_are_not_deduplicated_per_node() {
        let files = vec![(
            "A",
            conversation(vec![root().with_conditional(ConditionalExpression::group(vec![
                call(FOO, &["1", "x"]),
                call(FOO, &["1", "y"]),
            ]))]),
        )];
        let hits = run(files, &AliasTable::new(), |_| SearchQuery::new(FOO, 2).select(0, "1")).unwrap();
        assert_eq!(hits, ["0 in A", "0 in A"]);
    }

    #[test]
    fn test_other_methods_are_ignored() {
        let files = vec![(
            "A",
            conversation(vec![
                root().with_conditional(call(FOO, &["1", "x"])),
                node(1).with_conditional(call("Boolean Bar(Int32)", &["1"])),
            ]),
        )];
        let hits = run(files, &AliasTable::new(), |_| SearchQuery::new(FOO, 2).select(0, "1")).unwrap();
        assert_eq!(hits, ["0 in A"]);
    }

    #[test]
    fn test_unknown_method_is_schema_mismatch() {
        let files = vec![("A", conversation(vec![root()]))];
        let err = run(files, &AliasTable::new(), |_| SearchQuery::new("Boolean Nope()", 0)).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { .. }));
    }

    #[test]
    fn test_selection_beyond_schema_is_schema_mismatch() {
        let files = vec![("A", conversation(vec![root().with_conditional(call(FOO, &["1", "x"]))]))];
        let err = run(files, &AliasTable::new(), |_| SearchQuery::new(FOO, 2).select(2, "z")).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { position: 2, .. }));
    }

    #[test]
    fn test_selection_beyond_call_parameters_is_schema_mismatch() {
        let files = vec![(
            "A",
            conversation(vec![
                root().with_conditional(call(FOO, &["1", "x"])),
                node(1).with_conditional(call(FOO, &["1"])),
            ]),
        )];
        let err = run(files, &AliasTable::new(), |_| SearchQuery::new(FOO, 2).select(1, "x")).unwrap_err();
        match err {
            Error::SchemaMismatch { position, detail, .. } => {
                assert_eq!(position, 1);
                assert!(detail.contains("node 1 of A"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_query_editing() {
        let mut query = SearchQuery::new(FOO, 2).select(0, "1").select(1, "x");
        query.clear(0);
        assert_eq!(query.selections(), [None, Some("x".to_string())]);
        query.clear(5);
        query.clear_all();
        assert_eq!(query.selections(), [None, None]);
        assert_eq!(query.method(), FOO);
    }
}
