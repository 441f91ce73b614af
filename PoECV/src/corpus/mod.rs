//! Conversation corpus: the set of conversation files under a game data root
//!
//! The corpus is discovered once at startup and is read-only afterwards.
//! Besides listing files it resolves the path fragments stored in trigger
//! nodes to the single file they refer to.

mod store;

pub use store::{ConversationStore, string_table_path};

use std::fmt;
use std::path::{Path, PathBuf};

use eora::formats::conversation::{CONVERSATION_EXTENSION, find_conversation_files};
use eora::utils::{normalize_path, normalize_separators, relative_path};
use serde::Serialize;

use crate::error::{Error, Result};

/// Handle to one conversation file in the corpus
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConversationFile {
    /// Full path on disk
    pub path: PathBuf,
    /// Path relative to the corpus root, `/`-separated, without extension
    pub display: String,
}

impl ConversationFile {
    /// Create a handle, deriving the display name relative to `root`
    pub fn new(path: impl Into<PathBuf>, root: &Path) -> Self {
        let path = path.into();
        let relative = relative_path(path.as_path(), root).unwrap_or_else(|| normalize_path(&path));
        let display = strip_extension(&relative).to_string();
        Self { path, display }
    }

    /// Normalized, lowercased full path used for fragment matching
    fn match_key(&self) -> String {
        normalize_path(&self.path).to_lowercase()
    }
}

impl fmt::Display for ConversationFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

fn strip_extension(path: &str) -> &str {
    let suffix_len = CONVERSATION_EXTENSION.len() + 1;
    if path.len() > suffix_len
        && path.is_char_boundary(path.len() - suffix_len)
        && path[path.len() - suffix_len..].eq_ignore_ascii_case(".conversation")
    {
        &path[..path.len() - suffix_len]
    } else {
        path
    }
}

/// Normalize the raw `ConversationFilename` of a trigger node into the
/// fragment searched for in corpus paths
///
/// Separators become `/`, a leading `conversations` directory is dropped
/// (stored names are relative to the data folder, corpus paths may start
/// below it) and the result is lowercased.
#[must_use]
pub fn trigger_fragment(raw: &str) -> String {
    let normalized = normalize_separators(raw);
    let mut segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() > 1 && segments[0].eq_ignore_ascii_case("conversations") {
        segments.remove(0);
    }
    segments.join("/").to_lowercase()
}

/// All conversation files known to the session
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    root: PathBuf,
    files: Vec<ConversationFile>,
}

impl Corpus {
    /// Scan `root` recursively for conversation files
    ///
    /// # Errors
    /// Returns an error if the directory cannot be walked.
    pub fn discover(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let start = std::time::Instant::now();
        let paths = find_conversation_files(root)?;
        let corpus = Self::from_paths(root, paths);

        tracing::info!(
            "Found {} conversation files under {} in {:.2}s",
            corpus.len(),
            root.display(),
            start.elapsed().as_secs_f64()
        );
        Ok(corpus)
    }

    /// Build a corpus from explicit paths, kept in the given order
    pub fn from_paths<P: Into<PathBuf>>(root: impl AsRef<Path>, paths: impl IntoIterator<Item = P>) -> Self {
        let root = root.as_ref().to_path_buf();
        let files = paths.into_iter().map(|p| ConversationFile::new(p, &root)).collect();
        Self { root, files }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn files(&self) -> &[ConversationFile] {
        &self.files
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversationFile> {
        self.files.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Look up a file by its path on disk
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&ConversationFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Files whose display name contains `query` (case-sensitive, like the
    /// file list filter box); an empty query keeps everything
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&ConversationFile> {
        self.files.iter().filter(|f| f.display.contains(query)).collect()
    }

    /// Pick one file by name: an exact display match, otherwise the only
    /// file whose display name contains `name` case-insensitively
    ///
    /// # Errors
    /// Returns [`Error::FileNotFound`] or [`Error::AmbiguousFile`].
    pub fn find(&self, name: &str) -> Result<&ConversationFile> {
        let wanted = strip_extension(&normalize_separators(name)).to_string();
        if let Some(file) = self.files.iter().find(|f| f.display == wanted) {
            return Ok(file);
        }

        let lower = wanted.to_lowercase();
        let candidates: Vec<_> = self
            .files
            .iter()
            .filter(|f| f.display.to_lowercase().contains(&lower))
            .collect();
        match candidates.as_slice() {
            [] => Err(Error::FileNotFound(name.to_string())),
            [file] => Ok(*file),
            many => Err(Error::AmbiguousFile {
                query: name.to_string(),
                count: many.len(),
                candidates: many.iter().map(|f| f.display.as_str()).collect::<Vec<_>>().join(", "),
            }),
        }
    }

    /// Files whose full path contains the trigger fragment, case-insensitively
    #[must_use]
    pub fn matching_files(&self, raw_target: &str) -> Vec<&ConversationFile> {
        let fragment = trigger_fragment(raw_target);
        self.files.iter().filter(|f| f.match_key().contains(&fragment)).collect()
    }

    /// Resolve a trigger node's target to exactly one corpus file
    ///
    /// # Errors
    /// Returns [`Error::ReferenceResolution`] when zero or several files match.
    pub fn resolve_trigger(&self, raw_target: &str, origin: &str, node_id: i32) -> Result<&ConversationFile> {
        match self.matching_files(raw_target).as_slice() {
            [file] => Ok(*file),
            matches => Err(Error::ReferenceResolution {
                fragment: raw_target.to_string(),
                matches: matches.len(),
                file: origin.to_string(),
                node_id,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(paths: &[&str]) -> Corpus {
        Corpus::from_paths("/data/conversations", paths.iter().copied())
    }

    #[test]
    fn test_display_is_relative_without_extension() {
        let c = corpus(&["/data/conversations/companions/companion_eder.conversation"]);
        assert_eq!(c.files()[0].display, "companions/companion_eder");
        assert_eq!(c.files()[0].to_string(), "companions/companion_eder");

        let outside = ConversationFile::new("/other/B.conversation", Path::new("/data/conversations"));
        assert_eq!(outside.display, "/other/B");
    }

    #[test]
    fn test_trigger_fragment() {
        assert_eq!(
            trigger_fragment(r"conversations\companions\companion_eder.conversation"),
            "companions/companion_eder.conversation"
        );
        assert_eq!(trigger_fragment(r"mod\conv_x.conversation"), "mod/conv_x.conversation");
        assert_eq!(trigger_fragment("Conv_X.conversation"), "conv_x.conversation");
    }

    #[test]
    fn test_resolve_trigger_single_match() {
        let c = corpus(&[
            "/data/conversations/mod/Conv_X.conversation",
            "/data/conversations/other/conv_y.conversation",
        ]);
        let file = c.resolve_trigger(r"mod\conv_x.conversation", "a", 3).unwrap();
        assert_eq!(file.display, "mod/Conv_X");
    }

    #[test]
    fn test_resolve_trigger_zero_or_many_fails() {
        let c = corpus(&[
            "/data/conversations/a/mod/conv_x.conversation",
            "/data/conversations/b/mod/conv_x.conversation",
        ]);
        let err = c.resolve_trigger(r"mod\conv_x.conversation", "origin", 9).unwrap_err();
        assert!(matches!(err, Error::ReferenceResolution { matches: 2, node_id: 9, .. }));

        let err = c.resolve_trigger(r"mod\missing.conversation", "origin", 9).unwrap_err();
        assert!(matches!(err, Error::ReferenceResolution { matches: 0, .. }));
    }

    #[test]
    fn test_filter_and_find() {
        let c = corpus(&[
            "/data/conversations/companions/companion_eder.conversation",
            "/data/conversations/companions/companion_aloth.conversation",
            "/data/conversations/gilded_vale/gv_eder.conversation",
        ]);
        assert_eq!(c.filter("companion").len(), 2);
        assert_eq!(c.filter("").len(), 3);
        assert_eq!(c.find("gv_eder").unwrap().display, "gilded_vale/gv_eder");
        assert_eq!(
            c.find(r"companions\companion_aloth.conversation").unwrap().display,
            "companions/companion_aloth"
        );
        assert!(matches!(c.find("eder"), Err(Error::AmbiguousFile { count: 2, .. })));
        assert!(matches!(c.find("sagani"), Err(Error::FileNotFound(_))));
    }
}
