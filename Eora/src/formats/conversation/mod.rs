//! Conversation flowchart format module
//!
//! A conversation is an XML-serialized flowchart: nodes with links,
//! conditional expression trees and script calls. Bank nodes own child
//! nodes; trigger nodes jump into another conversation file.

mod reader;
mod types;

pub use reader::{parse_conversation, read_conversation};
pub use types::*;

use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extension of conversation files
pub const CONVERSATION_EXTENSION: &str = "conversation";

/// File extension of string table files
pub const STRING_TABLE_EXTENSION: &str = "stringtable";

/// Find all conversation files under a directory (recursive)
///
/// # Returns
/// A sorted list of `.conversation` paths (extension compared case-insensitively).
///
/// # Errors
/// Returns an error if the directory cannot be walked.
pub fn find_conversation_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        let is_conversation = entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(CONVERSATION_EXTENSION));
        if is_conversation {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
