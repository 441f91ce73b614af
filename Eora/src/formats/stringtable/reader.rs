//! `.stringtable` file reading

use super::{StringEntry, StringTable};
use crate::error::{Error, Result};
use crate::formats::xml::parse_xml;
use std::fs;
use std::path::Path;

/// Read a string table from disk
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid string table.
pub fn read_string_table<P: AsRef<Path>>(path: P) -> Result<StringTable> {
    let content = fs::read_to_string(path)?;
    parse_string_table(&content)
}

/// Parse a string table from its XML text
///
/// # Errors
/// Returns an error if the XML is malformed or an entry has no numeric `ID`.
pub fn parse_string_table(content: &str) -> Result<StringTable> {
    let root = parse_xml(content)?;
    if root.name != "StringTableFile" {
        return Err(Error::UnexpectedRoot {
            expected: "StringTableFile",
            found: root.name,
        });
    }

    let mut table = StringTable::new();
    table.name = root.child_text("Name").unwrap_or_default().to_string();

    if let Some(entries) = root.child("Entries") {
        for entry in entries.children_named("Entry") {
            let female_text = entry
                .child_text("FemaleText")
                .filter(|t| !t.is_empty())
                .map(str::to_string);
            table.insert(StringEntry {
                id: entry.child_i32("ID")?,
                default_text: entry.child_text("DefaultText").unwrap_or_default().to_string(),
                female_text,
            });
        }
    }

    tracing::debug!("Parsed string table '{}' with {} entries", table.name, table.len());
    Ok(table)
}
