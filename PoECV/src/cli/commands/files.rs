//! CLI command for listing conversation files

use crate::Viewer;

/// Print every corpus file, optionally filtered by name
pub fn list(viewer: &Viewer, filter: Option<&str>) -> anyhow::Result<()> {
    let files = viewer.corpus().filter(filter.unwrap_or_default());
    for file in &files {
        println!("{file}");
    }
    eprintln!("{} of {} conversation files", files.len(), viewer.corpus().len());
    Ok(())
}
