//! CLI commands for the conditional call index and search

use std::sync::Arc;

use super::PinArg;
use crate::Viewer;
use crate::cli::progress::spinner;
use crate::error::Error;
use crate::search::{NaturalString, ScriptCallIndex, SearchQuery};

/// Build the index behind a spinner
fn build_index(viewer: &mut Viewer) -> anyhow::Result<Arc<ScriptCallIndex>> {
    let pb = spinner("Indexing conversations...")?;
    let index = viewer.build_script_call_index_with_progress(&|progress| {
        pb.set_message(format!("{}: {}/{}", progress.file, progress.current, progress.total));
    });
    pb.finish_and_clear();

    if !index.skipped_files().is_empty() {
        eprintln!("Skipped {} unreadable files", index.skipped_files().len());
    }
    Ok(index)
}

/// List indexed methods
pub fn list_methods(viewer: &mut Viewer) -> anyhow::Result<()> {
    let index = build_index(viewer)?;
    for method in index.methods() {
        println!("{method}");
    }
    eprintln!(
        "{} methods, {} calls in {} files",
        index.len(),
        index.calls_indexed(),
        index.files_scanned()
    );
    Ok(())
}

/// List the recorded values per parameter position
pub fn list_params(viewer: &mut Viewer, method: &str) -> anyhow::Result<()> {
    let index = build_index(viewer)?;
    let positions = index
        .parameters(method)
        .ok_or_else(|| Error::UnknownMethod(method.to_string()))?;

    println!("{method}");
    for (i, values) in positions.iter().enumerate() {
        let values: Vec<&str> = values.iter().map(NaturalString::as_str).collect();
        println!("  [{i}] {}", values.join(", "));
    }
    Ok(())
}

/// Run a faceted search
pub fn run_search(viewer: &mut Viewer, method: &str, pins: &[PinArg], json: bool) -> anyhow::Result<()> {
    let index = build_index(viewer)?;
    let query = pins
        .iter()
        .fold(SearchQuery::for_method(&index, method)?, |query, pin| {
            query.select(pin.position, pin.value.as_str())
        });

    let hits = viewer.search(&query)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else {
        for hit in &hits {
            println!("{hit}");
        }
        eprintln!("{} results", hits.len());
    }
    Ok(())
}
