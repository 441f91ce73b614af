//! Conditional call search
//!
//! Two phases:
//! - Build a [`ScriptCallIndex`] once per session (one full corpus pass)
//! - Answer [`SearchQuery`]s with a [`SearchEngine`], which re-scans the
//!   cached conversations for nodes whose calls match the pinned values
//!
//! ## Usage
//!
//! ```ignore
//! let index = ScriptCallIndex::build(&corpus, &mut store, &aliases);
//! let query = SearchQuery::for_method(&index, "Boolean IsInParty(Guid)")?.select(0, "Edér");
//! for hit in SearchEngine::new(&corpus, &index, &aliases).search(&mut store, &query)? {
//!     println!("{hit}");
//! }
//! ```

mod alphanum;
mod engine;
mod index;

pub use alphanum::{NaturalString, natural_cmp};
pub use engine::{SearchEngine, SearchHit, SearchQuery};
pub use index::{IndexProgress, IndexProgressCallback, ScriptCallIndex, SkippedFile};
