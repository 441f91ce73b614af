#![allow(non_snake_case)]
//! # Eora
//!
//! A pure-Rust library for reading the flowchart file formats of
//! Pillars of Eternity.
//!
//! ## Supported Formats
//!
//! - **Conversation** - `.conversation` dialogue flowcharts (nodes, links,
//!   conditional expressions, script calls, banks, triggers)
//! - **String tables** - `.stringtable` localized text keyed by node id
//!
//! ## Quick Start
//!
//! ```no_run
//! use eora::formats::{find_conversation_files, read_conversation};
//!
//! for path in find_conversation_files("PillarsOfEternity_Data/data/conversations")? {
//!     let data = read_conversation(&path)?;
//!     println!("{}: {} nodes", path.display(), data.node_count());
//! }
//! # Ok::<(), eora::Error>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use eora::prelude::*;
//!
//! let node = ConversationNode::new(0, NodeKind::Root).with_link(1);
//! assert_eq!(node.links.len(), 1);
//! ```

pub mod error;
pub mod formats;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::conversation::{
        ConditionalExpression, ConversationData, ConversationNode, Link, NodeKind, Operator, ScriptCall,
        find_conversation_files, parse_conversation, read_conversation,
    };
    pub use crate::formats::stringtable::{StringEntry, StringTable, parse_string_table, read_string_table};
    pub use crate::utils::normalize_path;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
