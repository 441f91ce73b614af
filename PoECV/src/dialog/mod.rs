//! Conversation display: node descriptors, the display tree and GUID aliases

mod aliases;
mod descriptor;
mod tree;

pub use aliases::{AliasTable, COMPANIONS};
pub use descriptor::{NodeDescriptor, TriggerTarget};
pub use tree::{DisplayNode, DisplayTree, GraphBuilder, Jump};
