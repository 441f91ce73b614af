//! File format handlers for the flowchart formats

pub mod conversation;
pub mod stringtable;
pub mod xml;

// Re-export main document types
pub use conversation::{
    ConditionalExpression, ConversationData, ConversationNode, Link, NodeKind, Operator, ScriptCall,
    find_conversation_files, parse_conversation, read_conversation,
};
pub use stringtable::{StringEntry, StringTable, parse_string_table, read_string_table};
pub use xml::{XmlElement, parse_xml};
