//! Synthetic conversations and corpora for unit tests

use eora::formats::{ConditionalExpression, ConversationData, ConversationNode, NodeKind, ScriptCall};

use crate::corpus::{ConversationStore, Corpus};

pub const ROOT: &str = "/data/conversations";

pub fn root() -> ConversationNode {
    ConversationNode::new(0, NodeKind::Root)
}

pub fn node(id: i32) -> ConversationNode {
    ConversationNode::new(id, NodeKind::Generic)
}

pub fn response(id: i32) -> ConversationNode {
    ConversationNode::new(id, NodeKind::PlayerResponse)
}

pub fn bank(id: i32, children: &[i32]) -> ConversationNode {
    ConversationNode::new(
        id,
        NodeKind::Bank {
            child_node_ids: children.to_vec(),
        },
    )
}

pub fn trigger(id: i32, target_file: &str, target_node_id: i32) -> ConversationNode {
    ConversationNode::new(
        id,
        NodeKind::Trigger {
            target_file: target_file.to_string(),
            target_node_id,
        },
    )
}

/// A plain (`And`, not negated) conditional call
pub fn call(full_name: &str, params: &[&str]) -> ConditionalExpression {
    ConditionalExpression::call(ScriptCall::new(full_name, params.iter().copied()))
}

pub fn conversation(nodes: Vec<ConversationNode>) -> ConversationData {
    ConversationData::from_nodes(nodes).unwrap()
}

fn path_of(name: &str) -> String {
    format!("{ROOT}/{name}.conversation")
}

/// Corpus of files named by display name, none of which exist on disk
pub fn corpus_of(names: &[&str]) -> Corpus {
    Corpus::from_paths(ROOT, names.iter().map(|n| path_of(n)))
}

/// Corpus plus a store pre-seeded with each file's data
pub fn session(files: Vec<(&str, ConversationData)>) -> (Corpus, ConversationStore) {
    let names: Vec<&str> = files.iter().map(|(name, _)| *name).collect();
    let corpus = corpus_of(&names);
    let mut store = ConversationStore::default();
    for (name, data) in files {
        store.insert(path_of(name), data);
    }
    (corpus, store)
}
