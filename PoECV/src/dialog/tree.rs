//! Tree building logic for constructing the display tree of a conversation
//!
//! Conversation graphs may share nodes and contain cycles. The walk keeps a
//! single visited set for the whole tree, so every reachable node is
//! expanded exactly once and later reaches become back-reference leaves.

use std::collections::HashSet;

use eora::formats::{ConversationData, StringTable};
use serde::Serialize;

use super::descriptor::NodeDescriptor;
use crate::corpus::{ConversationFile, Corpus};
use crate::error::{Error, Result};

/// Action attached to a leaf that stands in for content shown elsewhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Jump {
    /// Select the expanded occurrence of this node in the same tree
    FirstOccurrence { node_id: i32 },
    /// Open another conversation at a node
    Trigger { file: ConversationFile, node_id: i32 },
}

/// One entry of the display tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayNode {
    pub node_id: i32,
    pub label: String,
    /// Label, conditionals and scripts, one per line
    pub detail: String,
    /// First occurrence of the node; every trigger leaf is one
    pub is_main: bool,
    /// Rendered in the alternate (italic) style
    pub is_duplicate_reference: bool,
    pub is_trigger: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jump: Option<Jump>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DisplayNode>,
}

impl DisplayNode {
    /// Whether this entry was expanded (neither a back-reference nor a trigger)
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.is_duplicate_reference && !self.is_trigger
    }

    /// Depth-first, pre-order walk of this entry and its descendants
    pub fn iter(&self) -> impl Iterator<Item = &DisplayNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }

    fn path_to<'a>(&'a self, node_id: i32, path: &mut Vec<&'a str>) -> bool {
        path.push(&self.label);
        if self.node_id == node_id && self.is_main {
            return true;
        }
        if self.children.iter().any(|child| child.path_to(node_id, path)) {
            return true;
        }
        path.pop();
        false
    }
}

/// Display tree of one conversation file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTree {
    pub file: ConversationFile,
    pub root: DisplayNode,
}

impl DisplayTree {
    /// All entries, depth-first in display order
    pub fn iter(&self) -> impl Iterator<Item = &DisplayNode> {
        self.root.iter()
    }

    /// The main occurrence of `node_id`: its expanded entry, or the trigger leaf
    #[must_use]
    pub fn find_main(&self, node_id: i32) -> Option<&DisplayNode> {
        self.iter().find(|n| n.node_id == node_id && n.is_main)
    }

    /// Labels from the root down to the main occurrence of `node_id`
    #[must_use]
    pub fn path_to(&self, node_id: i32) -> Option<Vec<&str>> {
        let mut path = Vec::new();
        self.root.path_to(node_id, &mut path).then_some(path)
    }

    /// Number of expanded entries
    #[must_use]
    pub fn count_expanded(&self) -> usize {
        self.iter().filter(|n| n.is_expanded()).count()
    }

    /// Number of back-reference leaves
    #[must_use]
    pub fn count_references(&self) -> usize {
        self.iter().filter(|n| n.is_duplicate_reference).count()
    }
}

/// Builds the display tree of one loaded conversation
pub struct GraphBuilder<'a> {
    corpus: &'a Corpus,
    file: &'a ConversationFile,
    data: &'a ConversationData,
    text: &'a StringTable,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(corpus: &'a Corpus, file: &'a ConversationFile, data: &'a ConversationData, text: &'a StringTable) -> Self {
        Self {
            corpus,
            file,
            data,
            text,
        }
    }

    /// Build the tree starting at node 0
    ///
    /// # Errors
    /// Returns [`Error::NodeNotFound`] for dangling links or bank children
    /// and [`Error::ReferenceResolution`] for unresolvable triggers.
    pub fn build(&self) -> Result<DisplayTree> {
        self.build_from(0)
    }

    /// Build the tree starting at `root_id`
    ///
    /// # Errors
    /// See [`GraphBuilder::build`].
    pub fn build_from(&self, root_id: i32) -> Result<DisplayTree> {
        let mut visited = HashSet::new();
        let root = self.build_node(root_id, false, &mut visited)?;
        tracing::debug!(
            "Built tree for {}: {} of {} nodes expanded",
            self.file,
            visited.len(),
            self.data.node_count()
        );
        Ok(DisplayTree {
            file: self.file.clone(),
            root,
        })
    }

    fn build_node(&self, node_id: i32, is_bank_child: bool, visited: &mut HashSet<i32>) -> Result<DisplayNode> {
        let node = self.data.get_node(node_id).ok_or_else(|| Error::NodeNotFound {
            file: self.file.display.clone(),
            node_id,
        })?;

        let descriptor = NodeDescriptor::new(
            node,
            self.text.get(node_id),
            !visited.contains(&node_id),
            is_bank_child,
            self.corpus,
            &self.file.display,
        )?;
        let is_main = descriptor.is_main();

        let mut display = DisplayNode {
            node_id,
            label: descriptor.label(),
            detail: descriptor.detailed_info(),
            is_main,
            is_duplicate_reference: false,
            is_trigger: false,
            jump: None,
            children: Vec::new(),
        };

        // Triggers are resolved but never expanded into the target file
        if let Some(target) = descriptor.trigger() {
            display.is_trigger = true;
            display.jump = Some(Jump::Trigger {
                file: target.file.clone(),
                node_id: target.node_id,
            });
            return Ok(display);
        }

        if !is_main {
            display.is_duplicate_reference = true;
            display.jump = Some(Jump::FirstOccurrence { node_id });
            return Ok(display);
        }

        visited.insert(node_id);
        for &child in node.child_node_ids() {
            display.children.push(self.build_node(child, true, visited)?);
        }
        for link in &node.links {
            display.children.push(self.build_node(link.to_node_id, false, visited)?);
        }

        Ok(display)
    }
}
