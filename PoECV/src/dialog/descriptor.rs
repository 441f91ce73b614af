//! Display facts for a single conversation node
//!
//! A descriptor never mutates its node. It derives the tree label (with the
//! `[PCSB/E]` flag prefix), the detailed info text shown for a selected node,
//! and, for trigger nodes, the corpus file the trigger jumps into.

use eora::formats::{ConditionalExpression, ConversationNode, NodeKind, Operator, ScriptCall, StringEntry};
use serde::Serialize;

use crate::corpus::{ConversationFile, Corpus};
use crate::error::Result;

/// Resolved target of a trigger node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerTarget {
    pub file: ConversationFile,
    pub node_id: i32,
}

/// Label, flags and detail text for one node occurrence in the tree
#[derive(Debug, Clone)]
pub struct NodeDescriptor<'a> {
    node: &'a ConversationNode,
    text: Option<&'a StringEntry>,
    is_main: bool,
    is_bank_child: bool,
    trigger: Option<TriggerTarget>,
}

impl<'a> NodeDescriptor<'a> {
    /// Describe `node` as reached from its parent
    ///
    /// `is_main` marks the first occurrence in the tree, `is_bank_child`
    /// that the parent is a bank listing this node as a child. `origin` is
    /// the display name of the file the node lives in.
    ///
    /// # Errors
    /// Returns [`Error::ReferenceResolution`](crate::Error::ReferenceResolution)
    /// if the node is a trigger whose target does not match exactly one
    /// corpus file.
    pub fn new(
        node: &'a ConversationNode,
        text: Option<&'a StringEntry>,
        is_main: bool,
        is_bank_child: bool,
        corpus: &Corpus,
        origin: &str,
    ) -> Result<Self> {
        let trigger = match &node.kind {
            NodeKind::Trigger {
                target_file,
                target_node_id,
            } => {
                let file = corpus.resolve_trigger(target_file, origin, node.node_id)?;
                Some(TriggerTarget {
                    file: file.clone(),
                    node_id: *target_node_id,
                })
            }
            _ => None,
        };

        Ok(Self {
            node,
            text,
            is_main,
            is_bank_child,
            trigger,
        })
    }

    #[must_use]
    pub fn is_main(&self) -> bool {
        self.is_main
    }

    #[must_use]
    pub fn trigger(&self) -> Option<&TriggerTarget> {
        self.trigger.as_ref()
    }

    /// Flag letters in order: `P`, `C`, `S`, then `B` or `E`
    #[must_use]
    pub fn flags(&self) -> String {
        let mut flags = String::new();
        if self.node.is_player_response() {
            flags.push('P');
        }
        if self.node.has_conditional_calls() {
            flags.push('C');
        }
        if self.node.has_scripts() {
            flags.push('S');
        }
        if self.is_bank_child {
            flags.push('B');
        } else if self.node.links.is_empty() {
            flags.push('E');
        }
        flags
    }

    /// Text shown in the conversation tree
    #[must_use]
    pub fn label(&self) -> String {
        match (&self.node.kind, &self.trigger) {
            (NodeKind::Root | NodeKind::Bank { .. }, _) => return self.node.to_string(),
            (_, Some(trigger)) => return format!("Trigger Node {} in {}", trigger.node_id, trigger.file),
            _ => {}
        }

        let id = if self.node.is_player_response() {
            format!("P{}", self.node.node_id)
        } else {
            self.node.node_id.to_string()
        };
        let description = match self.text {
            Some(entry) => entry.to_string(),
            None => format!("{id} - Empty"),
        };

        let flags = self.flags();
        if flags.is_empty() {
            description
        } else {
            format!("[{flags}] {description}")
        }
    }

    /// Label, every conditional call, then every script call, one per line
    #[must_use]
    pub fn detailed_info(&self) -> String {
        let conditionals: Vec<String> = self
            .node
            .conditionals
            .leaves()
            .into_iter()
            .filter_map(|leaf| match leaf {
                ConditionalExpression::Call { not, operator, call } => Some(conditional_line(*not, operator, call)),
                ConditionalExpression::Group { .. } => None,
            })
            .collect();
        let scripts: Vec<String> = self.node.all_scripts().map(ScriptCall::display).collect();

        format!("{}\n{}\n{}", self.label(), conditionals.join("\n"), scripts.join("\n"))
    }
}

fn conditional_line(not: bool, operator: &Operator, call: &ScriptCall) -> String {
    let not = if not { "NOT" } else { "   " };
    format!("{not} {} {operator}", call.display())
}
