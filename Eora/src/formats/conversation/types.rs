//! Conversation data types
//!
//! These types represent one parsed `.conversation` flowchart: a flat list of
//! nodes, each with outgoing links, a conditional expression tree and three
//! script call lists. Links and bank children may form cycles.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// One parsed conversation file
#[derive(Debug, Clone, Default)]
pub struct ConversationData {
    /// All nodes, keyed by node id, in file order
    pub nodes: IndexMap<i32, ConversationNode>,
}

impl ConversationData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a node list, rejecting duplicate ids
    pub fn from_nodes(nodes: impl IntoIterator<Item = ConversationNode>) -> Result<Self> {
        let mut data = Self::new();
        for node in nodes {
            data.insert(node)?;
        }
        Ok(data)
    }

    /// Add a node; fails if its id is already taken
    pub fn insert(&mut self, node: ConversationNode) -> Result<()> {
        if self.nodes.contains_key(&node.node_id) {
            return Err(Error::DuplicateNode(node.node_id));
        }
        self.nodes.insert(node.node_id, node);
        Ok(())
    }

    /// Get a node by id
    #[must_use]
    pub fn get_node(&self, node_id: i32) -> Option<&ConversationNode> {
        self.nodes.get(&node_id)
    }

    /// Iterate nodes in file order
    pub fn iter(&self) -> impl Iterator<Item = &ConversationNode> {
        self.nodes.values()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Node class, with the payload specific to banks and triggers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NodeKind {
    /// Entry point of the conversation (node 0)
    Root,
    /// A line the player picks
    PlayerResponse,
    /// Owns an ordered list of child nodes shown in place of its links
    Bank {
        child_node_ids: Vec<i32>,
    },
    /// Redirects into another conversation file
    Trigger {
        /// Raw path fragment as stored in the file
        target_file: String,
        target_node_id: i32,
    },
    /// Talk and script nodes
    #[default]
    Generic,
}

impl NodeKind {
    /// Serialized class name used for this kind when none is recorded
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Root => "Root",
            NodeKind::PlayerResponse => "PlayerResponse",
            NodeKind::Bank { .. } => "Bank",
            NodeKind::Trigger { .. } => "Trigger",
            NodeKind::Generic => "Generic",
        }
    }
}

/// Outgoing edge of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub to_node_id: i32,
}

/// Boolean combinator attached to a conditional call
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Operator {
    #[default]
    And,
    Or,
    Other(String),
}

impl FromStr for Operator {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "And" => Operator::And,
            "Or" => Operator::Or,
            other => Operator::Other(other.to_string()),
        })
    }
}

impl Operator {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Operator::And => "And",
            Operator::Or => "Or",
            Operator::Other(s) => s,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scripted method invocation: `FullName` plus raw parameter strings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScriptCall {
    /// Return type, method name and signature, e.g. `Boolean IsInParty(Guid)`
    pub full_name: String,
    pub parameters: Vec<String>,
}

impl ScriptCall {
    pub fn new<S: Into<String>>(full_name: impl Into<String>, parameters: impl IntoIterator<Item = S>) -> Self {
        Self {
            full_name: full_name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }

    /// Method name as shown to users: the token after the first space,
    /// before the parameter list. Names without a return type keep the
    /// whole prefix.
    #[must_use]
    pub fn method_name(&self) -> &str {
        let head = self.full_name.split('(').next().unwrap_or_default();
        let mut tokens = head.split_whitespace();
        let first = tokens.next().unwrap_or_default();
        tokens.next().unwrap_or(first)
    }

    /// `"{method} {arg, arg, ...}"`
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}", self.method_name(), self.parameters.join(", "))
    }
}

/// Conditional expression tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionalExpression {
    /// Leaf test
    Call {
        not: bool,
        operator: Operator,
        call: ScriptCall,
    },
    /// Ordered group of sub-expressions
    Group {
        components: Vec<ConditionalExpression>,
    },
}

impl Default for ConditionalExpression {
    fn default() -> Self {
        ConditionalExpression::Group { components: Vec::new() }
    }
}

impl ConditionalExpression {
    /// A leaf call with `And` and no negation
    #[must_use]
    pub fn call(call: ScriptCall) -> Self {
        ConditionalExpression::Call {
            not: false,
            operator: Operator::And,
            call,
        }
    }

    #[must_use]
    pub fn group(components: Vec<ConditionalExpression>) -> Self {
        ConditionalExpression::Group { components }
    }

    /// Top-level components; a bare call is its own single component
    #[must_use]
    pub fn components(&self) -> &[ConditionalExpression] {
        match self {
            ConditionalExpression::Group { components } => components,
            ConditionalExpression::Call { .. } => std::slice::from_ref(self),
        }
    }

    /// Leaf calls in order, descending through groups
    #[must_use]
    pub fn leaves(&self) -> Vec<&ConditionalExpression> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ConditionalExpression>) {
        match self {
            ConditionalExpression::Call { .. } => out.push(self),
            ConditionalExpression::Group { components } => {
                for component in components {
                    component.collect_leaves(out);
                }
            }
        }
    }

    /// Script calls of every leaf, in order
    #[must_use]
    pub fn script_calls(&self) -> Vec<&ScriptCall> {
        self.leaves()
            .into_iter()
            .filter_map(|leaf| match leaf {
                ConditionalExpression::Call { call, .. } => Some(call),
                ConditionalExpression::Group { .. } => None,
            })
            .collect()
    }

    /// Whether any leaf call exists below this expression
    #[must_use]
    pub fn has_calls(&self) -> bool {
        match self {
            ConditionalExpression::Call { .. } => true,
            ConditionalExpression::Group { components } => components.iter().any(Self::has_calls),
        }
    }
}

/// A single conversation node
#[derive(Debug, Clone, Default)]
pub struct ConversationNode {
    /// Unique within its file
    pub node_id: i32,
    pub kind: NodeKind,
    pub conditionals: ConditionalExpression,
    pub on_enter_scripts: Vec<ScriptCall>,
    pub on_update_scripts: Vec<ScriptCall>,
    pub on_exit_scripts: Vec<ScriptCall>,
    pub links: Vec<Link>,
}

impl ConversationNode {
    #[must_use]
    pub fn new(node_id: i32, kind: NodeKind) -> Self {
        Self {
            node_id,
            kind,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_link(mut self, to_node_id: i32) -> Self {
        self.links.push(Link { to_node_id });
        self
    }

    #[must_use]
    pub fn with_links(mut self, to_node_ids: &[i32]) -> Self {
        self.links.extend(to_node_ids.iter().map(|&to_node_id| Link { to_node_id }));
        self
    }

    #[must_use]
    pub fn with_conditional(mut self, expression: ConditionalExpression) -> Self {
        match &mut self.conditionals {
            ConditionalExpression::Group { components } => components.push(expression),
            ConditionalExpression::Call { .. } => {
                let existing = std::mem::take(&mut self.conditionals);
                self.conditionals = ConditionalExpression::group(vec![existing, expression]);
            }
        }
        self
    }

    #[must_use]
    pub fn with_enter_script(mut self, call: ScriptCall) -> Self {
        self.on_enter_scripts.push(call);
        self
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self.kind, NodeKind::Root)
    }

    #[must_use]
    pub fn is_player_response(&self) -> bool {
        matches!(self.kind, NodeKind::PlayerResponse)
    }

    /// Bank children, empty for other kinds
    #[must_use]
    pub fn child_node_ids(&self) -> &[i32] {
        match &self.kind {
            NodeKind::Bank { child_node_ids } => child_node_ids,
            _ => &[],
        }
    }

    #[must_use]
    pub fn has_conditional_calls(&self) -> bool {
        self.conditionals.has_calls()
    }

    #[must_use]
    pub fn has_scripts(&self) -> bool {
        !(self.on_enter_scripts.is_empty() && self.on_update_scripts.is_empty() && self.on_exit_scripts.is_empty())
    }

    /// On-enter, on-update then on-exit scripts
    pub fn all_scripts(&self) -> impl Iterator<Item = &ScriptCall> {
        self.on_enter_scripts
            .iter()
            .chain(&self.on_update_scripts)
            .chain(&self.on_exit_scripts)
    }
}

impl fmt::Display for ConversationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Root => f.write_str("Root"),
            NodeKind::Bank { .. } => write!(f, "Bank {}", self.node_id),
            kind => write!(f, "{} {}", kind.as_str(), self.node_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, params: &[&str]) -> ScriptCall {
        ScriptCall::new(name, params.iter().copied())
    }

    #[test]
    fn test_method_name() {
        assert_eq!(call("Boolean IsInParty(Guid)", &[]).method_name(), "IsInParty");
        assert_eq!(call("Foo(int,string)", &[]).method_name(), "Foo");
        assert_eq!(
            call("Void SetGlobalValue(String, Int32)", &["x", "1"]).display(),
            "SetGlobalValue x, 1"
        );
        assert_eq!(call("Boolean IsDay()", &[]).display(), "IsDay ");
    }

    #[test]
    fn test_leaves_descend_groups() {
        let expr = ConditionalExpression::group(vec![
            ConditionalExpression::call(call("Boolean A()", &[])),
            ConditionalExpression::group(vec![
                ConditionalExpression::call(call("Boolean B()", &[])),
                ConditionalExpression::group(vec![]),
                ConditionalExpression::call(call("Boolean C()", &[])),
            ]),
        ]);
        let names: Vec<_> = expr.script_calls().iter().map(|c| c.method_name()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(expr.components().len(), 2);
        assert!(expr.has_calls());
        assert!(!ConditionalExpression::default().has_calls());
        assert!(!ConditionalExpression::group(vec![ConditionalExpression::group(vec![])]).has_calls());
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let result = ConversationData::from_nodes([
            ConversationNode::new(0, NodeKind::Root),
            ConversationNode::new(0, NodeKind::Generic),
        ]);
        assert!(matches!(result, Err(Error::DuplicateNode(0))));
    }

    #[test]
    fn test_operator_parse() {
        assert_eq!("And".parse::<Operator>(), Ok(Operator::And));
        assert_eq!("Or".parse::<Operator>(), Ok(Operator::Or));
        assert_eq!("Xor".parse::<Operator>(), Ok(Operator::Other("Xor".to_string())));
        assert_eq!(Operator::Other("Xor".to_string()).to_string(), "Xor");
    }

    #[test]
    fn test_node_display() {
        assert_eq!(ConversationNode::new(0, NodeKind::Root).to_string(), "Root");
        let bank = ConversationNode::new(7, NodeKind::Bank { child_node_ids: vec![8] });
        assert_eq!(bank.to_string(), "Bank 7");
        assert_eq!(bank.child_node_ids(), &[8]);
    }
}
