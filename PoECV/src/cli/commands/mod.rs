use clap::Subcommand;
use std::str::FromStr;

use crate::Viewer;

pub mod files;
pub mod search;
pub mod tree;

/// Parameter pin for searches: `POSITION=VALUE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinArg {
    pub position: usize,
    pub value: String,
}

impl FromStr for PinArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (position, value) = s
            .split_once('=')
            .ok_or_else(|| format!("Invalid pin '{s}'. Expected POSITION=VALUE, e.g. 0=Edér"))?;
        let position = position
            .trim()
            .parse()
            .map_err(|_| format!("Invalid parameter position '{position}' in '{s}'"))?;
        Ok(PinArg {
            position,
            value: value.to_string(),
        })
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List conversation files
    Files {
        /// Only show files whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Print the display tree of a conversation
    Tree {
        /// Conversation name (relative path, with or without extension)
        file: String,

        /// Emit JSON instead of an indented tree
        #[arg(long)]
        json: bool,
    },

    /// Show the detailed info of one node and its path from the root
    Node {
        /// Conversation name
        file: String,

        /// Node id
        id: i32,
    },

    /// List every method used in conditionals
    Methods,

    /// List the recorded values of each parameter of a method
    Params {
        /// Method full name, e.g. "Boolean IsInParty(Guid)"
        method: String,
    },

    /// Find nodes whose conditionals call a method with matching parameters
    Search {
        /// Method full name
        method: String,

        /// Pin a parameter position (repeatable), e.g. -p 0=Edér
        #[arg(short, long = "pin", value_name = "POS=VALUE")]
        pins: Vec<PinArg>,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    pub fn execute(&self, viewer: &mut Viewer) -> anyhow::Result<()> {
        match self {
            Commands::Files { filter } => files::list(viewer, filter.as_deref()),
            Commands::Tree { file, json } => tree::print_tree(viewer, file, *json),
            Commands::Node { file, id } => tree::print_node(viewer, file, *id),
            Commands::Methods => search::list_methods(viewer),
            Commands::Params { method } => search::list_params(viewer, method),
            Commands::Search { method, pins, json } => search::run_search(viewer, method, pins, *json),
        }
    }
}
