//! Error types for `PoECV`

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A conversation or string table could not be read or parsed.
    #[error("failed to load {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: eora::Error,
    },

    /// A trigger node's target does not identify exactly one corpus file.
    #[error(
        "trigger node {node_id} in {file} targets '{fragment}', which matches {matches} files (expected exactly 1)"
    )]
    ReferenceResolution {
        fragment: String,
        matches: usize,
        file: String,
        node_id: i32,
    },

    /// A search selection does not fit the recorded parameter schema.
    #[error("schema mismatch for '{method}' at parameter {position}: {detail}")]
    SchemaMismatch {
        method: String,
        position: usize,
        detail: String,
    },

    #[error("no conditional calls to '{0}' were indexed")]
    UnknownMethod(String),

    #[error("node {node_id} not found in {file}")]
    NodeNotFound { file: String, node_id: i32 },

    #[error("no conversation file matches '{0}'")]
    FileNotFound(String),

    #[error("'{query}' matches {count} conversation files: {candidates}")]
    AmbiguousFile {
        query: String,
        count: usize,
        candidates: String,
    },

    #[error("search index has not been built")]
    IndexNotBuilt,

    #[error("config error: {0}")]
    Config(String),

    #[error("Eora error: {0}")]
    Eora(#[from] eora::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
