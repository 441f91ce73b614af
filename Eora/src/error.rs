//! Error types for `Eora`

use thiserror::Error;

/// The error type for `Eora` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Parsing Errors ====================
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    XmlAttrError(String),

    /// The document has no root element, or closes an element it never opened.
    #[error("malformed XML document: {0}")]
    MalformedXml(String),

    // ==================== Flowchart Format Errors ====================
    /// The root element is not the one the format expects.
    #[error("unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot {
        /// The element name the reader expects.
        expected: &'static str,
        /// The element name found in the document.
        found: String,
    },

    /// A required element is missing from its parent.
    #[error("missing <{element}> in <{parent}>")]
    MissingElement {
        /// The missing element name.
        element: &'static str,
        /// The element that should contain it.
        parent: String,
    },

    /// An element that must hold an integer holds something else.
    #[error("invalid number in <{element}>: {value:?}")]
    InvalidNumber {
        /// The element name.
        element: String,
        /// The text that failed to parse.
        value: String,
    },

    /// A boolean element holds something other than `true`/`false`.
    #[error("invalid boolean in <{element}>: {value:?}")]
    InvalidBool {
        /// The element name.
        element: String,
        /// The text that failed to parse.
        value: String,
    },

    /// Two nodes in the same conversation share an id.
    #[error("duplicate node id {0}")]
    DuplicateNode(i32),

    // ==================== File System Errors ====================
    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    /// Invalid format error (use specific variants when possible).
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

// Add conversion from quick_xml::events::attributes::AttrError
impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttrError(err.to_string())
    }
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `Eora` operations.
pub type Result<T> = std::result::Result<T, Error>;
