//! Error types for graph operations
//!
//! Provides unified error handling for store mutations, save file parsing and
//! file/image IO.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::{ImageId, LinkId, PointId};

/// Errors that can occur while editing, loading or saving a graph
#[derive(Error, Debug)]
pub enum GraphError {
    /// Malformed save file line
    #[error("could not parse save file at line {line}: \"{raw}\" ({issue})")]
    Syntax {
        line: usize,
        raw: String,
        issue: SyntaxIssue,
    },

    #[error("point {0} does not exist")]
    PointNotFound(PointId),

    #[error("link {0} does not exist")]
    LinkNotFound(LinkId),

    #[error("image {0} does not exist")]
    ImageNotFound(ImageId),

    #[error("point id {0} is already in use")]
    DuplicatePointId(PointId),

    #[error("link id {0} is already in use")]
    DuplicateLinkId(LinkId),

    #[error("image id {0} is already in use")]
    DuplicateImageId(ImageId),

    /// A completed link already connects the two points, in either direction
    #[error("points {0} and {1} are already linked")]
    DuplicateLink(PointId, PointId),

    #[error("link {0} is already complete")]
    LinkAlreadyComplete(LinkId),

    /// A store operation failed while replaying a save file
    #[error("save file line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<GraphError>,
    },

    /// Value that the save format cannot represent
    #[error("cannot save {what} {value:?}: it would not read back unchanged")]
    Unencodable { what: &'static str, value: String },

    #[error("failed to format save file")]
    Format(#[from] fmt::Error),

    #[error("no save file is associated with the editor")]
    NoSaveFile,

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not load image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl GraphError {
    /// The error underneath any line context added while loading
    pub fn root(&self) -> &GraphError {
        match self {
            GraphError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GraphError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Why a save file line was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxIssue {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("{command} takes {expected} arguments, found {found}")]
    ArgumentCount {
        command: &'static str,
        expected: Arity,
        found: usize,
    },

    #[error("{0:?} is not a valid number")]
    InvalidNumber(String),

    #[error("{0} is not a valid state")]
    InvalidState(i64),

    /// Point text the writer could not give back unchanged
    #[error("{0:?} is not valid point text")]
    InvalidText(String),
}

/// Number of arguments a save file command accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, found: usize) -> bool {
        match self {
            Arity::Exactly(n) => found == n,
            Arity::AtLeast(n) => found >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}
