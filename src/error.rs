//! Structured error types for configuration loading, mapping
//! validation and dataset operations.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::paths::relative_path;

/// Which uniqueness rule an aggregation mapping violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Two items share a target label.
    Target,
    /// A source label is claimed by more than one target, or repeated
    /// within a single target's own component list.
    Component,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::Target => write!(f, "target"),
            ConflictKind::Component => write!(f, "component"),
        }
    }
}

/// A uniqueness violation inside one aggregation mapping. `duplicates`
/// holds every value that occurred more than once; `file` is the
/// mapping's relative path, kept for structured diagnostics (the
/// loader already names the path in its own message).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("duplicate {kind} labels [{}]", .duplicates.join(", "))]
pub struct ConflictError {
    pub kind: ConflictKind,
    pub duplicates: Vec<String>,
    pub file: PathBuf,
}

/// Construction-time failure of an aggregation mapping. Shape failures
/// are reported per item; conflict checks all run and every conflict
/// found is reported together.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("aggregation target with empty name")]
    EmptyTargetName,

    #[error("aggregation target '{0}' has no components")]
    EmptyComponents(String),

    #[error("{}", .0.iter().map(|c| c.to_string()).collect::<Vec<_>>().join("; "))]
    Conflicts(Vec<ConflictError>),
}

/// The failure stage wrapped by a [`LoadError`].
#[derive(Error, Debug)]
pub enum LoadErrorKind {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] serde_yaml::Error),

    #[error("{0}")]
    Shape(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Umbrella error for anything that goes wrong while loading a
/// configuration file. The message keeps the original failure text and
/// annotates it with the file's relative path.
#[derive(Error, Debug)]
#[error("{kind} in {}", .file.display())]
pub struct LoadError {
    pub kind: LoadErrorKind,
    pub file: PathBuf,
}

impl LoadError {
    pub fn new(path: &Path, kind: impl Into<LoadErrorKind>) -> Self {
        Self {
            kind: kind.into(),
            file: relative_path(path),
        }
    }
}

/// Failures of dataset operations.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("unknown dimension '{0}'")]
    UnknownDimension(String),

    #[error("renaming produced {0} duplicate label tuple(s)")]
    DuplicateRows(usize),

    #[error("malformed dataset: {0}")]
    Malformed(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
