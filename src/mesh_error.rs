//! MeshPrepError: Unified error type for mesh-prep public APIs
//!
//! Every stage of the preparation pipeline (configuration, geometry I/O,
//! classification, export) reports failures through this type. Nothing is
//! recovered locally: each variant is a hard stop for the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for mesh-prep operations.
#[derive(Debug, Error)]
pub enum MeshPrepError {
    /// A layer parameter is required because `n_layers > 0` but is unset.
    #[error("{field} must be specified if n_layers > 0")]
    MissingLayerParameter { field: &'static str },
    /// A configuration value is outside its valid domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A match pattern failed to compile.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    /// A refinement level is outside `0..=Level::MAX`.
    #[error("refinement level {0} is out of range (0..={max})", max = crate::config::Level::MAX)]
    InvalidLevel(u32),
    /// The YAML configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
    /// A patch or region name cannot be used as an output file name.
    #[error("{kind} name `{name}` cannot be used as a file name")]
    InvalidName { kind: &'static str, name: String },
    /// A patch matched neither a volume control nor a region.
    #[error("No region found for {0}")]
    UnclassifiablePatch(String),
    /// File system failure while reading or writing `path`.
    #[error("I/O error on `{}`: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// File system failure on a stream with no known path.
    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),
    /// Malformed Wavefront OBJ input.
    #[error("OBJ parse error on line {line}: {message}")]
    ObjParse { line: usize, message: String },
    /// A geometry lookup referenced an entity that does not exist.
    #[error("{kind} index {index} out of range")]
    IndexOutOfRange { kind: &'static str, index: usize },
    /// Classification was requested before any geometry was imported.
    #[error("no geometry has been imported")]
    GeometryNotImported,
    /// A downstream dictionary writer has no implementation.
    #[error("{0} writer is not implemented")]
    Unimplemented(&'static str),
}

impl MeshPrepError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MeshPrepError::Io {
            path: path.into(),
            source,
        }
    }

    /// Attaches `path` to a path-less stream error; other errors pass through.
    pub fn at_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            MeshPrepError::Stream(source) => MeshPrepError::io(path, source),
            other => other,
        }
    }
}
