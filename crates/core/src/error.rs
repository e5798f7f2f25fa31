//! Error types.
//!
//! None of these escape [`crate::DocumentAssembler::assemble`]: the assembler
//! recovers from each locally and produces a best-effort document. They are
//! public so callers of the lower-level operations can tell what degraded.

use thiserror::Error;

/// Errors from looking up or loading template versions.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// Requested template version id does not exist.
    #[error("template version not found: {version}")]
    NotFound { version: String },

    /// A library must hold at least one version.
    #[error("template library has no versions")]
    Empty,

    /// Version ids are unique within a library.
    #[error("duplicate template version: {version}")]
    DuplicateVersion { version: String },

    /// Library file could not be parsed.
    #[error("failed to parse {format} template library: {message}")]
    Parse { format: &'static str, message: String },

    /// Library file could not be read.
    #[error("failed to read template library {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A fragment whose regions could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    /// A region container was never closed, or was closed implicitly by an
    /// enclosing end tag.
    #[error("region '{key}' is not closed")]
    UnclosedRegion { key: String },

    /// Two region containers share a key.
    #[error("region key '{key}' appears more than once")]
    DuplicateKey { key: String },
}

/// Errors from loading configuration or plan files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {message}")]
    Parse { message: String },

    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for library operations.
pub type LibraryResult<T> = Result<T, LibraryError>;
