//! # Error Types
//!
//! This module defines the error type returned by the collaborator-facing parts of the
//! crate: persistence, project management, configuration and export.
//!
//! The theory and geometry engine (`pitch`, `tuning`, `fretmap`, `scale`, `harmony`,
//! `layout`, `view`) never returns an error. It falls back to a safe default instead,
//! and exposes `Option`-returning resolvers for callers that need to tell the two apart.
//!
//! ## Error Types
//! - `Storage` - A key-value backend rejected a read or write
//! - `Io` - File-backed storage I/O failure
//! - `Serialization` - Project or session JSON could not be encoded/decoded
//! - `Config` - Invalid YAML editor configuration
//! - `Export` - Export sheet could not be rendered
//! - `DiagramLimit` - A project already holds the maximum number of diagrams
//! - `DiagramNotFound` / `ProjectNotFound` - Lookup by id or name failed
//!
//! ## Usage
//! ```rust
//! use fretboard::{EditorConfig, FretboardError};
//!
//! match EditorConfig::from_yaml("max-diagrams: 0") {
//!     Ok(_) => unreachable!(),
//!     Err(FretboardError::Config(message)) => eprintln!("bad config: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FretboardError {
    /// A storage backend failed for the given key.
    ///
    /// # Example
    /// ```
    /// # use fretboard::FretboardError;
    /// let err = FretboardError::Storage {
    ///     key: "alice/Blues".to_string(),
    ///     message: "quota exceeded".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Storage error for key 'alice/Blues': quota exceeded");
    /// ```
    #[error("Storage error for key '{key}': {message}")]
    Storage { key: String, message: String },

    /// File-backed storage I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Project or session JSON could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid editor configuration.
    ///
    /// # Example
    /// ```
    /// # use fretboard::FretboardError;
    /// let err = FretboardError::Config("end-fret must be greater than start-fret".to_string());
    /// assert_eq!(err.to_string(), "Invalid config: end-fret must be greater than start-fret");
    /// ```
    #[error("Invalid config: {0}")]
    Config(String),

    /// Export sheet rendering failure.
    #[error("Export error: {0}")]
    Export(String),

    /// The project already holds the maximum number of diagrams.
    ///
    /// # Example
    /// ```
    /// # use fretboard::FretboardError;
    /// let err = FretboardError::DiagramLimit(12);
    /// assert_eq!(err.to_string(), "Diagram limit reached (12 per project)");
    /// ```
    #[error("Diagram limit reached ({0} per project)")]
    DiagramLimit(usize),

    #[error("Diagram not found: {0}")]
    DiagramNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),
}

/// Result alias for fallible collaborator operations.
pub type Result<T> = std::result::Result<T, FretboardError>;
