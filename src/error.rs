//! Error types for the cilin library.
//!
//! All fallible operations in this crate return [`Result`], whose error type
//! is the [`CilinError`] enum.
//!
//! # Examples
//!
//! ```
//! use cilin::error::{CilinError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(CilinError::parse("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for cilin operations.
///
/// Uses the `thiserror` crate for automatic `Error` trait implementation and
/// provides convenient constructor methods for the common cases.
#[derive(Error, Debug)]
pub enum CilinError {
    /// I/O errors (reading source lists, writing output files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Source line parsing errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Definition cache errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Markup rendering errors
    #[error("Render error: {0}")]
    Render(String),

    /// External definition lookup errors
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with CilinError.
pub type Result<T> = std::result::Result<T, CilinError>;

impl CilinError {
    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        CilinError::Parse(msg.into())
    }

    /// Create a new cache error.
    pub fn cache<S: Into<String>>(msg: S) -> Self {
        CilinError::Cache(msg.into())
    }

    /// Create a new render error.
    pub fn render<S: Into<String>>(msg: S) -> Self {
        CilinError::Render(msg.into())
    }

    /// Create a new lookup error.
    pub fn lookup<S: Into<String>>(msg: S) -> Self {
        CilinError::Lookup(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        CilinError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        CilinError::Other(format!("Invalid argument: {}", msg.into()))
    }
}
