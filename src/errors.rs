//! Error types for the idea-capture application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur during idea and category management operations.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the idea-capture application.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// A category still referenced by live ideas cannot be deleted.
    #[error("Category {id} is still used by {count} idea(s)")]
    CategoryInUse { id: String, count: usize },

    #[error("{message}")]
    EditorError { message: String },

    /// Generic application error with a custom message.
    #[error("{message}")]
    ApplicationError { message: String },
}
