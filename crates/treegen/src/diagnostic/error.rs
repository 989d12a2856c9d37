//! Generator error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while describing a scene tree.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum GeneratorError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to read file '{path}': {message}")]
    #[diagnostic(code(treegen::io::read_error))]
    IoError {
        path: PathBuf,
        message: String,
    },

    #[error("Failed to parse scene snapshot: {}", path.display())]
    #[diagnostic(
        code(treegen::io::snapshot_parse),
        help("Snapshots look like: {{ \"className\": \"Frame\", \"name\": \"Root\", \"properties\": {{}}, \"children\": [] }}")
    )]
    SnapshotParse {
        path: PathBuf,
        message: String,
    },

    #[error("Failed to parse defaults table: {}", path.display())]
    #[diagnostic(code(treegen::io::defaults_parse))]
    DefaultsParse {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Metadata Errors
    // =========================================================================
    #[error("Class metadata unavailable: {message}")]
    #[diagnostic(
        code(treegen::metadata::unavailable),
        help("Check that the API dump URL is reachable or pass a local dump with --api-dump")
    )]
    MetadataUnavailable {
        message: String,
    },

    #[error("Unable to get indexable names for {class_name}")]
    #[diagnostic(code(treegen::metadata::unknown_class))]
    UnknownClass {
        class_name: String,
    },

    // =========================================================================
    // Default Instance Errors
    // =========================================================================
    #[error("Cannot construct a default instance of '{class_name}': {reason}")]
    #[diagnostic(
        code(treegen::defaults::not_constructible),
        help("Add the class to the defaults table, or exclude the node from the tree")
    )]
    NotConstructible {
        class_name: String,
        reason: String,
    },
}

impl GeneratorError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an unknown class error.
    pub fn unknown_class(class_name: impl Into<String>) -> Self {
        Self::UnknownClass {
            class_name: class_name.into(),
        }
    }
}
