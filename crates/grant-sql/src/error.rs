//! Error types for the grant-sql crate.
//!
//! This module defines semantic error enums for grant set parsing, statement
//! assembly and output writing, following the project's error handling
//! conventions with `thiserror`.

use std::path::PathBuf;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing a grant set document.
///
/// These errors cover file I/O, JSON parsing and validation of the owner
/// identifiers and permission labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrantSetError {
    /// The grant file could not be read.
    #[error("failed to read grant file at '{path}': {message}")]
    IoError {
        /// Path to the grant file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The grant JSON is malformed or missing required fields.
    #[error("invalid grant JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The grant document version is not supported.
    #[error("unsupported grant file version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the document.
        actual: u32,
    },

    /// The `userId` field is not a valid UUID.
    #[error("invalid user UUID: {value}")]
    InvalidUserId {
        /// The invalid UUID string.
        value: String,
    },

    /// The `createdBy` field is not a valid UUID.
    #[error("invalid creator UUID: {value}")]
    InvalidCreatedBy {
        /// The invalid UUID string.
        value: String,
    },

    /// The document lists no permissions.
    #[error("grant file lists no permissions")]
    EmptyPermissions,

    /// A permission label is empty or whitespace-only.
    #[error("blank permission label at index {index}")]
    BlankPermission {
        /// Index of the blank label in the array.
        index: usize,
    },

    /// A permission label appears more than once.
    #[error("permission '{label}' is listed more than once")]
    DuplicatePermission {
        /// The repeated label.
        label: String,
    },
}

/// Errors raised while assembling an `INSERT` statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    /// The table name is not a plain SQL identifier.
    #[error("invalid table name '{value}': {reason}")]
    InvalidTableName {
        /// The rejected table name.
        value: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// The statement has no rows to insert.
    #[error("cannot build an INSERT statement without rows")]
    NoRows,
}

/// Errors raised while writing the rendered statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputError {
    /// The output file could not be written.
    #[error("failed to write output file at '{path}': {message}")]
    Write {
        /// Path that failed to write.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}
