//! Error types for the grant-sql command pipeline.

use thiserror::Error;

use crate::error::{GrantSetError, OutputError, StatementError};

/// Errors surfaced while resolving settings and emitting a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("failed to load configuration: {message}")]
    Settings {
        /// Description of the configuration failure.
        message: String,
    },
    /// The configured owner identifier is not a UUID.
    #[error("invalid owner id '{value}': {message}")]
    InvalidOwnerId {
        /// Raw value supplied for the owner.
        value: String,
        /// Parser error message.
        message: String,
    },
    /// The configured creator identifier is not a UUID.
    #[error("invalid created-by id '{value}': {message}")]
    InvalidCreatedBy {
        /// Raw value supplied for the creator.
        value: String,
        /// Parser error message.
        message: String,
    },
    /// A configured path is not valid UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the rejected path.
        path: String,
    },
    /// The statement could not be written to standard output.
    #[error("failed to write to standard output: {message}")]
    Stdout {
        /// Description of the I/O error.
        message: String,
    },
    /// The grant file could not be loaded.
    #[error("grant file error: {source}")]
    GrantSetError {
        /// Underlying grant set error.
        #[from]
        #[source]
        source: GrantSetError,
    },
    /// The statement could not be assembled.
    #[error("statement error: {source}")]
    StatementError {
        /// Underlying statement error.
        #[from]
        #[source]
        source: StatementError,
    },
    /// The output file could not be written.
    #[error("output error: {source}")]
    OutputError {
        /// Underlying output error.
        #[from]
        #[source]
        source: OutputError,
    },
}
