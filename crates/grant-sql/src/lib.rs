//! SQL generation for seeding permission grants.
//!
//! This crate renders a single `INSERT INTO permissions (...)` statement that
//! grants an ordered list of permission labels to a user. It is used to
//! bootstrap the first superuser of a blog database, where every permission
//! row needs a fresh primary key plus the identifiers of the granting and
//! receiving users.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - The built-in twelve-permission superuser grant
//! - Loading alternative grant sets from versioned JSON files
//! - Random or seeded (reproducible) row identifiers
//! - Expanded or single-line statement layouts
//! - Writing to standard output or atomically to a file
//!
//! # Example
//!
//! ```
//! use grant_sql::{GrantSet, InsertStatement, Owners, SeededIds, StatementLayout, TableName};
//!
//! let grants = GrantSet::superuser();
//! let owner = grants.user_id().expect("built-in set has an owner");
//! let statement = InsertStatement::assemble(
//!     TableName::default(),
//!     StatementLayout::Expanded,
//!     Owners::single(owner),
//!     grants.permissions(),
//!     &mut SeededIds::new(2026),
//! )
//! .expect("statement assembles");
//!
//! assert_eq!(statement.rows().len(), 12);
//! assert!(statement.to_string().starts_with("INSERT INTO permissions ("));
//! ```

mod atomic_io;
pub mod cli;
mod error;
mod grant_set;
mod identifier;
mod permission;
mod settings;
mod statement;

pub use error::{GrantSetError, OutputError, StatementError};
pub use grant_set::{DEFAULT_OWNER_ID, GrantSet};
pub use identifier::{IdGenerator, RandomIds, SeededIds, generate_identifier};
pub use permission::Permission;
pub use settings::GrantSqlSettings;
pub use statement::{
    COLUMNS, DEFAULT_TABLE, GrantRow, InsertStatement, Owners, StatementLayout, TableName,
};
