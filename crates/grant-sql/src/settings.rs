//! Generator configuration loaded via OrthoConfig.
//!
//! Values are layered from command-line flags, `GRANT_SQL_*` environment
//! variables and an optional configuration file. With nothing configured the
//! generator emits the built-in superuser grant to standard output.

use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::statement::{DEFAULT_TABLE, StatementLayout};

/// Configuration values controlling statement generation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GRANT_SQL")]
pub struct GrantSqlSettings {
    /// User receiving the grant. Overrides the grant file's `userId`.
    pub owner_id: Option<String>,
    /// User issuing the grant. Defaults to the resolved owner.
    pub created_by: Option<String>,
    /// Target table name.
    pub table: Option<String>,
    /// Grant file replacing the built-in superuser permission list.
    pub grant_file: Option<PathBuf>,
    /// Seed for reproducible row identifiers.
    pub seed: Option<u64>,
    /// Emit the statement on a single line.
    #[ortho_config(default = false)]
    pub compact: bool,
    /// Write the statement to this file instead of standard output.
    pub output: Option<PathBuf>,
}

impl GrantSqlSettings {
    /// Return the configured table name, falling back to `permissions`.
    #[must_use]
    pub fn table_name(&self) -> &str {
        self.table.as_deref().unwrap_or(DEFAULT_TABLE)
    }

    /// Return the requested statement layout.
    #[must_use]
    pub const fn layout(&self) -> StatementLayout {
        if self.compact {
            StatementLayout::Compact
        } else {
            StatementLayout::Expanded
        }
    }

    /// Return the grant file path, if one is configured.
    #[must_use]
    pub fn grant_file(&self) -> Option<&Path> {
        self.grant_file.as_deref()
    }

    /// Return the output file path, if one is configured.
    #[must_use]
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}
