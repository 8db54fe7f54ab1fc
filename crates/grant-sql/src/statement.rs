//! `INSERT` statement assembly.
//!
//! A statement is built from an ordered permission list and the owner
//! identifiers. Each permission becomes one `(id, created_by, user_id,
//! permission)` value tuple, and the tuples keep the order of the list.
//!
//! Every value is rendered as a SQL string literal. Identifiers are typed
//! [`Uuid`]s and never contain quotes; permission labels may be arbitrary
//! text, so embedded single quotes are doubled.

use std::fmt;

use uuid::Uuid;

use crate::error::StatementError;
use crate::identifier::IdGenerator;
use crate::permission::Permission;

/// Columns populated by every row, in insertion order.
pub const COLUMNS: [&str; 4] = ["id", "created_by", "user_id", "permission"];

/// Table written to when none is configured.
pub const DEFAULT_TABLE: &str = "permissions";

/// Postgres truncates identifiers longer than this.
const MAX_IDENTIFIER_BYTES: usize = 63;

/// A validated SQL table name, optionally schema-qualified.
///
/// # Example
///
/// ```
/// use grant_sql::TableName;
///
/// assert!(TableName::new("blog.permissions").is_ok());
/// assert!(TableName::new("permissions; DROP TABLE users").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    /// Validates `value` as a plain identifier or `schema.table` pair.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::InvalidTableName`] when any segment is empty,
    /// too long, starts with a digit, or contains characters outside
    /// `[A-Za-z0-9_]`.
    pub fn new(value: &str) -> Result<Self, StatementError> {
        let invalid = |reason| StatementError::InvalidTableName {
            value: value.to_owned(),
            reason,
        };

        let segments: Vec<&str> = value.split('.').collect();
        if segments.len() > 2 {
            return Err(invalid("has more than one schema qualifier"));
        }
        for segment in segments {
            validate_segment(segment).map_err(invalid)?;
        }

        Ok(Self(value.to_owned()))
    }

    /// Returns the table name as written in the statement.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TableName {
    fn default() -> Self {
        Self(DEFAULT_TABLE.to_owned())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_segment(segment: &str) -> Result<(), &'static str> {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return Err("must not contain an empty segment");
    };
    if segment.len() > MAX_IDENTIFIER_BYTES {
        return Err("exceeds 63 bytes");
    }
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err("must start with a letter or underscore");
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("contains a character outside [A-Za-z0-9_]");
    }
    Ok(())
}

/// How the statement text is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatementLayout {
    /// Column list on separate lines and one value tuple per line.
    #[default]
    Expanded,
    /// Everything on a single line.
    Compact,
}

/// The identifiers recorded against every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owners {
    /// User who issued the grant.
    pub created_by: Uuid,
    /// User receiving the grant.
    pub user_id: Uuid,
}

impl Owners {
    /// Uses one identifier for both `created_by` and `user_id`.
    #[must_use]
    pub const fn single(user_id: Uuid) -> Self {
        Self {
            created_by: user_id,
            user_id,
        }
    }
}

/// One row of the `permissions` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantRow {
    /// Primary key of the row.
    pub id: Uuid,
    /// User who issued the grant.
    pub created_by: Uuid,
    /// User receiving the grant.
    pub user_id: Uuid,
    /// Granted permission.
    pub permission: Permission,
}

impl GrantRow {
    /// Renders the row as a parenthesised tuple of SQL string literals.
    ///
    /// # Example
    ///
    /// ```
    /// use grant_sql::{GrantRow, Permission};
    /// use uuid::Uuid;
    ///
    /// let row = GrantRow {
    ///     id: Uuid::nil(),
    ///     created_by: Uuid::nil(),
    ///     user_id: Uuid::nil(),
    ///     permission: Permission::EditPost,
    /// };
    ///
    /// assert_eq!(
    ///     row.value_tuple(),
    ///     "('00000000-0000-0000-0000-000000000000', \
    ///      '00000000-0000-0000-0000-000000000000', \
    ///      '00000000-0000-0000-0000-000000000000', 'edit_post')"
    /// );
    /// ```
    #[must_use]
    pub fn value_tuple(&self) -> String {
        format!(
            "({}, {}, {}, {})",
            sql_literal(&self.id.hyphenated().to_string()),
            sql_literal(&self.created_by.hyphenated().to_string()),
            sql_literal(&self.user_id.hyphenated().to_string()),
            sql_literal(self.permission.as_str()),
        )
    }
}

/// Quotes `value` as a SQL string literal, doubling embedded quotes.
#[must_use]
pub(crate) fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// An assembled `INSERT` statement.
///
/// The rendered text is available through [`fmt::Display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    table: TableName,
    layout: StatementLayout,
    rows: Vec<GrantRow>,
}

impl InsertStatement {
    /// Builds one row per permission, drawing row ids from `ids`.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::NoRows`] when `permissions` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use grant_sql::{InsertStatement, Owners, Permission, SeededIds, StatementLayout, TableName};
    /// use uuid::Uuid;
    ///
    /// let owner = Uuid::parse_str("835b5bc7-6117-4669-9202-1d4acd7ad204").expect("valid uuid");
    /// let statement = InsertStatement::assemble(
    ///     TableName::default(),
    ///     StatementLayout::Compact,
    ///     Owners::single(owner),
    ///     &Permission::SUPERUSER,
    ///     &mut SeededIds::new(1),
    /// )
    /// .expect("statement");
    ///
    /// let sql = statement.to_string();
    /// assert!(sql.starts_with("INSERT INTO permissions (id, created_by, user_id, permission) VALUES ("));
    /// assert!(sql.ends_with("'delete_permission');"));
    /// ```
    pub fn assemble<G>(
        table: TableName,
        layout: StatementLayout,
        owners: Owners,
        permissions: &[Permission],
        ids: &mut G,
    ) -> Result<Self, StatementError>
    where
        G: IdGenerator + ?Sized,
    {
        if permissions.is_empty() {
            return Err(StatementError::NoRows);
        }

        let rows = permissions
            .iter()
            .map(|permission| GrantRow {
                id: ids.next_id(),
                created_by: owners.created_by,
                user_id: owners.user_id,
                permission: permission.clone(),
            })
            .collect();

        Ok(Self {
            table,
            layout,
            rows,
        })
    }

    /// Returns the target table.
    #[must_use]
    pub const fn table(&self) -> &TableName {
        &self.table
    }

    /// Returns the rows in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[GrantRow] {
        &self.rows
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tuples: Vec<String> = self.rows.iter().map(GrantRow::value_tuple).collect();
        match self.layout {
            StatementLayout::Expanded => {
                writeln!(f, "INSERT INTO {} (", self.table)?;
                writeln!(f, "    {}", COLUMNS.join(",\n    "))?;
                writeln!(f, ") VALUES")?;
                write!(f, "{};", tuples.join(",\n"))
            }
            StatementLayout::Compact => write!(
                f,
                "INSERT INTO {} ({}) VALUES {};",
                self.table,
                COLUMNS.join(", "),
                tuples.join(", ")
            ),
        }
    }
}
