//! Permission labels granted by generated statements.
//!
//! The labels mirror the values stored in the `permission` column of the
//! blog's `permissions` table. Anything outside the known set is carried as a
//! [`Permission::Custom`] label so grant files can name permissions this
//! crate does not know about.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A permission label.
///
/// # Example
///
/// ```
/// use grant_sql::Permission;
///
/// assert_eq!(Permission::from("edit_post"), Permission::EditPost);
/// assert_eq!(Permission::PublishPost.as_str(), "publish_post");
/// assert_eq!(
///     Permission::from("moderate_comments").as_str(),
///     "moderate_comments"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Permission {
    /// Edit existing posts.
    EditPost,
    /// Create new posts.
    CreatePost,
    /// Delete posts.
    DeletePost,
    /// Publish drafted posts.
    PublishPost,
    /// Archive published posts.
    ArchivePost,
    /// Create other users.
    CreateUser,
    /// Edit other users.
    EditUser,
    /// Delete other users.
    DeleteUser,
    /// Grant permissions to other users.
    GrantPermission,
    /// View the permissions of other users.
    ViewPermission,
    /// Edit or delete login credentials.
    EditUserCredentials,
    /// Revoke permissions from other users.
    DeletePermission,
    /// Any label outside the known set.
    Custom {
        /// The raw label.
        name: String,
    },
}

impl Permission {
    /// The full superuser grant, in the order rows are emitted.
    pub const SUPERUSER: [Self; 12] = [
        Self::EditPost,
        Self::CreatePost,
        Self::DeletePost,
        Self::PublishPost,
        Self::ArchivePost,
        Self::CreateUser,
        Self::EditUser,
        Self::DeleteUser,
        Self::GrantPermission,
        Self::ViewPermission,
        Self::EditUserCredentials,
        Self::DeletePermission,
    ];

    /// Returns the label stored in the `permission` column.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::EditPost => "edit_post",
            Self::CreatePost => "create_post",
            Self::DeletePost => "delete_post",
            Self::PublishPost => "publish_post",
            Self::ArchivePost => "archive_post",
            Self::CreateUser => "create_user",
            Self::EditUser => "edit_user",
            Self::DeleteUser => "delete_user",
            Self::GrantPermission => "grant_permission",
            Self::ViewPermission => "view_permission",
            Self::EditUserCredentials => "edit_user_credentials",
            Self::DeletePermission => "delete_permission",
            Self::Custom { name } => name,
        }
    }
}

impl From<&str> for Permission {
    fn from(label: &str) -> Self {
        match label {
            "edit_post" => Self::EditPost,
            "create_post" => Self::CreatePost,
            "delete_post" => Self::DeletePost,
            "publish_post" => Self::PublishPost,
            "archive_post" => Self::ArchivePost,
            "create_user" => Self::CreateUser,
            "edit_user" => Self::EditUser,
            "delete_user" => Self::DeleteUser,
            "grant_permission" => Self::GrantPermission,
            "view_permission" => Self::ViewPermission,
            "edit_user_credentials" => Self::EditUserCredentials,
            "delete_permission" => Self::DeletePermission,
            other => Self::Custom {
                name: other.to_owned(),
            },
        }
    }
}

impl From<String> for Permission {
    fn from(label: String) -> Self {
        match Self::from(label.as_str()) {
            Self::Custom { .. } => Self::Custom { name: label },
            known => known,
        }
    }
}

impl From<Permission> for String {
    fn from(permission: Permission) -> Self {
        match permission {
            Permission::Custom { name } => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
