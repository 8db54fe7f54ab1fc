//! Grant set documents.
//!
//! A grant set names the permissions to grant and, optionally, the users the
//! rows belong to. The built-in [`GrantSet::superuser`] set reproduces the
//! blog's superuser grant; other sets are loaded from versioned JSON files.

use std::collections::HashSet;

use camino::Utf8Path;
use cap_std::fs::Dir;
use serde::Deserialize;
use uuid::{Uuid, uuid};

use crate::error::GrantSetError;
use crate::permission::Permission;

/// Current supported grant file version.
const SUPPORTED_VERSION: u32 = 1;

/// Owner of the built-in superuser grant.
pub const DEFAULT_OWNER_ID: Uuid = uuid!("835b5bc7-6117-4669-9202-1d4acd7ad204");

/// An ordered list of permissions plus optional owner identifiers.
///
/// # Example
///
/// ```
/// use grant_sql::{GrantSet, Permission};
///
/// let json = r#"{
///     "version": 1,
///     "userId": "835b5bc7-6117-4669-9202-1d4acd7ad204",
///     "permissions": ["edit_post", "publish_post"]
/// }"#;
///
/// let grants = GrantSet::from_json(json).expect("valid grant set");
/// assert_eq!(grants.permissions(), &[Permission::EditPost, Permission::PublishPost]);
/// assert!(grants.created_by().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantSet {
    user_id: Option<Uuid>,
    created_by: Option<Uuid>,
    permissions: Vec<Permission>,
}

impl GrantSet {
    /// Returns the built-in superuser grant owned by [`DEFAULT_OWNER_ID`].
    #[must_use]
    pub fn superuser() -> Self {
        Self {
            user_id: Some(DEFAULT_OWNER_ID),
            created_by: None,
            permissions: Permission::SUPERUSER.to_vec(),
        }
    }

    /// Parses a grant set from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`GrantSetError`] if:
    /// - The JSON is malformed or required fields are missing
    /// - The version is unsupported
    /// - `userId` or `createdBy` is not a valid UUID
    /// - The permission list is empty, has a blank label, or repeats a label
    pub fn from_json(json: &str) -> Result<Self, GrantSetError> {
        let raw: RawGrantSet =
            serde_json::from_str(json).map_err(|e| GrantSetError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a grant set from a file inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`GrantSetError`] if the file cannot be read or parsed.
    pub fn from_file(dir: &Dir, path: &Utf8Path) -> Result<Self, GrantSetError> {
        let contents = dir
            .read_to_string(path)
            .map_err(|e| GrantSetError::IoError {
                path: path.as_std_path().to_path_buf(),
                message: e.to_string(),
            })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawGrantSet) -> Result<Self, GrantSetError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(GrantSetError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let user_id = raw
            .user_id
            .map(|value| {
                Uuid::parse_str(&value).map_err(|_| GrantSetError::InvalidUserId { value })
            })
            .transpose()?;

        let created_by = raw
            .created_by
            .map(|value| {
                Uuid::parse_str(&value).map_err(|_| GrantSetError::InvalidCreatedBy { value })
            })
            .transpose()?;

        if raw.permissions.is_empty() {
            return Err(GrantSetError::EmptyPermissions);
        }

        // Labels are compared and stored without surrounding whitespace.
        let mut seen = HashSet::with_capacity(raw.permissions.len());
        let mut permissions = Vec::with_capacity(raw.permissions.len());
        for (index, label) in raw.permissions.iter().enumerate() {
            let trimmed = label.trim();
            if trimmed.is_empty() {
                return Err(GrantSetError::BlankPermission { index });
            }
            if !seen.insert(trimmed) {
                return Err(GrantSetError::DuplicatePermission {
                    label: trimmed.to_owned(),
                });
            }
            permissions.push(Permission::from(trimmed));
        }

        Ok(Self {
            user_id,
            created_by,
            permissions,
        })
    }

    /// Returns the user receiving the grant, if the document names one.
    #[must_use]
    pub const fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    /// Returns the user issuing the grant, if the document names one.
    #[must_use]
    pub const fn created_by(&self) -> Option<Uuid> {
        self.created_by
    }

    /// Returns the permissions in grant order.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }
}

impl Default for GrantSet {
    fn default() -> Self {
        Self::superuser()
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGrantSet {
    version: u32,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    created_by: Option<String>,
    permissions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const VALID_JSON: &str = r#"{
        "version": 1,
        "userId": "835b5bc7-6117-4669-9202-1d4acd7ad204",
        "createdBy": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "permissions": ["edit_post", "moderate_comments", "delete_post"]
    }"#;

    #[test]
    fn parses_valid_grant_set() {
        let grants = GrantSet::from_json(VALID_JSON).expect("valid grant set");

        assert_eq!(grants.user_id(), Some(DEFAULT_OWNER_ID));
        assert_eq!(
            grants.created_by().map(|id| id.to_string()),
            Some("3fa85f64-5717-4562-b3fc-2c963f66afa6".to_owned())
        );
        assert_eq!(
            grants.permissions(),
            &[
                Permission::EditPost,
                Permission::Custom {
                    name: "moderate_comments".to_owned()
                },
                Permission::DeletePost,
            ]
        );
    }

    #[test]
    fn owner_fields_are_optional() {
        let grants = GrantSet::from_json(r#"{"version": 1, "permissions": ["edit_user"]}"#)
            .expect("valid grant set");

        assert!(grants.user_id().is_none());
        assert!(grants.created_by().is_none());
        assert_eq!(grants.permissions(), &[Permission::EditUser]);
    }

    #[test]
    fn superuser_set_has_twelve_permissions() {
        let grants = GrantSet::superuser();

        assert_eq!(grants.permissions().len(), 12);
        assert_eq!(grants.user_id(), Some(DEFAULT_OWNER_ID));
        assert_eq!(grants, GrantSet::default());
    }

    #[test]
    fn fixture_file_matches_superuser_set() {
        let dir = Dir::open_ambient_dir(
            concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures"),
            cap_std::ambient_authority(),
        )
        .expect("open fixtures dir");

        let grants = GrantSet::from_file(&dir, Utf8Path::new("superuser-grants.json"))
            .expect("fixture loads");

        assert_eq!(grants, GrantSet::superuser());
    }

    #[test]
    fn missing_file_reports_io_error() {
        let dir = Dir::open_ambient_dir(env!("CARGO_MANIFEST_DIR"), cap_std::ambient_authority())
            .expect("open manifest dir");

        let result = GrantSet::from_file(&dir, Utf8Path::new("absent-grants.json"));

        assert!(matches!(result, Err(GrantSetError::IoError { .. })));
    }

    #[test]
    fn labels_are_trimmed() {
        let grants =
            GrantSet::from_json(r#"{"version": 1, "permissions": ["  edit_post ", "\tmoderate\n"]}"#)
                .expect("valid grant set");

        assert_eq!(
            grants.permissions(),
            &[
                Permission::EditPost,
                Permission::Custom {
                    name: "moderate".to_owned()
                },
            ]
        );
    }

    #[rstest]
    #[case::malformed_json("not valid json")]
    #[case::missing_version(r#"{"permissions": ["edit_post"]}"#)]
    #[case::missing_permissions(r#"{"version": 1}"#)]
    #[case::non_string_label(r#"{"version": 1, "permissions": [7]}"#)]
    fn rejects_json_with_parse_error(#[case] json: &str) {
        let result = GrantSet::from_json(json);
        assert!(matches!(result, Err(GrantSetError::ParseError { .. })));
    }

    #[rstest]
    #[case::unsupported_version(
        r#"{"version": 2, "permissions": ["edit_post"]}"#,
        GrantSetError::UnsupportedVersion { expected: 1, actual: 2 }
    )]
    #[case::invalid_user_id(
        r#"{"version": 1, "userId": "not-a-uuid", "permissions": ["edit_post"]}"#,
        GrantSetError::InvalidUserId { value: "not-a-uuid".to_owned() }
    )]
    #[case::invalid_created_by(
        r#"{"version": 1, "createdBy": "bad", "permissions": ["edit_post"]}"#,
        GrantSetError::InvalidCreatedBy { value: "bad".to_owned() }
    )]
    #[case::empty_permissions(
        r#"{"version": 1, "permissions": []}"#,
        GrantSetError::EmptyPermissions
    )]
    #[case::blank_permission(
        r#"{"version": 1, "permissions": ["edit_post", "  "]}"#,
        GrantSetError::BlankPermission { index: 1 }
    )]
    #[case::duplicate_permission(
        r#"{"version": 1, "permissions": ["edit_post", "delete_post", "edit_post"]}"#,
        GrantSetError::DuplicatePermission { label: "edit_post".to_owned() }
    )]
    #[case::padded_duplicate_permission(
        r#"{"version": 1, "permissions": [" edit_post", "edit_post"]}"#,
        GrantSetError::DuplicatePermission { label: "edit_post".to_owned() }
    )]
    fn rejects_invalid_grant_set(#[case] json: &str, #[case] expected: GrantSetError) {
        assert_eq!(GrantSet::from_json(json), Err(expected));
    }
}
