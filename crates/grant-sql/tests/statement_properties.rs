//! Properties of the generated superuser grant statement.
//!
//! These tests pin the observable shape of the SQL text: header, column
//! order, tuple count and ordering, quoting and termination.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use grant_sql::{
    COLUMNS, GrantSet, InsertStatement, Owners, Permission, RandomIds, SeededIds,
    StatementLayout, TableName,
};
use rstest::{fixture, rstest};

const OWNER: &str = "835b5bc7-6117-4669-9202-1d4acd7ad204";

const LABELS: [&str; 12] = [
    "edit_post",
    "create_post",
    "delete_post",
    "publish_post",
    "archive_post",
    "create_user",
    "edit_user",
    "delete_user",
    "grant_permission",
    "view_permission",
    "edit_user_credentials",
    "delete_permission",
];

#[fixture]
fn grants() -> GrantSet {
    GrantSet::superuser()
}

fn render(grants: &GrantSet, layout: StatementLayout) -> String {
    let owner = grants.user_id().expect("superuser grant has an owner");
    InsertStatement::assemble(
        TableName::default(),
        layout,
        Owners::single(owner),
        grants.permissions(),
        &mut RandomIds,
    )
    .expect("statement assembles")
    .to_string()
}

/// Splits the `VALUES` section into tuple bodies without parentheses.
fn tuple_bodies(sql: &str) -> Vec<String> {
    let (_, values) = sql.split_once("VALUES").expect("statement has VALUES");
    values
        .trim()
        .trim_end_matches(';')
        .split("),")
        .map(|tuple| {
            tuple
                .trim()
                .trim_start_matches('(')
                .trim_end_matches(')')
                .to_owned()
        })
        .collect()
}

#[rstest]
fn header_names_columns_in_order(grants: GrantSet) {
    let compact = render(&grants, StatementLayout::Compact);
    let expanded = render(&grants, StatementLayout::Expanded);

    assert!(compact.starts_with("INSERT INTO permissions (id, created_by, user_id, permission) VALUES"));
    assert!(expanded.starts_with(
        "INSERT INTO permissions (\n    id,\n    created_by,\n    user_id,\n    permission\n) VALUES\n"
    ));
    assert_eq!(COLUMNS, ["id", "created_by", "user_id", "permission"]);
}

#[rstest]
#[case(StatementLayout::Expanded)]
#[case(StatementLayout::Compact)]
fn emits_one_tuple_per_permission_in_order(grants: GrantSet, #[case] layout: StatementLayout) {
    let sql = render(&grants, layout);
    let bodies = tuple_bodies(&sql);

    assert_eq!(bodies.len(), LABELS.len());
    for (body, label) in bodies.iter().zip(LABELS) {
        let fields: Vec<&str> = body.split(", ").collect();
        assert_eq!(fields.len(), 4, "tuple: {body}");
        assert!(fields.iter().all(|field| field.starts_with('\'') && field.ends_with('\'')));
        assert_eq!(fields.get(3).copied(), Some(format!("'{label}'").as_str()));
    }
}

#[rstest]
#[case(StatementLayout::Expanded)]
#[case(StatementLayout::Compact)]
fn terminates_with_single_semicolon(grants: GrantSet, #[case] layout: StatementLayout) {
    let sql = render(&grants, layout);

    assert!(sql.ends_with("');"));
    assert_eq!(sql.matches(';').count(), 1);
    assert!(!sql.trim_end_matches(';').trim_end().ends_with(','));
}

#[rstest]
fn owner_fills_created_by_and_user_id(grants: GrantSet) {
    let sql = render(&grants, StatementLayout::Expanded);
    let bodies = tuple_bodies(&sql);
    let first = bodies.first().expect("first tuple");

    assert!(first.ends_with(&format!("'{OWNER}', 'edit_post'")));
    assert!(bodies.iter().all(|body| body.matches(OWNER).count() == 2));
}

#[rstest]
fn row_ids_are_distinct_canonical_uuids(grants: GrantSet) {
    let sql = render(&grants, StatementLayout::Expanded);
    let ids: Vec<String> = tuple_bodies(&sql)
        .iter()
        .map(|body| {
            body.split(", ")
                .next()
                .expect("id field")
                .trim_matches('\'')
                .to_owned()
        })
        .collect();

    for id in &ids {
        let parsed = uuid::Uuid::parse_str(id).expect("id parses as uuid");
        assert_eq!(&parsed.hyphenated().to_string(), id);
        assert_ne!(id.as_str(), OWNER);
    }
    let unique: std::collections::HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

#[rstest]
fn same_seed_renders_identical_text(grants: GrantSet) {
    let owner = grants.user_id().expect("owner");
    let build = |seed| {
        InsertStatement::assemble(
            TableName::default(),
            StatementLayout::Expanded,
            Owners::single(owner),
            grants.permissions(),
            &mut SeededIds::new(seed),
        )
        .expect("statement assembles")
        .to_string()
    };

    assert_eq!(build(2026), build(2026));
    assert_ne!(build(2026), build(2027));
}

#[test]
fn custom_labels_are_quoted_safely() {
    let permissions = [Permission::from("o'clock")];
    let sql = InsertStatement::assemble(
        TableName::default(),
        StatementLayout::Compact,
        Owners::single(uuid::Uuid::nil()),
        &permissions,
        &mut SeededIds::new(1),
    )
    .expect("statement assembles")
    .to_string();

    assert!(sql.ends_with("'o''clock');"));
}
