mod fixtures;

use fixtures::{schema, users};
use genna_codegen::{generate, Options};
use genna_core::schema::{relation, ColumnSet, ForeignKey, Junction};
use genna_core::{Column, ColumnType, Table};
use pretty_assertions::assert_eq;
use std_util::assert_ok;

fn only_users() -> Options {
    Options::new().tables(["public.users"])
}

#[test]
fn struct_tag_options() {
    let tables = schema();

    let package = assert_ok!(generate(&tables, &only_users()));
    let user = package.model("User").unwrap();
    assert!(user.with_alias);
    assert_eq!(user.table_alias, "u");
    assert_eq!(user.join_alias, "j_u");

    let package = assert_ok!(generate(&tables, &only_users().view(true)));
    assert_eq!(
        package.models[0].struct_tag,
        r#"pg:"select:users,alias:u,discard_unknown_columns""#
    );

    let package = assert_ok!(generate(&tables, &only_users().no_alias(true)));
    assert_eq!(package.models[0].struct_tag, r#"pg:"users,discard_unknown_columns""#);
    assert!(!package.models[0].with_alias);

    let package = assert_ok!(generate(&tables, &only_users().no_discard(true)));
    assert_eq!(package.models[0].struct_tag, r#"pg:"users,alias:u""#);
}

#[test]
fn views_declared_by_schema() {
    let mut tables = schema();
    tables[1].view = true;

    let package = assert_ok!(generate(&tables, &only_users()));
    assert!(package.models[0].struct_tag.starts_with(r#"pg:"select:users"#));
}

#[test]
fn tables_outside_public_are_qualified() {
    let options = Options::new().tables(["geo.locations"]);
    let package = assert_ok!(generate(&schema(), &options));

    let location = &package.models[0];
    assert_eq!(location.struct_name, "GeoLocation");
    assert_eq!(location.search_struct_name, "GeoLocationSearch");
    assert_eq!(location.table_name, "geo.locations");
    assert_eq!(
        location.struct_tag,
        r#"pg:"geo.locations,alias:l,discard_unknown_columns""#
    );
}

#[test]
fn loose_search_types() {
    let package = assert_ok!(generate(&schema(), &only_users().with_search(true)));
    let user = package.model("User").unwrap();

    let search: Vec<_> = user
        .columns
        .iter()
        .map(|c| (c.field_name.as_str(), c.search_field_type.as_deref()))
        .collect();
    assert_eq!(
        search,
        [
            ("ID", Some("*int64")),
            ("Email", Some("*string")),
            ("LocationID", Some("*int64")),
            ("CompanyID", Some("*int64")),
            ("CreatedAt", Some("*string")),
        ]
    );
    assert!(!package.has_search_imports());
    assert_eq!(user.search_struct_name, "UserSearch");
}

#[test]
fn strict_search_keeps_types() {
    let options = only_users().with_search(true).strict_search(true);
    let package = assert_ok!(generate(&schema(), &options));

    let created = package.model("User").unwrap().column("CreatedAt").unwrap();
    assert_eq!(created.search_field_type.as_deref(), Some("*time.Time"));
    assert!(package.has_search_imports());
    assert_eq!(package.search_imports, ["time"]);
}

#[test]
fn unsearchable_columns() {
    let table = Table::new("public", "documents")
        .with_column(Column::new("documentId", ColumnType::Uuid).primary_key())
        .with_column(Column::new("body", ColumnType::Jsonb).nullable())
        .with_column(Column::new("tags", ColumnType::from("_text")));

    let package = assert_ok!(generate(&[table], &Options::new()));
    let document = &package.models[0];

    let id = document.column("ID").unwrap();
    assert_eq!(id.field_type, "uuid.UUID");
    assert!(id.is_searchable);

    let body = document.column("Body").unwrap();
    assert_eq!(body.field_type, "map[string]interface{}");
    assert!(!body.is_searchable);

    let tags = document.column("Tags").unwrap();
    assert_eq!(tags.field_type, "[]string");
    assert_eq!(tags.field_tag, r#"pg:"tags,use_zero,array""#);
    assert!(!tags.is_searchable);

    assert_eq!(package.imports, ["github.com/google/uuid"]);
}

#[test]
fn soft_delete_column() {
    let table = users().with_column(Column::new("deletedAt", ColumnType::Timestamptz).nullable());
    let options = only_users().soft_delete("deletedAt");

    let package = assert_ok!(generate(&[table], &options));
    let deleted = package.models[0].column("DeletedAt").unwrap();
    assert_eq!(deleted.field_type, "*time.Time");
    assert_eq!(deleted.field_tag, r#"pg:"deletedAt,soft_delete""#);
}

#[test]
fn composite_primary_key_keeps_field_names() {
    let table = Table::new("public", "memberships")
        .with_column(Column::new("userId", ColumnType::Int8).primary_key())
        .with_column(Column::new("groupId", ColumnType::Int8).primary_key())
        .with_column(Column::new("role", ColumnType::Text));

    let package = assert_ok!(generate(&[table], &Options::new()));
    let fields: Vec<_> = package.models[0]
        .columns
        .iter()
        .map(|c| (c.field_name.as_str(), c.field_tag.as_str()))
        .collect();
    assert_eq!(
        fields,
        [
            ("UserID", r#"pg:"userId,pk""#),
            ("GroupID", r#"pg:"groupId,pk""#),
            ("Role", r#"pg:"role,use_zero""#),
        ]
    );
}

#[test]
fn preserved_case() {
    let table = Table::new("public", "events")
        .with_column(Column::new("event_id", ColumnType::Int4).primary_key())
        .with_column(Column::new("started_at", ColumnType::Timestamp))
        .with_column(Column::new("2fa", ColumnType::Bool));

    let package = assert_ok!(generate(&[table.clone()], &Options::new().preserve_case(true)));
    let names: Vec<_> = package.models[0].field_names().collect();
    assert_eq!(names, ["ID", "Started_at", "Field2fa"]);

    let package = assert_ok!(generate(&[table], &Options::new()));
    let names: Vec<_> = package.models[0].field_names().collect();
    assert_eq!(names, ["ID", "StartedAt", "Field2fa"]);
}

fn memberships() -> Vec<Table> {
    let junction = Junction {
        left: ForeignKey::new(
            ColumnSet::new("public", "user_groups", ["userId"]),
            ColumnSet::new("public", "users", ["userId"]),
        ),
        right: ForeignKey::new(
            ColumnSet::new("public", "user_groups", ["groupId"]),
            ColumnSet::new("public", "groups", ["groupId"]),
        ),
        bidirectional: false,
    };

    let mut users = Table::new("public", "users")
        .with_column(Column::new("userId", ColumnType::Int8).primary_key());
    for relation in relation::build_many_to_many(&junction).unwrap() {
        users = users.with_relation(relation);
    }

    vec![
        users,
        Table::new("public", "groups")
            .with_column(Column::new("groupId", ColumnType::Int8).primary_key()),
        Table::new("public", "user_groups")
            .with_column(Column::new("userId", ColumnType::Int8).primary_key().foreign_key())
            .with_column(Column::new("groupId", ColumnType::Int8).primary_key().foreign_key()),
    ]
}

#[test]
fn many_to_many_relation() {
    let package = assert_ok!(generate(&memberships(), &Options::new()));

    let user = package.model("User").unwrap();
    assert!(user.has_relations());

    let groups = user.relation("Groups").unwrap();
    assert_eq!(groups.field_type, "[]Group");
    assert_eq!(
        groups.field_tag,
        r#"pg:"many2many:user_groups,fk:userId,join_fk:groupId""#
    );
    assert_eq!(groups.field_comment.as_deref(), Some("linked through user_groups"));
}

#[test]
fn many_to_many_needs_junction_selected() {
    let options = Options::new().tables(["public.users", "public.groups"]);
    let package = assert_ok!(generate(&memberships(), &options));

    assert!(!package.model("User").unwrap().has_relations());
}

#[test]
fn following_pulls_in_junction() {
    let options = Options::new().tables(["public.users"]).follow_fks(true);
    let package = assert_ok!(generate(&memberships(), &options));

    let structs: Vec<_> = package.models.iter().map(|m| m.struct_name.as_str()).collect();
    assert_eq!(structs, ["User", "Group", "UserGroup"]);
    assert!(package.model("User").unwrap().relation("Groups").is_some());
}
