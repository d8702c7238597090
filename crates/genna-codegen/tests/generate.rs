mod fixtures;

use fixtures::schema;
use genna_codegen::{generate, Options};
use genna_core::schema::{relation, ColumnSet, ForeignKey};
use genna_core::{Column, ColumnType, Table, TableId};
use pretty_assertions::assert_eq;
use std_util::{assert_ok, assert_unique};

fn options() -> Options {
    Options::new()
        .package("test")
        .tables(["public.users", "geo.*"])
        .follow_fks(true)
}

#[test]
fn users_model() {
    let package = assert_ok!(generate(&schema(), &options()));

    let structs: Vec<_> = package.models.iter().map(|m| m.struct_name.as_str()).collect();
    assert_eq!(structs, ["User", "Company", "GeoLocation", "GeoLanguage"]);

    let user = package.model("User").unwrap();
    assert_eq!(user.struct_tag, r#"pg:"users,alias:u,discard_unknown_columns""#);
    assert_eq!(user.table_name, "users");

    let fields: Vec<_> = user
        .columns
        .iter()
        .map(|c| (c.field_name.as_str(), c.field_type.as_str(), c.field_tag.as_str()))
        .collect();
    assert_eq!(
        fields,
        [
            ("ID", "int64", r#"pg:"userId,pk""#),
            ("Email", "*string", r#"pg:"email""#),
            ("LocationID", "int64", r#"pg:"locationId,use_zero""#),
            ("CompanyID", "*int64", r#"pg:"companyId""#),
            ("CreatedAt", "time.Time", r#"pg:"createdAt,use_zero""#),
        ]
    );

    let relations: Vec<_> = user
        .relations
        .iter()
        .map(|r| (r.field_name.as_str(), r.field_type.as_str(), r.field_tag.as_str()))
        .collect();
    assert_eq!(
        relations,
        [
            ("Location", "*GeoLocation", r#"pg:"fk:locationId,rel:has-one""#),
            ("Company", "*Company", r#"pg:"fk:companyId,rel:has-one""#),
        ]
    );

    assert_unique!(user.field_names());
    assert_eq!(package.imports, ["time"]);
    assert!(package.search_imports.is_empty());
}

#[test]
fn keep_pk_uses_column_name() {
    let package = assert_ok!(generate(&schema(), &options().keep_pk(true)));
    let user = package.model("User").unwrap();

    assert_eq!(user.columns[0].field_name, "UserID");
    assert_eq!(user.columns[0].field_tag, r#"pg:"userId,pk""#);
}

#[test]
fn relations_to_unselected_tables_are_dropped() {
    let options = Options::new().tables(["public.users"]);
    let package = assert_ok!(generate(&schema(), &options));

    assert_eq!(package.models.len(), 1);
    let user = &package.models[0];
    assert!(!user.has_relations());
    assert!(user.column("LocationID").is_some());
    assert!(user.column("CompanyID").is_some());
}

#[test]
fn runs_are_deterministic() {
    let first = assert_ok!(generate(&schema(), &options()));
    let second = assert_ok!(generate(&schema(), &options()));

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn empty_selection_is_not_an_error() {
    let options = Options::new().tables(["nowhere.*"]);
    let package = assert_ok!(generate(&schema(), &options));

    assert!(package.models.is_empty());
    assert!(!package.has_imports());
}

#[test]
fn relation_attached_to_wrong_table_aborts_the_run() {
    let mut tables = schema();
    tables[1].relations[0].source.table.name = "locations".to_string();

    let err = generate(&tables, &options()).unwrap_err();
    assert!(err.is_invalid_schema(), "err={err}");
}

#[test]
fn foreign_key_column_backing_two_relations_is_rejected() {
    let mut tables = schema();
    let duplicate = tables[1].relations[1].clone();
    tables[1].relations.push(duplicate);

    let err = generate(&tables, &options()).unwrap_err();
    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("companyId"), "err={err}");
}

#[test]
fn dropped_relations_do_not_count_against_foreign_keys() {
    let mut tables = schema();
    let mut elsewhere = tables[1].relations[1].clone();
    elsewhere.target.table = TableId::new("public", "unused");
    elsewhere.field_name = "Unused".to_string();
    tables[1].relations.push(elsewhere);

    let options = Options::new().tables(["public.users", "public.companies"]);
    let package = assert_ok!(generate(&tables, &options));

    let names: Vec<_> = package.model("User").unwrap().field_names().collect();
    assert_eq!(
        names,
        ["ID", "Email", "LocationID", "CompanyID", "CreatedAt", "Company"]
    );
}

fn one_to_one(source: &str, target: &str) -> ForeignKey {
    ForeignKey::new(
        ColumnSet::new("public", source, ["id"]),
        ColumnSet::new("public", target, ["id"]),
    )
    .source_is_primary_key(true)
    .bidirectional(true)
}

#[test]
fn primary_key_chain_is_one_to_one() {
    let mut tables = vec![
        Table::new("public", "accounts")
            .with_column(Column::new("id", ColumnType::Int8).primary_key()),
        Table::new("public", "employees")
            .with_column(Column::new("id", ColumnType::Int8).primary_key().foreign_key()),
        Table::new("public", "managers")
            .with_column(Column::new("id", ColumnType::Int8).primary_key().foreign_key()),
    ];

    for fk in [one_to_one("employees", "accounts"), one_to_one("managers", "employees")] {
        for relation in relation::build_all(&fk).unwrap() {
            let source = tables
                .iter_mut()
                .find(|table| table.is(&relation.source.table))
                .unwrap();
            source.relations.push(relation);
        }
    }

    let package = assert_ok!(generate(&tables, &Options::new()));

    let employee = package.model("Employee").unwrap();
    let relations: Vec<_> = employee
        .relations
        .iter()
        .map(|r| (r.field_name.as_str(), r.field_type.as_str()))
        .collect();
    assert_eq!(relations, [("Account", "*Account"), ("Manager", "*Manager")]);

    assert_eq!(package.model("Account").unwrap().relations[0].field_name, "Employee");
    assert_eq!(package.model("Manager").unwrap().relations[0].field_name, "Employee");
}
