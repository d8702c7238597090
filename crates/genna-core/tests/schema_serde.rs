use genna_core::schema::{Column, ColumnType, RelationKind, Table};
use genna_core::Relation;
use pretty_assertions::assert_eq;

#[test]
fn table_round_trips_through_json() {
    let table = Table::new("geo", "locations")
        .with_column(Column::new("locationId", ColumnType::Int8).primary_key())
        .with_column(Column::new("tags", ColumnType::from("_text")).nullable());

    let json = serde_json::to_string(&table).unwrap();
    let parsed: Table = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, table);
    assert!(json.contains(r#""ty":"text[]""#), "json={json}");
}

#[test]
fn relation_kind_is_tagged() {
    let json = r#"{
        "kind": {"type": "has_many"},
        "source": {"schema": "public", "name": "companies", "columns": ["companyId"]},
        "target": {"schema": "public", "name": "users", "columns": ["companyId"]},
        "field_name": "Users"
    }"#;

    let relation: Relation = serde_json::from_str(json).unwrap();
    assert_eq!(relation.kind, RelationKind::HasMany);
    assert_eq!(relation.target.table.name, "users");
}

#[test]
fn composite_primary_key_detection() {
    let table = Table::new("public", "order_lines")
        .with_column(Column::new("orderId", ColumnType::Int8).primary_key())
        .with_column(Column::new("line", ColumnType::Int4).primary_key())
        .with_column(Column::new("sku", ColumnType::Text));

    assert!(table.has_composite_primary_key());
    assert_eq!(table.primary_key_columns().count(), 2);
    assert!(table.column("sku").is_some());
    assert!(table.column("missing").is_none());
}
