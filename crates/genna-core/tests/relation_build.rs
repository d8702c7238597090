use genna_core::schema::{relation, ColumnSet, ForeignKey, Junction, RelationKind, TableId};
use pretty_assertions::assert_eq;
use std_util::{assert_err, assert_ok};

fn users_to_companies() -> ForeignKey {
    ForeignKey::new(
        ColumnSet::new("public", "users", ["companyId"]),
        ColumnSet::new("public", "companies", ["companyId"]),
    )
}

#[test]
fn child_to_parent_is_has_one() {
    let relation = assert_ok!(relation::build(&users_to_companies()));

    assert_eq!(relation.kind, RelationKind::HasOne);
    assert_eq!(relation.field_name, "Company");
    assert_eq!(relation.source.table, TableId::new("public", "users"));
    assert_eq!(relation.target.table, TableId::new("public", "companies"));
    assert!(!relation.is_self_referencing());
}

#[test]
fn inverse_of_child_to_parent_is_has_many() {
    let relation = assert_ok!(relation::build_inverse(&users_to_companies()));

    assert_eq!(relation.kind, RelationKind::HasMany);
    assert_eq!(relation.field_name, "Users");
    assert_eq!(relation.source.table, TableId::new("public", "companies"));
    assert_eq!(relation.target.columns, vec!["companyId".to_string()]);
}

#[test]
fn primary_key_to_primary_key_is_one_to_one_both_ways() {
    let fk = ForeignKey::new(
        ColumnSet::new("public", "profiles", ["userId"]),
        ColumnSet::new("public", "users", ["userId"]),
    )
    .source_is_primary_key(true);

    let forward = assert_ok!(relation::build(&fk));
    let inverse = assert_ok!(relation::build_inverse(&fk));

    assert_eq!(forward.kind, RelationKind::HasOne);
    assert_eq!(inverse.kind, RelationKind::HasOne);
    assert_eq!(inverse.field_name, "Profile");

    assert!(forward.is_foreign_key());
    assert!(!inverse.is_foreign_key());
}

#[test]
fn inverse_only_when_bidirectional() {
    let one_way = assert_ok!(relation::build_all(&users_to_companies()));
    assert_eq!(one_way.len(), 1);

    let both_ways = assert_ok!(relation::build_all(&users_to_companies().bidirectional(true)));
    assert_eq!(both_ways.len(), 2);
    assert_eq!(both_ways[1].kind, RelationKind::HasMany);
}

#[test]
fn column_count_mismatch_is_rejected() {
    let fk = ForeignKey::new(
        ColumnSet::new("public", "orders", ["tenantId", "customerId"]),
        ColumnSet::new("public", "customers", ["customerId"]),
    );

    let err = assert_err!(relation::build(&fk));
    assert!(err.is_malformed_relation());
    assert_eq!(
        err.to_string(),
        "malformed relation on public.orders: 2 source column(s) but 1 target column(s)"
    );

    let err = assert_err!(relation::build_inverse(&fk));
    assert!(err.is_malformed_relation());
}

#[test]
fn empty_column_list_is_rejected() {
    let fk = ForeignKey::new(
        ColumnSet::new("public", "orders", Vec::<String>::new()),
        ColumnSet::new("public", "customers", Vec::<String>::new()),
    );

    assert!(assert_err!(relation::build(&fk)).is_malformed_relation());
}

#[test]
fn composite_foreign_key() {
    let fk = ForeignKey::new(
        ColumnSet::new("public", "order_lines", ["tenantId", "orderId"]),
        ColumnSet::new("public", "orders", ["tenantId", "orderId"]),
    );

    let relation = assert_ok!(relation::build(&fk));
    assert_eq!(relation.source.columns.len(), relation.target.columns.len());
    assert_eq!(relation.field_name, "Order");
}

#[test]
fn self_reference_uses_column_name_and_join_alias() {
    let fk = ForeignKey::new(
        ColumnSet::new("public", "employees", ["managerId"]),
        ColumnSet::new("public", "employees", ["employeeId"]),
    )
    .bidirectional(true);

    let relations = assert_ok!(relation::build_all(&fk));
    let (manager, reports) = (&relations[0], &relations[1]);

    assert!(manager.is_self_referencing());
    assert_eq!(manager.field_name, "Manager");
    assert_eq!(manager.target_alias(), "j_e");
    assert_ne!(manager.target_alias(), genna_core::schema::name::alias("employees"));

    assert_eq!(reports.kind, RelationKind::HasMany);
    assert_eq!(reports.field_name, "Employees");
    assert_ne!(manager.field_name, reports.field_name);
}

fn junction() -> Junction {
    Junction {
        left: ForeignKey::new(
            ColumnSet::new("public", "user_groups", ["userId"]),
            ColumnSet::new("public", "users", ["userId"]),
        ),
        right: ForeignKey::new(
            ColumnSet::new("public", "user_groups", ["groupId"]),
            ColumnSet::new("public", "groups", ["groupId"]),
        ),
        bidirectional: false,
    }
}

#[test]
fn many_to_many_through_junction() {
    let relations = assert_ok!(relation::build_many_to_many(&junction()));
    assert_eq!(relations.len(), 1);

    let relation = &relations[0];
    assert_eq!(relation.source.table, TableId::new("public", "users"));
    assert_eq!(relation.target.table, TableId::new("public", "groups"));
    assert_eq!(relation.field_name, "Groups");

    let through = relation.through().unwrap();
    assert_eq!(through.table, TableId::new("public", "user_groups"));
    assert_eq!(through.source_columns, vec!["userId".to_string()]);
    assert_eq!(through.target_columns, vec!["groupId".to_string()]);
}

#[test]
fn bidirectional_many_to_many_mirrors() {
    let mut junction = junction();
    junction.bidirectional = true;

    let relations = assert_ok!(relation::build_many_to_many(&junction));
    assert_eq!(relations.len(), 2);
    assert_eq!(relations[1].source.table, TableId::new("public", "groups"));
    assert_eq!(relations[1].field_name, "Users");
}

#[test]
fn junction_must_share_source_table() {
    let mut junction = junction();
    junction.right.source = ColumnSet::new("public", "memberships", ["groupId"]);

    let err = assert_err!(relation::build_many_to_many(&junction));
    assert!(err.is_malformed_relation());
}
