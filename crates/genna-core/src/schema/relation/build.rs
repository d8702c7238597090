use super::{ColumnSet, ForeignKey, Junction, Relation, RelationKind, Through};
use crate::{
    schema::name::{self, Name},
    Error, Result,
};

/// Builds the relation on the declaring (referencing) side of a foreign
/// key. This is always `HasOne`: a child row references at most one parent,
/// and a primary key referencing a primary key is one-to-one.
pub fn build(fk: &ForeignKey) -> Result<Relation> {
    verify_column_counts(fk)?;

    let field_name = if fk.source.table == fk.target.table {
        self_reference_name(&fk.source)
    } else {
        name::type_name(&fk.target.table.name)
    };

    let relation = Relation {
        kind: RelationKind::HasOne,
        source: fk.source.clone(),
        target: fk.target.clone(),
        field_name,
        inverse: false,
    };

    log::trace!(
        "built {} relation {} -> {} as `{}`",
        relation.kind.as_str(),
        relation.source.table,
        relation.target.table,
        relation.field_name
    );

    Ok(relation)
}

/// Builds the relation on the referenced side of a foreign key.
///
/// The result is `HasOne` when the foreign key links primary key to primary
/// key and `HasMany` otherwise. Whether this side is emitted at all is the
/// caller's decision; see [`build_all`].
pub fn build_inverse(fk: &ForeignKey) -> Result<Relation> {
    verify_column_counts(fk)?;

    let (kind, field_name) = if fk.is_one_to_one() {
        (RelationKind::HasOne, name::type_name(&fk.source.table.name))
    } else {
        (
            RelationKind::HasMany,
            name::plural_type_name(&fk.source.table.name),
        )
    };

    Ok(Relation {
        kind,
        source: fk.target.clone(),
        target: fk.source.clone(),
        field_name,
        inverse: true,
    })
}

/// Builds the declaring side of a foreign key, plus the referenced side
/// when the foreign key is marked bidirectional.
pub fn build_all(fk: &ForeignKey) -> Result<Vec<Relation>> {
    let mut relations = vec![build(fk)?];

    if fk.bidirectional {
        relations.push(build_inverse(fk)?);
    }

    Ok(relations)
}

/// Composes a many-to-many relation from an explicit junction declaration.
///
/// Both foreign keys must leave the junction table. The relation is owned
/// by the left foreign key's target and points at the right one's target;
/// the mirror relation is added when the junction is bidirectional.
pub fn build_many_to_many(junction: &Junction) -> Result<Vec<Relation>> {
    let Junction { left, right, .. } = junction;

    verify_column_counts(left)?;
    verify_column_counts(right)?;

    if left.source.table != right.source.table {
        return Err(Error::malformed_junction(
            left.source.table.to_string(),
            left.source.table.to_string(),
            right.source.table.to_string(),
        ));
    }

    let mut relations = vec![many_to_many(left, right)];

    if junction.bidirectional {
        relations.push(many_to_many(right, left));
    }

    Ok(relations)
}

fn many_to_many(from: &ForeignKey, to: &ForeignKey) -> Relation {
    Relation {
        kind: RelationKind::ManyToMany(Through {
            table: from.source.table.clone(),
            source_columns: from.source.columns.clone(),
            target_columns: to.source.columns.clone(),
        }),
        source: from.target.clone(),
        target: to.target.clone(),
        field_name: name::plural_type_name(&to.target.table.name),
        inverse: false,
    }
}

fn verify_column_counts(fk: &ForeignKey) -> Result<()> {
    let source = fk.source.columns.len();
    let target = fk.target.columns.len();

    if source == 0 || source != target {
        return Err(Error::malformed_relation(
            fk.source.table.to_string(),
            source,
            target,
        ));
    }

    Ok(())
}

/// A self-referencing relation is named after its columns rather than the
/// table, `managerId` becomes `Manager`, so it stays apart from the table's
/// own plural collections.
fn self_reference_name(source: &ColumnSet) -> String {
    let parts: Vec<String> = source
        .columns
        .iter()
        .flat_map(|column| Name::new(column).without_id_suffix().parts)
        .collect();

    let name = Name { parts };
    if name.is_empty() {
        name::type_name(&source.table.name)
    } else {
        name::field_name(&name.snake_case(), false)
    }
}
