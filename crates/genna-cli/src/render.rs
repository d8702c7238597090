//! Go source for the generated files.
//!
//! Output is laid out with single spaces; running `gofmt` over it aligns
//! the struct fields.

use anyhow::Result;
use genna_codegen::{template::TemplateTable, Package};
use std::fmt::Write;

const HEADER: &str = "//lint:file-ignore U1000 ignore unused code, it's generated";

const PG_IMPORT: &str = "github.com/go-pg/pg/v10";
const ORM_IMPORT: &str = "github.com/go-pg/pg/v10/orm";

/// Renders the model file: the `Columns` and `Tables` name registries
/// followed by one struct per model.
pub fn models(package: &Package) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "{HEADER}")?;
    writeln!(out, "package {}", package.package)?;
    imports(&mut out, &package.imports)?;

    columns_registry(&mut out, package)?;
    tables_registry(&mut out, package)?;

    for model in &package.models {
        model_struct(&mut out, model)?;
    }

    Ok(out)
}

/// Renders the search file: one filter struct per model with an `Apply`
/// method adding a `WHERE` clause for every field that is set.
pub fn search(package: &Package) -> Result<String> {
    let searchable = package
        .models
        .iter()
        .flat_map(|model| &model.columns)
        .any(|column| column.is_searchable);

    let mut all = Vec::new();
    if searchable {
        all.push(PG_IMPORT.to_string());
    }
    all.push(ORM_IMPORT.to_string());
    all.extend(package.search_imports.iter().cloned());
    all.sort();

    let mut out = String::new();
    writeln!(out, "{HEADER}")?;
    writeln!(out, "package {}", package.package)?;
    imports(&mut out, &all)?;

    for model in &package.models {
        search_struct(&mut out, model)?;
    }

    Ok(out)
}

fn imports(out: &mut String, imports: &[String]) -> Result<()> {
    if imports.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "import (")?;
    for import in imports {
        writeln!(out, "\t{import:?}")?;
    }
    writeln!(out, ")")?;
    Ok(())
}

fn columns_registry(out: &mut String, package: &Package) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "var Columns = struct {{")?;
    for model in &package.models {
        writeln!(out, "\t{} {}", model.struct_name, column_names_type(model))?;
    }
    writeln!(out, "}}{{")?;
    for model in &package.models {
        writeln!(out, "\t{}: {}{{", model.struct_name, column_names_type(model))?;
        for column in &model.columns {
            writeln!(out, "\t\t{}: {:?},", column.field_name, column.field_db_name)?;
        }
        for relation in &model.relations {
            writeln!(out, "\t\t{}: {:?},", relation.field_name, relation.field_name)?;
        }
        writeln!(out, "\t}},")?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

fn column_names_type(model: &TemplateTable) -> String {
    let mut groups = vec![];

    let columns: Vec<_> = model.columns.iter().map(|c| c.field_name.as_str()).collect();
    if !columns.is_empty() {
        groups.push(format!("{} string", columns.join(", ")));
    }

    let relations: Vec<_> = model.relations.iter().map(|r| r.field_name.as_str()).collect();
    if !relations.is_empty() {
        groups.push(format!("{} string", relations.join(", ")));
    }

    if groups.is_empty() {
        "struct{}".to_string()
    } else {
        format!("struct {{ {} }}", groups.join("; "))
    }
}

fn tables_registry(out: &mut String, package: &Package) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "var Tables = struct {{")?;
    for model in &package.models {
        writeln!(out, "\t{} {}", model.struct_name, table_names_type(model))?;
    }
    writeln!(out, "}}{{")?;
    for model in &package.models {
        writeln!(out, "\t{}: {}{{", model.struct_name, table_names_type(model))?;
        writeln!(out, "\t\tName: {:?},", model.table_name)?;
        if model.with_alias {
            writeln!(out, "\t\tAlias: {:?},", model.table_alias)?;
        }
        writeln!(out, "\t}},")?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

fn table_names_type(model: &TemplateTable) -> &'static str {
    if model.with_alias {
        "struct { Name, Alias string }"
    } else {
        "struct { Name string }"
    }
}

fn model_struct(out: &mut String, model: &TemplateTable) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "type {} struct {{", model.struct_name)?;
    writeln!(out, "\ttableName struct{{}} `{}`", model.struct_tag)?;

    if !model.columns.is_empty() {
        writeln!(out)?;
    }
    for column in &model.columns {
        field(
            out,
            &column.field_name,
            &column.field_type,
            &column.field_tag,
            column.field_comment.as_deref(),
        )?;
    }

    if model.has_relations() {
        writeln!(out)?;
    }
    for relation in &model.relations {
        field(
            out,
            &relation.field_name,
            &relation.field_type,
            &relation.field_tag,
            relation.field_comment.as_deref(),
        )?;
    }

    writeln!(out, "}}")?;
    Ok(())
}

fn field(out: &mut String, name: &str, ty: &str, tag: &str, comment: Option<&str>) -> Result<()> {
    write!(out, "\t{name} {ty} `{tag}`")?;
    if let Some(comment) = comment {
        write!(out, " // {comment}")?;
    }
    writeln!(out)?;
    Ok(())
}

fn search_struct(out: &mut String, model: &TemplateTable) -> Result<()> {
    let columns: Vec<_> = model
        .columns
        .iter()
        .filter_map(|column| Some((column, column.search_field_type.as_deref()?)))
        .collect();

    writeln!(out)?;
    writeln!(out, "type {} struct {{", model.search_struct_name)?;
    for (column, ty) in &columns {
        writeln!(out, "\t{} {}", column.field_name, ty)?;
    }
    writeln!(out, "}}")?;

    let table = if model.with_alias {
        format!("Tables.{}.Alias", model.struct_name)
    } else {
        format!("Tables.{}.Name", model.struct_name)
    };

    writeln!(out)?;
    writeln!(
        out,
        "func (s *{}) Apply(query *orm.Query) *orm.Query {{",
        model.search_struct_name
    )?;
    for (column, _) in &columns {
        writeln!(out, "\tif s.{} != nil {{", column.field_name)?;
        writeln!(
            out,
            "\t\tquery.Where(\"?.? = ?\", pg.Ident({table}), pg.Ident(Columns.{}.{}), s.{})",
            model.struct_name, column.field_name, column.field_name
        )?;
        writeln!(out, "\t}}")?;
    }
    writeln!(out, "\treturn query")?;
    writeln!(out, "}}")?;
    Ok(())
}
