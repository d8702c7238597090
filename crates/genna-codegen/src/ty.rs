use genna_core::ColumnType;

/// The Go type generated for a column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GoType {
    pub(crate) name: String,

    /// Package that must be imported to use the type
    pub(crate) import: Option<&'static str>,

    /// True if the type already has a nil value (slices, maps, interfaces),
    /// so a nullable column needs no pointer
    pub(crate) nilable: bool,
}

impl GoType {
    fn new(name: &str) -> GoType {
        GoType {
            name: name.to_string(),
            import: None,
            nilable: false,
        }
    }

    fn imported(name: &str, import: &'static str) -> GoType {
        GoType {
            import: Some(import),
            ..GoType::new(name)
        }
    }

    fn nilable(name: &str) -> GoType {
        GoType {
            nilable: true,
            ..GoType::new(name)
        }
    }

    pub(crate) fn from_column(ty: &ColumnType) -> GoType {
        match ty {
            ColumnType::Int2 | ColumnType::Int4 => GoType::new("int"),
            ColumnType::Int8 => GoType::new("int64"),
            ColumnType::Numeric | ColumnType::Float8 => GoType::new("float64"),
            ColumnType::Float4 => GoType::new("float32"),
            ColumnType::Bool => GoType::new("bool"),
            ColumnType::Text | ColumnType::Varchar | ColumnType::Char => GoType::new("string"),
            ColumnType::Uuid => GoType::imported("uuid.UUID", "github.com/google/uuid"),
            ColumnType::Date
            | ColumnType::Time
            | ColumnType::Timestamp
            | ColumnType::Timestamptz => GoType::imported("time.Time", "time"),
            ColumnType::Interval => GoType::imported("time.Duration", "time"),
            ColumnType::Json | ColumnType::Jsonb => GoType::nilable("map[string]interface{}"),
            ColumnType::Bytea => GoType::nilable("[]byte"),
            ColumnType::Inet => GoType {
                nilable: true,
                ..GoType::imported("net.IP", "net")
            },
            ColumnType::Array(element) => {
                let element = GoType::from_column(element);
                GoType {
                    name: format!("[]{}", element.name),
                    import: element.import,
                    nilable: true,
                }
            }
            ColumnType::Other(_) => GoType::nilable("interface{}"),
        }
    }

    /// The type of a struct field holding the column.
    pub(crate) fn field_type(&self, nullable: bool) -> String {
        if nullable && !self.nilable {
            format!("*{}", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Column types that can be filtered on in search structs.
pub(crate) fn is_searchable(ty: &ColumnType) -> bool {
    matches!(
        ty,
        ColumnType::Int2
            | ColumnType::Int4
            | ColumnType::Int8
            | ColumnType::Numeric
            | ColumnType::Float4
            | ColumnType::Float8
            | ColumnType::Bool
            | ColumnType::Text
            | ColumnType::Varchar
            | ColumnType::Char
            | ColumnType::Uuid
            | ColumnType::Date
            | ColumnType::Time
            | ColumnType::Timestamp
            | ColumnType::Timestamptz
    )
}

/// The search struct field type for a column. Strict search keeps the
/// exact type; otherwise types needing an import are searched as strings.
pub(crate) fn search_type(ty: &GoType, strict: bool) -> GoType {
    if strict || ty.import.is_none() {
        GoType {
            name: format!("*{}", ty.name),
            import: ty.import,
            nilable: true,
        }
    } else {
        GoType::nilable("*string")
    }
}
