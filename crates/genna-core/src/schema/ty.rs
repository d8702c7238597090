use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Semantic type of a column, parsed from its catalog spelling.
///
/// Only the distinctions that matter for model generation are kept: width
/// of integers, text versus binary, the date/time family, and arrays.
/// Anything unrecognized is carried verbatim in [`ColumnType::Other`].
///
/// Array types are accepted both in PostgreSQL's internal spelling
/// (`_int4`) and in SQL spelling (`int4[]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColumnType {
    /// 2-byte signed integer
    Int2,

    /// 4-byte signed integer
    Int4,

    /// 8-byte signed integer
    Int8,

    /// Arbitrary precision decimal
    Numeric,

    Float4,

    Float8,

    Bool,

    /// Unconstrained text
    Text,

    /// Length-limited text
    Varchar,

    /// Fixed-length text
    Char,

    Uuid,

    Date,

    Time,

    /// Timestamp without time zone
    Timestamp,

    /// Timestamp with time zone
    Timestamptz,

    Interval,

    Json,

    Jsonb,

    Bytea,

    /// IPv4 or IPv6 host address
    Inet,

    /// One-dimensional array of the element type
    Array(Box<ColumnType>),

    /// User-defined or unrecognized type
    Other(String),
}

impl ColumnType {
    pub fn is_array(&self) -> bool {
        matches!(self, ColumnType::Array(_))
    }

    /// The element type of an array, or the type itself.
    pub fn element(&self) -> &ColumnType {
        match self {
            ColumnType::Array(inner) => inner.element(),
            ty => ty,
        }
    }

    fn from_scalar(name: &str) -> ColumnType {
        match name {
            "int2" | "smallint" | "smallserial" | "serial2" => ColumnType::Int2,
            "int4" | "int" | "integer" | "serial" | "serial4" => ColumnType::Int4,
            "int8" | "bigint" | "bigserial" | "serial8" => ColumnType::Int8,
            "numeric" | "decimal" | "money" => ColumnType::Numeric,
            "float4" | "real" => ColumnType::Float4,
            "float8" | "double precision" => ColumnType::Float8,
            "bool" | "boolean" => ColumnType::Bool,
            "text" | "citext" | "name" => ColumnType::Text,
            "varchar" | "character varying" => ColumnType::Varchar,
            "char" | "bpchar" | "character" => ColumnType::Char,
            "uuid" => ColumnType::Uuid,
            "date" => ColumnType::Date,
            "time" | "timetz" => ColumnType::Time,
            "timestamp" => ColumnType::Timestamp,
            "timestamptz" => ColumnType::Timestamptz,
            "interval" => ColumnType::Interval,
            "json" => ColumnType::Json,
            "jsonb" => ColumnType::Jsonb,
            "bytea" => ColumnType::Bytea,
            "inet" | "cidr" => ColumnType::Inet,
            other => ColumnType::Other(other.to_string()),
        }
    }
}

impl FromStr for ColumnType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<ColumnType, Self::Err> {
        let name = s.trim().to_ascii_lowercase();

        if let Some(element) = name.strip_suffix("[]") {
            return Ok(ColumnType::Array(Box::new(element.parse()?)));
        }

        if let Some(element) = name.strip_prefix('_') {
            return Ok(ColumnType::Array(Box::new(element.parse()?)));
        }

        Ok(ColumnType::from_scalar(&name))
    }
}

impl From<&str> for ColumnType {
    fn from(value: &str) -> ColumnType {
        match value.parse() {
            Ok(ty) => ty,
            Err(never) => match never {},
        }
    }
}

impl TryFrom<String> for ColumnType {
    type Error = std::convert::Infallible;

    fn try_from(value: String) -> Result<ColumnType, Self::Error> {
        value.parse()
    }
}

impl From<ColumnType> for String {
    fn from(value: ColumnType) -> String {
        value.to_string()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int2 => "int2",
            ColumnType::Int4 => "int4",
            ColumnType::Int8 => "int8",
            ColumnType::Numeric => "numeric",
            ColumnType::Float4 => "float4",
            ColumnType::Float8 => "float8",
            ColumnType::Bool => "bool",
            ColumnType::Text => "text",
            ColumnType::Varchar => "varchar",
            ColumnType::Char => "char",
            ColumnType::Uuid => "uuid",
            ColumnType::Date => "date",
            ColumnType::Time => "time",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Timestamptz => "timestamptz",
            ColumnType::Interval => "interval",
            ColumnType::Json => "json",
            ColumnType::Jsonb => "jsonb",
            ColumnType::Bytea => "bytea",
            ColumnType::Inet => "inet",
            ColumnType::Array(inner) => return write!(f, "{inner}[]"),
            ColumnType::Other(name) => name,
        };

        f.write_str(name)
    }
}
