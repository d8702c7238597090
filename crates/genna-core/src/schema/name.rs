//! Mapping from raw database identifiers to generated Go identifiers.
//!
//! Every function here is total: any input string, including one with no
//! usable characters, produces a valid identifier.

use super::PUBLIC_SCHEMA;
use std_util::str;

/// Identifier used when a raw name has no valid characters.
pub const FALLBACK_IDENT: &str = "Field";

/// Alias used when a table name yields no initials.
pub const FALLBACK_ALIAS: &str = "t";

/// Words rendered fully upper-case in exported identifiers.
const INITIALISMS: &[&str] = &[
    "acl", "api", "ascii", "cpu", "css", "dns", "eof", "guid", "html", "http", "https", "id",
    "ip", "json", "lhs", "qps", "ram", "rhs", "rpc", "sla", "smtp", "sql", "ssh", "tcp", "tls",
    "ttl", "udp", "ui", "uid", "uri", "url", "utf8", "uuid", "vm", "xml", "xmpp", "xsrf", "xss",
];

/// A database identifier split into lower-case words.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let snake = str::snake_case(src);
        let parts = snake
            .split('_')
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect();
        Self { parts }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }

    /// Upper camel case with Go initialisms: `user_id` becomes `UserID`.
    pub fn exported(&self) -> String {
        self.parts.iter().map(|part| export_word(part)).collect()
    }

    /// The same name with its last word singularized.
    pub fn singular(&self) -> Name {
        self.map_last(str::singularize)
    }

    /// The same name with its last word pluralized.
    pub fn plural(&self) -> Name {
        self.map_last(str::pluralize)
    }

    /// Drops a trailing `id` word, unless it is the only word.
    pub fn without_id_suffix(&self) -> Name {
        match self.parts.split_last() {
            Some((last, rest)) if last == "id" && !rest.is_empty() => Name {
                parts: rest.to_vec(),
            },
            _ => self.clone(),
        }
    }

    fn map_last(&self, f: impl Fn(&str) -> String) -> Name {
        let mut parts = self.parts.clone();
        if let Some(last) = parts.last_mut() {
            *last = f(last);
        }
        Name { parts }
    }
}

fn export_word(word: &str) -> String {
    if INITIALISMS.contains(&word) {
        return word.to_ascii_uppercase();
    }

    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts a column or table identifier into an exported Go identifier.
///
/// With `preserve_case` the original spelling is kept apart from stripping
/// characters that are not valid in an identifier and upper-casing the
/// first letter.
pub fn field_name(raw: &str, preserve_case: bool) -> String {
    let ident = if preserve_case {
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        export_word(cleaned.trim_start_matches('_'))
    } else {
        Name::new(raw).exported()
    };

    finish_ident(ident)
}

fn finish_ident(ident: String) -> String {
    match ident.chars().next() {
        None => FALLBACK_IDENT.to_string(),
        Some(first) if first.is_ascii_digit() => format!("{FALLBACK_IDENT}{ident}"),
        Some(_) => ident,
    }
}

pub fn pluralize(word: &str) -> String {
    Name::new(word).plural().snake_case()
}

pub fn singularize(word: &str) -> String {
    Name::new(word).singular().snake_case()
}

/// Singular type name of a table without any schema prefix: `user_roles`
/// becomes `UserRole`.
pub fn type_name(table: &str) -> String {
    finish_ident(Name::new(table).singular().exported())
}

/// Plural type name of a table, used for has-many fields.
pub fn plural_type_name(table: &str) -> String {
    finish_ident(Name::new(table).singular().plural().exported())
}

/// Name of the generated struct for a table. Tables outside the public
/// schema are prefixed with the schema name so that equally named tables in
/// different schemas do not clash: `geo.locations` becomes `GeoLocation`.
pub fn model_name(schema: &str, table: &str) -> String {
    let name = type_name(table);

    if schema == PUBLIC_SCHEMA || schema.is_empty() {
        name
    } else {
        finish_ident(format!("{}{}", Name::new(schema).exported(), name))
    }
}

/// Short alias of a table: the initials of its words, `user_roles` becomes
/// `ur`. Never contains `_`.
pub fn alias(table: &str) -> String {
    let initials: String = Name::new(table)
        .parts
        .iter()
        .filter_map(|part| part.chars().next())
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    match initials.chars().next() {
        None => FALLBACK_ALIAS.to_string(),
        Some(first) if first.is_ascii_digit() => format!("{FALLBACK_ALIAS}{initials}"),
        Some(_) => initials,
    }
}

/// Alias of a table when it is joined to itself. Always differs from every
/// primary alias since those never contain `_`.
pub fn join_alias(table: &str) -> String {
    format!("j_{}", alias(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exported_field_names() {
        assert_eq!(field_name("userId", false), "UserID");
        assert_eq!(field_name("created_at", false), "CreatedAt");
        assert_eq!(field_name("avatar_url", false), "AvatarURL");
        assert_eq!(field_name("HTTPStatus", false), "HTTPStatus");
        assert_eq!(field_name("order-total", false), "OrderTotal");
    }

    #[test]
    fn preserved_field_names() {
        assert_eq!(field_name("user_id", true), "User_id");
        assert_eq!(field_name("créé", true), "Cr");
        assert_eq!(field_name("_hidden", true), "Hidden");
    }

    #[test]
    fn field_names_are_total() {
        assert_eq!(field_name("", false), FALLBACK_IDENT);
        assert_eq!(field_name("$$$", false), FALLBACK_IDENT);
        assert_eq!(field_name("$$$", true), FALLBACK_IDENT);
        assert_eq!(field_name("2fa", false), "Field2fa");
    }

    #[test]
    fn model_names() {
        assert_eq!(model_name("public", "users"), "User");
        assert_eq!(model_name("geo", "locations"), "GeoLocation");
        assert_eq!(model_name("public", "user_roles"), "UserRole");
        assert_eq!(model_name("2024", "users"), "Field2024User");
        assert_eq!(plural_type_name("employees"), "Employees");
        assert_eq!(plural_type_name("company"), "Companies");
    }

    #[test]
    fn inflection_touches_last_word_only() {
        assert_eq!(singularize("news_categories"), "news_category");
        assert_eq!(pluralize("person_address"), "person_addresses");
    }

    #[test]
    fn aliases() {
        assert_eq!(alias("users"), "u");
        assert_eq!(alias("user_roles"), "ur");
        assert_eq!(alias("2fa_codes"), "t2c");
        assert_eq!(alias("___"), FALLBACK_ALIAS);
        assert_eq!(join_alias("employees"), "j_e");
        assert_ne!(alias("employees"), join_alias("employees"));
    }

    #[test]
    fn id_suffix() {
        assert_eq!(
            Name::new("managerId").without_id_suffix().exported(),
            "Manager"
        );
        assert_eq!(Name::new("id").without_id_suffix().exported(), "ID");
    }
}
