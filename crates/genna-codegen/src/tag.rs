use std::fmt;

/// Key of the struct tags read by go-pg.
pub const TAG_KEY: &str = "pg";

/// A struct tag under construction.
///
/// Entries are kept in insertion order and turned into text only when the
/// template payload is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    key: &'static str,
    entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    /// A bare value, such as a column or table name
    Value(String),

    /// A flag such as `pk`
    Flag(&'static str),

    /// A `name:value` option
    Option(&'static str, String),
}

impl Tag {
    pub fn new() -> Tag {
        Tag {
            key: TAG_KEY,
            entries: vec![],
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Tag {
        self.entries.push(Entry::Value(value.into()));
        self
    }

    pub fn flag(mut self, flag: &'static str) -> Tag {
        self.entries.push(Entry::Flag(flag));
        self
    }

    pub fn flag_if(self, condition: bool, flag: &'static str) -> Tag {
        if condition {
            self.flag(flag)
        } else {
            self
        }
    }

    pub fn option(mut self, name: &'static str, value: impl Into<String>) -> Tag {
        self.entries.push(Entry::Option(name, value.into()));
        self
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, Entry::Flag(f) if *f == flag))
    }
}

impl Default for Tag {
    fn default() -> Self {
        Tag::new()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:\"", self.key)?;

        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }

            match entry {
                Entry::Value(value) => f.write_str(value)?,
                Entry::Flag(flag) => f.write_str(flag)?,
                Entry::Option(name, value) => write!(f, "{name}:{value}")?,
            }
        }

        f.write_str("\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_insertion_order() {
        let tag = Tag::new()
            .value("userId")
            .flag("pk")
            .option("alias", "u")
            .flag_if(false, "use_zero");

        assert_eq!(tag.to_string(), r#"pg:"userId,pk,alias:u""#);
        assert!(tag.has_flag("pk"));
        assert!(!tag.has_flag("use_zero"));
    }

    #[test]
    fn leading_empty_value() {
        let tag = Tag::new().value("").flag("discard_unknown_columns");
        assert_eq!(tag.to_string(), r#"pg:",discard_unknown_columns""#);
    }
}
