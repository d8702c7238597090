use heck::ToSnakeCase;

pub fn snake_case(src: &str) -> String {
    src.to_snake_case()
}

/// Plural form of a single word. Multi-word input is inflected as a whole,
/// so callers that know the word boundaries should pass only the last word.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    pluralizer::pluralize(word, 2, false)
}

pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    pluralizer::pluralize(word, 1, false)
}
