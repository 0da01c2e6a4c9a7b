use inflector::Inflector;
use once_cell::sync::Lazy;
use regex::Regex;

static INVALID_CHARACTERS: Lazy<Regex> = Lazy::new(|| Regex::new("[^_0-9A-Za-z]").expect("a valid regex"));

/// Converts an OpenAPI name into a camelCased GraphQL field or argument name
pub fn field_name(name: &str) -> String {
    sanitize(&name.to_camel_case())
}

/// Converts an OpenAPI name into a PascalCased GraphQL type name
pub fn type_name(name: &str) -> String {
    sanitize(&name.to_pascal_case())
}

fn sanitize(name: &str) -> String {
    let name = INVALID_CHARACTERS.replace_all(name, "_");

    match name.chars().next() {
        None => "_".to_string(),
        Some(first) if first.is_ascii_digit() => format!("_{name}"),
        Some(_) => name.into_owned(),
    }
}
