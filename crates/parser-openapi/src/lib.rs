//! Builds a GraphQL schema out of an OpenAPI 3 document.
//!
//! `GET` operations become fields of `Query`, every other operation becomes a field of
//! `Mutation`. Parameters and request bodies turn into field arguments, JSON responses
//! into object types.

use async_graphql::dynamic::Schema;

mod names;
mod output;
mod parsing;

#[cfg(test)]
mod tests;

pub use parsing::{parse_document, Format};

/// Builds a schema from an already parsed OpenAPI document.
pub fn build_schema(document: &serde_json::Value) -> Result<Schema, Error> {
    let spec = parsing::parse(document)?;
    let operations = parsing::extract_operations(&spec)?;

    tracing::debug!("Extracted {} operations from the OpenAPI document", operations.len());

    output::output(&spec, &operations)
}

/// Parses `data` and builds a schema from it in one go.
pub fn parse_spec(data: &str, format: Format) -> Result<Schema, Error> {
    build_schema(&parse_document(data, format)?)
}

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("We don't support version {0} of OpenAPI currently")]
    UnsupportedVersion(String),
    #[error("The document doesn't declare which version of OpenAPI it uses")]
    MissingVersion,
    #[error("Could not parse the OpenAPI specification: {0}")]
    JsonParsingError(String),
    #[error("Could not parse the OpenAPI specification: {0}")]
    YamlParsingError(String),
    #[error("The schema component {0} was a reference, which we don't currently support.")]
    TopLevelSchemaWasReference(String),
    #[error("The path component {0} was a reference, which we don't currently support.")]
    TopLevelPathWasReference(String),
    #[error("Couldn't parse HTTP method: {0}")]
    UnknownHttpMethod(String),
    #[error("Encountered an array without items, which we don't currently support")]
    ArrayWithoutItems,
    #[error("Found a reference {0} which didn't seem to exist in the spec")]
    UnresolvedReference(String),
    #[error("The operation {field} ends up with more than one argument named {argument}")]
    DuplicateArgument { field: String, argument: String },
    #[error("The generated GraphQL schema is invalid: {0}")]
    InvalidSchema(String),
}
