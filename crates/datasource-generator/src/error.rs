pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not parse the OpenAPI document")]
    InvalidDocument(#[source] parser_openapi::Error),
    #[error("Could not generate a GraphQL schema from the OpenAPI document")]
    SchemaGeneration(#[source] BoxError),
    #[error("The generated GraphQL schema could not be parsed: {0}")]
    SchemaParse(String),
    #[error("Invalid generator settings")]
    InvalidSettings(#[from] toml::de::Error),
    #[error("Invalid data source url {url}: {message}")]
    InvalidUrl { url: String, message: String },
}
