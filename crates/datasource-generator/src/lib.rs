//! Generates the engine configuration for a GraphQL data source described by an OpenAPI document.
//!
//! The OpenAPI document is turned into a GraphQL schema once per generator, and every call to
//! [`DataSourceGenerator::generate_data_source`] walks that schema to build a fresh configuration
//! with one data source and a resolver for each root type.

mod accumulator;
mod arguments;
pub mod config;
mod error;
mod schema;
pub mod settings;
mod traversal;

use cynic_parser::TypeSystemDocument;
pub use parser_openapi::Format;

pub use self::{
    accumulator::{ConfigurationAccumulator, RootType},
    arguments::locate_or_create_arguments_slot,
    config::{DataSourceKind, EngineConfiguration, Headers},
    error::{BoxError, Error},
    schema::{OpenApiSchemaGenerator, SchemaAst, SchemaGenerator},
    settings::{DataSourceSettings, GeneratorSettings},
    traversal::build_resolvers,
};

pub struct DataSourceGenerator<G = OpenApiSchemaGenerator> {
    document: serde_json::Value,
    schema_generator: G,
    schema_ast: Option<SchemaAst>,
}

impl DataSourceGenerator {
    /// A generator for an OpenAPI document in JSON
    pub fn new(text: &str) -> Result<Self, Error> {
        Self::from_text(text, Format::Json)
    }

    pub fn from_text(text: &str, format: Format) -> Result<Self, Error> {
        let document = parser_openapi::parse_document(text, format).map_err(Error::InvalidDocument)?;

        Ok(Self::with_schema_generator(document, OpenApiSchemaGenerator))
    }
}

impl<G: SchemaGenerator> DataSourceGenerator<G> {
    pub fn with_schema_generator(document: serde_json::Value, schema_generator: G) -> Self {
        DataSourceGenerator {
            document,
            schema_generator,
            schema_ast: None,
        }
    }

    pub fn document(&self) -> &serde_json::Value {
        &self.document
    }

    /// The schema generated from the OpenAPI document.  Only the first call generates it.
    pub async fn ensure_schema_ast(&mut self) -> Result<&SchemaAst, Error> {
        let schema_ast = match self.schema_ast.take() {
            Some(schema_ast) => schema_ast,
            None => {
                tracing::debug!("Generating the GraphQL schema");

                let schema = self
                    .schema_generator
                    .generate_schema(&self.document)
                    .await
                    .map_err(Error::SchemaGeneration)?;

                let schema_ast = SchemaAst::from_schema(schema)?;
                tracing::trace!("Generated schema:\n{}", schema_ast.sdl());

                schema_ast
            }
        };

        Ok(self.schema_ast.insert(schema_ast))
    }

    /// Builds a new engine configuration for a data source called `name` at `url`.
    pub async fn generate_data_source(
        &mut self,
        name: &str,
        url: &str,
        extra_headers: Option<&Headers>,
    ) -> Result<EngineConfiguration, Error> {
        let schema_ast = self.ensure_schema_ast().await?;

        Ok(build_engine_configuration(
            schema_ast.document(),
            name,
            url,
            extra_headers,
        ))
    }

    pub async fn generate_from_settings(
        &mut self,
        settings: &DataSourceSettings,
    ) -> Result<EngineConfiguration, Error> {
        let headers = settings.headers();

        self.generate_data_source(&settings.name, &settings.url, headers.as_ref())
            .await
    }
}

/// Builds the engine configuration for the GraphQL schema in `document`.
pub fn build_engine_configuration(
    document: &TypeSystemDocument,
    name: &str,
    url: &str,
    extra_headers: Option<&Headers>,
) -> EngineConfiguration {
    let mut accumulator = ConfigurationAccumulator::default();

    let data_source = accumulator.create_data_source(
        name,
        DataSourceKind::GraphQL,
        url,
        extra_headers.into_iter().flatten().map(|(name, value)| (name.as_str(), value.as_str())),
    );

    build_resolvers(document, &mut accumulator, data_source, url);

    accumulator.finalize()
}
