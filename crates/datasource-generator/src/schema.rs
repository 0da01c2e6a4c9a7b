use async_graphql::dynamic::Schema;
use cynic_parser::TypeSystemDocument;

use crate::error::{BoxError, Error};

/// Turns an OpenAPI document into a GraphQL schema.
#[async_trait::async_trait]
pub trait SchemaGenerator: Send + Sync {
    async fn generate_schema(&self, document: &serde_json::Value) -> Result<Schema, BoxError>;
}

/// Generates schemas with `parser-openapi`
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenApiSchemaGenerator;

#[async_trait::async_trait]
impl SchemaGenerator for OpenApiSchemaGenerator {
    async fn generate_schema(&self, document: &serde_json::Value) -> Result<Schema, BoxError> {
        Ok(parser_openapi::build_schema(document)?)
    }
}

/// A generated schema, together with its printed SDL and the parsed form of that SDL.
///
/// All three describe the same schema.
pub struct SchemaAst {
    schema: Schema,
    sdl: String,
    document: TypeSystemDocument,
}

impl SchemaAst {
    pub fn from_schema(schema: Schema) -> Result<Self, Error> {
        let sdl = schema.sdl();
        let document = cynic_parser::parse_type_system_document(&sdl)
            .map_err(|error| Error::SchemaParse(error.to_string()))?;

        Ok(SchemaAst { schema, sdl, document })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn sdl(&self) -> &str {
        &self.sdl
    }

    pub fn document(&self) -> &TypeSystemDocument {
        &self.document
    }
}

impl std::fmt::Debug for SchemaAst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaAst").field("sdl", &self.sdl).finish_non_exhaustive()
    }
}
