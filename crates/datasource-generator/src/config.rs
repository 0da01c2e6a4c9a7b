//! The engine configuration this crate produces.
//!
//! Field names and enum spellings are the wire format consumed by the execution engine,
//! so they are spelled out explicitly rather than left to serde defaults.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const URL_ATTRIBUTE: &str = "url";
pub const HEADERS_ATTRIBUTE: &str = "headers";
pub const ARGUMENTS_ATTRIBUTE: &str = "arguments";

/// Header names to header values, in the order they were first provided
pub type Headers = IndexMap<String, String>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfiguration {
    pub data_sources: Vec<DataSource>,
    pub resolvers: Vec<Resolver>,
    pub mappings: Vec<Mapping>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSourceId(pub usize);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub kind: DataSourceKind,
    pub name: String,
    pub default_attributes: Vec<Attribute>,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString, strum::AsRefStr,
)]
pub enum DataSourceKind {
    #[serde(rename = "http_json")]
    #[strum(serialize = "http_json")]
    HttpJson,
    #[serde(rename = "fast_http_json")]
    #[strum(serialize = "fast_http_json")]
    FastHttpJson,
    #[serde(rename = "graphql")]
    #[strum(serialize = "graphql")]
    GraphQL,
    #[serde(rename = "static")]
    #[strum(serialize = "static")]
    Static,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resolver {
    pub type_name: String,
    pub data_source: DataSourceId,
    pub field_names: Vec<String>,
    pub attributes: Vec<Attribute>,
}

impl Resolver {
    /// A resolver for `type_name` that doesn't resolve any field yet
    pub fn new(type_name: impl Into<String>, data_source: DataSourceId, url: &str) -> Self {
        Resolver {
            type_name: type_name.into(),
            data_source,
            field_names: Vec::new(),
            attributes: vec![Attribute::url(url)],
        }
    }

    pub fn add_field(&mut self, field_name: &str) {
        self.field_names.push(field_name.to_string());
    }

    /// Appends a field config for `field_name` to the arguments attribute at `arguments_index`.
    ///
    /// Returns false without touching anything if that attribute doesn't hold arguments.
    pub fn add_field_arguments(
        &mut self,
        arguments_index: usize,
        field_name: &str,
        argument_names: impl IntoIterator<Item = String>,
    ) -> bool {
        let Some(arguments) = self
            .attributes
            .get_mut(arguments_index)
            .and_then(|attribute| attribute.value.as_arguments_mut())
        else {
            return false;
        };

        arguments.fields.push(FieldConfig {
            field_name: field_name.to_string(),
            arguments: argument_names
                .into_iter()
                .map(|name| Argument::new(name, ArgumentSource::FieldArgument))
                .collect(),
        });

        true
    }

    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.key == key)
    }

    pub fn arguments(&self) -> Option<&ArgumentsConfig> {
        match &self.attribute(ARGUMENTS_ATTRIBUTE)?.value {
            AttributeValue::Arguments(arguments) => Some(arguments),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: AttributeValue,
}

impl Attribute {
    pub fn url(url: &str) -> Self {
        Attribute {
            key: URL_ATTRIBUTE.to_string(),
            value: AttributeValue::String(url.to_string()),
        }
    }

    pub fn headers(headers: Headers) -> Self {
        Attribute {
            key: HEADERS_ATTRIBUTE.to_string(),
            value: AttributeValue::Headers(headers),
        }
    }

    pub fn arguments(arguments: ArgumentsConfig) -> Self {
        Attribute {
            key: ARGUMENTS_ATTRIBUTE.to_string(),
            value: AttributeValue::Arguments(arguments),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    String(String),
    Arguments(ArgumentsConfig),
    Headers(Headers),
}

impl AttributeValue {
    pub fn as_arguments_mut(&mut self) -> Option<&mut ArgumentsConfig> {
        match self {
            AttributeValue::Arguments(arguments) => Some(arguments),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgumentsConfig {
    pub fields: Vec<FieldConfig>,
}

impl ArgumentsConfig {
    pub fn field(&self, field_name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|field| field.field_name == field_name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub field_name: String,
    pub arguments: Vec<Argument>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub source: ArgumentSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<Vec<String>>,
}

impl Argument {
    pub fn new(name: impl Into<String>, source: ArgumentSource) -> Self {
        Argument {
            name: name.into(),
            source,
            source_path: None,
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ArgumentSource {
    ObjectField,
    FieldArgument,
}

/// Overrides how a field is read out of the upstream response.  Nothing produces these yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    pub type_name: String,
    pub field_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_default_mapping: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
}
