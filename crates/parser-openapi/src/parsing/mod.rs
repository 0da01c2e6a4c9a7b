use openapiv3::OpenAPI;
use serde_json::Value;

pub(crate) use self::{
    components::Components,
    operations::{HttpMethod, OperationDetails, Parameter, RequestBody},
};
use crate::Error;

mod components;
mod operations;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn guess(data: &str) -> Self {
        if data.trim_start().starts_with('{') {
            return Format::Json;
        }

        // YAML is a superset of JSON so lets just fallback to parsing as YAML.
        Format::Yaml
    }
}

/// Parses the text of an OpenAPI document into a JSON value
pub fn parse_document(data: &str, format: Format) -> Result<Value, Error> {
    match format {
        Format::Json => serde_json::from_str(data).map_err(|error| Error::JsonParsingError(error.to_string())),
        Format::Yaml => serde_yaml::from_str(data).map_err(|error| Error::YamlParsingError(error.to_string())),
    }
}

pub(crate) fn parse(document: &Value) -> Result<OpenAPI, Error> {
    if let Some(version) = document.get("swagger") {
        return Err(Error::UnsupportedVersion(version_string(version)));
    }

    let version = document.get("openapi").ok_or(Error::MissingVersion)?;
    let version = version_string(version);
    if !version.starts_with("3.") {
        return Err(Error::UnsupportedVersion(version));
    }

    serde_json::from_value(document.clone()).map_err(|error| Error::JsonParsingError(error.to_string()))
}

fn version_string(version: &Value) -> String {
    match version {
        Value::String(version) => version.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn extract_operations(spec: &OpenAPI) -> Result<Vec<OperationDetails>, Error> {
    let components = Components::new(spec.components.as_ref());
    let mut operations = Vec::new();

    for (path, path_item) in &spec.paths.paths {
        // Paths pointing at other documents aren't something we can follow.
        let Some(path_item) = path_item.as_item() else {
            return Err(Error::TopLevelPathWasReference(path.clone()));
        };

        for (method, operation) in path_item.iter() {
            tracing::trace!("Parsing operation: {:?}", operation.operation_id);

            let method = method
                .parse::<HttpMethod>()
                .map_err(|_| Error::UnknownHttpMethod(method.to_string()))?;

            operations.push(OperationDetails::new(
                path.clone(),
                method,
                operation,
                &components,
                &path_item.parameters,
            )?);
        }
    }

    Ok(operations)
}

/// A `$ref` pointing somewhere inside the current document
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Ref<'a>(&'a str);

impl<'a> Ref<'a> {
    pub fn new(reference: &'a str) -> Self {
        Ref(reference)
    }

    /// The name of the component this reference points at, if it lives in `section`
    /// (e.g. `schemas` for `#/components/schemas/Pet`)
    pub fn component_name(self, section: &str) -> Option<&'a str> {
        self.0
            .strip_prefix("#/components/")?
            .strip_prefix(section)?
            .strip_prefix('/')
    }

    pub fn to_unresolved_error(self) -> Error {
        Error::UnresolvedReference(self.0.to_string())
    }
}
