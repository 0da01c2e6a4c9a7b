use inflector::Inflector;
use openapiv3::{MediaType, ParameterSchemaOrContent, ReferenceOr, Schema, StatusCode};

use super::components::Components;
use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Trace,
    Patch,
}

#[non_exhaustive]
#[derive(Clone)]
pub struct OperationDetails {
    pub path: String,
    pub http_method: HttpMethod,
    pub operation_id: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    pub response: Option<ReferenceOr<Schema>>,
}

impl std::fmt::Debug for OperationDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationDetails")
            .field("path", &self.path)
            .field("http_method", &self.http_method)
            .field("operation_id", &self.operation_id)
            .finish_non_exhaustive()
    }
}

impl OperationDetails {
    pub fn new(
        path: String,
        http_method: HttpMethod,
        operation: &openapiv3::Operation,
        components: &Components<'_>,
        inherited_parameters: &[ReferenceOr<openapiv3::Parameter>],
    ) -> Result<Self, Error> {
        let request_body = match &operation.request_body {
            None => None,
            Some(ReferenceOr::Reference { reference }) => {
                RequestBody::from_openapi(components.request_body(reference)?, reference_name(reference))
            }
            Some(ReferenceOr::Item(request_body)) => RequestBody::from_openapi(request_body, None),
        };

        let mut response = None;
        for (status_code, candidate) in &operation.responses.responses {
            if !is_ok(status_code) {
                continue;
            }

            let candidate = match candidate {
                ReferenceOr::Reference { reference } => components.response(reference)?,
                ReferenceOr::Item(response) => response,
            };

            if let Some(schema) = json_schema(&candidate.content) {
                response = Some(schema.clone());
                break;
            }
        }

        let mut parameters = Vec::new();
        for parameter in &operation.parameters {
            let parameter = resolve_parameter(parameter, components)?;
            register_parameter(parameter, &mut parameters);
        }

        // We need to handle the parameters that were declared on the parent
        // of this operation.  These can be overriden by the parameters on the
        // operation so we need to skip any we've already seen.
        for parameter in inherited_parameters {
            let parameter = resolve_parameter(parameter, components)?;
            let data = parameter.parameter_data_ref();
            if parameters.iter().any(|existing| existing.name == data.name) {
                continue;
            }
            register_parameter(parameter, &mut parameters);
        }

        Ok(OperationDetails {
            path,
            http_method,
            operation_id: operation.operation_id.clone(),
            description: operation.summary.clone().or_else(|| operation.description.clone()),
            parameters,
            request_body,
            response,
        })
    }

    pub fn is_query(&self) -> bool {
        self.http_method == HttpMethod::Get
    }

    /// The name this operation gets as a field of `Query` or `Mutation`.
    ///
    /// We use the operationId where there is one, otherwise the name is derived from
    /// the path, with mutations prefixed by their HTTP method.
    pub fn field_name(&self) -> String {
        if let Some(operation_id) = &self.operation_id {
            return crate::names::field_name(operation_id);
        }

        let mut words = Vec::new();
        if !self.is_query() {
            words.push(self.http_method.to_string().to_lowercase());
        }

        for segment in self.path.split('/').filter(|segment| !segment.is_empty()) {
            match segment.strip_prefix('{').and_then(|segment| segment.strip_suffix('}')) {
                Some(parameter) => {
                    words.push("by".to_string());
                    words.push(parameter.to_pascal_case());
                }
                None => words.push(segment.to_string()),
            }
        }

        if words.is_empty() {
            words.push("root".to_string());
        }

        crate::names::field_name(&words.join(" "))
    }
}

fn resolve_parameter<'a>(
    parameter: &'a ReferenceOr<openapiv3::Parameter>,
    components: &Components<'a>,
) -> Result<&'a openapiv3::Parameter, Error> {
    match parameter {
        ReferenceOr::Reference { reference } => components.parameter(reference),
        ReferenceOr::Item(parameter) => Ok(parameter),
    }
}

fn register_parameter(parameter: &openapiv3::Parameter, parameters: &mut Vec<Parameter>) {
    let location = match parameter {
        openapiv3::Parameter::Path { .. } => ParameterLocation::Path,
        openapiv3::Parameter::Query { .. } => ParameterLocation::Query,
        openapiv3::Parameter::Header { .. } => ParameterLocation::Header,
        openapiv3::Parameter::Cookie { parameter_data, .. } => {
            tracing::debug!("Skipping cookie parameter {}", parameter_data.name);
            return;
        }
    };

    let data = parameter.parameter_data_ref();
    parameters.push(Parameter {
        name: data.name.clone(),
        location,
        schema: match &data.format {
            ParameterSchemaOrContent::Schema(schema) => Some(schema.clone()),
            ParameterSchemaOrContent::Content(content) => json_schema(content).cloned(),
        },
        // Path parameters are always required, whatever the document says.
        required: data.required || location == ParameterLocation::Path,
        description: data.description.clone(),
    });
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
}

#[derive(Clone, Debug)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub schema: Option<ReferenceOr<Schema>>,
    pub required: bool,
    pub description: Option<String>,
}

#[derive(Clone, Debug)]
pub struct RequestBody {
    /// The name of the requestBodies component this body came from, if any
    pub component_name: Option<String>,
    pub schema: ReferenceOr<Schema>,
    pub required: bool,
}

impl RequestBody {
    fn from_openapi(request_body: &openapiv3::RequestBody, component_name: Option<&str>) -> Option<RequestBody> {
        let Some(schema) = json_schema(&request_body.content).or_else(|| {
            request_body
                .content
                .get("application/x-www-form-urlencoded")
                .and_then(|media_type| media_type.schema.as_ref())
        }) else {
            tracing::warn!(
                "Skipping a request body with unsupported content types: {:?}",
                request_body.content.keys().collect::<Vec<_>>()
            );
            return None;
        };

        Some(RequestBody {
            component_name: component_name.map(str::to_string),
            schema: schema.clone(),
            required: request_body.required,
        })
    }
}

fn reference_name(reference: &str) -> Option<&str> {
    super::Ref::new(reference).component_name("requestBodies")
}

/// Picks the schema of the first JSON media type in `content`
fn json_schema(content: &indexmap::IndexMap<String, MediaType>) -> Option<&ReferenceOr<Schema>> {
    content
        .iter()
        .filter(|(content_type, _)| is_json(content_type))
        .find_map(|(_, media_type)| media_type.schema.as_ref())
}

fn is_json(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence == "application/json" || essence.ends_with("+json")
}

fn is_ok(status: &StatusCode) -> bool {
    match status {
        StatusCode::Code(code) => (200..300).contains(code),
        StatusCode::Range(range) => *range == 2,
    }
}
