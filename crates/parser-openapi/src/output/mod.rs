//! Turns the extracted operations into an `async_graphql` dynamic schema.

use std::{borrow::Borrow, collections::HashSet};

use async_graphql::{
    dynamic::{Field, FieldFuture, InputObject, InputValue, Object, ResolverContext, Scalar, Schema, TypeRef},
    Value,
};
use indexmap::IndexMap;
use openapiv3::{OpenAPI, ReferenceOr};

use crate::{
    names,
    parsing::{Components, OperationDetails},
    Error,
};

mod input_object;
mod output_type;
mod type_names;

use self::type_names::TypeNames;

const QUERY_TYPE: &str = "Query";
const MUTATION_TYPE: &str = "Mutation";
const JSON_SCALAR: &str = "JSON";
const PLACEHOLDER_FIELD: &str = "placeholder";

pub(crate) fn output(spec: &OpenAPI, operations: &[OperationDetails]) -> Result<Schema, Error> {
    let mut ctx = OutputContext::new(Components::new(spec.components.as_ref()));

    let mut query = Object::new(QUERY_TYPE);
    let mut mutation = Object::new(MUTATION_TYPE);
    let mut query_field_count = 0;
    let mut mutation_field_count = 0;

    for operation in operations {
        let field = ctx.operation_field(operation)?;

        if operation.is_query() {
            query = query.field(field);
            query_field_count += 1;
        } else {
            mutation = mutation.field(field);
            mutation_field_count += 1;
        }
    }

    if query_field_count == 0 {
        // GraphQL requires a Query type with at least one field.
        tracing::debug!("The document has no GET operations, adding a placeholder Query field");
        query = query.field(
            Field::new(PLACEHOLDER_FIELD, TypeRef::named(TypeRef::STRING), unresolved)
                .description("Placeholder field, the API has no read operations"),
        );
    }

    let has_mutation = mutation_field_count > 0;
    let mut builder = Schema::build(QUERY_TYPE, has_mutation.then_some(MUTATION_TYPE), None).register(query);
    if has_mutation {
        builder = builder.register(mutation);
    }

    for object in ctx.objects.into_values().flatten() {
        builder = builder.register(object);
    }

    for input_object in ctx.input_objects.into_values().flatten() {
        builder = builder.register(input_object);
    }

    if ctx.uses_json {
        builder = builder.register(Scalar::new(JSON_SCALAR).description("Arbitrary JSON value"));
    }

    builder.finish().map_err(|error| Error::InvalidSchema(error.to_string()))
}

/// Accumulates the named types we need while walking the operations.
///
/// Types are keyed by their GraphQL name, which `type_names` keeps unique.  A `None` entry
/// means the type is currently being built.
pub(crate) struct OutputContext<'a> {
    components: Components<'a>,
    type_names: TypeNames,
    objects: IndexMap<String, Option<Object>>,
    input_objects: IndexMap<String, Option<InputObject>>,
    uses_json: bool,
}

impl<'a> OutputContext<'a> {
    fn new(components: Components<'a>) -> Self {
        OutputContext {
            components,
            type_names: TypeNames::new(components.schema_names()),
            objects: IndexMap::new(),
            input_objects: IndexMap::new(),
            uses_json: false,
        }
    }

    fn operation_field(&mut self, operation: &OperationDetails) -> Result<Field, Error> {
        let name = operation.field_name();
        let type_name = names::type_name(&name);

        tracing::trace!("Building field {name} for {} {}", operation.http_method, operation.path);

        let ty = match &operation.response {
            Some(schema) => self.output_type(schema, &type_name)?,
            None => TypeRef::named(TypeRef::STRING),
        };

        let mut field = Field::new(name.as_str(), ty, unresolved);
        if let Some(description) = &operation.description {
            field = field.description(escape_description(description));
        }

        let mut argument_names = HashSet::new();

        for parameter in &operation.parameters {
            tracing::trace!("Adding {} parameter {} to {name}", parameter.location, parameter.name);

            let hint = format!("{type_name}{}", names::type_name(&parameter.name));
            let ty = match &parameter.schema {
                Some(schema) => self.input_type(schema, &hint)?,
                None => TypeRef::named(TypeRef::STRING),
            };

            // Parameters from different locations can sanitize to the same name, e.g. `X-Id` and `x_id`.
            let mut argument_name = names::field_name(&parameter.name);
            if argument_names.contains(&argument_name) {
                argument_name = names::field_name(&format!("{} {}", parameter.name, parameter.location));
            }
            claim_argument_name(&mut argument_names, &name, &argument_name)?;

            let mut argument = InputValue::new(argument_name, required(ty, parameter.required));
            if let Some(description) = &parameter.description {
                argument = argument.description(escape_description(description));
            }

            field = field.argument(argument);
        }

        if let Some(body) = &operation.request_body {
            let base_name = match &body.schema {
                ReferenceOr::Reference { reference } => names::type_name(self.components.schema(reference)?.0),
                ReferenceOr::Item(_) => type_name.clone(),
            };

            let ty = self.input_type(&body.schema, &base_name)?;
            let argument_name = names::field_name(&format!("{} input", body.component_name.as_deref().unwrap_or(&base_name)));
            claim_argument_name(&mut argument_names, &name, &argument_name)?;

            field = field.argument(InputValue::new(argument_name, required(ty, body.required)));
        }

        Ok(field)
    }

    fn json(&mut self) -> TypeRef {
        self.uses_json = true;
        TypeRef::named(JSON_SCALAR)
    }

    /// Resolves a possible reference, returning the component name if there was one.
    fn resolve<'s, S>(&self, schema: &'s ReferenceOr<S>) -> Result<(Option<&'a str>, &'s openapiv3::Schema), Error>
    where
        'a: 's,
        S: Borrow<openapiv3::Schema>,
    {
        match schema {
            ReferenceOr::Reference { reference } => {
                let (name, schema) = self.components.schema(reference)?;
                Ok((Some(name), schema))
            }
            ReferenceOr::Item(schema) => Ok((None, <S as Borrow<openapiv3::Schema>>::borrow(schema))),
        }
    }

    fn is_nullable<S>(&self, schema: &ReferenceOr<S>) -> Result<bool, Error>
    where
        S: Borrow<openapiv3::Schema>,
    {
        Ok(self.resolve(schema)?.1.schema_data.nullable)
    }
}

fn claim_argument_name(taken: &mut HashSet<String>, field_name: &str, argument_name: &str) -> Result<(), Error> {
    if !taken.insert(argument_name.to_string()) {
        return Err(Error::DuplicateArgument {
            field: field_name.to_string(),
            argument: argument_name.to_string(),
        });
    }

    Ok(())
}

fn required(ty: TypeRef, required: bool) -> TypeRef {
    match ty {
        TypeRef::NonNull(_) => ty,
        ty if required => TypeRef::NonNull(Box::new(ty)),
        ty => ty,
    }
}

/// Descriptions are printed as block strings, which end at the first unescaped `"""`.
fn escape_description(description: &str) -> String {
    description.replace("\"\"\"", "\\\"\"\"")
}

/// The schema is only ever printed, never executed, so fields don't need a real resolver.
fn unresolved(_: ResolverContext<'_>) -> FieldFuture<'_> {
    FieldFuture::new(async { Ok::<_, async_graphql::Error>(None::<Value>) })
}
