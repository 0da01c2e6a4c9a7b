use indexmap::IndexMap;
use openapiv3::{Parameter, ReferenceOr, RequestBody, Response, Schema};

use super::Ref;
use crate::Error;

/// Lookups into the `components` section of a document
#[derive(Clone, Copy)]
pub(crate) struct Components<'a> {
    components: Option<&'a openapiv3::Components>,
}

impl<'a> Components<'a> {
    pub fn new(components: Option<&'a openapiv3::Components>) -> Self {
        Components { components }
    }

    /// Resolves a schema reference, returning the component name along with the schema
    pub fn schema(self, reference: &str) -> Result<(&'a str, &'a Schema), Error> {
        lookup(self.components.map(|c| &c.schemas), "schemas", reference)
    }

    /// The names of every schema component, in document order
    pub fn schema_names(self) -> impl Iterator<Item = &'a str> {
        self.components
            .into_iter()
            .flat_map(|components| components.schemas.keys())
            .map(String::as_str)
    }

    pub fn parameter(self, reference: &str) -> Result<&'a Parameter, Error> {
        lookup(self.components.map(|c| &c.parameters), "parameters", reference).map(|(_, parameter)| parameter)
    }

    pub fn request_body(self, reference: &str) -> Result<&'a RequestBody, Error> {
        lookup(self.components.map(|c| &c.request_bodies), "requestBodies", reference).map(|(_, body)| body)
    }

    pub fn response(self, reference: &str) -> Result<&'a Response, Error> {
        lookup(self.components.map(|c| &c.responses), "responses", reference).map(|(_, response)| response)
    }
}

fn lookup<'a, T>(
    section: Option<&'a IndexMap<String, ReferenceOr<T>>>,
    section_name: &str,
    reference: &str,
) -> Result<(&'a str, &'a T), Error> {
    let reference = Ref::new(reference);
    let name = reference
        .component_name(section_name)
        .ok_or_else(|| reference.to_unresolved_error())?;

    let (name, item) = section
        .and_then(|section| section.get_key_value(name))
        .ok_or_else(|| reference.to_unresolved_error())?;

    match item {
        ReferenceOr::Item(item) => Ok((name.as_str(), item)),
        // A component that only points at another component is rare enough that we don't
        // follow the chain.
        ReferenceOr::Reference { .. } => Err(Error::TopLevelSchemaWasReference(name.clone())),
    }
}
