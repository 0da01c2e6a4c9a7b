use std::collections::{HashMap, HashSet};

use async_graphql::dynamic::TypeRef;

use super::{JSON_SCALAR, MUTATION_TYPE, QUERY_TYPE};
use crate::names;

/// Whether a named type is used for output or input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(super) enum Position {
    Output,
    Input,
}

/// Hands out GraphQL type names so that no two types end up sharing one.
///
/// Schema components get first pick of their own name.  Inline schemas are named after where
/// they appear, and step aside with a numeric suffix when that name belongs to a component or
/// is already in use.
pub(super) struct TypeNames {
    taken: HashSet<String>,
    component_names: HashSet<String>,
    components: HashMap<(String, Position), TypeRef>,
}

impl TypeNames {
    pub fn new<'a>(component_names: impl IntoIterator<Item = &'a str>) -> Self {
        let component_names = component_names
            .into_iter()
            .flat_map(|name| {
                let name = names::type_name(name);
                [format!("{name}Input"), name]
            })
            .collect();

        TypeNames {
            taken: [QUERY_TYPE, MUTATION_TYPE, JSON_SCALAR].map(str::to_string).into(),
            component_names,
            components: HashMap::new(),
        }
    }

    /// The type already assigned to a schema component, if it has been seen before
    pub fn component_type(&self, component: &str, position: Position) -> Option<TypeRef> {
        self.components.get(&(component.to_string(), position)).cloned()
    }

    pub fn set_component_type(&mut self, component: &str, position: Position, ty: TypeRef) {
        self.components.insert((component.to_string(), position), ty);
    }

    /// Claims a name for a schema component
    pub fn claim_for_component(&mut self, preferred: String) -> String {
        self.claim(preferred, false)
    }

    /// Claims a name for an inline schema
    pub fn claim_for_inline(&mut self, preferred: String) -> String {
        self.claim(preferred, true)
    }

    fn claim(&mut self, preferred: String, avoid_components: bool) -> String {
        let is_free = |names: &TypeNames, name: &str| {
            !names.taken.contains(name) && !(avoid_components && names.component_names.contains(name))
        };

        let mut name = preferred.clone();
        let mut suffix = 2;
        while !is_free(self, &name) {
            name = format!("{preferred}{suffix}");
            suffix += 1;
        }

        if name != preferred {
            tracing::debug!("The type name {preferred} is already used, naming this type {name}");
        }

        self.taken.insert(name.clone());
        name
    }
}
