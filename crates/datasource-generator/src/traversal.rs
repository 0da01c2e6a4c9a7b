//! Walks the printed schema and fills in a resolver for each root type it finds.
//!
//! The walk is structural: an object definition, then its fields, then each field's
//! arguments.  Whether a field belongs to a root is known from where the walk is, so
//! nodes never need to be compared with each other.

use cynic_parser::type_system as ast;

use crate::{
    accumulator::{ConfigurationAccumulator, PerRoot, RootType},
    arguments::{collect_argument_names, locate_or_create_arguments_slot},
    config::DataSourceId,
};

/// Adds a resolver for every `Query` and `Mutation` definition in `document` to the accumulator.
pub fn build_resolvers(
    document: &ast::TypeSystemDocument,
    accumulator: &mut ConfigurationAccumulator,
    data_source: DataSourceId,
    url: &str,
) {
    let mut walk = Walk {
        accumulator,
        data_source,
        url,
        arguments_index: PerRoot::default(),
    };

    for definition in document.definitions() {
        // Extensions never show up in printed schemas, only plain definitions count.
        let ast::Definition::Type(ast::TypeDefinition::Object(object)) = definition else {
            continue;
        };

        let Some(root) = RootType::from_type_name(object.name()) else {
            tracing::trace!("Skipping non-root object {}", object.name());
            continue;
        };

        walk.enter_root(root, object);
    }
}

struct Walk<'a> {
    accumulator: &'a mut ConfigurationAccumulator,
    data_source: DataSourceId,
    url: &'a str,
    // Position of each resolver's arguments attribute, once something needed it
    arguments_index: PerRoot<Option<usize>>,
}

impl Walk<'_> {
    fn enter_root(&mut self, root: RootType, object: ast::ObjectDefinition<'_>) {
        tracing::debug!("Building resolver for {root}");

        self.accumulator.ensure_resolver(root, self.data_source, self.url);

        for field in object.fields() {
            self.enter_field(root, &field);

            for argument in field.arguments() {
                tracing::trace!("Visiting argument {}.{}({})", root, field.name(), argument.name());
                self.enter_argument(root, &field);
            }
        }
    }

    fn enter_field(&mut self, root: RootType, field: &ast::FieldDefinition<'_>) {
        if let Some(resolver) = self.accumulator.resolver_mut(root) {
            resolver.add_field(field.name());
        }
    }

    /// Every argument of a field appends a field config holding all of that field's arguments,
    /// so a field with N arguments ends up with N identical configs.
    fn enter_argument(&mut self, root: RootType, field: &ast::FieldDefinition<'_>) {
        let Some(resolver) = self.accumulator.resolver_mut(root) else {
            return;
        };

        let index = *self.arguments_index[root].get_or_insert_with(|| locate_or_create_arguments_slot(resolver));

        if !resolver.add_field_arguments(index, field.name(), collect_argument_names(field)) {
            tracing::warn!("Attribute {index} of the {root} resolver doesn't hold arguments");
        }
    }
}
