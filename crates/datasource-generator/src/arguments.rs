use cynic_parser::type_system::FieldDefinition;

use crate::config::{ArgumentsConfig, Attribute, Resolver, ARGUMENTS_ATTRIBUTE};

/// Finds the position of the `arguments` attribute of `resolver`, appending an empty one
/// if the resolver doesn't have it yet.
pub fn locate_or_create_arguments_slot(resolver: &mut Resolver) -> usize {
    if let Some(index) = resolver
        .attributes
        .iter()
        .position(|attribute| attribute.key == ARGUMENTS_ATTRIBUTE)
    {
        return index;
    }

    resolver.attributes.push(Attribute::arguments(ArgumentsConfig::default()));
    resolver.attributes.len() - 1
}

/// The names of every argument declared on `field`, in declaration order
pub(crate) fn collect_argument_names(field: &FieldDefinition<'_>) -> Vec<String> {
    field.arguments().map(|argument| argument.name().to_string()).collect()
}
