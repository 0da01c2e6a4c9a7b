use std::borrow::Borrow;

use async_graphql::dynamic::{Field, Object, TypeRef};
use openapiv3::{ObjectType, ReferenceOr, SchemaKind, Type};

use super::{escape_description, required, type_names::Position, unresolved, OutputContext};
use crate::{names, Error};

impl OutputContext<'_> {
    /// Works out the GraphQL output type for a schema, registering any objects it needs.
    ///
    /// The returned type is nullable at the top level, callers decide whether to wrap it.
    pub(super) fn output_type<S>(&mut self, schema: &ReferenceOr<S>, name_hint: &str) -> Result<TypeRef, Error>
    where
        S: Borrow<openapiv3::Schema>,
    {
        let (component_name, resolved) = self.resolve(schema)?;
        let name = component_name.map_or_else(|| name_hint.to_string(), names::type_name);

        match &resolved.schema_kind {
            SchemaKind::Type(Type::String(_)) => Ok(TypeRef::named(TypeRef::STRING)),
            SchemaKind::Type(Type::Integer(_)) => Ok(TypeRef::named(TypeRef::INT)),
            SchemaKind::Type(Type::Number(_)) => Ok(TypeRef::named(TypeRef::FLOAT)),
            SchemaKind::Type(Type::Boolean(_)) => Ok(TypeRef::named(TypeRef::BOOLEAN)),
            SchemaKind::Type(Type::Array(array)) => {
                let items = array.items.as_ref().ok_or(Error::ArrayWithoutItems)?;
                let item_type = self.output_type(items, &format!("{name}Item"))?;
                let nullable_items = self.is_nullable(items)?;

                Ok(TypeRef::List(Box::new(required(item_type, !nullable_items))))
            }
            SchemaKind::Type(Type::Object(object)) if !object.properties.is_empty() => {
                self.output_object(component_name, name, resolved.schema_data.description.as_deref(), object)
            }
            _ => {
                tracing::debug!("Representing the schema for {name} as JSON");
                Ok(self.json())
            }
        }
    }

    fn output_object(
        &mut self,
        component_name: Option<&str>,
        preferred_name: String,
        description: Option<&str>,
        object: &ObjectType,
    ) -> Result<TypeRef, Error> {
        let name = match component_name {
            Some(component_name) => {
                if let Some(ty) = self.type_names.component_type(component_name, Position::Output) {
                    return Ok(ty);
                }

                let name = self.type_names.claim_for_component(preferred_name);
                self.type_names
                    .set_component_type(component_name, Position::Output, TypeRef::named(name.as_str()));
                name
            }
            None => self.type_names.claim_for_inline(preferred_name),
        };
        self.objects.insert(name.clone(), None);

        let mut output = Object::new(name.as_str());
        if let Some(description) = description {
            output = output.description(escape_description(description));
        }

        let mut field_count = 0;
        for (property_name, property) in &object.properties {
            let (_, property_schema) = self.resolve(property)?;
            if property_schema.schema_data.write_only {
                continue;
            }

            let ty = self.output_type(property, &format!("{name}{}", names::type_name(property_name)))?;
            let is_required = object.required.contains(property_name) && !property_schema.schema_data.nullable;

            let mut field = Field::new(names::field_name(property_name), required(ty, is_required), unresolved);
            if let Some(description) = &property_schema.schema_data.description {
                field = field.description(escape_description(description));
            }

            output = output.field(field);
            field_count += 1;
        }

        if field_count == 0 {
            self.objects.shift_remove(&name);
            let json = self.json();
            if let Some(component_name) = component_name {
                self.type_names
                    .set_component_type(component_name, Position::Output, json.clone());
            }
            return Ok(json);
        }

        self.objects.insert(name.clone(), Some(output));

        Ok(TypeRef::named(name))
    }
}
