use cynic_parser::type_system::{Definition, TypeDefinition};
use indoc::indoc;

use super::*;

mod petstore;

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn build(yaml: &str) -> Result<Schema, Error> {
    init_tracing();
    parse_spec(yaml, Format::Yaml)
}

/// A field of an object type in the printed schema, with its arguments
#[derive(Debug, PartialEq)]
struct PrintedField {
    name: String,
    ty: String,
    arguments: Vec<(String, String)>,
}

fn printed_fields(schema: &Schema, type_name: &str) -> Option<Vec<PrintedField>> {
    let sdl = schema.sdl();
    let document = cynic_parser::parse_type_system_document(&sdl).unwrap();

    document.definitions().find_map(|definition| match definition {
        Definition::Type(TypeDefinition::Object(object)) if object.name() == type_name => Some(
            object
                .fields()
                .map(|field| PrintedField {
                    name: field.name().to_string(),
                    ty: field.ty().to_string(),
                    arguments: field
                        .arguments()
                        .map(|argument| (argument.name().to_string(), argument.ty().to_string()))
                        .collect(),
                })
                .collect(),
        ),
        _ => None,
    })
}

fn field_names(schema: &Schema, type_name: &str) -> Vec<String> {
    printed_fields(schema, type_name)
        .unwrap_or_default()
        .into_iter()
        .map(|field| field.name)
        .collect()
}

#[test]
fn test_minimal_list_operation() {
    let schema = build(indoc! {r#"
        openapi: 3.0.0
        info:
          title: Pets
          version: 1.0.0
        paths:
          /pets:
            get:
              responses:
                "200":
                  description: All the pets
                  content:
                    application/json:
                      schema:
                        type: array
                        items:
                          type: object
                          properties:
                            name:
                              type: string
    "#})
    .unwrap();

    let query = printed_fields(&schema, "Query").unwrap();
    assert_eq!(
        query,
        vec![PrintedField {
            name: "pets".into(),
            ty: "[PetsItem!]".into(),
            arguments: vec![],
        }]
    );

    assert_eq!(field_names(&schema, "PetsItem"), vec!["name"]);
    assert_eq!(printed_fields(&schema, "Mutation"), None);
}

#[test]
fn test_query_parameters_become_arguments() {
    let schema = build(indoc! {r#"
        openapi: 3.0.0
        info:
          title: Pets
          version: 1.0.0
        paths:
          /pets:
            get:
              parameters:
                - name: limit
                  in: query
                  schema:
                    type: integer
                - name: X-Tenant
                  in: header
                  required: true
                  schema:
                    type: string
                - name: session
                  in: cookie
                  schema:
                    type: string
              responses:
                "200":
                  description: All the pets
                  content:
                    application/json:
                      schema:
                        type: string
    "#})
    .unwrap();

    let query = printed_fields(&schema, "Query").unwrap();
    assert_eq!(
        query[0].arguments,
        vec![
            ("limit".to_string(), "Int".to_string()),
            ("xTenant".to_string(), "String!".to_string())
        ]
    );
}

#[test]
fn test_inherited_parameters_are_overridden() {
    let schema = build(indoc! {r#"
        openapi: 3.0.0
        info:
          title: Pets
          version: 1.0.0
        paths:
          /pets/{petId}:
            parameters:
              - name: petId
                in: path
                required: true
                schema:
                  type: string
              - name: verbose
                in: query
                schema:
                  type: boolean
            get:
              parameters:
                - name: petId
                  in: path
                  required: true
                  schema:
                    type: integer
              responses:
                "200":
                  description: A pet
                  content:
                    application/json:
                      schema:
                        type: string
    "#})
    .unwrap();

    let query = printed_fields(&schema, "Query").unwrap();
    assert_eq!(query[0].name, "petsByPetId");
    assert_eq!(
        query[0].arguments,
        vec![
            ("petId".to_string(), "Int!".to_string()),
            ("verbose".to_string(), "Boolean".to_string())
        ]
    );
}

#[test]
fn test_without_get_operations_there_is_a_placeholder_query() {
    let schema = build(indoc! {r#"
        openapi: 3.0.0
        info:
          title: Pets
          version: 1.0.0
        paths:
          /pets:
            delete:
              responses:
                "204":
                  description: Deleted
    "#})
    .unwrap();

    assert_eq!(field_names(&schema, "Query"), vec!["placeholder"]);
    assert_eq!(field_names(&schema, "Mutation"), vec!["deletePets"]);
}

#[test]
fn test_unresolved_reference() {
    let error = build(indoc! {r##"
        openapi: 3.0.0
        info:
          title: Pets
          version: 1.0.0
        paths:
          /pets:
            get:
              responses:
                "200":
                  description: A pet
                  content:
                    application/json:
                      schema:
                        $ref: "#/components/schemas/Pet"
    "##})
    .unwrap_err();

    assert_eq!(
        error.to_string(),
        "Found a reference #/components/schemas/Pet which didn't seem to exist in the spec"
    );
}

#[test]
fn test_array_without_items() {
    let error = build(indoc! {r#"
        openapi: 3.0.0
        info:
          title: Pets
          version: 1.0.0
        paths:
          /pets:
            get:
              responses:
                "200":
                  description: Pets
                  content:
                    application/json:
                      schema:
                        type: array
    "#})
    .unwrap_err();

    assert!(matches!(error, Error::ArrayWithoutItems));
}

#[test]
fn test_free_form_objects_are_json() {
    let schema = build(indoc! {r#"
        openapi: 3.0.0
        info:
          title: Pets
          version: 1.0.0
        paths:
          /metadata:
            get:
              responses:
                "200":
                  description: Anything
                  content:
                    application/json:
                      schema:
                        type: object
                        additionalProperties: true
    "#})
    .unwrap();

    let query = printed_fields(&schema, "Query").unwrap();
    assert_eq!(query[0].ty, "JSON");
}

#[test]
fn test_malformed_json_document() {
    let error = parse_spec("{ not json", Format::Json).unwrap_err();

    assert!(matches!(error, Error::JsonParsingError(_)));
}

#[test]
fn test_parameters_with_clashing_names_are_kept_apart() {
    let schema = build(indoc! {r#"
        openapi: 3.0.0
        info:
          title: Pets
          version: 1.0.0
        paths:
          /pets:
            get:
              parameters:
                - name: X-Id
                  in: header
                  required: true
                  schema:
                    type: string
                - name: x_id
                  in: query
                  schema:
                    type: integer
              responses:
                "200":
                  description: All the pets
                  content:
                    application/json:
                      schema:
                        type: string
    "#})
    .unwrap();

    let query = printed_fields(&schema, "Query").unwrap();
    assert_eq!(
        query[0].arguments,
        vec![
            ("xId".to_string(), "String!".to_string()),
            ("xIdQuery".to_string(), "Int".to_string())
        ]
    );
}

#[test]
fn test_request_body_clashing_with_a_parameter() {
    let error = build(indoc! {r##"
        openapi: 3.0.0
        info:
          title: Pets
          version: 1.0.0
        paths:
          /pets:
            post:
              parameters:
                - name: pet_input
                  in: query
                  schema:
                    type: string
              requestBody:
                content:
                  application/json:
                    schema:
                      $ref: "#/components/schemas/Pet"
              responses:
                "201":
                  description: Created
        components:
          schemas:
            Pet:
              type: object
              properties:
                name:
                  type: string
    "##})
    .unwrap_err();

    assert_eq!(
        error.to_string(),
        "The operation postPets ends up with more than one argument named petInput"
    );
}

#[test]
fn test_inline_objects_do_not_take_component_names() {
    let schema = build(indoc! {r##"
        openapi: 3.0.0
        info:
          title: Pets
          version: 1.0.0
        paths:
          /pets:
            get:
              responses:
                "200":
                  description: All the pets
                  content:
                    application/json:
                      schema:
                        type: array
                        items:
                          type: object
                          properties:
                            x:
                              type: integer
          /other:
            get:
              responses:
                "200":
                  description: Something else
                  content:
                    application/json:
                      schema:
                        $ref: "#/components/schemas/PetsItem"
        components:
          schemas:
            PetsItem:
              type: object
              properties:
                name:
                  type: string
    "##})
    .unwrap();

    let query = printed_fields(&schema, "Query").unwrap();
    assert_eq!(query[0].ty, "[PetsItem2!]");
    assert_eq!(query[1].ty, "PetsItem");

    assert_eq!(field_names(&schema, "PetsItem2"), vec!["x"]);
    assert_eq!(field_names(&schema, "PetsItem"), vec!["name"]);
}

#[test]
fn test_inline_objects_do_not_take_root_names() {
    let schema = build(indoc! {r#"
        openapi: 3.0.0
        info:
          title: Pets
          version: 1.0.0
        paths:
          /query:
            get:
              responses:
                "200":
                  description: A search
                  content:
                    application/json:
                      schema:
                        type: object
                        properties:
                          total:
                            type: integer
    "#})
    .unwrap();

    let query = printed_fields(&schema, "Query").unwrap();
    assert_eq!(query[0].name, "query");
    assert_eq!(query[0].ty, "Query2");
    assert_eq!(field_names(&schema, "Query2"), vec!["total"]);
}

#[test]
fn test_descriptions_with_block_quotes() {
    let schema = build(indoc! {r#"
        openapi: 3.0.0
        info:
          title: Pets
          version: 1.0.0
        paths:
          /pets:
            get:
              summary: Returns """quoted""" pets
              parameters:
                - name: limit
                  in: query
                  description: At most """this""" many
                  schema:
                    type: integer
              responses:
                "200":
                  description: All the pets
                  content:
                    application/json:
                      schema:
                        type: object
                        description: A """page""" of pets
                        properties:
                          name:
                            type: string
                            description: The """name"""
    "#})
    .unwrap();

    let sdl = schema.sdl();
    let document = cynic_parser::parse_type_system_document(&sdl).unwrap();

    let description = document
        .definitions()
        .find_map(|definition| match definition {
            Definition::Type(TypeDefinition::Object(object)) if object.name() == "Query" => object
                .fields()
                .next()
                .and_then(|field| field.description())
                .map(|description| description.to_cow().into_owned()),
            _ => None,
        })
        .unwrap();
    assert!(description.contains("quoted"), "{description}");

    assert_eq!(field_names(&schema, "Pets"), vec!["name"]);
}
