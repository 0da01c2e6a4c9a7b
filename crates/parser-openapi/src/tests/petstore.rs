use super::*;

const PETSTORE: &str = r##"{
  "openapi": "3.0.0",
  "info": { "title": "Swagger Petstore", "version": "1.0.0" },
  "servers": [{ "url": "http://petstore.swagger.io/v1" }],
  "paths": {
    "/pets": {
      "get": {
        "summary": "List all pets",
        "operationId": "listPets",
        "parameters": [{ "$ref": "#/components/parameters/limit" }],
        "responses": {
          "200": {
            "description": "A paged array of pets",
            "content": {
              "application/json": { "schema": { "$ref": "#/components/schemas/Pets" } }
            }
          },
          "default": {
            "description": "unexpected error",
            "content": {
              "application/json": { "schema": { "$ref": "#/components/schemas/Error" } }
            }
          }
        }
      },
      "post": {
        "summary": "Create a pet",
        "operationId": "createPets",
        "requestBody": {
          "required": true,
          "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } }
          }
        },
        "responses": {
          "201": { "description": "Null response" }
        }
      }
    },
    "/pets/{petId}": {
      "get": {
        "summary": "Info for a specific pet",
        "operationId": "showPetById",
        "parameters": [
          { "name": "petId", "in": "path", "required": true, "schema": { "type": "string" } }
        ],
        "responses": {
          "200": {
            "description": "Expected response to a valid request",
            "content": {
              "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } }
            }
          }
        }
      }
    }
  },
  "components": {
    "parameters": {
      "limit": {
        "name": "limit",
        "in": "query",
        "description": "How many items to return at one time (max 100)",
        "required": false,
        "schema": { "type": "integer", "format": "int32" }
      }
    },
    "schemas": {
      "Pet": {
        "type": "object",
        "required": ["id", "name"],
        "properties": {
          "id": { "type": "integer", "format": "int64", "readOnly": true },
          "name": { "type": "string" },
          "tag": { "type": "string" },
          "parent": { "$ref": "#/components/schemas/Pet" }
        }
      },
      "Pets": {
        "type": "array",
        "items": { "$ref": "#/components/schemas/Pet" }
      },
      "Error": {
        "type": "object",
        "required": ["code", "message"],
        "properties": {
          "code": { "type": "integer", "format": "int32" },
          "message": { "type": "string" }
        }
      }
    }
  }
}"##;

fn petstore() -> Schema {
    init_tracing();
    parse_spec(PETSTORE, Format::guess(PETSTORE)).unwrap()
}

#[test]
fn test_petstore_root_fields() {
    let schema = petstore();

    assert_eq!(field_names(&schema, "Query"), vec!["listPets", "showPetById"]);
    assert_eq!(field_names(&schema, "Mutation"), vec!["createPets"]);
}

#[test]
fn test_petstore_arguments() {
    let schema = petstore();

    let query = printed_fields(&schema, "Query").unwrap();
    assert_eq!(query[0].arguments, vec![("limit".to_string(), "Int".to_string())]);
    assert_eq!(query[0].ty, "[Pet!]");
    assert_eq!(query[1].arguments, vec![("petId".to_string(), "String!".to_string())]);
    assert_eq!(query[1].ty, "Pet");

    let mutation = printed_fields(&schema, "Mutation").unwrap();
    assert_eq!(mutation[0].arguments, vec![("petInput".to_string(), "PetInput!".to_string())]);
    assert_eq!(mutation[0].ty, "String");
}

#[test]
fn test_petstore_objects() {
    let schema = petstore();

    assert_eq!(
        printed_fields(&schema, "Pet").unwrap(),
        vec![
            PrintedField {
                name: "id".into(),
                ty: "Int!".into(),
                arguments: vec![],
            },
            PrintedField {
                name: "name".into(),
                ty: "String!".into(),
                arguments: vec![],
            },
            PrintedField {
                name: "tag".into(),
                ty: "String".into(),
                arguments: vec![],
            },
            PrintedField {
                name: "parent".into(),
                ty: "Pet".into(),
                arguments: vec![],
            },
        ]
    );

    // The error schema only shows up in a non 2XX response.
    assert_eq!(printed_fields(&schema, "Error"), None);
}

#[test]
fn test_petstore_input_objects_skip_read_only_fields() {
    let schema = petstore();
    let sdl = schema.sdl();
    let document = cynic_parser::parse_type_system_document(&sdl).unwrap();

    let input_fields = document
        .definitions()
        .find_map(|definition| match definition {
            Definition::Type(TypeDefinition::InputObject(input)) if input.name() == "PetInput" => {
                Some(input.fields().map(|field| field.name().to_string()).collect::<Vec<_>>())
            }
            _ => None,
        })
        .unwrap();

    assert_eq!(input_fields, vec!["name", "tag", "parent"]);
}

#[test]
fn test_printing_is_stable() {
    assert_eq!(petstore().sdl(), petstore().sdl());
}
