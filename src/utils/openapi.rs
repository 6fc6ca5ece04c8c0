//! Small builders for the OpenAPI fragments modules contribute.

use serde_json::{json, Value};

/// JSON form of a `utoipa` schema.
pub fn schema_of<T: utoipa::PartialSchema>() -> Value {
    serde_json::to_value(T::schema()).unwrap_or(Value::Null)
}

/// `$ref` to a component schema.
pub fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

/// `application/json` content wrapping `schema`.
pub fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

/// Response carrying the shared error envelope.
pub fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": json_content(schema_ref("ErrorResponse"))
    })
}

/// Required integer path parameter.
pub fn path_param(name: &str) -> Value {
    json!({
        "name": name,
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64" }
    })
}

/// Optional integer query parameter.
pub fn query_param(name: &str, description: &str) -> Value {
    json!({
        "name": name,
        "in": "query",
        "required": false,
        "description": description,
        "schema": { "type": "integer", "format": "int64" }
    })
}

/// Item operations shared by every resource: get, replace and delete by id.
pub fn item_operations(tag: &str, entity: &str, schema: &str, input_schema: &str) -> Value {
    json!({
        "get": {
            "summary": format!("Get {entity} by id"),
            "tags": [tag],
            "parameters": [path_param("pk")],
            "responses": {
                "200": { "description": format!("The {entity}"), "content": json_content(schema_ref(schema)) },
                "404": error_response(&format!("No {entity} with this id"))
            }
        },
        "put": {
            "summary": format!("Replace the given fields of a {entity}"),
            "tags": [tag],
            "parameters": [path_param("pk")],
            "requestBody": { "required": true, "content": json_content(schema_ref(input_schema)) },
            "responses": {
                "204": { "description": "Updated" },
                "400": { "description": "No row matched" },
                "409": error_response("More than one row matched")
            }
        },
        "delete": {
            "summary": format!("Delete {entity} by id"),
            "tags": [tag],
            "parameters": [path_param("pk")],
            "responses": {
                "200": { "description": "Deleted" },
                "400": { "description": "No row matched" },
                "409": error_response("More than one row matched")
            }
        }
    })
}

/// `POST` on a collection: create from the input schema.
pub fn create_operation(tag: &str, entity: &str, input_schema: &str) -> Value {
    json!({
        "summary": format!("Create a {entity}"),
        "tags": [tag],
        "requestBody": { "required": true, "content": json_content(schema_ref(input_schema)) },
        "responses": {
            "201": {
                "description": "Created; `Location` names the new resource",
                "headers": { "Location": { "schema": { "type": "string" } } }
            }
        }
    })
}
