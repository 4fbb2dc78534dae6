//! API documentation: the OpenAPI document plus Swagger UI and ReDoc pages
//! served at the configured `docs.swagger_url` / `docs.redoc_url` paths.

use axum::response::Html;
use axum::Json;
use kennel_core::KennelConfigSnapshot;
use serde_json::{json, Value};

use crate::services::dogs::dogs_schema::{AGE_MAX, COLOR_MAX, DESCRIPTION_MAX, NAME_MAX};

pub const OPENAPI_URL: &str = "/openapi.json";

const BREEDS: [&str; 5] = ["Labrador Retriever", "Beagle", "Bulldog", "Poodle", "German Shepherd"];
const SEXES: [&str; 5] = ["male", "female", "spayed", "neutered", "unknown"];

fn dog_fields() -> Value {
    json!({
        "name": {"type": "string", "minLength": 1, "maxLength": NAME_MAX},
        "breed": {"type": "string", "enum": BREEDS},
        "color": {"type": "string", "minLength": 1, "maxLength": COLOR_MAX},
        "age": {"type": "integer", "minimum": 0, "maximum": AGE_MAX},
        "sex": {"type": "string", "enum": SEXES},
        "description": {"type": ["string", "null"], "maxLength": DESCRIPTION_MAX},
    })
}

fn schemas() -> Value {
    let fields = dog_fields();

    let mut dog = fields.clone();
    dog["id"] = json!({"type": "string", "format": "uuid"});
    dog["created_at"] = json!({"type": "string", "format": "date-time"});

    json!({
        "Dog": {
            "type": "object",
            "properties": dog,
            "required": ["id", "created_at", "name", "breed", "color", "age", "sex", "description"],
        },
        "CreateDog": {
            "type": "object",
            "properties": fields,
            "required": ["name", "breed", "color", "age", "sex"],
            "additionalProperties": false,
        },
        "UpdateDog": {
            "type": "object",
            "properties": fields,
            "additionalProperties": false,
        },
        "Error": {
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "message": {"type": "string"},
                "code": {"type": "integer"},
                "className": {"type": "string"},
                "errors": {"type": "object", "additionalProperties": {"type": "array", "items": {"type": "string"}}},
            },
            "required": ["name", "message", "code", "className"],
        },
    })
}

fn body(schema: &str) -> Value {
    json!({
        "required": true,
        "content": {"application/json": {"schema": {"$ref": format!("#/components/schemas/{schema}")}}},
    })
}

fn response(description: &str, schema: Value) -> Value {
    json!({"description": description, "content": {"application/json": {"schema": schema}}})
}

fn dog_ref() -> Value {
    json!({"$ref": "#/components/schemas/Dog"})
}

fn error(description: &str) -> Value {
    response(description, json!({"$ref": "#/components/schemas/Error"}))
}

/// OpenAPI 3.1 description of the dogs resource and the status routes.
pub fn openapi(config: &KennelConfigSnapshot) -> Value {
    let id_param = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": {"type": "string", "format": "uuid"},
    });

    json!({
        "openapi": "3.1.0",
        "info": {
            "title": config.get("api.name").unwrap_or_default(),
            "description": config.get("api.description").unwrap_or_default(),
            "version": config.get("api.version").unwrap_or_default(),
        },
        "paths": {
            "/dogs": {
                "get": {
                    "summary": "List dogs",
                    "responses": {"200": response("Every dog", json!({"type": "array", "items": dog_ref()}))},
                },
                "post": {
                    "summary": "Create a dog",
                    "requestBody": body("CreateDog"),
                    "responses": {
                        "200": response("The created dog", dog_ref()),
                        "400": error("Malformed JSON"),
                        "422": error("Validation failed"),
                    },
                },
            },
            "/dogs/{id}": {
                "parameters": [id_param],
                "get": {
                    "summary": "Get a dog",
                    "responses": {
                        "200": response("The dog", dog_ref()),
                        "404": error("No dog with this id"),
                        "422": error("Malformed id"),
                    },
                },
                "put": {
                    "summary": "Update the supplied fields of a dog",
                    "requestBody": body("UpdateDog"),
                    "responses": {
                        "200": response("The updated dog", dog_ref()),
                        "404": error("No dog with this id"),
                        "422": error("Validation failed"),
                    },
                },
                "delete": {
                    "summary": "Delete a dog",
                    "responses": {
                        "200": response("The id that was deleted", json!({"type": "string", "format": "uuid"})),
                        "422": error("Malformed id"),
                    },
                },
            },
            "/": {
                "get": {"summary": "Application info", "responses": {"200": {"description": "Application info"}}},
            },
            "/health": {
                "get": {
                    "summary": "Liveness check",
                    "responses": {"200": {"description": "ok", "content": {"text/plain": {"schema": {"type": "string"}}}}},
                },
            },
        },
        "components": {"schemas": schemas()},
    })
}

pub async fn openapi_json(config: KennelConfigSnapshot) -> Json<Value> {
    Json(openapi(&config))
}

fn title(config: &KennelConfigSnapshot) -> &str {
    config.get("api.name").unwrap_or("API docs")
}

pub async fn swagger_ui(config: KennelConfigSnapshot) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>{title} - Swagger UI</title>
<link type="text/css" rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
<div id="swagger-ui"></div>
<script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
<script>
const ui = SwaggerUIBundle({{
    url: '{OPENAPI_URL}',
    dom_id: '#swagger-ui',
    presets: [SwaggerUIBundle.presets.apis, SwaggerUIBundle.SwaggerUIStandalonePreset],
    layout: "BaseLayout",
    deepLinking: true,
}})
</script>
</body>
</html>
"#,
        title = title(&config),
    ))
}

pub async fn redoc(config: KennelConfigSnapshot) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>{title} - ReDoc</title>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1">
</head>
<body>
<redoc spec-url="{OPENAPI_URL}"></redoc>
<script src="https://cdn.jsdelivr.net/npm/redoc@2/bundles/redoc.standalone.js"></script>
</body>
</html>
"#,
        title = title(&config),
    ))
}
