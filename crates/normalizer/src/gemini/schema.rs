//! Schema-side conversion for Gemini Discovery documents
//!
//! Discovery schemas reference each other by bare name and nest inline
//! objects freely, so conversion hoists inline compounds into named types
//! the same way the OpenAI converter does.

use super::types::{DiscoveryMethod, DiscoveryResource, DiscoverySchema, GeminiDiscovery};
use crate::adapter::Rejection;
use llm_sdk_generator_common::{
    AdditionalProperties, ApiKeyLocation, AuthKind, AuthScheme, Constraints, EndpointDefinition,
    EnumValue, ErrorDefinition, GeneratorError, HttpMethod, OAuthFlow, ParameterDefinition,
    ParameterLocation, PrimitiveType, PropertyDefinition, RequestBody, ResponseDefinition,
    ResponseStatus, Result, TypeDefinition, TypeKind, TypeReference,
};
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

pub(super) fn validate(raw: &Value) -> std::result::Result<(), Rejection> {
    let Some(object) = raw.as_object() else {
        return Err(Rejection::new("document is not a JSON object"));
    };
    if let Some(kind) = object.get("kind").and_then(Value::as_str) {
        if kind != "discovery#restDescription" {
            return Err(Rejection::new(format!("unexpected document kind '{}'", kind)));
        }
    }
    if !object.get("name").map(Value::is_string).unwrap_or(false) {
        return Err(Rejection::new("missing 'name'"));
    }
    if !object.get("version").map(Value::is_string).unwrap_or(false) {
        return Err(Rejection::new("missing 'version'"));
    }
    let has_methods = object.get("resources").map(Value::is_object).unwrap_or(false)
        || object.get("methods").map(Value::is_object).unwrap_or(false);
    if !has_methods {
        return Err(Rejection::new("document declares no resources or methods"));
    }
    Ok(())
}

pub(super) fn schema_version(raw: &Value) -> String {
    raw.get("version")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}

fn parse(raw: &Value) -> Result<GeminiDiscovery> {
    serde_json::from_value(raw.clone())
        .map_err(|e| GeneratorError::Parse(format!("Failed to parse Discovery document: {}", e)))
}

pub(super) fn extract_types(raw: &Value) -> Result<Vec<TypeDefinition>> {
    let discovery = parse(raw)?;
    let mut collector = TypeCollector::default();
    for (name, schema) in &discovery.schemas {
        collector.add_named(name, schema);
    }
    Ok(collector.types)
}

#[derive(Default)]
struct TypeCollector {
    types: Vec<TypeDefinition>,
    seen: HashSet<String>,
}

impl TypeCollector {
    fn add_named(&mut self, name: &str, schema: &DiscoverySchema) {
        if !self.seen.insert(name.to_string()) {
            return;
        }
        let kind = self.convert_kind(name, schema);
        self.types.push(TypeDefinition {
            id: name.to_string(),
            name: name.to_string(),
            kind,
            description: schema.description.clone(),
            deprecated: None,
        });
    }

    fn convert_kind(&mut self, hint: &str, schema: &DiscoverySchema) -> TypeKind {
        if !schema.enum_values.is_empty() {
            return TypeKind::Enum {
                values: schema
                    .enum_values
                    .iter()
                    .map(|value| EnumValue {
                        value: value.clone(),
                        display_name: value.clone(),
                    })
                    .collect(),
            };
        }

        if !schema.properties.is_empty() {
            let properties = schema
                .properties
                .iter()
                .map(|(name, property)| PropertyDefinition {
                    name: name.clone(),
                    type_ref: self.reference(&format!("{}{}", hint, capitalize(name)), property),
                    required: schema.required.contains(name),
                    default: None,
                    constraints: constraints_of(property),
                    deprecated: false,
                    description: property.description.clone(),
                })
                .collect();
            return TypeKind::Object {
                properties,
                required: schema.required.clone(),
                additional_properties: None,
                discriminator: None,
            };
        }

        match schema.schema_type.as_deref() {
            Some("object") => match &schema.additional_properties {
                Some(values) => TypeKind::Map {
                    values: self.reference(&format!("{}Value", hint), values),
                },
                None => TypeKind::Object {
                    properties: vec![],
                    required: vec![],
                    additional_properties: Some(AdditionalProperties::Allow),
                    discriminator: None,
                },
            },
            Some("array") => TypeKind::Array {
                items: match &schema.items {
                    Some(items) => self.reference(&format!("{}Item", hint), items),
                    None => TypeReference::primitive(PrimitiveType::Any),
                },
                min_items: None,
                max_items: None,
                unique_items: false,
            },
            _ => TypeKind::Primitive {
                primitive: scalar_of(schema),
                constraints: constraints_of(schema),
            },
        }
    }

    fn reference(&mut self, hint: &str, schema: &DiscoverySchema) -> TypeReference {
        if let Some(ref_name) = &schema.ref_schema {
            return TypeReference::named(ref_name.as_str());
        }
        if is_scalar(schema) {
            return TypeReference::primitive(scalar_of(schema));
        }
        self.add_named(hint, schema);
        TypeReference::named(hint)
    }
}

fn is_scalar(schema: &DiscoverySchema) -> bool {
    schema.enum_values.is_empty()
        && schema.properties.is_empty()
        && schema.items.is_none()
        && schema.additional_properties.is_none()
        && !matches!(schema.schema_type.as_deref(), Some("object") | Some("array"))
}

fn scalar_of(schema: &DiscoverySchema) -> PrimitiveType {
    match schema.schema_type.as_deref() {
        Some("string") if schema.format.as_deref() == Some("byte") => PrimitiveType::Binary,
        Some("string") if matches!(schema.format.as_deref(), Some("int64") | Some("uint64")) => {
            // Discovery carries 64-bit integers as strings on the wire.
            PrimitiveType::Integer
        }
        Some("string") => PrimitiveType::String,
        Some("integer") => PrimitiveType::Integer,
        Some("number") => PrimitiveType::Float,
        Some("boolean") => PrimitiveType::Boolean,
        Some("any") => PrimitiveType::Any,
        _ => PrimitiveType::Any,
    }
}

fn constraints_of(schema: &DiscoverySchema) -> Option<Constraints> {
    let constraints = Constraints {
        minimum: schema.minimum.as_deref().and_then(|v| v.parse().ok()),
        maximum: schema.maximum.as_deref().and_then(|v| v.parse().ok()),
        pattern: schema.pattern.clone(),
        ..Default::default()
    };
    if constraints.is_empty() {
        None
    } else {
        Some(constraints)
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub(super) fn extract_endpoints(raw: &Value) -> Result<Vec<EndpointDefinition>> {
    let discovery = parse(raw)?;
    let mut endpoints = Vec::new();

    for method in discovery.methods.values() {
        convert_method(method, &mut endpoints);
    }
    for resource in discovery.resources.values() {
        walk_resource(resource, &mut endpoints);
    }

    Ok(endpoints)
}

fn walk_resource(resource: &DiscoveryResource, endpoints: &mut Vec<EndpointDefinition>) {
    for method in resource.methods.values() {
        convert_method(method, endpoints);
    }
    for nested in resource.resources.values() {
        walk_resource(nested, endpoints);
    }
}

fn convert_method(method: &DiscoveryMethod, endpoints: &mut Vec<EndpointDefinition>) {
    let http_method = match method.http_method.as_str() {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => {
            warn!(method = method.id.as_str(), http_method = other, "skipping method");
            return;
        }
    };

    let parameters = method
        .parameters
        .iter()
        .filter_map(|(name, parameter)| {
            let location = match parameter.location.as_deref() {
                Some("query") | None => ParameterLocation::Query,
                Some("path") => ParameterLocation::Path,
                Some(other) => {
                    warn!(name = name.as_str(), location = other, "skipping parameter");
                    return None;
                }
            };
            Some(ParameterDefinition {
                name: name.clone(),
                location,
                type_ref: TypeReference::primitive(match parameter.param_type.as_deref() {
                    Some("integer") => PrimitiveType::Integer,
                    Some("number") => PrimitiveType::Float,
                    Some("boolean") => PrimitiveType::Boolean,
                    _ => PrimitiveType::String,
                }),
                required: parameter.required,
                description: parameter.description.clone(),
            })
        })
        .collect();

    let authentication = if method.scopes.is_empty() {
        vec!["api_key".to_string()]
    } else {
        vec!["oauth2".to_string()]
    };

    endpoints.push(EndpointDefinition {
        id: method.id.clone(),
        operation_id: method.id.clone(),
        method: http_method,
        path: method.path.clone(),
        parameters,
        request_body: method.request.as_ref().map(|request| RequestBody {
            type_ref: TypeReference::named(request.ref_schema.as_str()),
            content_type: "application/json".to_string(),
            required: true,
        }),
        responses: method
            .response
            .as_ref()
            .map(|response| {
                vec![ResponseDefinition {
                    status: ResponseStatus::Code(200),
                    type_ref: TypeReference::named(response.ref_schema.as_str()),
                    headers: vec![],
                }]
            })
            .unwrap_or_default(),
        streaming: method.path.contains("stream") || last_segment(&method.id).starts_with("stream"),
        authentication,
        rate_limit: None,
        deprecated: method.deprecated,
        description: method.description.clone(),
    });
}

fn last_segment(id: &str) -> &str {
    id.rsplit('.').next().unwrap_or(id)
}

pub(super) fn extract_auth_schemes(raw: &Value) -> Result<Vec<AuthScheme>> {
    let discovery = parse(raw)?;

    // Google APIs accept an API key in the "key" query parameter alongside
    // any declared OAuth scopes.
    let mut schemes = vec![AuthScheme {
        id: "api_key".to_string(),
        kind: AuthKind::ApiKey {
            location: ApiKeyLocation::Query,
            name: "key".to_string(),
        },
    }];

    if let Some(oauth2) = discovery.auth.as_ref().and_then(|auth| auth.oauth2.as_ref()) {
        schemes.push(AuthScheme {
            id: "oauth2".to_string(),
            kind: AuthKind::OAuth2 {
                flows: vec![OAuthFlow {
                    flow: "authorizationCode".to_string(),
                    authorization_url: Some(
                        "https://accounts.google.com/o/oauth2/auth".to_string(),
                    ),
                    token_url: Some("https://oauth2.googleapis.com/token".to_string()),
                    scopes: oauth2
                        .scopes
                        .iter()
                        .map(|(scope, detail)| (scope.clone(), detail.description.clone()))
                        .collect(),
                }],
            },
        });
    }

    Ok(schemes)
}

pub(super) fn extract_errors(raw: &Value) -> Result<Vec<ErrorDefinition>> {
    parse(raw)?;
    let entries = [
        ("INVALID_ARGUMENT", 400, "InvalidArgumentError", false),
        ("UNAUTHENTICATED", 401, "UnauthenticatedError", false),
        ("PERMISSION_DENIED", 403, "PermissionDeniedError", false),
        ("NOT_FOUND", 404, "NotFoundError", false),
        ("RESOURCE_EXHAUSTED", 429, "ResourceExhaustedError", true),
        ("INTERNAL", 500, "InternalError", true),
        ("UNAVAILABLE", 503, "UnavailableError", true),
    ];
    Ok(entries
        .into_iter()
        .map(|(code, status, name, retryable)| ErrorDefinition {
            code: code.to_string(),
            status,
            name: name.to_string(),
            type_ref: None,
            retryable,
        })
        .collect())
}
