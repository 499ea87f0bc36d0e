//! Schema-side conversion for Anthropic endpoint manifests
//!
//! Manifests already carry a named shape table, so conversion is a direct
//! walk: every member target is either a primitive name or a pointer to
//! another shape.

use super::types::{AnthropicManifest, ManifestAuth, Shape};
use crate::adapter::Rejection;
use llm_sdk_generator_common::{
    ApiKeyLocation, AuthKind, AuthScheme, Constraints, EndpointDefinition, EnumValue,
    ErrorDefinition, GeneratorError, HttpMethod, ParameterDefinition, ParameterLocation,
    PrimitiveType, PropertyDefinition, RateLimitSpec, RequestBody, ResponseDefinition,
    ResponseStatus, Result, TypeDefinition, TypeKind, TypeReference, UnionDiscriminator,
};
use serde_json::Value;
use tracing::warn;

pub(super) fn validate(raw: &Value) -> std::result::Result<(), Rejection> {
    let Some(object) = raw.as_object() else {
        return Err(Rejection::new("document is not a JSON object"));
    };
    if !object
        .get("manifestVersion")
        .map(Value::is_string)
        .unwrap_or(false)
    {
        return Err(Rejection::new("missing 'manifestVersion'"));
    }
    if !object.get("endpoints").map(Value::is_array).unwrap_or(false) {
        return Err(Rejection::new("missing 'endpoints' array"));
    }
    Ok(())
}

pub(super) fn schema_version(raw: &Value) -> String {
    raw.get("manifestVersion")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}

fn parse(raw: &Value) -> Result<AnthropicManifest> {
    serde_json::from_value(raw.clone())
        .map_err(|e| GeneratorError::Parse(format!("Failed to parse Anthropic manifest: {}", e)))
}

pub(super) fn extract_types(raw: &Value) -> Result<Vec<TypeDefinition>> {
    let manifest = parse(raw)?;
    let mut types = Vec::new();

    for (name, shape) in &manifest.shapes {
        types.push(TypeDefinition {
            id: name.clone(),
            name: name.clone(),
            kind: convert_shape(name, shape)?,
            description: shape.description.clone(),
            deprecated: if shape.deprecated {
                Some("deprecated by provider".to_string())
            } else {
                None
            },
        });
    }

    Ok(types)
}

fn convert_shape(name: &str, shape: &Shape) -> Result<TypeKind> {
    match shape.shape_type.as_str() {
        "structure" => {
            let properties = shape
                .members
                .iter()
                .map(|(member_name, member)| PropertyDefinition {
                    name: member_name.clone(),
                    type_ref: target_ref(&member.target, member.nullable),
                    required: shape.required.contains(member_name),
                    default: member.default.clone(),
                    constraints: member_constraints(member),
                    deprecated: member.deprecated,
                    description: member.description.clone(),
                })
                .collect();
            Ok(TypeKind::Object {
                properties,
                required: shape.required.clone(),
                additional_properties: None,
                discriminator: shape.discriminator.as_ref().map(|d| d.property.clone()),
            })
        }
        "list" => Ok(TypeKind::Array {
            items: shape
                .items
                .as_deref()
                .map(|target| target_ref(target, false))
                .unwrap_or_else(|| TypeReference::primitive(PrimitiveType::Any)),
            min_items: None,
            max_items: None,
            unique_items: false,
        }),
        "map" => Ok(TypeKind::Map {
            values: shape
                .values
                .as_deref()
                .map(|target| target_ref(target, false))
                .unwrap_or_else(|| TypeReference::primitive(PrimitiveType::Any)),
        }),
        "union" => Ok(TypeKind::Union {
            variants: shape
                .variants
                .iter()
                .map(|target| target_ref(target, false))
                .collect(),
            discriminator: shape.discriminator.as_ref().map(|d| UnionDiscriminator {
                property_name: d.property.clone(),
                mapping: d.mapping.clone(),
            }),
        }),
        "enum" => Ok(TypeKind::Enum {
            values: shape
                .enum_values
                .iter()
                .map(|entry| EnumValue {
                    value: entry.value.clone(),
                    display_name: entry.name.clone().unwrap_or_else(|| entry.value.clone()),
                })
                .collect(),
        }),
        primitive => Ok(TypeKind::Primitive {
            primitive: primitive_of(primitive).ok_or_else(|| {
                GeneratorError::Parse(format!(
                    "shape '{}' has unknown type '{}'",
                    name, primitive
                ))
            })?,
            constraints: None,
        }),
    }
}

fn member_constraints(member: &super::types::Member) -> Option<Constraints> {
    let constraints = Constraints {
        minimum: member.min,
        maximum: member.max,
        pattern: member.pattern.clone(),
        ..Default::default()
    };
    if constraints.is_empty() {
        None
    } else {
        Some(constraints)
    }
}

/// A member target is either a primitive name or a shape pointer
fn target_ref(target: &str, nullable: bool) -> TypeReference {
    let reference = match primitive_of(target) {
        Some(primitive) => TypeReference::primitive(primitive),
        None => TypeReference::named(target),
    };
    if nullable {
        reference.nullable()
    } else {
        reference
    }
}

fn primitive_of(name: &str) -> Option<PrimitiveType> {
    match name {
        "string" => Some(PrimitiveType::String),
        "integer" => Some(PrimitiveType::Integer),
        "float" => Some(PrimitiveType::Float),
        "boolean" => Some(PrimitiveType::Boolean),
        "null" => Some(PrimitiveType::Null),
        "any" => Some(PrimitiveType::Any),
        "binary" => Some(PrimitiveType::Binary),
        _ => None,
    }
}

pub(super) fn extract_endpoints(raw: &Value) -> Result<Vec<EndpointDefinition>> {
    let manifest = parse(raw)?;
    let mut endpoints = Vec::new();

    for endpoint in &manifest.endpoints {
        let method = match endpoint.method.to_uppercase().as_str() {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            other => {
                warn!(endpoint = endpoint.id.as_str(), method = other, "skipping endpoint");
                continue;
            }
        };

        let parameters = endpoint
            .params
            .iter()
            .filter_map(|param| {
                let location = match param.location.as_str() {
                    "query" => ParameterLocation::Query,
                    "header" => ParameterLocation::Header,
                    "path" => ParameterLocation::Path,
                    other => {
                        warn!(name = param.name.as_str(), location = other, "skipping parameter");
                        return None;
                    }
                };
                Some(ParameterDefinition {
                    name: param.name.clone(),
                    location,
                    type_ref: target_ref(&param.target, false),
                    required: param.required,
                    description: param.description.clone(),
                })
            })
            .collect();

        let request_body = endpoint.input.as_deref().map(|input| RequestBody {
            type_ref: target_ref(input, false),
            content_type: "application/json".to_string(),
            required: true,
        });

        let responses = endpoint
            .output
            .as_deref()
            .map(|output| {
                vec![ResponseDefinition {
                    status: ResponseStatus::Code(200),
                    type_ref: target_ref(output, false),
                    headers: vec![],
                }]
            })
            .unwrap_or_default();

        endpoints.push(EndpointDefinition {
            id: endpoint.id.clone(),
            operation_id: endpoint.operation_id.clone(),
            method,
            path: endpoint.path.clone(),
            parameters,
            request_body,
            responses,
            streaming: endpoint.streaming,
            authentication: endpoint.auth.clone(),
            rate_limit: endpoint.rate_limit.map(|limit| RateLimitSpec {
                requests_per_minute: limit.requests_per_minute,
                burst: limit.burst,
            }),
            deprecated: endpoint.deprecated,
            description: endpoint.description.clone(),
        });
    }

    Ok(endpoints)
}

pub(super) fn extract_auth_schemes(raw: &Value) -> Result<Vec<AuthScheme>> {
    let manifest = parse(raw)?;

    if manifest.auth.is_empty() {
        // The provider's documented default: a static key in x-api-key.
        return Ok(vec![AuthScheme {
            id: "api_key".to_string(),
            kind: AuthKind::ApiKey {
                location: ApiKeyLocation::Header,
                name: "x-api-key".to_string(),
            },
        }]);
    }

    let mut schemes = Vec::new();
    for (id, auth) in &manifest.auth {
        match convert_auth(auth) {
            Some(kind) => schemes.push(AuthScheme {
                id: id.clone(),
                kind,
            }),
            None => warn!(scheme = id.as_str(), "skipping unrecognized auth scheme"),
        }
    }
    Ok(schemes)
}

fn convert_auth(auth: &ManifestAuth) -> Option<AuthKind> {
    match auth.auth_type.as_str() {
        "api_key" => Some(AuthKind::ApiKey {
            location: match auth.location.as_deref() {
                Some("query") => ApiKeyLocation::Query,
                _ => ApiKeyLocation::Header,
            },
            name: auth.name.clone().unwrap_or_else(|| "x-api-key".to_string()),
        }),
        "bearer" => Some(AuthKind::Bearer),
        "basic" => Some(AuthKind::Basic),
        _ => None,
    }
}

pub(super) fn extract_errors(raw: &Value) -> Result<Vec<ErrorDefinition>> {
    let manifest = parse(raw)?;
    if !manifest.errors.is_empty() {
        return Ok(manifest
            .errors
            .iter()
            .map(|error| ErrorDefinition {
                code: error.code.clone(),
                status: error.status,
                name: error.name.clone(),
                type_ref: error.shape.as_deref().map(TypeReference::named),
                retryable: error.retryable,
            })
            .collect());
    }
    Ok(default_error_catalog())
}

fn default_error_catalog() -> Vec<ErrorDefinition> {
    let entries = [
        ("invalid_request_error", 400, "InvalidRequestError", false),
        ("authentication_error", 401, "AuthenticationError", false),
        ("permission_error", 403, "PermissionError", false),
        ("not_found_error", 404, "NotFoundError", false),
        ("request_too_large", 413, "RequestTooLargeError", false),
        ("rate_limit_error", 429, "RateLimitError", true),
        ("api_error", 500, "ApiError", true),
        ("overloaded_error", 529, "OverloadedError", true),
    ];
    entries
        .into_iter()
        .map(|(code, status, name, retryable)| ErrorDefinition {
            code: code.to_string(),
            status,
            name: name.to_string(),
            type_ref: None,
            retryable,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest() -> Value {
        json!({
            "manifestVersion": "2023-06-01",
            "shapes": {
                "Message": {
                    "type": "structure",
                    "members": {
                        "role": {"target": "string"},
                        "content": {"target": "ContentBlockList"}
                    },
                    "required": ["role", "content"]
                },
                "ContentBlockList": {"type": "list", "items": "ContentBlock"},
                "ContentBlock": {
                    "type": "union",
                    "variants": ["TextBlock", "ToolUseBlock"],
                    "discriminator": {
                        "property": "type",
                        "mapping": {"text": "TextBlock", "tool_use": "ToolUseBlock"}
                    }
                },
                "TextBlock": {
                    "type": "structure",
                    "members": {"text": {"target": "string"}},
                    "required": ["text"]
                },
                "ToolUseBlock": {
                    "type": "structure",
                    "members": {"name": {"target": "string"}},
                    "required": ["name"]
                },
                "StopReason": {
                    "type": "enum",
                    "enum": [
                        {"value": "end_turn", "name": "EndTurn"},
                        {"value": "max_tokens", "name": "MaxTokens"}
                    ]
                }
            },
            "endpoints": [{
                "id": "messages.create",
                "operationId": "createMessage",
                "method": "POST",
                "path": "/v1/messages",
                "input": "Message",
                "output": "Message",
                "streaming": true,
                "auth": ["api_key"],
                "rateLimit": {"requestsPerMinute": 60}
            }]
        })
    }

    #[test]
    fn test_validate_requires_manifest_markers() {
        assert!(validate(&manifest()).is_ok());
        assert!(validate(&json!({"endpoints": []})).is_err());
        assert!(validate(&json!({"manifestVersion": "2023-06-01"})).is_err());
    }

    #[test]
    fn test_structure_members_become_properties() {
        let types = extract_types(&manifest()).unwrap();
        let message = types.iter().find(|t| t.id == "Message").unwrap();
        let TypeKind::Object { properties, required, .. } = &message.kind else {
            panic!("expected object kind");
        };
        assert_eq!(properties.len(), 2);
        assert!(properties[0].required);
        assert_eq!(required, &["role", "content"]);
        assert_eq!(properties[1].type_ref.type_id(), Some("ContentBlockList"));
    }

    #[test]
    fn test_union_discriminator_mapping_preserved() {
        let types = extract_types(&manifest()).unwrap();
        let block = types.iter().find(|t| t.id == "ContentBlock").unwrap();
        let TypeKind::Union { discriminator, .. } = &block.kind else {
            panic!("expected union kind");
        };
        let discriminator = discriminator.as_ref().unwrap();
        assert_eq!(discriminator.property_name, "type");
        assert_eq!(discriminator.mapping.get("tool_use"), Some(&"ToolUseBlock".to_string()));
    }

    #[test]
    fn test_endpoint_carries_streaming_and_rate_limit() {
        let endpoints = extract_endpoints(&manifest()).unwrap();
        assert_eq!(endpoints.len(), 1);
        let endpoint = &endpoints[0];
        assert!(endpoint.streaming);
        assert_eq!(endpoint.operation_id, "createMessage");
        assert_eq!(endpoint.rate_limit.unwrap().requests_per_minute, 60);
    }

    #[test]
    fn test_default_auth_is_api_key_header() {
        let schemes = extract_auth_schemes(&manifest()).unwrap();
        assert_eq!(schemes.len(), 1);
        assert_eq!(schemes[0].id, "api_key");
        match &schemes[0].kind {
            AuthKind::ApiKey { location, name } => {
                assert_eq!(*location, ApiKeyLocation::Header);
                assert_eq!(name, "x-api-key");
            }
            other => panic!("unexpected auth kind: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_shape_type_is_a_parse_error() {
        let raw = json!({
            "manifestVersion": "2023-06-01",
            "shapes": {"Weird": {"type": "tuple"}},
            "endpoints": []
        });
        assert!(extract_types(&raw).is_err());
    }
}
