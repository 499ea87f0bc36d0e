//! Schema-side conversion for OpenAI documents
//!
//! Walks an OpenAPI-flavored document and produces the canonical type table
//! and endpoint list. Inline compound schemas are hoisted into named types so
//! that every reference in the IR stays a pointer, never an embedded copy.

use super::types::{
    AdditionalPropertiesObject, OpenAiSpec, Operation, RawError, SchemaObject, SecurityScheme,
};
use crate::adapter::Rejection;
use llm_sdk_generator_common::{
    AdditionalProperties, ApiKeyLocation, AuthKind, AuthScheme, Constraints, EndpointDefinition,
    EnumValue, ErrorDefinition, GeneratorError, HttpMethod, OAuthFlow, ParameterDefinition,
    ParameterLocation, PrimitiveType, PropertyDefinition, RequestBody, ResponseDefinition,
    ResponseStatus, Result, TypeDefinition, TypeKind, TypeReference, UnionDiscriminator,
};
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

pub(super) fn validate(raw: &Value) -> std::result::Result<(), Rejection> {
    let Some(object) = raw.as_object() else {
        return Err(Rejection::new("document is not a JSON object"));
    };
    match object.get("openapi").and_then(Value::as_str) {
        Some(version) if version.starts_with('3') => {}
        Some(version) => {
            return Err(Rejection::new(format!(
                "unsupported OpenAPI version '{}'",
                version
            )))
        }
        None => return Err(Rejection::new("missing 'openapi' version field")),
    }
    if !object.get("paths").map(Value::is_object).unwrap_or(false) {
        return Err(Rejection::new("missing 'paths' object"));
    }
    Ok(())
}

pub(super) fn schema_version(raw: &Value) -> String {
    raw.pointer("/info/version")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}

fn parse(raw: &Value) -> Result<OpenAiSpec> {
    serde_json::from_value(raw.clone())
        .map_err(|e| GeneratorError::Parse(format!("Failed to parse OpenAI spec: {}", e)))
}

pub(super) fn extract_types(raw: &Value) -> Result<Vec<TypeDefinition>> {
    let spec = parse(raw)?;
    let mut collector = TypeCollector::default();

    if let Some(components) = &spec.components {
        for (name, schema) in &components.schemas {
            collector.add_named(name, schema)?;
        }
    }

    Ok(collector.types)
}

pub(super) fn extract_endpoints(raw: &Value) -> Result<Vec<EndpointDefinition>> {
    let spec = parse(raw)?;
    let mut endpoints = Vec::new();

    for (path, item) in &spec.paths {
        for (method_name, operation) in item.operations() {
            endpoints.push(convert_operation(&spec, path, method_name, operation)?);
        }
    }

    Ok(endpoints)
}

pub(super) fn extract_auth_schemes(raw: &Value) -> Result<Vec<AuthScheme>> {
    let spec = parse(raw)?;
    let mut schemes = Vec::new();

    let Some(components) = &spec.components else {
        return Ok(schemes);
    };

    for (id, scheme) in &components.security_schemes {
        match convert_security_scheme(scheme) {
            Some(kind) => schemes.push(AuthScheme {
                id: id.clone(),
                kind,
            }),
            None => warn!(scheme = id.as_str(), "skipping unrecognized security scheme"),
        }
    }

    Ok(schemes)
}

pub(super) fn extract_errors(raw: &Value) -> Result<Vec<ErrorDefinition>> {
    let spec = parse(raw)?;
    if !spec.errors.is_empty() {
        return Ok(spec.errors.iter().map(convert_error).collect());
    }
    Ok(default_error_catalog())
}

fn convert_error(raw: &RawError) -> ErrorDefinition {
    ErrorDefinition {
        code: raw.code.clone(),
        status: raw.status,
        name: raw.name.clone(),
        type_ref: None,
        retryable: raw.retryable,
    }
}

/// The provider's documented error families, used when the schema document
/// carries no catalog of its own
fn default_error_catalog() -> Vec<ErrorDefinition> {
    let entries = [
        ("invalid_request_error", 400, "InvalidRequestError", false),
        ("authentication_error", 401, "AuthenticationError", false),
        ("permission_denied_error", 403, "PermissionDeniedError", false),
        ("not_found_error", 404, "NotFoundError", false),
        ("rate_limit_error", 429, "RateLimitError", true),
        ("api_error", 500, "ApiError", true),
        ("overloaded_error", 503, "OverloadedError", true),
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

fn convert_operation(
    spec: &OpenAiSpec,
    path: &str,
    method_name: &str,
    operation: &Operation,
) -> Result<EndpointDefinition> {
    let method = match method_name {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        _ => HttpMethod::Delete,
    };

    let mut parameters = Vec::new();
    for parameter in &operation.parameters {
        let location = match parameter.location.as_str() {
            "query" => ParameterLocation::Query,
            "header" => ParameterLocation::Header,
            "path" => ParameterLocation::Path,
            other => {
                warn!(name = parameter.name.as_str(), location = other, "skipping parameter");
                continue;
            }
        };
        parameters.push(ParameterDefinition {
            name: parameter.name.clone(),
            location,
            type_ref: shallow_reference(parameter.schema.as_ref()),
            required: parameter.required,
            description: parameter.description.clone(),
        });
    }

    let request_body = operation.request_body.as_ref().and_then(|body| {
        body.content.iter().next().map(|(content_type, media)| RequestBody {
            type_ref: shallow_reference(media.schema.as_ref()),
            content_type: content_type.clone(),
            required: body.required,
        })
    });

    let mut responses = Vec::new();
    for (status, response) in &operation.responses {
        let status = if status == "default" {
            ResponseStatus::Default
        } else {
            match status.parse::<u16>() {
                Ok(code) => ResponseStatus::Code(code),
                Err(_) => {
                    warn!(status = status.as_str(), "skipping unparseable response status");
                    continue;
                }
            }
        };
        let type_ref = response
            .content
            .iter()
            .next()
            .map(|(_, media)| shallow_reference(media.schema.as_ref()))
            .unwrap_or_else(|| TypeReference::primitive(PrimitiveType::Null));
        responses.push(ResponseDefinition {
            status,
            type_ref,
            headers: vec![],
        });
    }

    let authentication = operation
        .security
        .iter()
        .flat_map(|requirement| requirement.keys().cloned())
        .collect();

    Ok(EndpointDefinition {
        id: format!("{} {}", method.as_str(), path),
        operation_id: operation.operation_id.clone(),
        method,
        path: path.to_string(),
        parameters,
        request_body,
        responses,
        streaming: operation.streaming || request_accepts_stream(spec, operation),
        authentication,
        rate_limit: None,
        deprecated: operation.deprecated,
        description: operation.description.clone().or_else(|| operation.summary.clone()),
    })
}

/// Whether the operation's request schema declares a "stream" toggle
fn request_accepts_stream(spec: &OpenAiSpec, operation: &Operation) -> bool {
    let Some(body) = &operation.request_body else {
        return false;
    };
    let Some((_, media)) = body.content.iter().next() else {
        return false;
    };
    let Some(schema) = &media.schema else {
        return false;
    };

    let resolved = match &schema.ref_path {
        Some(ref_path) => spec
            .components
            .as_ref()
            .and_then(|c| c.schemas.get(strip_ref(ref_path))),
        None => Some(schema),
    };

    resolved
        .map(|s| s.properties.contains_key("stream"))
        .unwrap_or(false)
}

/// Reference for positions that cannot hoist (endpoint bodies, parameters):
/// refs and scalars pass through, inline compounds degrade to `any`
fn shallow_reference(schema: Option<&SchemaObject>) -> TypeReference {
    let Some(schema) = schema else {
        return TypeReference::primitive(PrimitiveType::Any);
    };
    if let Some(ref_path) = &schema.ref_path {
        let mut reference = TypeReference::named(strip_ref(ref_path));
        if schema.nullable {
            reference = reference.nullable();
        }
        return reference;
    }
    let mut reference = TypeReference::primitive(scalar_of(schema));
    if schema.nullable {
        reference = reference.nullable();
    }
    reference
}

fn convert_security_scheme(scheme: &SecurityScheme) -> Option<AuthKind> {
    match scheme.scheme_type.as_str() {
        "http" => match scheme.scheme.as_deref() {
            Some("bearer") => Some(AuthKind::Bearer),
            Some("basic") => Some(AuthKind::Basic),
            _ => None,
        },
        "apiKey" => {
            let location = match scheme.location.as_deref() {
                Some("header") => ApiKeyLocation::Header,
                Some("query") => ApiKeyLocation::Query,
                _ => return None,
            };
            Some(AuthKind::ApiKey {
                location,
                name: scheme.name.clone()?,
            })
        }
        "oauth2" => {
            let flows = scheme
                .flows
                .iter()
                .map(|(flow, raw)| OAuthFlow {
                    flow: flow.clone(),
                    authorization_url: raw.authorization_url.clone(),
                    token_url: raw.token_url.clone(),
                    scopes: raw.scopes.clone(),
                })
                .collect();
            Some(AuthKind::OAuth2 { flows })
        }
        _ => None,
    }
}

/// Accumulates the type table while hoisting inline compounds
#[derive(Default)]
struct TypeCollector {
    types: Vec<TypeDefinition>,
    seen: HashSet<String>,
}

impl TypeCollector {
    fn add_named(&mut self, name: &str, schema: &SchemaObject) -> Result<()> {
        if !self.seen.insert(name.to_string()) {
            return Ok(());
        }
        let kind = self.convert_kind(name, schema)?;
        self.types.push(TypeDefinition {
            id: name.to_string(),
            name: name.to_string(),
            kind,
            description: schema.description.clone(),
            deprecated: if schema.deprecated {
                Some("deprecated by provider".to_string())
            } else {
                None
            },
        });
        Ok(())
    }

    fn convert_kind(&mut self, hint: &str, schema: &SchemaObject) -> Result<TypeKind> {
        let variant_schemas = if !schema.one_of.is_empty() {
            &schema.one_of
        } else {
            &schema.any_of
        };
        if !variant_schemas.is_empty() {
            let mut variants = Vec::new();
            for (i, variant) in variant_schemas.iter().enumerate() {
                variants.push(self.reference(&format!("{}Variant{}", hint, i), variant)?);
            }
            let discriminator = schema.discriminator.as_ref().map(|d| UnionDiscriminator {
                property_name: d.property_name.clone(),
                mapping: d
                    .mapping
                    .iter()
                    .map(|(literal, target)| (literal.clone(), strip_ref(target).to_string()))
                    .collect(),
            });
            return Ok(TypeKind::Union {
                variants,
                discriminator,
            });
        }

        if !schema.enum_values.is_empty() {
            let values = schema
                .enum_values
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| EnumValue {
                    value: s.to_string(),
                    display_name: s.to_string(),
                })
                .collect();
            return Ok(TypeKind::Enum { values });
        }

        if !schema.properties.is_empty() {
            let mut properties = Vec::new();
            for (name, property) in &schema.properties {
                let required = schema.required.contains(name);
                properties.push(PropertyDefinition {
                    name: name.clone(),
                    type_ref: self.reference(&format!("{}{}", hint, pascal_hint(name)), property)?,
                    required,
                    default: property.default.clone(),
                    constraints: constraints_of(property),
                    deprecated: property.deprecated,
                    description: property.description.clone(),
                });
            }
            let additional_properties = match &schema.additional_properties {
                Some(AdditionalPropertiesObject::Flag(true)) => Some(AdditionalProperties::Allow),
                Some(AdditionalPropertiesObject::Flag(false)) => Some(AdditionalProperties::Deny),
                Some(AdditionalPropertiesObject::Schema(extra)) => {
                    Some(AdditionalProperties::Typed(
                        self.reference(&format!("{}Value", hint), extra)?,
                    ))
                }
                None => None,
            };
            return Ok(TypeKind::Object {
                properties,
                required: schema.required.clone(),
                additional_properties,
                discriminator: schema.discriminator.as_ref().map(|d| d.property_name.clone()),
            });
        }

        match schema.schema_type.as_deref() {
            Some("object") => match &schema.additional_properties {
                Some(AdditionalPropertiesObject::Schema(values)) => Ok(TypeKind::Map {
                    values: self.reference(&format!("{}Value", hint), values)?,
                }),
                _ => Ok(TypeKind::Object {
                    properties: vec![],
                    required: vec![],
                    additional_properties: Some(AdditionalProperties::Allow),
                    discriminator: None,
                }),
            },
            Some("array") => {
                let items = match &schema.items {
                    Some(items) => self.reference(&format!("{}Item", hint), items)?,
                    None => TypeReference::primitive(PrimitiveType::Any),
                };
                Ok(TypeKind::Array {
                    items,
                    min_items: schema.min_items,
                    max_items: schema.max_items,
                    unique_items: schema.unique_items,
                })
            }
            _ => Ok(TypeKind::Primitive {
                primitive: scalar_of(schema),
                constraints: constraints_of(schema),
            }),
        }
    }

    /// Reference to a schema, hoisting inline compounds into named types
    fn reference(&mut self, hint: &str, schema: &SchemaObject) -> Result<TypeReference> {
        if let Some(ref_path) = &schema.ref_path {
            let mut reference = TypeReference::named(strip_ref(ref_path));
            if schema.nullable {
                reference = reference.nullable();
            }
            return Ok(reference);
        }

        if is_scalar(schema) {
            let mut reference = TypeReference::primitive(scalar_of(schema));
            if schema.nullable {
                reference = reference.nullable();
            }
            return Ok(reference);
        }

        self.add_named(hint, schema)?;
        let mut reference = TypeReference::named(hint);
        if schema.nullable {
            reference = reference.nullable();
        }
        Ok(reference)
    }
}

fn is_scalar(schema: &SchemaObject) -> bool {
    schema.enum_values.is_empty()
        && schema.one_of.is_empty()
        && schema.any_of.is_empty()
        && schema.properties.is_empty()
        && schema.items.is_none()
        && schema.additional_properties.is_none()
        && !matches!(schema.schema_type.as_deref(), Some("object") | Some("array"))
}

fn scalar_of(schema: &SchemaObject) -> PrimitiveType {
    match schema.schema_type.as_deref() {
        Some("string") if schema.format.as_deref() == Some("binary") => PrimitiveType::Binary,
        Some("string") => PrimitiveType::String,
        Some("integer") => PrimitiveType::Integer,
        Some("number") => PrimitiveType::Float,
        Some("boolean") => PrimitiveType::Boolean,
        Some("null") => PrimitiveType::Null,
        _ => PrimitiveType::Any,
    }
}

fn constraints_of(schema: &SchemaObject) -> Option<Constraints> {
    let constraints = Constraints {
        minimum: schema.minimum,
        maximum: schema.maximum,
        min_length: schema.min_length,
        max_length: schema.max_length,
        pattern: schema.pattern.clone(),
        enum_values: None,
    };
    if constraints.is_empty() {
        None
    } else {
        Some(constraints)
    }
}

fn strip_ref(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}

/// "finish_reason" → "FinishReason", used for hoisted type names
fn pascal_hint(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for ch in name.chars() {
        if ch == '_' || ch == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
