//! Template context construction
//!
//! Builds the serializable contexts the per-language templates render from:
//! endpoints grouped into resources by leading path segment (deterministic
//! BTreeMap order so re-generation is byte-stable), plus error, auth, and
//! method bindings resolved through the language mapper.

use llm_sdk_generator_common::{
    AuthKind, CanonicalSchema, EndpointDefinition, ResponseStatus, Result,
};
use llm_sdk_generator_mapper::LanguageMapper;
use serde::Serialize;
use std::collections::BTreeMap;

/// One endpoint rendered as a resource method
#[derive(Debug, Clone, Serialize)]
pub struct MethodContext {
    /// Method identifier in the target's casing
    pub name: String,

    pub operation_id: String,

    pub http_method: &'static str,

    pub path: String,

    pub doc: Option<String>,

    pub deprecated: bool,

    pub streaming: bool,

    pub params: Vec<ParamContext>,

    pub body: Option<BodyContext>,

    /// Rendered native return type; the language's untyped fallback when the
    /// endpoint declares no success response
    pub return_type: String,

    pub auth: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamContext {
    /// Identifier in the target's casing
    pub name: String,

    /// Name as it appears on the wire
    pub wire_name: String,

    /// The literal `{wire_name}` token substituted in path templates
    pub placeholder: String,

    /// "query", "header", or "path"
    pub location: &'static str,

    pub rendered_type: String,

    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyContext {
    pub rendered_type: String,
    pub content_type: String,
    pub required: bool,
}

/// A named type a resource module must import
#[derive(Debug, Clone, Serialize)]
pub struct TypeImport {
    pub name: String,
    pub file: String,
}

/// A group of endpoints sharing a leading path segment
#[derive(Debug, Clone, Serialize)]
pub struct ResourceContext {
    /// Group key (e.g. "chat")
    pub name: String,

    /// Resource class/struct name (e.g. "ChatResource")
    pub type_name: String,

    /// Field/attribute name on the client
    pub field_name: String,

    /// Generated file name without extension
    pub file_name: String,

    /// Named types referenced by this resource's method signatures
    pub imports: Vec<TypeImport>,

    pub has_path_params: bool,

    pub has_query_params: bool,

    pub has_header_params: bool,

    pub methods: Vec<MethodContext>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorContext {
    pub name: String,
    pub code: String,
    pub status: u16,
    pub retryable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthContext {
    pub id: String,

    /// "api_key", "bearer", "oauth2", or "basic"
    pub kind: &'static str,

    /// For api_key: "header" or "query"
    pub location: Option<&'static str>,

    /// For api_key: the parameter name on the wire
    pub param_name: Option<String>,

    /// Handler class/struct name (e.g. "ApiKeyAuth")
    pub type_name: String,

    pub file_name: String,
}

/// Extract the resource-group key from an endpoint path
///
/// The first segment that is neither a parameter nor a version marker wins,
/// so "/v1/chat/completions" groups under "chat" and
/// "v1beta/{+model}:generateContent" under the action name. The key depends
/// only on the path, never on declaration order.
pub fn resource_group(path: &str) -> String {
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        // "{+model}:generateContent" style action segments group under the
        // action name.
        if let Some((head, action)) = segment.split_once(':') {
            if (head.starts_with('{') || head.is_empty()) && !action.is_empty() {
                return llm_sdk_generator_mapper::to_snake_case(action);
            }
        }
        if segment.starts_with('{') || segment.starts_with(':') {
            continue;
        }
        if is_version_segment(segment) {
            continue;
        }
        return llm_sdk_generator_mapper::to_snake_case(segment);
    }
    "api".to_string()
}

fn is_version_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!(chars.next(), Some('v')) && chars.next().map(|c| c.is_ascii_digit()).unwrap_or(false)
}

/// Group endpoints into resources, deterministically ordered by group key
pub fn build_resources(
    schema: &CanonicalSchema,
    mapper: &dyn LanguageMapper,
) -> Result<Vec<ResourceContext>> {
    let mut groups: BTreeMap<String, Vec<&EndpointDefinition>> = BTreeMap::new();
    for endpoint in &schema.endpoints {
        groups
            .entry(resource_group(&endpoint.path))
            .or_default()
            .push(endpoint);
    }

    let naming = mapper.naming();
    let mut resources = Vec::new();
    for (name, endpoints) in groups {
        let type_name = naming.type_name(&format!("{}_resource", name));
        let mut methods = Vec::new();
        let mut imports: Vec<TypeImport> = Vec::new();
        for endpoint in endpoints {
            methods.push(build_method(schema, mapper, endpoint)?);
            collect_imports(schema, mapper, endpoint, &mut imports)?;
        }
        resources.push(ResourceContext {
            field_name: naming.property_name(&name),
            file_name: mapper.type_file_name(&type_name),
            type_name,
            name,
            imports,
            has_path_params: has_params(&methods, "path"),
            has_query_params: has_params(&methods, "query"),
            has_header_params: has_params(&methods, "header"),
            methods,
        });
    }
    Ok(resources)
}

fn has_params(methods: &[MethodContext], location: &str) -> bool {
    methods
        .iter()
        .any(|m| m.params.iter().any(|p| p.location == location))
}

/// Named types a resource's signatures reference, in first-use order
fn collect_imports(
    schema: &CanonicalSchema,
    mapper: &dyn LanguageMapper,
    endpoint: &EndpointDefinition,
    imports: &mut Vec<TypeImport>,
) -> Result<()> {
    let mut references = Vec::new();
    for parameter in &endpoint.parameters {
        references.push(&parameter.type_ref);
    }
    if let Some(body) = &endpoint.request_body {
        references.push(&body.type_ref);
    }
    for response in &endpoint.responses {
        references.push(&response.type_ref);
    }

    for reference in references {
        if let Some(type_id) = reference.type_id() {
            let definition = schema.type_by_id(type_id).ok_or_else(|| {
                llm_sdk_generator_common::GeneratorError::Generation(format!(
                    "type reference '{}' does not resolve; was the schema validated?",
                    type_id
                ))
            })?;
            let name = mapper.naming().type_name(&definition.name);
            if !imports.iter().any(|i| i.name == name) {
                imports.push(TypeImport {
                    file: mapper.type_file_name(&name),
                    name,
                });
            }
        }
    }
    Ok(())
}

fn build_method(
    schema: &CanonicalSchema,
    mapper: &dyn LanguageMapper,
    endpoint: &EndpointDefinition,
) -> Result<MethodContext> {
    let naming = mapper.naming();

    let mut params = endpoint
        .parameters
        .iter()
        .map(|parameter| {
            // Optional parameters render with the language's nullable wrapper
            // applied exactly once, even when the reference is also nullable.
            let mut reference = parameter.type_ref.clone();
            if !parameter.required {
                reference.nullable = true;
            }
            Ok(ParamContext {
                name: naming.property_name(&parameter.name),
                wire_name: parameter.name.clone(),
                placeholder: format!("{{{}}}", parameter.name),
                location: match parameter.location {
                    llm_sdk_generator_common::ParameterLocation::Query => "query",
                    llm_sdk_generator_common::ParameterLocation::Header => "header",
                    llm_sdk_generator_common::ParameterLocation::Path => "path",
                },
                rendered_type: mapper.map_type_reference(schema, &reference)?,
                required: parameter.required,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    // Required parameters precede optional ones so targets with default
    // arguments stay well-formed.
    params.sort_by_key(|p| !p.required);

    let body = endpoint
        .request_body
        .as_ref()
        .map(|body| {
            Ok::<_, llm_sdk_generator_common::GeneratorError>(BodyContext {
                rendered_type: mapper.map_type_reference(schema, &body.type_ref)?,
                content_type: body.content_type.clone(),
                required: body.required,
            })
        })
        .transpose()?;

    // The success response type: the lowest 2xx status, else the default.
    let mut success = None;
    let mut fallback = None;
    for response in &endpoint.responses {
        match response.status {
            ResponseStatus::Code(code) if (200..300).contains(&code) => {
                let entry = success.get_or_insert((code, response));
                if code < entry.0 {
                    *entry = (code, response);
                }
            }
            ResponseStatus::Default => fallback = Some(response),
            _ => {}
        }
    }
    let untyped = match mapper.language() {
        llm_sdk_generator_common::TargetLanguage::TypeScript => "unknown",
        llm_sdk_generator_common::TargetLanguage::Python => "Any",
        llm_sdk_generator_common::TargetLanguage::Go => "any",
    };
    let return_type = match success.map(|(_, r)| r).or(fallback) {
        Some(response) => mapper.map_type_reference(schema, &response.type_ref)?,
        None => untyped.to_string(),
    };

    Ok(MethodContext {
        name: naming.method_name(&endpoint.operation_id),
        operation_id: endpoint.operation_id.clone(),
        http_method: endpoint.method.as_str(),
        path: endpoint.path.clone(),
        doc: endpoint.description.clone(),
        deprecated: endpoint.deprecated,
        streaming: endpoint.streaming,
        params,
        body,
        return_type,
        auth: endpoint.authentication.clone(),
    })
}

/// Error catalog context, in declaration order
pub fn build_errors(schema: &CanonicalSchema, mapper: &dyn LanguageMapper) -> Vec<ErrorContext> {
    schema
        .errors
        .iter()
        .map(|error| ErrorContext {
            name: mapper.naming().type_name(&error.name),
            code: error.code.clone(),
            status: error.status,
            retryable: error.retryable,
        })
        .collect()
}

/// Auth handler contexts, one per declared scheme
pub fn build_auth(schema: &CanonicalSchema, mapper: &dyn LanguageMapper) -> Vec<AuthContext> {
    let naming = mapper.naming();
    schema
        .authentication
        .iter()
        .map(|scheme| {
            let (kind, location, param_name) = match &scheme.kind {
                AuthKind::ApiKey { location, name } => (
                    "api_key",
                    Some(match location {
                        llm_sdk_generator_common::ApiKeyLocation::Header => "header",
                        llm_sdk_generator_common::ApiKeyLocation::Query => "query",
                    }),
                    Some(name.clone()),
                ),
                AuthKind::Bearer => ("bearer", None, None),
                AuthKind::OAuth2 { .. } => ("oauth2", None, None),
                AuthKind::Basic => ("basic", None, None),
            };
            // "bearer_auth" stays "BearerAuth", not "BearerAuthAuth".
            let base = scheme
                .id
                .trim_end_matches("auth")
                .trim_end_matches(['_', '-']);
            let base = if base.is_empty() { scheme.id.as_str() } else { base };
            let type_name = naming.type_name(&format!("{}_auth", base));
            AuthContext {
                id: scheme.id.clone(),
                kind,
                location,
                param_name,
                file_name: mapper.type_file_name(&type_name),
                type_name,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_group_skips_versions_and_parameters() {
        assert_eq!(resource_group("/v1/chat/completions"), "chat");
        assert_eq!(resource_group("/models"), "models");
        assert_eq!(resource_group("/v1/models/{model}"), "models");
        assert_eq!(resource_group("v1beta/{+model}:generateContent"), "generate_content");
        assert_eq!(resource_group("/{id}"), "api");
    }

    #[test]
    fn test_resource_group_is_stable() {
        for _ in 0..3 {
            assert_eq!(resource_group("/v1/chat/completions"), "chat");
        }
    }
}
