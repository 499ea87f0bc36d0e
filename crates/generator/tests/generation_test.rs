//! Integration tests for package generation across target languages

use llm_sdk_generator_common::{
    CanonicalSchema, EndpointDefinition, ErrorDefinition, GenerationConfig, HttpMethod,
    PrimitiveType, PropertyDefinition, ProviderCapabilities, RequestBody, ResponseDefinition,
    ResponseStatus, SchemaMetadata, TargetLanguage, TypeDefinition, TypeKind, TypeReference,
};
use llm_sdk_generator_generator::{generate_package, ClientGenerator, FileKind};

fn fixture_schema() -> CanonicalSchema {
    CanonicalSchema {
        metadata: SchemaMetadata {
            provider_id: "acme".into(),
            provider_name: "Acme AI".into(),
            schema_version: "v2".into(),
            generated_at: chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        },
        capabilities: ProviderCapabilities {
            streaming: true,
            ..Default::default()
        },
        types: vec![
            TypeDefinition {
                id: "User".into(),
                name: "User".into(),
                kind: TypeKind::Object {
                    properties: vec![
                        PropertyDefinition {
                            name: "id".into(),
                            type_ref: TypeReference::primitive(PrimitiveType::String),
                            required: true,
                            default: None,
                            constraints: None,
                            deprecated: false,
                            description: None,
                        },
                        PropertyDefinition {
                            name: "bio".into(),
                            type_ref: TypeReference::primitive(PrimitiveType::String),
                            required: false,
                            default: None,
                            constraints: None,
                            deprecated: false,
                            description: None,
                        },
                    ],
                    required: vec!["id".into()],
                    additional_properties: None,
                    discriminator: None,
                },
                description: Some("An account".into()),
                deprecated: None,
            },
            TypeDefinition {
                id: "UserList".into(),
                name: "UserList".into(),
                kind: TypeKind::Array {
                    items: TypeReference::named("User"),
                    min_items: None,
                    max_items: None,
                    unique_items: false,
                },
                description: None,
                deprecated: None,
            },
        ],
        endpoints: vec![
            EndpointDefinition {
                id: "GET /v1/users".into(),
                operation_id: "listUsers".into(),
                method: HttpMethod::Get,
                path: "/v1/users".into(),
                parameters: vec![],
                request_body: None,
                responses: vec![ResponseDefinition {
                    status: ResponseStatus::Code(200),
                    type_ref: TypeReference::named("UserList"),
                    headers: vec![],
                }],
                streaming: false,
                authentication: vec!["bearer_auth".into()],
                rate_limit: None,
                deprecated: false,
                description: Some("List all users".into()),
            },
            EndpointDefinition {
                id: "POST /v1/users".into(),
                operation_id: "createUser".into(),
                method: HttpMethod::Post,
                path: "/v1/users".into(),
                parameters: vec![],
                request_body: Some(RequestBody {
                    type_ref: TypeReference::named("User"),
                    content_type: "application/json".into(),
                    required: true,
                }),
                responses: vec![ResponseDefinition {
                    status: ResponseStatus::Code(201),
                    type_ref: TypeReference::named("User"),
                    headers: vec![],
                }],
                streaming: true,
                authentication: vec!["bearer_auth".into()],
                rate_limit: None,
                deprecated: false,
                description: None,
            },
        ],
        authentication: vec![llm_sdk_generator_common::AuthScheme {
            id: "bearer_auth".into(),
            kind: llm_sdk_generator_common::AuthKind::Bearer,
        }],
        errors: vec![ErrorDefinition {
            code: "rate_limit_error".into(),
            status: 429,
            name: "RateLimitError".into(),
            type_ref: None,
            retryable: true,
        }],
        config: None,
    }
}

#[test]
fn test_typescript_package_has_one_file_per_type() {
    let schema = fixture_schema();
    let config = GenerationConfig::new(TargetLanguage::TypeScript, "acme-client");
    let package = generate_package(&schema, config).unwrap();

    // Exactly one generated file declares the naming-transformed User type.
    let declaring: Vec<_> = package
        .files
        .iter()
        .filter(|f| f.content.contains("export interface User "))
        .collect();
    assert_eq!(declaring.len(), 1);
    assert_eq!(declaring[0].path, "src/types/user.ts");

    assert!(package.file("src/types/user-list.ts").is_some());
    assert!(package.file("src/client.ts").is_some());
    assert!(package.file("src/errors.ts").is_some());
    assert!(package.file("src/auth/bearer-auth.ts").is_some());
}

#[test]
fn test_resource_grouping_and_methods() {
    let schema = fixture_schema();
    let config = GenerationConfig::new(TargetLanguage::TypeScript, "acme-client");
    let package = generate_package(&schema, config).unwrap();

    let resource = package.file("src/resources/users-resource.ts").unwrap();
    assert!(resource.content.contains("export class UsersResource"));
    assert!(resource.content.contains("async listUsers("));
    assert!(resource.content.contains("async createUser(body: User"));
    assert!(resource.content.contains("stream: true"));

    let client = package.file("src/client.ts").unwrap();
    assert!(client.content.contains("this.users = new UsersResource(transport);"));
}

#[test]
fn test_generation_is_idempotent() {
    let schema = fixture_schema();
    let config = GenerationConfig::new(TargetLanguage::Python, "acme-client");

    let first = generate_package(&schema, config.clone()).unwrap();
    let second = generate_package(&schema, config).unwrap();

    assert_eq!(first.files.len(), second.files.len());
    for (a, b) in first.files.iter().zip(second.files.iter()) {
        assert_eq!(a.path, b.path);
        assert_eq!(a.content, b.content, "content drift in {}", a.path);
    }
    assert_eq!(first.metadata, second.metadata);
}

#[test]
fn test_feature_flags_gate_utilities() {
    let schema = fixture_schema();

    let mut config = GenerationConfig::new(TargetLanguage::TypeScript, "acme-client");
    config.features.include_retry = false;
    config.features.include_rate_limiting = Some(false);
    config.features.include_streaming = Some(false);
    let package = generate_package(&schema, config).unwrap();
    assert!(package.file("src/retry.ts").is_none());
    assert!(package.file("src/rate-limit.ts").is_none());
    assert!(package.file("src/streaming.ts").is_none());

    // Streaming defaults to the provider capability when left unset.
    let config = GenerationConfig::new(TargetLanguage::TypeScript, "acme-client");
    let package = generate_package(&schema, config).unwrap();
    assert!(package.file("src/streaming.ts").is_some());
    assert!(package.file("src/retry.ts").is_some());
}

#[test]
fn test_streaming_capability_off_suppresses_streaming_module() {
    let mut schema = fixture_schema();
    schema.capabilities.streaming = false;
    let config = GenerationConfig::new(TargetLanguage::TypeScript, "acme-client");
    let package = generate_package(&schema, config).unwrap();
    assert!(package.file("src/streaming.ts").is_none());
}

#[test]
fn test_docs_tests_examples_flags() {
    let schema = fixture_schema();

    let config = GenerationConfig::new(TargetLanguage::TypeScript, "acme-client");
    let package = generate_package(&schema, config).unwrap();
    assert!(package.file("README.md").is_some());
    assert!(package.file("tests/client.test.ts").is_some());
    // Examples default off.
    assert!(package.file("examples/basic.ts").is_none());

    let mut config = GenerationConfig::new(TargetLanguage::TypeScript, "acme-client");
    config.features.generate_docs = false;
    config.features.generate_tests = false;
    config.features.generate_examples = true;
    let package = generate_package(&schema, config).unwrap();
    assert!(package.file("README.md").is_none());
    assert!(package.file("tests/client.test.ts").is_none());
    assert!(package.file("examples/basic.ts").is_some());
}

#[test]
fn test_file_kinds_are_assigned() {
    let schema = fixture_schema();
    let config = GenerationConfig::new(TargetLanguage::TypeScript, "acme-client");
    let package = generate_package(&schema, config).unwrap();

    assert_eq!(package.file("package.json").unwrap().kind, FileKind::Config);
    assert_eq!(package.file("README.md").unwrap().kind, FileKind::Doc);
    assert_eq!(package.file("tests/client.test.ts").unwrap().kind, FileKind::Test);
    assert_eq!(package.file("src/client.ts").unwrap().kind, FileKind::Source);
}

#[test]
fn test_python_package_layout() {
    let schema = fixture_schema();
    let config = GenerationConfig::new(TargetLanguage::Python, "acme-client");
    let package = generate_package(&schema, config).unwrap();

    assert!(package.file("acme_client/models/user.py").is_some());
    assert!(package.file("acme_client/models/__init__.py").is_some());
    assert!(package.file("acme_client/resources/users_resource.py").is_some());
    assert!(package.file("acme_client/client.py").is_some());
    assert!(package.file("acme_client/__init__.py").is_some());
    assert!(package.file("pyproject.toml").is_some());

    let resource = package.file("acme_client/resources/users_resource.py").unwrap();
    assert!(resource.content.contains("def list_users(self)"));
    assert!(resource.content.contains("from ..models.user import User"));
}

#[test]
fn test_go_package_layout() {
    let schema = fixture_schema();
    let config = GenerationConfig::new(TargetLanguage::Go, "acme-client");
    let package = generate_package(&schema, config).unwrap();

    assert!(package.file("model_user.go").is_some());
    assert!(package.file("client.go").is_some());
    assert!(package.file("go.mod").is_some());

    let resource = package.file("resource_users_resource.go").unwrap();
    assert!(resource.content.contains("func (r *UsersResource) ListUsers(ctx context.Context)"));
    assert!(resource.content.contains("package acmeclient"));
}

#[test]
fn test_metadata_describes_build_surface() {
    let schema = fixture_schema();
    let config = GenerationConfig::new(TargetLanguage::TypeScript, "acme-client");
    let package = generate_package(&schema, config).unwrap();

    assert_eq!(package.metadata.package_name, "acme-client");
    assert_eq!(package.metadata.version, "0.1.0");
    assert!(package.metadata.dev_dependencies.contains(&"vitest".to_string()));
    assert_eq!(package.metadata.scripts.get("test").map(String::as_str), Some("vitest run"));
}

#[test]
fn test_invalid_schema_is_refused() {
    let mut schema = fixture_schema();
    // Second endpoint reuses the first operationId.
    schema.endpoints[1].operation_id = "listUsers".into();

    let config = GenerationConfig::new(TargetLanguage::TypeScript, "acme-client");
    let error = match ClientGenerator::new(&schema, config) {
        Ok(_) => panic!("expected validation to refuse the schema"),
        Err(error) => error,
    };
    assert!(error.to_string().contains("duplicate_operation_id"));
}
