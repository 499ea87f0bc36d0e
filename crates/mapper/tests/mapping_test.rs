//! Cross-target mapping properties: nullability, discriminator fidelity,
//! naming determinism

use indexmap::IndexMap;
use llm_sdk_generator_common::{
    CanonicalSchema, PrimitiveType, PropertyDefinition, ProviderCapabilities, SchemaMetadata,
    TargetLanguage, TypeDefinition, TypeKind, TypeReference, UnionDiscriminator,
};
use llm_sdk_generator_mapper::mapper_for;

const ALL_LANGUAGES: [TargetLanguage; 3] = [
    TargetLanguage::TypeScript,
    TargetLanguage::Python,
    TargetLanguage::Go,
];

fn schema_with(types: Vec<TypeDefinition>) -> CanonicalSchema {
    CanonicalSchema {
        metadata: SchemaMetadata {
            provider_id: "test".into(),
            provider_name: "Test".into(),
            schema_version: "v1".into(),
            generated_at: chrono::DateTime::from_timestamp(0, 0).unwrap(),
        },
        capabilities: ProviderCapabilities::default(),
        types,
        endpoints: vec![],
        authentication: vec![],
        errors: vec![],
        config: None,
    }
}

fn object(id: &str, properties: Vec<PropertyDefinition>, required: Vec<&str>) -> TypeDefinition {
    TypeDefinition {
        id: id.into(),
        name: id.into(),
        kind: TypeKind::Object {
            properties,
            required: required.into_iter().map(String::from).collect(),
            additional_properties: None,
            discriminator: None,
        },
        description: None,
        deprecated: None,
    }
}

fn property(name: &str, type_ref: TypeReference, required: bool) -> PropertyDefinition {
    PropertyDefinition {
        name: name.into(),
        type_ref,
        required,
        default: None,
        constraints: None,
        deprecated: false,
        description: None,
    }
}

/// The `User {id required, bio optional}` scenario: every target renders `id`
/// non-nullable and `bio` nullable/optional.
#[test]
fn test_user_scenario_across_all_targets() {
    let schema = schema_with(vec![object(
        "User",
        vec![
            property("id", TypeReference::primitive(PrimitiveType::String), true),
            property("bio", TypeReference::primitive(PrimitiveType::String), false),
        ],
        vec!["id"],
    )]);

    for language in ALL_LANGUAGES {
        let mapper = mapper_for(language);
        let mapped = mapper.map_type(&schema, &schema.types[0]).unwrap();
        assert_eq!(mapped.name, "User");

        match language {
            TargetLanguage::TypeScript => {
                assert!(mapped.code.contains("id: string;"));
                assert!(mapped.code.contains("bio?: string;"));
            }
            TargetLanguage::Python => {
                assert!(mapped.code.contains("id: str"));
                assert!(mapped.code.contains("bio: Optional[str] = None"));
            }
            TargetLanguage::Go => {
                assert!(mapped.code.contains("Id string `json:\"id\"`"));
                assert!(mapped.code.contains("Bio *string `json:\"bio,omitempty\"`"));
            }
        }
    }
}

/// Discriminator literals survive mapping for every target's union strategy.
#[test]
fn test_discriminator_literals_round_trip_in_every_target() {
    let mut mapping = IndexMap::new();
    mapping.insert("text".to_string(), "TextBlock".to_string());
    mapping.insert("tool_use".to_string(), "ToolUseBlock".to_string());

    let schema = schema_with(vec![
        object(
            "TextBlock",
            vec![property("type", TypeReference::primitive(PrimitiveType::String), true)],
            vec!["type"],
        ),
        object(
            "ToolUseBlock",
            vec![property("type", TypeReference::primitive(PrimitiveType::String), true)],
            vec!["type"],
        ),
        TypeDefinition {
            id: "ContentBlock".into(),
            name: "ContentBlock".into(),
            kind: TypeKind::Union {
                variants: vec![
                    TypeReference::named("TextBlock"),
                    TypeReference::named("ToolUseBlock"),
                ],
                discriminator: Some(UnionDiscriminator {
                    property_name: "type".into(),
                    mapping,
                }),
            },
            description: None,
            deprecated: None,
        },
    ]);

    for language in ALL_LANGUAGES {
        let mapper = mapper_for(language);
        let mapped = mapper.map_type(&schema, &schema.types[2]).unwrap();
        // The discriminator property name appears verbatim in each rendering.
        assert!(
            mapped.code.contains("type") || mapped.code.contains("\"type\""),
            "{:?} lost the discriminator property",
            language
        );
        match language {
            TargetLanguage::Go => {
                assert!(mapped.code.contains("\"tool_use\""));
            }
            _ => {
                // TS and Python unions reference the variants; the literal
                // lives in the variants' discriminator fields.
                assert!(mapped.code.contains("ToolUseBlock"));
            }
        }
    }
}

/// Naming functions are pure: same input, same output, within and across
/// mapper instances.
#[test]
fn test_naming_determinism_across_instances() {
    let inputs = ["stop_reason", "createChatCompletion", "HTTPServer", "models.generateContent"];
    for language in ALL_LANGUAGES {
        let first = mapper_for(language);
        let second = mapper_for(language);
        for input in inputs {
            assert_eq!(first.naming().type_name(input), second.naming().type_name(input));
            assert_eq!(first.naming().method_name(input), second.naming().method_name(input));
            assert_eq!(first.naming().package_name(input), second.naming().package_name(input));
        }
    }
}

/// Nullable + optional never double-wraps in any target.
#[test]
fn test_no_double_wrapping_of_nullability() {
    let schema = schema_with(vec![object(
        "Doc",
        vec![property(
            "note",
            TypeReference::primitive(PrimitiveType::String).nullable(),
            false,
        )],
        vec![],
    )]);

    let typescript = mapper_for(TargetLanguage::TypeScript)
        .map_type(&schema, &schema.types[0])
        .unwrap();
    assert!(typescript.code.contains("note?: string | null;"));
    assert_eq!(typescript.code.matches("| null").count(), 1);

    let python = mapper_for(TargetLanguage::Python)
        .map_type(&schema, &schema.types[0])
        .unwrap();
    assert!(!python.code.contains("Optional[Optional"));

    let golang = mapper_for(TargetLanguage::Go)
        .map_type(&schema, &schema.types[0])
        .unwrap();
    assert!(golang.code.contains("*string"));
    assert!(!golang.code.contains("**string"));
}
