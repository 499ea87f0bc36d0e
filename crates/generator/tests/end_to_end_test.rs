//! Full pipeline: raw provider document → normalizer → validator → parallel
//! generation for every target language

use llm_sdk_generator_common::{GenerationConfig, TargetLanguage, Validator};
use llm_sdk_generator_generator::generate_targets;
use llm_sdk_generator_normalizer::{normalize_schema, OpenAiAdapter};
use serde_json::json;

fn openai_doc() -> serde_json::Value {
    json!({
        "openapi": "3.0.0",
        "info": {"title": "OpenAI API", "version": "2.3.0"},
        "paths": {
            "/chat/completions": {
                "post": {
                    "operationId": "createChatCompletion",
                    "description": "Create a chat completion",
                    "requestBody": {
                        "required": true,
                        "content": {"application/json": {
                            "schema": {"$ref": "#/components/schemas/CreateChatCompletionRequest"}
                        }}
                    },
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": {"application/json": {
                                "schema": {"$ref": "#/components/schemas/ChatCompletion"}
                            }}
                        }
                    },
                    "security": [{"bearer_auth": []}]
                }
            }
        },
        "components": {
            "schemas": {
                "CreateChatCompletionRequest": {
                    "type": "object",
                    "properties": {
                        "model": {"type": "string"},
                        "stream": {"type": "boolean"},
                        "role": {"type": "string", "enum": ["system", "user", "assistant"]}
                    },
                    "required": ["model"]
                },
                "ChatCompletion": {
                    "type": "object",
                    "properties": {"id": {"type": "string"}},
                    "required": ["id"]
                }
            },
            "securitySchemes": {
                "bearer_auth": {"type": "http", "scheme": "bearer"}
            }
        }
    })
}

#[test]
fn test_raw_document_to_three_generated_packages() -> anyhow::Result<()> {
    let adapter = OpenAiAdapter::new();
    let schema = normalize_schema(&adapter, &openai_doc())
        .map_err(|rejection| anyhow::anyhow!("{}", rejection))?;
    assert!(Validator::validate(&schema).valid);

    let configs = vec![
        GenerationConfig::new(TargetLanguage::TypeScript, "openai-client"),
        GenerationConfig::new(TargetLanguage::Python, "openai-client"),
        GenerationConfig::new(TargetLanguage::Go, "openai-client"),
    ];

    let packages = generate_targets(&schema, &configs)?;
    assert_eq!(packages.len(), 3);

    let typescript = &packages[0];
    assert!(typescript.file("src/types/create-chat-completion-request.ts").is_some());
    assert!(typescript
        .file("src/resources/chat-resource.ts")
        .unwrap()
        .content
        .contains("async createChatCompletion("));
    // The provider streams, so the streaming utility is emitted by default.
    assert!(typescript.file("src/streaming.ts").is_some());

    let python = &packages[1];
    assert!(python.file("openai_client/models/chat_completion.py").is_some());
    assert!(python
        .file("openai_client/resources/chat_resource.py")
        .unwrap()
        .content
        .contains("def create_chat_completion(self, body:"));

    let golang = &packages[2];
    assert!(golang.file("model_chat_completion.go").is_some());
    assert!(golang
        .file("resource_chat_resource.go")
        .unwrap()
        .content
        .contains("func (r *ChatResource) CreateChatCompletion(ctx context.Context, body CreateChatCompletionRequest)"));
    Ok(())
}

#[test]
fn test_hoisted_enum_is_generated_for_every_target() {
    let adapter = OpenAiAdapter::new();
    let schema = normalize_schema(&adapter, &openai_doc()).unwrap();

    // The inline role enum was hoisted during normalization.
    assert!(schema.type_by_id("CreateChatCompletionRequestRole").is_some());

    let configs = vec![
        GenerationConfig::new(TargetLanguage::TypeScript, "openai-client"),
        GenerationConfig::new(TargetLanguage::Python, "openai-client"),
        GenerationConfig::new(TargetLanguage::Go, "openai-client"),
    ];
    let packages = generate_targets(&schema, &configs).unwrap();

    assert!(packages[0]
        .file("src/types/create-chat-completion-request-role.ts")
        .unwrap()
        .content
        .contains("Assistant = \"assistant\""));
    assert!(packages[1]
        .file("openai_client/models/create_chat_completion_request_role.py")
        .unwrap()
        .content
        .contains("ASSISTANT = \"assistant\""));
    assert!(packages[2]
        .file("model_create_chat_completion_request_role.go")
        .unwrap()
        .content
        .contains("CreateChatCompletionRequestRoleAssistant"));
}
