//! End-to-end response normalization across all provider families

use llm_sdk_generator_common::{Role, StopReason};
use llm_sdk_generator_normalizer::{
    normalize_response, AnthropicAdapter, GeminiAdapter, OpenAiAdapter,
};
use serde_json::json;

#[test]
fn test_openai_completion_normalizes() {
    let payload = json!({
        "id": "chatcmpl-9x",
        "object": "chat.completion",
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "Four."},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 11, "completion_tokens": 2, "total_tokens": 13}
    });

    let response = normalize_response(&OpenAiAdapter::new(), &payload).unwrap();
    assert_eq!(response.id.as_deref(), Some("chatcmpl-9x"));
    assert_eq!(response.model.provider, "openai");
    assert_eq!(response.model.id, "gpt-4o");
    assert_eq!(response.messages[0].content, "Four.");
    assert_eq!(response.stop_reason, StopReason::EndTurn);
    assert_eq!(response.usage.unwrap().total_tokens, 13);
    assert!(response.error.is_none());
}

#[test]
fn test_anthropic_message_normalizes() {
    let payload = json!({
        "id": "msg_01ABC",
        "type": "message",
        "role": "assistant",
        "model": "claude-sonnet-4-5",
        "content": [{"type": "text", "text": "Four."}],
        "stop_reason": "max_tokens",
        "usage": {"input_tokens": 9, "output_tokens": 2}
    });

    let response = normalize_response(&AnthropicAdapter::new(), &payload).unwrap();
    assert_eq!(response.model.provider, "anthropic");
    assert_eq!(response.stop_reason, StopReason::MaxTokens);
    assert_eq!(response.usage.unwrap().total_tokens, 11);
}

#[test]
fn test_gemini_candidates_normalize() {
    let payload = json!({
        "candidates": [{
            "content": {"parts": [{"text": "Four."}], "role": "model"},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 7, "candidatesTokenCount": 2, "totalTokenCount": 9},
        "modelVersion": "gemini-2.0-flash"
    });

    let response = normalize_response(&GeminiAdapter::new(), &payload).unwrap();
    assert_eq!(response.model.provider, "gemini");
    assert_eq!(response.messages[0].role, Role::Assistant);
    assert_eq!(response.stop_reason, StopReason::EndTurn);
}

#[test]
fn test_unknown_stop_reasons_degrade_to_the_sentinel() {
    let payload = json!({
        "id": "msg_01ABC",
        "type": "message",
        "role": "assistant",
        "model": "claude-sonnet-4-5",
        "content": [{"type": "text", "text": "..."}],
        "stop_reason": "brand_new_reason"
    });

    let response = normalize_response(&AnthropicAdapter::new(), &payload).unwrap();
    assert_eq!(response.stop_reason, StopReason::Unknown);
    // Absent usage stays absent rather than becoming zeros.
    assert!(response.usage.is_none());
}

#[test]
fn test_provider_error_payloads_normalize_with_retryability() {
    let payload = json!({
        "type": "error",
        "error": {"type": "overloaded_error", "message": "Overloaded"}
    });

    let response = normalize_response(&AnthropicAdapter::new(), &payload).unwrap();
    let error = response.error.unwrap();
    assert!(error.retryable);
    assert_eq!(error.message, "Overloaded");
    assert!(response.messages.is_empty());
}

#[test]
fn test_malformed_payloads_are_rejected_never_panic() {
    let openai = OpenAiAdapter::new();
    let anthropic = AnthropicAdapter::new();
    let gemini = GeminiAdapter::new();
    let adapters: [&dyn llm_sdk_generator_normalizer::ResponseAdapter; 3] =
        [&openai, &anthropic, &gemini];
    let garbage = [json!(null), json!("text"), json!([1, 2, 3]), json!({})];

    for adapter in adapters {
        for payload in &garbage {
            assert!(normalize_response(adapter, payload).is_err());
        }
    }
}
