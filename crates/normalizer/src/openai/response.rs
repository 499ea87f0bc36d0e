//! Response-side conversion for OpenAI chat-completion payloads

use super::types::ChatCompletion;
use crate::adapter::Rejection;
use llm_sdk_generator_common::{ModelInfo, ResponseError, Role, StopReason, UnifiedMessage, Usage};
use serde_json::Value;

pub(super) fn validate(raw: &Value) -> std::result::Result<(), Rejection> {
    let Some(object) = raw.as_object() else {
        return Err(Rejection::new("payload is not a JSON object"));
    };
    let has_choices = object.get("choices").map(Value::is_array).unwrap_or(false);
    let has_error = object.get("error").map(Value::is_object).unwrap_or(false);
    if !has_choices && !has_error {
        return Err(Rejection::new("payload has neither 'choices' nor 'error'"));
    }
    Ok(())
}

fn parse(raw: &Value) -> Option<ChatCompletion> {
    serde_json::from_value(raw.clone()).ok()
}

pub(super) fn response_id(raw: &Value) -> Option<String> {
    parse(raw).and_then(|c| c.id)
}

pub(super) fn model_info(raw: &Value) -> ModelInfo {
    ModelInfo {
        id: parse(raw)
            .and_then(|c| c.model)
            .unwrap_or_else(|| "unknown".to_string()),
        provider: "openai".to_string(),
    }
}

pub(super) fn messages(raw: &Value) -> Vec<UnifiedMessage> {
    let Some(completion) = parse(raw) else {
        return vec![];
    };
    completion
        .choices
        .iter()
        .filter_map(|choice| choice.message.as_ref())
        .map(|message| UnifiedMessage {
            role: role_of(&message.role),
            content: message.content.clone().unwrap_or_default(),
        })
        .collect()
}

fn role_of(role: &str) -> Role {
    match role {
        "system" | "developer" => Role::System,
        "user" => Role::User,
        "tool" | "function" => Role::Tool,
        _ => Role::Assistant,
    }
}

pub(super) fn usage(raw: &Value) -> Option<Usage> {
    let completion = parse(raw)?;
    let usage = completion.usage?;
    Some(Usage {
        input_tokens: usage.prompt_tokens,
        output_tokens: usage.completion_tokens,
        total_tokens: usage
            .total_tokens
            .unwrap_or(usage.prompt_tokens + usage.completion_tokens),
    })
}

pub(super) fn stop_reason(raw: &Value) -> StopReason {
    let reason = parse(raw).and_then(|completion| {
        completion
            .choices
            .first()
            .and_then(|choice| choice.finish_reason.clone())
    });
    match reason.as_deref() {
        Some("stop") => StopReason::EndTurn,
        Some("length") => StopReason::MaxTokens,
        Some("content_filter") => StopReason::ContentFilter,
        Some("tool_calls") | Some("function_call") => StopReason::ToolUse,
        _ => StopReason::Unknown,
    }
}

pub(super) fn error(raw: &Value) -> Option<ResponseError> {
    let completion = parse(raw)?;
    let error = completion.error?;
    let retryable = matches!(
        error.error_type.as_deref(),
        Some("rate_limit_error") | Some("server_error") | Some("overloaded_error")
    );
    Some(ResponseError {
        code: error.code.or(error.error_type),
        message: error.message,
        retryable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn completion() -> Value {
        json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": "gpt-4o",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello there."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17}
        })
    }

    #[test]
    fn test_validate_requires_choices_or_error() {
        assert!(validate(&completion()).is_ok());
        assert!(validate(&json!({"error": {"message": "boom"}})).is_ok());
        assert!(validate(&json!({"object": "chat.completion"})).is_err());
        assert!(validate(&json!("nope")).is_err());
    }

    #[test]
    fn test_extracts_assistant_message() {
        let messages = messages(&completion());
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::Assistant);
        assert_eq!(messages[0].content, "Hello there.");
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(stop_reason(&completion()), StopReason::EndTurn);

        let mut truncated = completion();
        truncated["choices"][0]["finish_reason"] = json!("length");
        assert_eq!(stop_reason(&truncated), StopReason::MaxTokens);

        let mut odd = completion();
        odd["choices"][0]["finish_reason"] = json!("galaxy_brain");
        assert_eq!(stop_reason(&odd), StopReason::Unknown);
    }

    #[test]
    fn test_usage_totals_fall_back_to_sum() {
        let mut payload = completion();
        payload["usage"] = json!({"prompt_tokens": 3, "completion_tokens": 4});
        let usage = usage(&payload).unwrap();
        assert_eq!(usage.total_tokens, 7);
    }

    #[test]
    fn test_error_envelope() {
        let payload = json!({
            "error": {"message": "Rate limit reached", "type": "rate_limit_error"}
        });
        let error = error(&payload).unwrap();
        assert!(error.retryable);
        assert_eq!(error.code.as_deref(), Some("rate_limit_error"));
    }
}
