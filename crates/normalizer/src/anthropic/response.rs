//! Response-side conversion for Anthropic Messages payloads

use super::types::MessagesResponse;
use crate::adapter::Rejection;
use llm_sdk_generator_common::{ModelInfo, ResponseError, Role, StopReason, UnifiedMessage, Usage};
use serde_json::Value;

pub(super) fn validate(raw: &Value) -> std::result::Result<(), Rejection> {
    let Some(object) = raw.as_object() else {
        return Err(Rejection::new("payload is not a JSON object"));
    };
    match object.get("type").and_then(Value::as_str) {
        Some("message") => {
            if !object.get("content").map(Value::is_array).unwrap_or(false) {
                return Err(Rejection::new("message payload missing 'content' array"));
            }
            Ok(())
        }
        Some("error") => {
            if !object.get("error").map(Value::is_object).unwrap_or(false) {
                return Err(Rejection::new("error payload missing 'error' object"));
            }
            Ok(())
        }
        Some(other) => Err(Rejection::new(format!("unknown payload type '{}'", other))),
        None => Err(Rejection::new("payload missing 'type'")),
    }
}

fn parse(raw: &Value) -> Option<MessagesResponse> {
    serde_json::from_value(raw.clone()).ok()
}

pub(super) fn response_id(raw: &Value) -> Option<String> {
    parse(raw).and_then(|r| r.id)
}

pub(super) fn model_info(raw: &Value) -> ModelInfo {
    ModelInfo {
        id: parse(raw)
            .and_then(|r| r.model)
            .unwrap_or_else(|| "unknown".to_string()),
        provider: "anthropic".to_string(),
    }
}

pub(super) fn messages(raw: &Value) -> Vec<UnifiedMessage> {
    let Some(response) = parse(raw) else {
        return vec![];
    };
    if response.content.is_empty() {
        return vec![];
    }

    // Text blocks concatenate into one assistant message; non-text blocks
    // carry no message content.
    let text: String = response
        .content
        .iter()
        .filter(|block| block.block_type == "text")
        .filter_map(|block| block.text.as_deref())
        .collect();

    vec![UnifiedMessage {
        role: match response.role.as_deref() {
            Some("user") => Role::User,
            _ => Role::Assistant,
        },
        content: text,
    }]
}

pub(super) fn usage(raw: &Value) -> Option<Usage> {
    let usage = parse(raw)?.usage?;
    Some(Usage::new(usage.input_tokens, usage.output_tokens))
}

pub(super) fn stop_reason(raw: &Value) -> StopReason {
    let reason = parse(raw).and_then(|r| r.stop_reason);
    match reason.as_deref() {
        Some("end_turn") => StopReason::EndTurn,
        Some("max_tokens") => StopReason::MaxTokens,
        Some("stop_sequence") => StopReason::StopSequence,
        Some("tool_use") => StopReason::ToolUse,
        _ => StopReason::Unknown,
    }
}

pub(super) fn error(raw: &Value) -> Option<ResponseError> {
    let error = parse(raw)?.error?;
    let retryable = matches!(
        error.error_type.as_deref(),
        Some("overloaded_error") | Some("rate_limit_error") | Some("api_error")
    );
    Some(ResponseError {
        code: error.error_type,
        message: error.message,
        retryable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message() -> Value {
        json!({
            "id": "msg_01XYZ",
            "type": "message",
            "role": "assistant",
            "model": "claude-sonnet-4-5",
            "content": [
                {"type": "text", "text": "Hello"},
                {"type": "text", "text": ", world."}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 8, "output_tokens": 4}
        })
    }

    #[test]
    fn test_validate_accepts_message_and_error_payloads() {
        assert!(validate(&message()).is_ok());
        assert!(validate(&json!({
            "type": "error",
            "error": {"type": "overloaded_error", "message": "busy"}
        }))
        .is_ok());
        assert!(validate(&json!({"type": "ping"})).is_err());
        assert!(validate(&json!({"type": "message"})).is_err());
    }

    #[test]
    fn test_text_blocks_concatenate() {
        let messages = messages(&message());
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "Hello, world.");
        assert_eq!(messages[0].role, Role::Assistant);
    }

    #[test]
    fn test_stop_reason_mapping() {
        assert_eq!(stop_reason(&message()), StopReason::EndTurn);

        let mut payload = message();
        payload["stop_reason"] = json!("pause_turn");
        assert_eq!(stop_reason(&payload), StopReason::Unknown);

        payload["stop_reason"] = json!(null);
        assert_eq!(stop_reason(&payload), StopReason::Unknown);
    }

    #[test]
    fn test_usage_sums_totals() {
        let usage = usage(&message()).unwrap();
        assert_eq!(usage.input_tokens, 8);
        assert_eq!(usage.total_tokens, 12);
    }

    #[test]
    fn test_overloaded_error_is_retryable() {
        let payload = json!({
            "type": "error",
            "error": {"type": "overloaded_error", "message": "busy"}
        });
        let error = error(&payload).unwrap();
        assert!(error.retryable);
        assert_eq!(error.code.as_deref(), Some("overloaded_error"));
    }
}
