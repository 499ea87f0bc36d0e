//! Response-side conversion for Gemini generateContent payloads

use super::types::GenerateContentResponse;
use crate::adapter::Rejection;
use llm_sdk_generator_common::{ModelInfo, ResponseError, Role, StopReason, UnifiedMessage, Usage};
use serde_json::Value;

pub(super) fn validate(raw: &Value) -> std::result::Result<(), Rejection> {
    let Some(object) = raw.as_object() else {
        return Err(Rejection::new("payload is not a JSON object"));
    };
    let has_candidates = object.get("candidates").map(Value::is_array).unwrap_or(false);
    let has_error = object.get("error").map(Value::is_object).unwrap_or(false);
    if !has_candidates && !has_error {
        return Err(Rejection::new("payload has neither 'candidates' nor 'error'"));
    }
    Ok(())
}

fn parse(raw: &Value) -> Option<GenerateContentResponse> {
    serde_json::from_value(raw.clone()).ok()
}

pub(super) fn response_id(raw: &Value) -> Option<String> {
    parse(raw).and_then(|r| r.response_id)
}

pub(super) fn model_info(raw: &Value) -> ModelInfo {
    ModelInfo {
        id: parse(raw)
            .and_then(|r| r.model_version)
            .unwrap_or_else(|| "unknown".to_string()),
        provider: "gemini".to_string(),
    }
}

pub(super) fn messages(raw: &Value) -> Vec<UnifiedMessage> {
    let Some(response) = parse(raw) else {
        return vec![];
    };
    response
        .candidates
        .iter()
        .filter_map(|candidate| candidate.content.as_ref())
        .map(|content| UnifiedMessage {
            role: match content.role.as_deref() {
                Some("user") => Role::User,
                _ => Role::Assistant,
            },
            content: content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect(),
        })
        .collect()
}

pub(super) fn usage(raw: &Value) -> Option<Usage> {
    let usage = parse(raw)?.usage_metadata?;
    Some(Usage {
        input_tokens: usage.prompt_token_count,
        output_tokens: usage.candidates_token_count,
        total_tokens: usage
            .total_token_count
            .unwrap_or(usage.prompt_token_count + usage.candidates_token_count),
    })
}

pub(super) fn stop_reason(raw: &Value) -> StopReason {
    let reason = parse(raw).and_then(|response| {
        response
            .candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.clone())
    });
    match reason.as_deref() {
        Some("STOP") => StopReason::EndTurn,
        Some("MAX_TOKENS") => StopReason::MaxTokens,
        Some("SAFETY") | Some("RECITATION") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT")
        | Some("SPII") => StopReason::ContentFilter,
        _ => StopReason::Unknown,
    }
}

pub(super) fn error(raw: &Value) -> Option<ResponseError> {
    let error = parse(raw)?.error?;
    let retryable = matches!(
        error.status.as_deref(),
        Some("RESOURCE_EXHAUSTED") | Some("UNAVAILABLE") | Some("INTERNAL")
    ) || matches!(error.code, Some(429) | Some(500) | Some(503));
    Some(ResponseError {
        code: error.status,
        message: error.message,
        retryable,
    })
}
