//! Unified runtime response model
//!
//! The response-side counterpart of the canonical schema: every provider's
//! chat/completion payload normalizes into a `UnifiedResponse`. Fields a
//! provider does not report degrade to explicit defaults (`StopReason::Unknown`,
//! absent usage), never to a panic.

use serde::{Deserialize, Serialize};

/// A provider response normalized into one shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedResponse {
    /// Provider-assigned response id, if any
    #[serde(default)]
    pub id: Option<String>,

    pub model: ModelInfo,

    #[serde(default)]
    pub messages: Vec<UnifiedMessage>,

    #[serde(default)]
    pub usage: Option<Usage>,

    pub stop_reason: StopReason,

    /// Error payload, when the provider returned an error response
    #[serde(default)]
    pub error: Option<ResponseError>,
}

/// Which model produced a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Model identifier as reported by the provider
    pub id: String,

    /// Provider identifier (e.g. "anthropic")
    pub provider: String,
}

/// One message in a normalized response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedMessage {
    pub role: Role,
    pub content: String,
}

/// Message roles shared across providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// Token accounting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

impl Usage {
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}

/// Why generation stopped
///
/// `Unknown` is the sentinel for stop reasons this normalizer does not
/// recognize; adapters must never map an unrecognized value to anything else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
    ToolUse,
    ContentFilter,
    #[default]
    Unknown,
}

/// Error payload carried in a provider error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseError {
    #[serde(default)]
    pub code: Option<String>,

    pub message: String,

    #[serde(default)]
    pub retryable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_totals() {
        let usage = Usage::new(120, 30);
        assert_eq!(usage.total_tokens, 150);
    }

    #[test]
    fn test_stop_reason_defaults_to_unknown() {
        assert_eq!(StopReason::default(), StopReason::Unknown);
    }

    #[test]
    fn test_stop_reason_serializes_snake_case() {
        let json = serde_json::to_string(&StopReason::MaxTokens).unwrap();
        assert_eq!(json, "\"max_tokens\"");
    }
}
