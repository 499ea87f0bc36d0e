//! Anthropic provider adapter
//!
//! Schema side reads a declarative endpoint manifest (shape table plus
//! endpoint list); response side reads Messages API payloads.

mod response;
mod schema;
mod types;

use crate::adapter::{Rejection, ResponseAdapter, SchemaAdapter};
use llm_sdk_generator_common::{
    AuthScheme, EndpointDefinition, ErrorDefinition, ModelInfo, ProviderCapabilities,
    ResponseError, Result, StopReason, TypeDefinition, UnifiedMessage, Usage,
};
use serde_json::Value;

/// Adapter for the Anthropic API family
#[derive(Debug, Default)]
pub struct AnthropicAdapter;

impl AnthropicAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaAdapter for AnthropicAdapter {
    fn provider_id(&self) -> &'static str {
        "anthropic"
    }

    fn provider_name(&self) -> &'static str {
        "Anthropic"
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            streaming: true,
            tool_calls: true,
            vision: true,
            embeddings: false,
            json_mode: false,
        }
    }

    fn validate_schema(&self, raw: &Value) -> std::result::Result<(), Rejection> {
        schema::validate(raw)
    }

    fn schema_version(&self, raw: &Value) -> String {
        schema::schema_version(raw)
    }

    fn extract_types(&self, raw: &Value) -> Result<Vec<TypeDefinition>> {
        schema::extract_types(raw)
    }

    fn extract_endpoints(&self, raw: &Value) -> Result<Vec<EndpointDefinition>> {
        schema::extract_endpoints(raw)
    }

    fn extract_auth_schemes(&self, raw: &Value) -> Result<Vec<AuthScheme>> {
        schema::extract_auth_schemes(raw)
    }

    fn extract_errors(&self, raw: &Value) -> Result<Vec<ErrorDefinition>> {
        schema::extract_errors(raw)
    }
}

impl ResponseAdapter for AnthropicAdapter {
    fn provider_id(&self) -> &'static str {
        "anthropic"
    }

    fn validate_response(&self, raw: &Value) -> std::result::Result<(), Rejection> {
        response::validate(raw)
    }

    fn response_id(&self, raw: &Value) -> Option<String> {
        response::response_id(raw)
    }

    fn extract_model_info(&self, raw: &Value) -> ModelInfo {
        response::model_info(raw)
    }

    fn extract_messages(&self, raw: &Value) -> Vec<UnifiedMessage> {
        response::messages(raw)
    }

    fn extract_usage(&self, raw: &Value) -> Option<Usage> {
        response::usage(raw)
    }

    fn extract_stop_reason(&self, raw: &Value) -> StopReason {
        response::stop_reason(raw)
    }

    fn extract_error(&self, raw: &Value) -> Option<ResponseError> {
        response::error(raw)
    }
}
