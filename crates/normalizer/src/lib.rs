//! Provider normalization for the LLM SDK Generator
//!
//! This crate converts raw provider API descriptions into the canonical IR
//! (`CanonicalSchema`) and, symmetrically, raw provider responses into the
//! unified runtime shape (`UnifiedResponse`).
//!
//! ## Normalization Strategy
//!
//! Both directions share one pipeline skeleton: `validate` the raw document
//! (boolean-plus-reason, never a panic), then `convert` by calling the
//! adapter's extraction hooks. Each provider family supplies only those
//! hooks:
//!
//! - `openai` reads OpenAPI-flavored schema documents and chat-completion
//!   payloads
//! - `anthropic` reads declarative endpoint manifests and Messages API
//!   payloads
//! - `gemini` reads Discovery-flavored documents and generateContent
//!   payloads

mod adapter;
mod anthropic;
mod gemini;
mod openai;
mod pipeline;

pub use adapter::{Rejection, ResponseAdapter, SchemaAdapter};
pub use anthropic::AnthropicAdapter;
pub use gemini::GeminiAdapter;
pub use openai::OpenAiAdapter;
pub use pipeline::{normalize_response, normalize_schema, normalize_schemas};

use llm_sdk_generator_common::Result;

/// Look up the schema adapter for a provider id
///
/// Returns `Unsupported` for ids no adapter claims.
pub fn adapter_for(provider_id: &str) -> Result<Box<dyn SchemaAdapter>> {
    match provider_id {
        "openai" => Ok(Box::new(OpenAiAdapter::new())),
        "anthropic" => Ok(Box::new(AnthropicAdapter::new())),
        "gemini" => Ok(Box::new(GeminiAdapter::new())),
        other => Err(llm_sdk_generator_common::GeneratorError::Unsupported(
            format!("no schema adapter registered for provider '{}'", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_registry_knows_all_providers() {
        for id in ["openai", "anthropic", "gemini"] {
            assert!(adapter_for(id).is_ok(), "missing adapter for {}", id);
        }
        assert!(adapter_for("cohere").is_err());
    }
}
