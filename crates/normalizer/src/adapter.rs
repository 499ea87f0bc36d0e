//! Provider adapter contracts
//!
//! One adapter per provider family. Adapters supply only extraction
//! functions; the shared pipeline in `pipeline.rs` owns the
//! validate → convert sequencing.

use llm_sdk_generator_common::{
    AuthScheme, EndpointDefinition, ErrorDefinition, ModelInfo, ProviderCapabilities,
    ResponseError, Result, StopReason, TypeDefinition, UnifiedMessage, Usage,
};
use serde_json::Value;
use std::fmt;

/// Why a raw document was not accepted
///
/// Malformed provider input is an expected, recoverable condition, so it is
/// carried as a value rather than an error type; callers may skip or log it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: String,
}

impl Rejection {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rejected: {}", self.reason)
    }
}

/// Schema-side extraction hooks for one provider family
///
/// `validate_schema` must never panic on arbitrary input; every other hook
/// is only invoked after it has accepted the document.
#[cfg_attr(test, mockall::automock)]
pub trait SchemaAdapter: Send + Sync {
    /// Stable provider identifier (e.g. "openai")
    fn provider_id(&self) -> &'static str;

    /// Human-readable provider name
    fn provider_name(&self) -> &'static str;

    /// Capabilities this provider supports, stated explicitly
    fn capabilities(&self) -> ProviderCapabilities;

    /// Cheap shape check on the raw document
    fn validate_schema(&self, raw: &Value) -> std::result::Result<(), Rejection>;

    /// Version string of the raw schema document
    fn schema_version(&self, raw: &Value) -> String;

    fn extract_types(&self, raw: &Value) -> Result<Vec<TypeDefinition>>;

    fn extract_endpoints(&self, raw: &Value) -> Result<Vec<EndpointDefinition>>;

    fn extract_auth_schemes(&self, raw: &Value) -> Result<Vec<AuthScheme>>;

    fn extract_errors(&self, raw: &Value) -> Result<Vec<ErrorDefinition>>;
}

/// Response-side extraction hooks for one provider family
///
/// Missing optional fields degrade to defaults (`StopReason::Unknown`,
/// absent usage); extraction never dereferences data `validate_response`
/// did not establish.
#[cfg_attr(test, mockall::automock)]
pub trait ResponseAdapter: Send + Sync {
    /// Stable provider identifier (e.g. "openai")
    fn provider_id(&self) -> &'static str;

    /// Cheap shape check on the raw payload
    fn validate_response(&self, raw: &Value) -> std::result::Result<(), Rejection>;

    /// Provider-assigned response id, if present
    fn response_id(&self, raw: &Value) -> Option<String>;

    fn extract_model_info(&self, raw: &Value) -> ModelInfo;

    fn extract_messages(&self, raw: &Value) -> Vec<UnifiedMessage>;

    fn extract_usage(&self, raw: &Value) -> Option<Usage>;

    fn extract_stop_reason(&self, raw: &Value) -> StopReason;

    fn extract_error(&self, raw: &Value) -> Option<ResponseError>;
}
