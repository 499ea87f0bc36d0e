//! Shared normalization pipeline
//!
//! The skeleton both normalizers follow: validate the raw document, then
//! convert it by driving the adapter's extraction hooks. Conversion failures
//! surface as rejections too; a provider document that passes the shape
//! check but cannot be extracted is still malformed input, not a caller bug.

use crate::adapter::{Rejection, ResponseAdapter, SchemaAdapter};
use chrono::Utc;
use llm_sdk_generator_common::{CanonicalSchema, SchemaMetadata, UnifiedResponse};
use rayon::prelude::*;
use serde_json::Value;
use tracing::debug;

/// Normalize a raw provider schema document into the canonical IR
pub fn normalize_schema(
    adapter: &dyn SchemaAdapter,
    raw: &Value,
) -> std::result::Result<CanonicalSchema, Rejection> {
    adapter.validate_schema(raw)?;
    debug!(provider = adapter.provider_id(), "schema accepted, converting");

    let types = adapter.extract_types(raw).map_err(conversion_rejection)?;
    let endpoints = adapter
        .extract_endpoints(raw)
        .map_err(conversion_rejection)?;
    let authentication = adapter
        .extract_auth_schemes(raw)
        .map_err(conversion_rejection)?;
    let errors = adapter.extract_errors(raw).map_err(conversion_rejection)?;

    debug!(
        provider = adapter.provider_id(),
        types = types.len(),
        endpoints = endpoints.len(),
        "conversion complete"
    );

    Ok(CanonicalSchema {
        metadata: SchemaMetadata {
            provider_id: adapter.provider_id().to_string(),
            provider_name: adapter.provider_name().to_string(),
            schema_version: adapter.schema_version(raw),
            generated_at: Utc::now(),
        },
        capabilities: adapter.capabilities(),
        types,
        endpoints,
        authentication,
        errors,
        config: None,
    })
}

/// Normalize many provider schemas concurrently
///
/// Each job produces its own `CanonicalSchema`; there is no shared mutable
/// state, so the fan-out is plain data parallelism.
pub fn normalize_schemas(
    jobs: &[(&dyn SchemaAdapter, &Value)],
) -> Vec<std::result::Result<CanonicalSchema, Rejection>> {
    jobs.par_iter()
        .map(|(adapter, raw)| normalize_schema(*adapter, *raw))
        .collect()
}

/// Normalize a raw provider response payload into the unified shape
pub fn normalize_response(
    adapter: &dyn ResponseAdapter,
    raw: &Value,
) -> std::result::Result<UnifiedResponse, Rejection> {
    adapter.validate_response(raw)?;
    debug!(provider = adapter.provider_id(), "response accepted, converting");

    Ok(UnifiedResponse {
        id: adapter.response_id(raw),
        model: adapter.extract_model_info(raw),
        messages: adapter.extract_messages(raw),
        usage: adapter.extract_usage(raw),
        stop_reason: adapter.extract_stop_reason(raw),
        error: adapter.extract_error(raw),
    })
}

fn conversion_rejection(error: llm_sdk_generator_common::GeneratorError) -> Rejection {
    Rejection::new(format!("conversion failed: {}", error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::MockSchemaAdapter;
    use llm_sdk_generator_common::ProviderCapabilities;
    use serde_json::json;

    #[test]
    fn test_rejected_schema_skips_conversion() {
        let mut adapter = MockSchemaAdapter::new();
        adapter
            .expect_validate_schema()
            .returning(|_| Err(Rejection::new("not an object")));
        // No expectations on the extraction hooks: calling any of them fails
        // the test.

        let result = normalize_schema(&adapter, &json!([]));
        assert_eq!(result.unwrap_err(), Rejection::new("not an object"));
    }

    #[test]
    fn test_accepted_schema_runs_all_extractors() {
        let mut adapter = MockSchemaAdapter::new();
        adapter.expect_validate_schema().returning(|_| Ok(()));
        adapter.expect_provider_id().return_const("mock");
        adapter.expect_provider_name().return_const("Mock Provider");
        adapter
            .expect_capabilities()
            .returning(ProviderCapabilities::default);
        adapter
            .expect_schema_version()
            .returning(|_| "v1".to_string());
        adapter.expect_extract_types().returning(|_| Ok(vec![]));
        adapter.expect_extract_endpoints().returning(|_| Ok(vec![]));
        adapter
            .expect_extract_auth_schemes()
            .returning(|_| Ok(vec![]));
        adapter.expect_extract_errors().returning(|_| Ok(vec![]));

        let schema = normalize_schema(&adapter, &json!({})).unwrap();
        assert_eq!(schema.metadata.provider_id, "mock");
        assert_eq!(schema.metadata.schema_version, "v1");
        assert!(schema.types.is_empty());
    }
}
