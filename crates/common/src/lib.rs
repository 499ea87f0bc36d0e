//! Common types and utilities for the LLM SDK Generator
//!
//! This crate contains the canonical intermediate representation (IR) that
//! every provider schema is normalized into, the validator that gates it,
//! the unified runtime-response model, and the generation configuration
//! shared across the normalizer, mapper, and generator components.

mod config;
mod response;
mod schema;
mod validation;

pub use config::{FeatureFlags, GenerationConfig, PackageInfo, TargetLanguage};
pub use response::{
    ModelInfo, ResponseError, Role, StopReason, UnifiedMessage, UnifiedResponse, Usage,
};
pub use schema::{
    AdditionalProperties, ApiKeyLocation, AuthKind, AuthScheme, CanonicalSchema, Constraints,
    EndpointDefinition, EnumValue, ErrorDefinition, HeaderDefinition, HttpMethod, OAuthFlow,
    ParameterDefinition, ParameterLocation, PrimitiveType, PropertyDefinition,
    ProviderCapabilities, RateLimitSpec, ReferenceTarget, RequestBody, ResponseDefinition,
    ResponseStatus, SchemaMetadata, TypeDefinition, TypeKind, TypeReference, UnionDiscriminator,
};
pub use validation::{ValidationCode, ValidationError, ValidationFailure, ValidationResult, Validator};

use thiserror::Error;

/// Errors that can occur during SDK generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Schema validation failed: {0}")]
    Validation(ValidationFailure),

    #[error("Unsupported construct: {0}")]
    Unsupported(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
