//! Canonical intermediate representation for provider API schemas
//!
//! Every provider adapter normalizes its raw schema document into a
//! `CanonicalSchema`. The document is constructed once per generation run,
//! validated once, and read-only from then on; the mapper and generator
//! only ever borrow it.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root of the canonical IR
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalSchema {
    /// Provider identity and schema provenance
    pub metadata: SchemaMetadata,

    /// Explicit provider capability flags
    #[serde(default)]
    pub capabilities: ProviderCapabilities,

    /// Type table; every `TypeReference` points into this by id
    #[serde(default)]
    pub types: Vec<TypeDefinition>,

    /// API endpoints
    #[serde(default)]
    pub endpoints: Vec<EndpointDefinition>,

    /// Declared authentication schemes
    #[serde(default)]
    pub authentication: Vec<AuthScheme>,

    /// Provider error catalog
    #[serde(default)]
    pub errors: Vec<ErrorDefinition>,

    /// Free-form provider configuration
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}

impl CanonicalSchema {
    /// Look up a type definition by id
    pub fn type_by_id(&self, id: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.id == id)
    }

    /// Look up an authentication scheme by id
    pub fn auth_scheme(&self, id: &str) -> Option<&AuthScheme> {
        self.authentication.iter().find(|a| a.id == id)
    }
}

/// Provider identity and schema provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMetadata {
    /// Provider identifier (e.g. "openai", "anthropic")
    pub provider_id: String,

    /// Human-readable provider name
    pub provider_name: String,

    /// Version of the provider schema this document was normalized from
    pub schema_version: String,

    /// When the normalizer produced this document
    pub generated_at: DateTime<Utc>,
}

/// Explicit capability flags for a provider
///
/// Unsupported or partial capabilities are stated here, never implied by
/// omitting fields elsewhere in the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderCapabilities {
    pub streaming: bool,
    pub tool_calls: bool,
    pub vision: bool,
    pub embeddings: bool,
    pub json_mode: bool,
}

/// A named type in the schema's type table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    /// Unique id within the schema
    pub id: String,

    /// Declared name, as spelled by the provider
    pub name: String,

    /// The kind-specific payload
    pub kind: TypeKind,

    #[serde(default)]
    pub description: Option<String>,

    /// Deprecation note, if the provider marked the type deprecated
    #[serde(default)]
    pub deprecated: Option<String>,
}

/// Tagged union over type kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeKind {
    /// Scalar with optional constraints
    Primitive {
        primitive: PrimitiveType,
        #[serde(default)]
        constraints: Option<Constraints>,
    },

    /// Nominal aggregate with ordered properties
    Object {
        properties: Vec<PropertyDefinition>,
        /// Names of properties that must be present; validated as a subset
        /// of `properties`
        #[serde(default)]
        required: Vec<String>,
        #[serde(default)]
        additional_properties: Option<AdditionalProperties>,
        #[serde(default)]
        discriminator: Option<String>,
    },

    /// Ordered homogeneous container
    Array {
        items: TypeReference,
        #[serde(default)]
        min_items: Option<u64>,
        #[serde(default)]
        max_items: Option<u64>,
        #[serde(default)]
        unique_items: bool,
    },

    /// String-keyed associative container
    Map { values: TypeReference },

    /// Closed set of alternative representations
    Union {
        variants: Vec<TypeReference>,
        #[serde(default)]
        discriminator: Option<UnionDiscriminator>,
    },

    /// Closed value set with display names
    Enum { values: Vec<EnumValue> },
}

/// Scalar kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Integer,
    Float,
    Boolean,
    Null,
    Any,
    Binary,
}

/// Value constraints on a primitive or property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Constraints {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
    /// Restriction to a fixed set of literal values
    pub enum_values: Option<Vec<serde_json::Value>>,
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        self.minimum.is_none()
            && self.maximum.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
            && self.enum_values.is_none()
    }
}

/// Policy for object properties beyond the declared ones
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdditionalProperties {
    /// Any extra properties are allowed
    Allow,
    /// No extra properties
    Deny,
    /// Extra properties must match the given type
    Typed(TypeReference),
}

/// One property of an object type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub name: String,

    #[serde(rename = "type")]
    pub type_ref: TypeReference,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub default: Option<serde_json::Value>,

    #[serde(default)]
    pub constraints: Option<Constraints>,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub description: Option<String>,
}

/// A reference to a type: a primitive or a pointer into the type table,
/// never an embedded copy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeReference {
    #[serde(flatten)]
    pub target: ReferenceTarget,

    /// Whether an explicit null is a legal value at this position
    #[serde(default)]
    pub nullable: bool,
}

/// Target of a type reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceTarget {
    /// An inline primitive
    Primitive(PrimitiveType),

    /// A pointer to a `TypeDefinition.id`
    TypeId(String),
}

impl TypeReference {
    /// Reference to an inline primitive
    pub fn primitive(primitive: PrimitiveType) -> Self {
        Self {
            target: ReferenceTarget::Primitive(primitive),
            nullable: false,
        }
    }

    /// Reference to a named type by id
    pub fn named(type_id: impl Into<String>) -> Self {
        Self {
            target: ReferenceTarget::TypeId(type_id.into()),
            nullable: false,
        }
    }

    /// Same reference with the nullable flag set
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// The referenced type id, if this points into the type table
    pub fn type_id(&self) -> Option<&str> {
        match &self.target {
            ReferenceTarget::TypeId(id) => Some(id),
            ReferenceTarget::Primitive(_) => None,
        }
    }
}

/// Discriminator for a union type
///
/// `mapping` associates each discriminator literal with the variant it
/// selects; insertion order is preserved so generated match arms are stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionDiscriminator {
    /// Name of the field whose literal value selects the variant
    pub property_name: String,

    /// Literal value → type id of the selected variant
    #[serde(default)]
    pub mapping: IndexMap<String, String>,
}

/// One value of an enum type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    /// Wire value, preserved byte-for-byte
    pub value: String,

    /// Display name used for generated identifiers
    pub display_name: String,
}

/// An API endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDefinition {
    pub id: String,

    /// Globally unique operation identifier
    pub operation_id: String,

    pub method: HttpMethod,

    /// Path template, e.g. "/v1/chat/completions"
    pub path: String,

    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,

    #[serde(default)]
    pub request_body: Option<RequestBody>,

    #[serde(default)]
    pub responses: Vec<ResponseDefinition>,

    /// Whether the endpoint can stream its response
    #[serde(default)]
    pub streaming: bool,

    /// Ids of authentication schemes accepted by this endpoint
    #[serde(default)]
    pub authentication: Vec<String>,

    #[serde(default)]
    pub rate_limit: Option<RateLimitSpec>,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub description: Option<String>,
}

/// HTTP methods used by provider APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Where a request parameter is carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
}

/// One request parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
    pub name: String,

    pub location: ParameterLocation,

    #[serde(rename = "type")]
    pub type_ref: TypeReference,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub description: Option<String>,
}

/// Request body description
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(rename = "type")]
    pub type_ref: TypeReference,

    /// Content type, e.g. "application/json"
    pub content_type: String,

    #[serde(default)]
    pub required: bool,
}

/// Status selector for a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// A concrete HTTP status code
    Code(u16),
    /// Fallback for any undeclared status
    Default,
}

/// One declared endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDefinition {
    pub status: ResponseStatus,

    #[serde(rename = "type")]
    pub type_ref: TypeReference,

    #[serde(default)]
    pub headers: Vec<HeaderDefinition>,
}

/// A response header of interest (e.g. rate-limit headers)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderDefinition {
    pub name: String,

    #[serde(rename = "type")]
    pub type_ref: TypeReference,
}

/// Declared authentication scheme, referenced from endpoints by id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthScheme {
    pub id: String,

    #[serde(flatten)]
    pub kind: AuthKind,
}

/// Tagged union over authentication mechanisms
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AuthKind {
    /// Static key in a header or query parameter
    ApiKey {
        location: ApiKeyLocation,
        /// Header or query parameter name, e.g. "x-api-key"
        name: String,
    },

    /// Bearer token in the Authorization header
    Bearer,

    /// OAuth2 with one or more flows
    #[serde(rename = "oauth2")]
    OAuth2 { flows: Vec<OAuthFlow> },

    /// HTTP basic auth
    Basic,
}

/// Where an API key is carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Header,
    Query,
}

/// One OAuth2 flow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlow {
    /// Flow name, e.g. "clientCredentials"
    pub flow: String,

    #[serde(default)]
    pub authorization_url: Option<String>,

    #[serde(default)]
    pub token_url: Option<String>,

    /// Scope name → description, in declaration order
    #[serde(default)]
    pub scopes: IndexMap<String, String>,
}

/// One provider error in the error catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDefinition {
    /// Machine-readable error code, e.g. "rate_limit_exceeded"
    pub code: String,

    /// HTTP status this error is reported with
    pub status: u16,

    /// Generated error type name
    pub name: String,

    #[serde(rename = "type")]
    #[serde(default)]
    pub type_ref: Option<TypeReference>,

    #[serde(default)]
    pub retryable: bool,
}

/// Declared rate limit for an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitSpec {
    pub requests_per_minute: u32,

    #[serde(default)]
    pub burst: Option<u32>,
}
