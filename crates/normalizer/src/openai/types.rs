//! Raw OpenAI document shapes
//!
//! The schema side is an OpenAPI-flavored document (paths plus component
//! schemas); the response side is the chat-completion payload. Only the
//! fields the converter reads are modeled.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// OpenAPI-flavored schema document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiSpec {
    /// OpenAPI version (e.g. "3.0.0")
    pub openapi: String,

    pub info: Info,

    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default)]
    pub components: Option<Components>,

    /// Provider error catalog extension
    #[serde(rename = "x-errors")]
    #[serde(default)]
    pub errors: Vec<RawError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Operations for one path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub get: Option<Operation>,

    #[serde(default)]
    pub post: Option<Operation>,

    #[serde(default)]
    pub put: Option<Operation>,

    #[serde(default)]
    pub patch: Option<Operation>,

    #[serde(default)]
    pub delete: Option<Operation>,
}

impl PathItem {
    /// Declared operations with their HTTP method names, in a fixed order
    pub fn operations(&self) -> Vec<(&'static str, &Operation)> {
        let mut ops = Vec::new();
        if let Some(op) = &self.get {
            ops.push(("GET", op));
        }
        if let Some(op) = &self.post {
            ops.push(("POST", op));
        }
        if let Some(op) = &self.put {
            ops.push(("PUT", op));
        }
        if let Some(op) = &self.patch {
            ops.push(("PATCH", op));
        }
        if let Some(op) = &self.delete {
            ops.push(("DELETE", op));
        }
        ops
    }
}

/// One HTTP operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    pub operation_id: String,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(rename = "requestBody")]
    #[serde(default)]
    pub request_body: Option<RequestBody>,

    #[serde(default)]
    pub responses: IndexMap<String, Response>,

    #[serde(default)]
    pub deprecated: bool,

    /// Streaming marker extension; the converter also infers streaming from
    /// a "stream" property on the request schema
    #[serde(rename = "x-streaming")]
    #[serde(default)]
    pub streaming: bool,

    /// Security requirements: list of {scheme_name: scopes}
    #[serde(default)]
    pub security: Vec<IndexMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    /// Location: query, header, path
    #[serde(rename = "in")]
    pub location: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub schema: Option<SchemaObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    pub content: IndexMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<SchemaObject>,
}

/// JSON-schema-flavored type description
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaObject {
    #[serde(rename = "type")]
    #[serde(default)]
    pub schema_type: Option<String>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub properties: IndexMap<String, SchemaObject>,

    #[serde(default)]
    pub required: Vec<String>,

    #[serde(rename = "additionalProperties")]
    #[serde(default)]
    pub additional_properties: Option<AdditionalPropertiesObject>,

    #[serde(default)]
    pub items: Option<Box<SchemaObject>>,

    #[serde(rename = "minItems")]
    #[serde(default)]
    pub min_items: Option<u64>,

    #[serde(rename = "maxItems")]
    #[serde(default)]
    pub max_items: Option<u64>,

    #[serde(rename = "uniqueItems")]
    #[serde(default)]
    pub unique_items: bool,

    #[serde(rename = "oneOf")]
    #[serde(default)]
    pub one_of: Vec<SchemaObject>,

    #[serde(rename = "anyOf")]
    #[serde(default)]
    pub any_of: Vec<SchemaObject>,

    #[serde(default)]
    pub discriminator: Option<Discriminator>,

    #[serde(rename = "enum")]
    #[serde(default)]
    pub enum_values: Vec<serde_json::Value>,

    #[serde(default)]
    pub default: Option<serde_json::Value>,

    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_path: Option<String>,

    #[serde(default)]
    pub minimum: Option<f64>,

    #[serde(default)]
    pub maximum: Option<f64>,

    #[serde(rename = "minLength")]
    #[serde(default)]
    pub min_length: Option<u64>,

    #[serde(rename = "maxLength")]
    #[serde(default)]
    pub max_length: Option<u64>,

    #[serde(default)]
    pub pattern: Option<String>,
}

/// additionalProperties accepts a boolean or a schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalPropertiesObject {
    Flag(bool),
    Schema(Box<SchemaObject>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discriminator {
    #[serde(rename = "propertyName")]
    pub property_name: String,

    /// Literal value → "#/components/schemas/X"
    #[serde(default)]
    pub mapping: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaObject>,

    #[serde(rename = "securitySchemes")]
    #[serde(default)]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityScheme {
    /// "http", "apiKey", or "oauth2"
    #[serde(rename = "type")]
    pub scheme_type: String,

    /// For http: "bearer" or "basic"
    #[serde(default)]
    pub scheme: Option<String>,

    /// For apiKey: "header" or "query"
    #[serde(rename = "in")]
    #[serde(default)]
    pub location: Option<String>,

    /// For apiKey: parameter name
    #[serde(default)]
    pub name: Option<String>,

    /// For oauth2: flow name → flow description
    #[serde(default)]
    pub flows: IndexMap<String, RawOAuthFlow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOAuthFlow {
    #[serde(rename = "authorizationUrl")]
    #[serde(default)]
    pub authorization_url: Option<String>,

    #[serde(rename = "tokenUrl")]
    #[serde(default)]
    pub token_url: Option<String>,

    #[serde(default)]
    pub scopes: IndexMap<String, String>,
}

/// Entry of the x-errors catalog extension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawError {
    pub code: String,
    pub status: u16,
    pub name: String,

    #[serde(default)]
    pub retryable: bool,
}

/// Chat-completion response payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub choices: Vec<Choice>,

    #[serde(default)]
    pub usage: Option<ChatUsage>,

    #[serde(default)]
    pub error: Option<ChatError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,

    #[serde(default)]
    pub message: Option<ChatMessage>,

    #[serde(rename = "finish_reason")]
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,

    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatUsage {
    #[serde(rename = "prompt_tokens")]
    #[serde(default)]
    pub prompt_tokens: u64,

    #[serde(rename = "completion_tokens")]
    #[serde(default)]
    pub completion_tokens: u64,

    #[serde(rename = "total_tokens")]
    #[serde(default)]
    pub total_tokens: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatError {
    #[serde(default)]
    pub message: String,

    #[serde(rename = "type")]
    #[serde(default)]
    pub error_type: Option<String>,

    #[serde(default)]
    pub code: Option<String>,
}
