//! Raw Anthropic document shapes
//!
//! The schema side is a declarative endpoint manifest: a shape table plus an
//! endpoint list, in the style of an AST-serialized interface model. The
//! response side is the Messages API payload.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Endpoint manifest root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicManifest {
    /// Manifest format version (e.g. "2023-06-01")
    #[serde(rename = "manifestVersion")]
    pub manifest_version: String,

    #[serde(default)]
    pub shapes: IndexMap<String, Shape>,

    #[serde(default)]
    pub endpoints: Vec<ManifestEndpoint>,

    #[serde(default)]
    pub auth: IndexMap<String, ManifestAuth>,

    #[serde(default)]
    pub errors: Vec<ManifestError>,
}

/// One shape in the manifest's type table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    /// "structure", "list", "map", "union", "enum", or a primitive name
    #[serde(rename = "type")]
    pub shape_type: String,

    /// Members of a structure shape
    #[serde(default)]
    pub members: IndexMap<String, Member>,

    /// Required member names of a structure shape
    #[serde(default)]
    pub required: Vec<String>,

    /// Item target of a list shape
    #[serde(default)]
    pub items: Option<String>,

    /// Value target of a map shape
    #[serde(default)]
    pub values: Option<String>,

    /// Variant targets of a union shape
    #[serde(default)]
    pub variants: Vec<String>,

    #[serde(default)]
    pub discriminator: Option<ManifestDiscriminator>,

    /// Values of an enum shape
    #[serde(rename = "enum")]
    #[serde(default)]
    pub enum_values: Vec<EnumEntry>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub deprecated: bool,
}

/// One member of a structure shape; `target` names a shape or a primitive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub target: String,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub default: Option<serde_json::Value>,

    #[serde(default)]
    pub min: Option<f64>,

    #[serde(default)]
    pub max: Option<f64>,

    #[serde(default)]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestDiscriminator {
    pub property: String,

    /// Literal value → variant shape name
    #[serde(default)]
    pub mapping: IndexMap<String, String>,
}

/// Enum entry: wire value plus optional display name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumEntry {
    pub value: String,

    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEndpoint {
    pub id: String,

    #[serde(rename = "operationId")]
    pub operation_id: String,

    pub method: String,

    pub path: String,

    /// Input shape name
    #[serde(default)]
    pub input: Option<String>,

    /// Output shape name
    #[serde(default)]
    pub output: Option<String>,

    #[serde(default)]
    pub params: Vec<ManifestParam>,

    #[serde(default)]
    pub streaming: bool,

    #[serde(default)]
    pub auth: Vec<String>,

    #[serde(rename = "rateLimit")]
    #[serde(default)]
    pub rate_limit: Option<ManifestRateLimit>,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestParam {
    pub name: String,

    /// "query", "header", or "path"
    #[serde(rename = "in")]
    pub location: String,

    /// Shape or primitive name
    #[serde(default = "default_param_target")]
    pub target: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub description: Option<String>,
}

fn default_param_target() -> String {
    "string".to_string()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ManifestRateLimit {
    #[serde(rename = "requestsPerMinute")]
    pub requests_per_minute: u32,

    #[serde(default)]
    pub burst: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestAuth {
    /// "api_key", "bearer", "basic", or "oauth2"
    #[serde(rename = "type")]
    pub auth_type: String,

    /// For api_key: "header" or "query"
    #[serde(default)]
    pub location: Option<String>,

    /// For api_key: parameter name (e.g. "x-api-key")
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestError {
    pub code: String,
    pub status: u16,
    pub name: String,

    #[serde(default)]
    pub retryable: bool,

    /// Optional shape carrying the error body
    #[serde(default)]
    pub shape: Option<String>,
}

/// Messages API response payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub id: Option<String>,

    /// "message" or "error"
    #[serde(rename = "type")]
    #[serde(default)]
    pub payload_type: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub content: Vec<ContentBlock>,

    #[serde(rename = "stop_reason")]
    #[serde(default)]
    pub stop_reason: Option<String>,

    #[serde(default)]
    pub usage: Option<MessagesUsage>,

    #[serde(default)]
    pub error: Option<MessagesError>,
}

/// One content block; only text blocks carry message content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,

    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MessagesUsage {
    #[serde(rename = "input_tokens")]
    #[serde(default)]
    pub input_tokens: u64,

    #[serde(rename = "output_tokens")]
    #[serde(default)]
    pub output_tokens: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesError {
    #[serde(rename = "type")]
    #[serde(default)]
    pub error_type: Option<String>,

    #[serde(default)]
    pub message: String,
}
