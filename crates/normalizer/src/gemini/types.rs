//! Raw Gemini document shapes
//!
//! The schema side is a Discovery-style REST description (JSON Schema
//! draft-3 with Google extensions); the response side is the
//! generateContent payload.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Discovery-style REST description root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiDiscovery {
    /// Document kind marker (e.g. "discovery#restDescription")
    #[serde(default)]
    pub kind: Option<String>,

    pub name: String,

    pub version: String,

    #[serde(default)]
    pub schemas: IndexMap<String, DiscoverySchema>,

    #[serde(default)]
    pub resources: IndexMap<String, DiscoveryResource>,

    /// Root-level methods, rare
    #[serde(default)]
    pub methods: IndexMap<String, DiscoveryMethod>,

    #[serde(default)]
    pub auth: Option<DiscoveryAuth>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryAuth {
    #[serde(default)]
    pub oauth2: Option<DiscoveryOAuth2>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryOAuth2 {
    #[serde(default)]
    pub scopes: IndexMap<String, DiscoveryScope>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryScope {
    pub description: String,
}

/// Schema (data type) definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoverySchema {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(rename = "type")]
    #[serde(default)]
    pub schema_type: Option<String>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub properties: IndexMap<String, DiscoverySchema>,

    #[serde(rename = "additionalProperties")]
    #[serde(default)]
    pub additional_properties: Option<Box<DiscoverySchema>>,

    #[serde(default)]
    pub items: Option<Box<DiscoverySchema>>,

    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_schema: Option<String>,

    #[serde(rename = "enum")]
    #[serde(default)]
    pub enum_values: Vec<String>,

    #[serde(default)]
    pub required: Vec<String>,

    #[serde(default)]
    pub minimum: Option<String>,

    #[serde(default)]
    pub maximum: Option<String>,

    #[serde(default)]
    pub pattern: Option<String>,
}

/// Resource: a collection of methods, possibly nested
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryResource {
    #[serde(default)]
    pub methods: IndexMap<String, DiscoveryMethod>,

    #[serde(default)]
    pub resources: IndexMap<String, DiscoveryResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryMethod {
    /// Dotted method id (e.g. "models.generateContent")
    pub id: String,

    pub path: String,

    #[serde(rename = "httpMethod")]
    pub http_method: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: IndexMap<String, DiscoveryParameter>,

    #[serde(default)]
    pub request: Option<SchemaRef>,

    #[serde(default)]
    pub response: Option<SchemaRef>,

    #[serde(default)]
    pub scopes: Vec<String>,

    #[serde(default)]
    pub deprecated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaRef {
    #[serde(rename = "$ref")]
    pub ref_schema: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryParameter {
    #[serde(rename = "type")]
    #[serde(default)]
    pub param_type: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// "query" or "path"
    #[serde(default)]
    pub location: Option<String>,
}

/// generateContent response payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    #[serde(rename = "usageMetadata")]
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,

    #[serde(rename = "modelVersion")]
    #[serde(default)]
    pub model_version: Option<String>,

    #[serde(rename = "responseId")]
    #[serde(default)]
    pub response_id: Option<String>,

    #[serde(default)]
    pub error: Option<GeminiError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,

    #[serde(rename = "finishReason")]
    #[serde(default)]
    pub finish_reason: Option<String>,

    #[serde(default)]
    pub index: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,

    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    #[serde(default)]
    pub prompt_token_count: u64,

    #[serde(rename = "candidatesTokenCount")]
    #[serde(default)]
    pub candidates_token_count: u64,

    #[serde(rename = "totalTokenCount")]
    #[serde(default)]
    pub total_token_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiError {
    #[serde(default)]
    pub code: Option<u16>,

    #[serde(default)]
    pub message: String,

    /// gRPC-style status (e.g. "RESOURCE_EXHAUSTED")
    #[serde(default)]
    pub status: Option<String>,
}
