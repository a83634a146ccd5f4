use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A security scheme definition, e.g. `OAuth 2.0` or `Basic Authentication`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub settings: IndexMap<String, serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub described_by: Option<serde_json::Value>,
}

/// One entry of the `securitySchemes` list: scheme name → definition.
pub type SecuritySchemeEntry = IndexMap<String, RawSecurityScheme>;
