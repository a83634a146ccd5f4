use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::parameter::RawParameter;

/// A resource as described by the upstream parser. Resources nest through
/// `resources`; the `relative_uri` is relative to the enclosing resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResource {
    #[serde(default)]
    pub relative_uri: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub uri_parameters: IndexMap<String, RawParameter>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<RawMethod>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<RawResource>,
}

/// A method (HTTP verb) on a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMethod {
    pub method: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub protocols: Vec<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, RawParameter>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub query_parameters: IndexMap<String, RawParameter>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secured_by: Vec<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
