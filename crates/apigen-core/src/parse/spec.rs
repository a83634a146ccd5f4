use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::parameter::RawParameter;
use super::resource::RawResource;
use super::security::SecuritySchemeEntry;

/// A documentation section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Documentation {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Top-level API description, already parsed and validated upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specification {
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_uri: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub base_uri_parameters: IndexMap<String, RawParameter>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<RawResource>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_schemes: Vec<SecuritySchemeEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documentation: Vec<Documentation>,
}
