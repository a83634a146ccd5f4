use indexmap::IndexMap;

use super::diagnostics::TreeWarning;
use super::parameter::Parameter;
use super::resource::{MethodId, MethodRecord, ResourceId, ResourceNode, ResourceTree};
use crate::parse::security::RawSecurityScheme;
use crate::parse::spec::Documentation;

/// Security schemes keyed by scheme type; the last scheme of a type wins.
pub type SecuritySchemeIndex = IndexMap<String, RawSecurityScheme>;

/// The fully normalized, renderer-ready view of one API description.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub id: String,
    pub title: String,
    pub version: Option<String>,
    pub base_uri: String,
    pub base_uri_parameters: IndexMap<String, Parameter>,
    pub security_schemes: SecuritySchemeIndex,
    pub documentation: Vec<Documentation>,
    pub tree: ResourceTree,
    /// Every node in pre-order, root first.
    pub all_resources: Vec<ResourceId>,
    /// Every reachable method in the same traversal order.
    pub all_methods: Vec<MethodId>,
    pub supported_methods: Vec<&'static str>,
    pub warnings: Vec<TreeWarning>,
}

impl GenerationContext {
    pub fn root(&self) -> &ResourceNode {
        self.tree.root()
    }

    pub fn resources(&self) -> impl Iterator<Item = &ResourceNode> {
        self.all_resources.iter().map(|&id| self.tree.node(id))
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodRecord> {
        self.all_methods.iter().map(|&id| self.tree.method(id))
    }
}
