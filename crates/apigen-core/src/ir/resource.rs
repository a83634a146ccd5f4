use std::ops::Index;

use indexmap::IndexMap;

use super::parameter::Parameter;

/// Handle to a [`ResourceNode`] inside a [`ResourceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub(crate) usize);

/// Handle to a [`MethodRecord`] inside a [`ResourceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(pub(crate) usize);

impl ResourceId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl MethodId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One path segment (or merged group of segments) of the API's URI tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceNode {
    pub id: String,
    /// Property name under which the parent exposes this node. Empty for the root.
    pub key: String,
    /// The raw segment this node was created from, e.g. `/{id}` or `.json`.
    pub segment: String,
    /// Sanitized segment with positional placeholders, e.g. `/{0}`.
    pub relative_uri: String,
    /// One entry per placeholder in `segment`, left to right.
    pub uri_parameters: Vec<Parameter>,
    pub methods: IndexMap<String, MethodId>,
    pub description: String,
    pub parent: Option<ResourceId>,
    pub children: IndexMap<String, ResourceId>,
}

impl ResourceNode {
    pub(crate) fn new(id: String, key: String, segment: String) -> Self {
        Self {
            id,
            key,
            segment,
            relative_uri: String::new(),
            uri_parameters: Vec::new(),
            methods: IndexMap::new(),
            description: String::new(),
            parent: None,
            children: IndexMap::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A normalized method attached to a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodRecord {
    pub id: String,
    /// Language-safe name derived from the verb.
    pub key: String,
    pub method: String,
    pub protocols: Vec<String>,
    pub responses: IndexMap<String, serde_json::Value>,
    pub body: Option<serde_json::Value>,
    pub headers: IndexMap<String, Parameter>,
    pub query_parameters: IndexMap<String, Parameter>,
    pub secured_by: Vec<serde_json::Value>,
    pub description: String,
    pub resource: ResourceId,
}

/// Arena holding every resource node and method record of one run.
///
/// Children are owned through the `children` maps; `parent` and `resource` are
/// plain handles back into the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceTree {
    nodes: Vec<ResourceNode>,
    methods: Vec<MethodRecord>,
}

impl ResourceTree {
    pub const ROOT: ResourceId = ResourceId(0);

    pub(crate) fn with_root(id: String) -> Self {
        Self {
            nodes: vec![ResourceNode::new(id, String::new(), String::new())],
            methods: Vec::new(),
        }
    }

    pub fn root(&self) -> &ResourceNode {
        &self.nodes[Self::ROOT.0]
    }

    pub fn node(&self, id: ResourceId) -> &ResourceNode {
        &self.nodes[id.0]
    }

    pub fn method(&self, id: MethodId) -> &MethodRecord {
        &self.methods[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: ResourceId) -> &mut ResourceNode {
        &mut self.nodes[id.0]
    }

    /// Look up a child of `parent` by key.
    pub fn child(&self, parent: ResourceId, key: &str) -> Option<ResourceId> {
        self.nodes[parent.0].children.get(key).copied()
    }

    /// Follow a path of keys from the root.
    pub fn find(&self, keys: &[&str]) -> Option<ResourceId> {
        keys.iter()
            .try_fold(Self::ROOT, |current, key| self.child(current, key))
    }

    /// Insert `node` as `parent.children[key]` and return its handle.
    pub(crate) fn attach(
        &mut self,
        parent: ResourceId,
        key: String,
        mut node: ResourceNode,
    ) -> ResourceId {
        let id = ResourceId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.insert(key, id);
        id
    }

    pub(crate) fn push_method(&mut self, record: MethodRecord) -> MethodId {
        let id = MethodId(self.methods.len());
        self.methods.push(record);
        id
    }

    /// Number of nodes in the arena, root included, so never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl Index<ResourceId> for ResourceTree {
    type Output = ResourceNode;

    fn index(&self, id: ResourceId) -> &ResourceNode {
        self.node(id)
    }
}

impl Index<MethodId> for ResourceTree {
    type Output = MethodRecord;

    fn index(&self, id: MethodId) -> &MethodRecord {
        self.method(id)
    }
}
