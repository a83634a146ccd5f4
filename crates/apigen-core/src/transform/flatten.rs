use crate::ir::{MethodId, ResourceId, ResourceTree};

/// Every node under (and including) `from` in pre-order: a node precedes its
/// children, children follow insertion order.
pub fn flatten_resources(tree: &ResourceTree, from: ResourceId) -> Vec<ResourceId> {
    let mut out = Vec::new();
    let mut stack = vec![from];

    while let Some(id) = stack.pop() {
        out.push(id);
        stack.extend(tree[id].children.values().rev().copied());
    }

    out
}

/// Every method under `from`, in the same traversal order as
/// [`flatten_resources`]; a node's own methods come before its children's.
pub fn flatten_methods(tree: &ResourceTree, from: ResourceId) -> Vec<MethodId> {
    flatten_resources(tree, from)
        .into_iter()
        .flat_map(|id| tree[id].methods.values().copied())
        .collect()
}
