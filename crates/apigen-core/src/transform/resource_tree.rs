use indexmap::IndexMap;

use super::methods::sanitize_methods;
use super::parameters::{implicit_uri_parameter, sanitize_parameters};
use super::segments::{
    MEDIA_TYPE_EXTENSION, MEDIA_TYPE_EXTENSION_PARAM, derive_key, split_segments,
};
use super::uri::{placeholder_names, sanitize_uri, to_indexed_template};
use crate::format::FormatStrategy;
use crate::ids::IdAllocator;
use crate::ir::{Parameter, ResourceId, ResourceNode, ResourceTree, TreeWarning};
use crate::parse::resource::RawResource;

/// The resource tree of one run together with the places it stopped growing.
#[derive(Debug, Clone)]
pub struct BuiltTree {
    pub tree: ResourceTree,
    pub warnings: Vec<TreeWarning>,
}

/// Build the resource tree for the top-level `resources`, in input order, under a
/// fresh synthetic root.
pub fn build_resource_tree(
    resources: &[RawResource],
    format: &FormatStrategy,
    ids: &mut IdAllocator,
) -> BuiltTree {
    let root = format.unique_id(ids, "resource");
    let mut builder = TreeBuilder {
        format,
        ids,
        tree: ResourceTree::with_root(root),
        warnings: Vec::new(),
    };

    for resource in resources {
        builder.attach_resource(resource, ResourceTree::ROOT);
    }

    BuiltTree {
        tree: builder.tree,
        warnings: builder.warnings,
    }
}

struct TreeBuilder<'a> {
    format: &'a FormatStrategy,
    ids: &'a mut IdAllocator,
    tree: ResourceTree,
    warnings: Vec<TreeWarning>,
}

impl TreeBuilder<'_> {
    fn attach_resource(&mut self, resource: &RawResource, parent: ResourceId) {
        let segments = split_segments(&resource.relative_uri);
        let mut params = sanitize_parameters(&resource.uri_parameters);
        self.attach_segments(resource, &segments, &mut params, parent);
    }

    /// Walk `segments` down from `current`, creating or reusing one node per
    /// segment, then attach the resource's methods and children to the last node.
    fn attach_segments(
        &mut self,
        resource: &RawResource,
        segments: &[&str],
        params: &mut IndexMap<String, Parameter>,
        mut current: ResourceId,
    ) {
        for &segment in segments {
            let segment = if segment == MEDIA_TYPE_EXTENSION
                && self.expand_media_types(resource, params, current)
            {
                ".{mediaTypeExtension}"
            } else {
                segment
            };

            if segment == "/" {
                continue;
            }

            let Some(key) = derive_key(segment, self.format) else {
                self.warn(TreeWarning::UnmappableSegment {
                    relative_uri: resource.relative_uri.clone(),
                    segment: segment.to_string(),
                });
                return;
            };

            current = match self.tree.child(current, &key) {
                Some(existing) if self.tree[existing].segment == segment => existing,
                Some(existing) => {
                    self.warn(TreeWarning::KeyCollision {
                        key,
                        existing_segment: self.tree[existing].segment.clone(),
                        segment: segment.to_string(),
                    });
                    return;
                }
                None => self.create_node(current, key, segment, params),
            };
        }

        self.populate(current, resource);
    }

    /// Give every literal of the `mediaTypeExtension` enum its own child of
    /// `current`, then drop the enum so the templated form is documented as free
    /// text. Returns `false` when there is no enum to expand.
    fn expand_media_types(
        &mut self,
        resource: &RawResource,
        params: &mut IndexMap<String, Parameter>,
        current: ResourceId,
    ) -> bool {
        let Some(values) = params
            .get_mut(MEDIA_TYPE_EXTENSION_PARAM)
            .and_then(|param| param.enum_values.take())
            .filter(|values| !values.is_empty())
        else {
            return false;
        };

        for value in &values {
            let literal = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let segment = format!(".{}", literal.trim_start_matches('.'));
            self.attach_segments(resource, &[segment.as_str()], params, current);
        }
        true
    }

    fn create_node(
        &mut self,
        parent: ResourceId,
        key: String,
        segment: &str,
        params: &IndexMap<String, Parameter>,
    ) -> ResourceId {
        let id = self.format.unique_id(self.ids, "resource");
        let mut node = ResourceNode::new(id, key.clone(), segment.to_string());
        node.relative_uri = sanitize_uri(Some(&to_indexed_template(segment)), self.format);
        node.uri_parameters = placeholder_names(segment)
            .into_iter()
            .map(|name| {
                params
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| implicit_uri_parameter(name))
            })
            .collect();

        log::debug!("resource {} `{}` → {}", node.id, segment, node.relative_uri);
        self.tree.attach(parent, key, node)
    }

    fn populate(&mut self, current: ResourceId, resource: &RawResource) {
        let methods = sanitize_methods(&resource.methods, current, self.format, self.ids);
        for (key, record) in methods {
            let method = self.tree.push_method(record);
            self.tree.node_mut(current).methods.insert(key, method);
        }

        if let Some(description) = &resource.description {
            self.tree.node_mut(current).description = description.trim().to_string();
        }

        for child in &resource.resources {
            self.attach_resource(child, current);
        }
    }

    fn warn(&mut self, warning: TreeWarning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }
}
