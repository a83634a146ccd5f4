//! Template-facing views over the [`GenerationContext`] arena.
//!
//! Views resolve attributes lazily, so `resource.parent.parent.key` walks the
//! arena instead of a copied tree. `parent` and `resource` are reachable by name
//! but are not enumerated, which keeps serialization (e.g. `stringify`) acyclic.

use std::sync::Arc;

use indexmap::IndexMap;
use minijinja::value::{Enumerator, Object, Value};

use crate::ir::{GenerationContext, MethodId, ResourceId, ResourceTree};

/// The root template context.
#[derive(Debug)]
pub(crate) struct ContextView {
    ctx: Arc<GenerationContext>,
    options: Value,
}

impl ContextView {
    pub(crate) fn value(ctx: Arc<GenerationContext>, options: Value) -> Value {
        Value::from_object(ContextView { ctx, options })
    }
}

impl Object for ContextView {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let ctx = &self.ctx;
        let value = match key.as_str()? {
            "id" => Value::from(ctx.id.clone()),
            "title" => Value::from(ctx.title.clone()),
            "version" => Value::from(ctx.version.clone()),
            "base_uri" => Value::from(ctx.base_uri.clone()),
            "base_uri_parameters" => Value::from_serialize(&ctx.base_uri_parameters),
            "security_schemes" => Value::from_serialize(&ctx.security_schemes),
            "documentation" => Value::from_serialize(&ctx.documentation),
            "resources" => ResourceView::value(ctx, ResourceTree::ROOT),
            "all_resources" => Value::from(
                ctx.all_resources
                    .iter()
                    .map(|&id| ResourceView::value(ctx, id))
                    .collect::<Vec<_>>(),
            ),
            "all_methods" => Value::from(
                ctx.all_methods
                    .iter()
                    .map(|&id| MethodView::value(ctx, id))
                    .collect::<Vec<_>>(),
            ),
            "supported_methods" => Value::from(ctx.supported_methods.clone()),
            "options" => self.options.clone(),
            _ => return None,
        };
        Some(value)
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        Enumerator::Str(&[
            "id",
            "title",
            "version",
            "base_uri",
            "base_uri_parameters",
            "security_schemes",
            "documentation",
            "resources",
            "all_resources",
            "all_methods",
            "supported_methods",
            "options",
        ])
    }
}

#[derive(Debug)]
struct ResourceView {
    ctx: Arc<GenerationContext>,
    id: ResourceId,
}

impl ResourceView {
    fn value(ctx: &Arc<GenerationContext>, id: ResourceId) -> Value {
        Value::from_object(ResourceView {
            ctx: Arc::clone(ctx),
            id,
        })
    }
}

impl Object for ResourceView {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let ctx = &self.ctx;
        let node = ctx.tree.node(self.id);
        let value = match key.as_str()? {
            "id" => Value::from(node.id.clone()),
            "key" => Value::from(node.key.clone()),
            "relative_uri" => Value::from(node.relative_uri.clone()),
            "uri_parameters" => Value::from_serialize(&node.uri_parameters),
            "description" => Value::from(node.description.clone()),
            "methods" => OrderedMap::value(
                node.methods
                    .iter()
                    .map(|(key, &id)| (key.clone(), MethodView::value(ctx, id)))
                    .collect(),
            ),
            "children" => OrderedMap::value(
                node.children
                    .iter()
                    .map(|(key, &id)| (key.clone(), ResourceView::value(ctx, id)))
                    .collect(),
            ),
            "parent" => node
                .parent
                .map(|parent| ResourceView::value(ctx, parent))
                .unwrap_or(Value::from(())),
            _ => return None,
        };
        Some(value)
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        Enumerator::Str(&[
            "id",
            "key",
            "relative_uri",
            "uri_parameters",
            "description",
            "methods",
            "children",
        ])
    }
}

#[derive(Debug)]
struct MethodView {
    ctx: Arc<GenerationContext>,
    id: MethodId,
}

impl MethodView {
    fn value(ctx: &Arc<GenerationContext>, id: MethodId) -> Value {
        Value::from_object(MethodView {
            ctx: Arc::clone(ctx),
            id,
        })
    }
}

impl Object for MethodView {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let method = self.ctx.tree.method(self.id);
        let value = match key.as_str()? {
            "id" => Value::from(method.id.clone()),
            "key" => Value::from(method.key.clone()),
            "method" => Value::from(method.method.clone()),
            "protocols" => Value::from_serialize(&method.protocols),
            "responses" => Value::from_serialize(&method.responses),
            "body" => Value::from_serialize(&method.body),
            "headers" => Value::from_serialize(&method.headers),
            "query_parameters" => Value::from_serialize(&method.query_parameters),
            "secured_by" => Value::from_serialize(&method.secured_by),
            "description" => Value::from(method.description.clone()),
            "resource" => ResourceView::value(&self.ctx, method.resource),
            _ => return None,
        };
        Some(value)
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        Enumerator::Str(&[
            "id",
            "key",
            "method",
            "protocols",
            "responses",
            "body",
            "headers",
            "query_parameters",
            "secured_by",
            "description",
        ])
    }
}

/// A map that iterates in insertion order.
#[derive(Debug)]
struct OrderedMap(IndexMap<String, Value>);

impl OrderedMap {
    fn value(entries: IndexMap<String, Value>) -> Value {
        Value::from_object(OrderedMap(entries))
    }
}

impl Object for OrderedMap {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        self.0.get(key.as_str()?).cloned()
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        Enumerator::Values(self.0.keys().map(|k| Value::from(k.clone())).collect())
    }
}
