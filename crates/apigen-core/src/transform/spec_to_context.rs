use super::flatten::{flatten_methods, flatten_resources};
use super::parameters::sanitize_parameters;
use super::resource_tree::{BuiltTree, build_resource_tree};
use super::security::collect_security_schemes;
use super::uri::sanitize_uri;
use crate::format::FormatStrategy;
use crate::ids::IdAllocator;
use crate::ir::{GenerationContext, HttpMethod, ResourceTree};
use crate::parse::spec::Specification;

/// Normalize a specification into a [`GenerationContext`] using a fresh
/// identifier allocator.
pub fn build_context(spec: &Specification, format: &FormatStrategy) -> GenerationContext {
    build_context_with(spec, format, &mut IdAllocator::new())
}

/// Normalize a specification with a caller-owned allocator, which is reset first
/// so identifiers are reproducible for the same input.
pub fn build_context_with(
    spec: &Specification,
    format: &FormatStrategy,
    ids: &mut IdAllocator,
) -> GenerationContext {
    ids.reset();

    // The client id is allocated before any resource so it is always `client0`
    // under the default allocator.
    let id = format.unique_id(ids, "client");
    let security_schemes = collect_security_schemes(&spec.security_schemes);
    let BuiltTree { tree, warnings } = build_resource_tree(&spec.resources, format, ids);

    let all_resources = flatten_resources(&tree, ResourceTree::ROOT);
    let all_methods = flatten_methods(&tree, ResourceTree::ROOT);
    log::debug!(
        "context {id}: {} resources, {} methods, {} warnings",
        all_resources.len(),
        all_methods.len(),
        warnings.len()
    );

    GenerationContext {
        id,
        title: spec.title.clone(),
        version: spec.version.clone(),
        base_uri: sanitize_uri(spec.base_uri.as_deref(), format),
        base_uri_parameters: sanitize_parameters(&spec.base_uri_parameters),
        security_schemes,
        documentation: spec.documentation.clone(),
        tree,
        all_resources,
        all_methods,
        supported_methods: HttpMethod::ALL.iter().map(HttpMethod::verb).collect(),
        warnings,
    }
}
