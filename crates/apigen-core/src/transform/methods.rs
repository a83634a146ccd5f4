use indexmap::IndexMap;

use super::parameters::sanitize_parameters;
use crate::format::FormatStrategy;
use crate::ids::IdAllocator;
use crate::ir::{MethodRecord, ResourceId};
use crate::parse::resource::RawMethod;

/// Normalize the methods of one resource, keyed by `format.variable(verb)`.
///
/// Methods whose verbs format to the same key overwrite each other; the last one
/// declared wins and keeps the position of the first.
pub fn sanitize_methods(
    methods: &[RawMethod],
    resource: ResourceId,
    format: &FormatStrategy,
    ids: &mut IdAllocator,
) -> IndexMap<String, MethodRecord> {
    let mut out = IndexMap::new();

    for method in methods {
        let key = format.variable(&method.method);
        let record = MethodRecord {
            id: format.unique_id(ids, "method"),
            key: key.clone(),
            method: method.method.clone(),
            protocols: method.protocols.clone(),
            responses: method.responses.clone(),
            body: method.body.clone(),
            headers: sanitize_parameters(&method.headers),
            query_parameters: sanitize_parameters(&method.query_parameters),
            secured_by: method.secured_by.clone(),
            description: method.description.as_deref().unwrap_or("").trim().to_string(),
            resource,
        };

        if let Some(previous) = out.insert(key, record) {
            log::debug!(
                "method `{}` replaced by a later declaration with the same key",
                previous.method
            );
        }
    }

    out
}
