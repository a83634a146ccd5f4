use super::uri::placeholders;
use crate::format::FormatStrategy;

/// Placeholder that, at the end of a relative URI, stands for a media type
/// extension such as `.json`.
pub const MEDIA_TYPE_EXTENSION: &str = "{mediaTypeExtension}";

/// Name of the URI parameter declaring the allowed media type extensions.
pub const MEDIA_TYPE_EXTENSION_PARAM: &str = "mediaTypeExtension";

/// Split a relative URI before every `.` and `/`, and before a trailing
/// `{mediaTypeExtension}`. Delimiters stay at the front of their part:
/// `/users/{id}.json` → `["/users", "/{id}", ".json"]`.
pub fn split_segments(uri: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;

    for (i, ch) in uri.char_indices() {
        if i == 0 {
            continue;
        }
        if ch == '.' || ch == '/' || &uri[i..] == MEDIA_TYPE_EXTENSION {
            parts.push(&uri[start..i]);
            start = i;
        }
    }

    if start < uri.len() {
        parts.push(&uri[start..]);
    }

    parts
}

/// Derive the property name for a segment.
///
/// After dropping one leading `.` or `/`, the segment must either be a single
/// placeholder (`{id}` → `id`) or literal text followed only by placeholders
/// (`users{id}` → `users`). Anything else has no key.
pub fn derive_key(segment: &str, format: &FormatStrategy) -> Option<String> {
    let rest = segment.strip_prefix(['.', '/']).unwrap_or(segment);
    let found = placeholders(rest);

    if let [(range, name)] = found.as_slice()
        && range.start == 0
        && range.end == rest.len()
    {
        return Some(format.variable(name));
    }

    let literal_end = found.first().map_or(rest.len(), |(range, _)| range.start);
    let literal = &rest[..literal_end];
    if literal.is_empty() || literal.contains(['{', '}']) {
        return None;
    }

    // Everything after the literal must be back-to-back placeholders.
    let mut cursor = literal_end;
    for (range, _) in &found {
        if range.start != cursor {
            return None;
        }
        cursor = range.end;
    }
    if cursor != rest.len() {
        return None;
    }

    Some(format.variable(literal))
}
