use std::ops::Range;

use crate::format::FormatStrategy;

/// Run a URI through the profile's `uri` formatter and strip trailing slashes.
pub fn sanitize_uri(uri: Option<&str>, format: &FormatStrategy) -> String {
    format
        .uri(uri.unwrap_or(""))
        .trim_end_matches('/')
        .to_string()
}

/// Replace every `{name}` placeholder with its position: `/{id}/{name}` → `/{0}/{1}`.
pub fn to_indexed_template(uri: &str) -> String {
    let mut out = String::with_capacity(uri.len());
    let mut last = 0;
    for (index, (range, _)) in placeholders(uri).into_iter().enumerate() {
        out.push_str(&uri[last..range.start]);
        out.push_str(&format!("{{{index}}}"));
        last = range.end;
    }
    out.push_str(&uri[last..]);
    out
}

/// Names of the `{name}` placeholders in `uri`, left to right.
pub fn placeholder_names(uri: &str) -> Vec<&str> {
    placeholders(uri).into_iter().map(|(_, name)| name).collect()
}

/// Byte ranges (braces included) and names of well-formed placeholders.
/// A placeholder is `{`, one or more characters other than braces, then `}`.
pub(crate) fn placeholders(uri: &str) -> Vec<(Range<usize>, &str)> {
    let mut found = Vec::new();
    let mut start = None;

    for (i, ch) in uri.char_indices() {
        match ch {
            '{' => start = Some(i),
            '}' => {
                if let Some(open) = start.take()
                    && i > open + 1
                {
                    found.push((open..i + 1, &uri[open + 1..i]));
                }
            }
            _ => {}
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatOverrides;

    fn identity() -> FormatStrategy {
        FormatOverrides::default()
            .with_variable(|s| s.to_string())
            .resolve()
            .unwrap()
    }

    #[test]
    fn test_sanitize_uri_strips_trailing_slashes() {
        let format = identity();
        assert_eq!(
            sanitize_uri(Some("https://api.example.com///"), &format),
            "https://api.example.com"
        );
        assert_eq!(sanitize_uri(Some("/users"), &format), "/users");
        assert_eq!(sanitize_uri(Some("/"), &format), "");
        assert_eq!(sanitize_uri(None, &format), "");
    }

    #[test]
    fn test_sanitize_uri_applies_formatter() {
        let format = FormatOverrides::default()
            .with_variable(|s| s.to_string())
            .with_uri(|s| s.replace("{version}", "v2"))
            .resolve()
            .unwrap();
        assert_eq!(
            sanitize_uri(Some("https://example.com/{version}/"), &format),
            "https://example.com/v2"
        );
    }

    #[test]
    fn test_indexed_template() {
        assert_eq!(to_indexed_template("/{id}/{name}"), "/{0}/{1}");
        assert_eq!(to_indexed_template("/{id}/{name}"), "/{0}/{1}");
        assert_eq!(to_indexed_template("/users"), "/users");
        assert_eq!(to_indexed_template("/files{mediaTypeExtension}"), "/files{0}");
        assert_eq!(to_indexed_template("/{}"), "/{}");
    }

    #[test]
    fn test_placeholder_names() {
        assert_eq!(placeholder_names("/{a}-{b}.{c}"), vec!["a", "b", "c"]);
        assert!(placeholder_names("/plain").is_empty());
    }
}
