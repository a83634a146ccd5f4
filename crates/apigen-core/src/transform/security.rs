use crate::ir::SecuritySchemeIndex;
use crate::parse::security::SecuritySchemeEntry;

/// Index security schemes by their type. When several schemes share a type the
/// last one declared is kept.
pub fn collect_security_schemes(entries: &[SecuritySchemeEntry]) -> SecuritySchemeIndex {
    let mut index = SecuritySchemeIndex::new();
    for scheme in entries.iter().flat_map(|entry| entry.values()) {
        index.insert(scheme.scheme_type.clone(), scheme.clone());
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::security::RawSecurityScheme;
    use indexmap::IndexMap;

    fn entry(name: &str, scheme_type: &str, description: &str) -> SecuritySchemeEntry {
        let mut map = IndexMap::new();
        map.insert(
            name.to_string(),
            RawSecurityScheme {
                scheme_type: scheme_type.to_string(),
                description: Some(description.to_string()),
                settings: IndexMap::new(),
                described_by: None,
            },
        );
        map
    }

    #[test]
    fn test_index_by_type_last_wins() {
        let entries = vec![
            entry("oauth_2_0", "OAuth 2.0", "first"),
            entry("basic", "Basic Authentication", "basic"),
            entry("oauth_alt", "OAuth 2.0", "second"),
        ];
        let index = collect_security_schemes(&entries);
        assert_eq!(index.len(), 2);
        assert_eq!(index["OAuth 2.0"].description.as_deref(), Some("second"));
        assert!(index.contains_key("Basic Authentication"));
    }

    #[test]
    fn test_empty() {
        assert!(collect_security_schemes(&[]).is_empty());
    }
}
