pub mod parameter;
pub mod resource;
pub mod security;
pub mod spec;

use crate::error::ParseError;
use spec::Specification;

/// Parse an API description from YAML.
pub fn from_yaml(input: &str) -> Result<Specification, ParseError> {
    let spec: Specification = serde_yaml_ng::from_str(input)?;
    validate_title(&spec)?;
    Ok(spec)
}

/// Parse an API description from JSON.
pub fn from_json(input: &str) -> Result<Specification, ParseError> {
    let spec: Specification = serde_json::from_str(input)?;
    validate_title(&spec)?;
    Ok(spec)
}

fn validate_title(spec: &Specification) -> Result<(), ParseError> {
    if spec.title.trim().is_empty() {
        return Err(ParseError::MissingField("title".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_camel_case_fields() {
        let yaml = r#"
title: Example
baseUri: https://api.example.com/{version}
resources:
  - relativeUri: /users
    uriParameters: {}
    methods:
      - method: get
        queryParameters:
          page:
            type: integer
            minimum: 1
"#;
        let spec = from_yaml(yaml).unwrap();
        assert_eq!(spec.title, "Example");
        assert_eq!(
            spec.base_uri.as_deref(),
            Some("https://api.example.com/{version}")
        );
        let method = &spec.resources[0].methods[0];
        assert_eq!(method.method, "get");
        assert_eq!(method.query_parameters["page"].minimum, Some(1.0));
    }

    #[test]
    fn test_from_json() {
        let spec = from_json(r#"{"title": "Example", "version": "v1"}"#).unwrap();
        assert_eq!(spec.version.as_deref(), Some("v1"));
        assert!(spec.resources.is_empty());
    }

    #[test]
    fn test_missing_title() {
        let err = from_yaml("version: v1\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingField(ref f) if f == "title"));
    }
}
