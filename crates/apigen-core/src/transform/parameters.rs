use indexmap::IndexMap;

use crate::ir::Parameter;
use crate::parse::parameter::RawParameter;

/// Normalize one parameter declared under `name`.
///
/// A parameter without a `default` but with a non-empty `enum` defaults to the
/// first enum value.
pub fn sanitize_parameter(name: &str, raw: &RawParameter) -> Parameter {
    let default = raw.default.clone().or_else(|| {
        raw.enum_values
            .as_ref()
            .and_then(|values| values.first().cloned())
    });

    Parameter {
        name: name.to_string(),
        display_name: raw.display_name.clone().unwrap_or_else(|| name.to_string()),
        param_type: raw.param_type.clone().unwrap_or_else(|| "string".to_string()),
        enum_values: raw.enum_values.clone(),
        pattern: raw.pattern.clone(),
        min_length: raw.min_length,
        max_length: raw.max_length,
        minimum: raw.minimum,
        maximum: raw.maximum,
        example: raw.example.clone(),
        repeat: raw.repeat,
        required: raw.required,
        default,
        description: raw.description.as_deref().unwrap_or("").trim().to_string(),
    }
}

/// Normalize every parameter of a mapping, keeping declaration order.
pub fn sanitize_parameters(raw: &IndexMap<String, RawParameter>) -> IndexMap<String, Parameter> {
    raw.iter()
        .map(|(name, param)| (name.clone(), sanitize_parameter(name, param)))
        .collect()
}

/// Stand-in for a placeholder that has no declaration. URI parameters are
/// always required.
pub(crate) fn implicit_uri_parameter(name: &str) -> Parameter {
    let mut param = sanitize_parameter(name, &RawParameter::default());
    param.required = true;
    param
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_enum(values: &[&str], default: Option<&str>) -> RawParameter {
        RawParameter {
            enum_values: Some(values.iter().map(|v| json!(v)).collect()),
            default: default.map(|d| json!(d)),
            ..Default::default()
        }
    }

    #[test]
    fn test_enum_implies_default() {
        let param = sanitize_parameter("format", &with_enum(&["a", "b"], None));
        assert_eq!(param.default, Some(json!("a")));
    }

    #[test]
    fn test_explicit_default_wins() {
        let param = sanitize_parameter("format", &with_enum(&["a", "b"], Some("b")));
        assert_eq!(param.default, Some(json!("b")));
    }

    #[test]
    fn test_empty_enum_leaves_default_unset() {
        let param = sanitize_parameter("format", &with_enum(&[], None));
        assert_eq!(param.default, None);
    }

    #[test]
    fn test_defaults_and_trimmed_description() {
        let raw = RawParameter {
            description: Some("  The page number.\n".to_string()),
            minimum: Some(1.0),
            ..Default::default()
        };
        let param = sanitize_parameter("page", &raw);
        assert_eq!(param.display_name, "page");
        assert_eq!(param.param_type, "string");
        assert_eq!(param.description, "The page number.");
        assert_eq!(param.minimum, Some(1.0));
        assert!(!param.required);
    }

    #[test]
    fn test_empty_mapping() {
        assert!(sanitize_parameters(&IndexMap::new()).is_empty());
    }

    #[test]
    fn test_mapping_keeps_order() {
        let mut raw = IndexMap::new();
        raw.insert("b".to_string(), RawParameter::default());
        raw.insert("a".to_string(), RawParameter::default());
        let names: Vec<_> = sanitize_parameters(&raw).into_keys().collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
