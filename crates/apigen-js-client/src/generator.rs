use apigen_core::config::TargetId;
use apigen_core::{FormatOverrides, LanguageProfile, Target};
use serde_json::json;

use crate::format::variable_name;
use crate::helpers;

/// JavaScript (Node 18+) client built on the global `fetch`.
pub struct JsClientTarget;

impl JsClientTarget {
    pub fn build_profile() -> LanguageProfile {
        LanguageProfile::new("js-client")
            .with_template("index.js", include_str!("../templates/index.js.j2"))
            .with_template("package.json", include_str!("../templates/package.json.j2"))
            .with_template("README.md", include_str!("../templates/README.md.j2"))
            .with_partial("header", include_str!("../templates/header.j2"))
            .with_partial("method", include_str!("../templates/method.j2"))
            .with_helper("js_doc", helpers::js_doc)
            .with_helper("js_type", helpers::js_type)
            .with_helper("package_name", helpers::package_name)
            .with_helper("param_list", helpers::param_list)
            .with_helper("display_uri", helpers::display_uri)
            .with_format(FormatOverrides::default().with_variable(variable_name))
            .with_option("package_version", json!("0.0.0"))
            .with_option("license", json!("UNLICENSED"))
            .with_option("auth", json!(true))
    }
}

impl Target for JsClientTarget {
    fn id(&self) -> TargetId {
        TargetId::JsClient
    }

    fn profile(&self) -> LanguageProfile {
        Self::build_profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_declares_files_in_order() {
        let profile = JsClientTarget.profile();
        assert_eq!(
            profile.templates.keys().collect::<Vec<_>>(),
            vec!["index.js", "package.json", "README.md"]
        );
        assert!(profile.helpers.contains_key("display_uri"));
        assert_eq!(profile.options["package_version"], json!("0.0.0"));
    }

    #[test]
    fn test_profile_formats_variables() {
        let profile = JsClientTarget.profile();
        let format = profile.format.resolve().unwrap();
        assert_eq!(format.variable("user-groups"), "userGroups");
        assert_eq!(format.uri("/users"), "/users");
    }

    #[test]
    fn test_target_id() {
        assert_eq!(JsClientTarget.id(), TargetId::JsClient);
    }
}
