use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

/// Project configuration loaded from `.apigen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApigenConfig {
    pub input: String,
    pub output: String,
    pub target: TargetId,
    /// Passed to templates as `options`, over the profile's defaults.
    pub options: IndexMap<String, serde_json::Value>,
    /// Treat resource tree warnings as errors.
    pub deny_warnings: bool,
}

impl Default for ApigenConfig {
    fn default() -> Self {
        Self {
            input: "api.yaml".to_string(),
            output: "generated".to_string(),
            target: TargetId::JsClient,
            options: IndexMap::new(),
            deny_warnings: false,
        }
    }
}

/// Which language profile to render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetId {
    JsClient,
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetId::JsClient => write!(f, "js_client"),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".apigen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ApigenConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: ApigenConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# apigen configuration
input: api.yaml          # API description (YAML or JSON)
output: generated
target: js_client

# Exposed to templates as `options`; overrides the profile defaults.
options: {}
  # name: my-api-client
  # repository: https://github.com/you/your-repo

deny_warnings: false     # fail when part of the resource tree cannot be generated
"#
}
