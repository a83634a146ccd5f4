use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field: {0}")]
    MissingField(String),
}

#[derive(Debug, Error)]
pub enum GenerateError {
    /// The language profile is incomplete, e.g. it has no `variable` formatter.
    #[error("invalid language profile: {0}")]
    Configuration(String),

    #[error("failed to render {file}: {source}")]
    Render {
        file: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("template error: {0}")]
    Template(String),
}

impl GenerateError {
    pub(crate) fn render(file: &str, source: minijinja::Error) -> Self {
        GenerateError::Render {
            file: file.to_string(),
            source,
        }
    }
}
