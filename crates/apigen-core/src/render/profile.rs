use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use minijinja::value::Value;
use serde::Serialize;

use super::generate::Renderer;
use super::helpers::HelperFn;
use crate::error::GenerateError;
use crate::format::FormatOverrides;
use crate::ir::GenerationContext;

/// Rendered output: file name → file content, in template declaration order.
pub type Files = IndexMap<String, String>;

/// A template implemented in Rust instead of template source.
pub type RenderFn =
    Arc<dyn Fn(&GenerationContext, &RenderOptions) -> Result<String, GenerateError> + Send + Sync>;

/// Replaces per-template file generation, e.g. when file names depend on the context.
pub type FilesFn = Arc<
    dyn Fn(&Renderer<'_>, &GenerationContext, &RenderOptions) -> Result<Files, GenerateError>
        + Send
        + Sync,
>;

/// How one output file is produced.
#[derive(Clone)]
pub enum TemplateBody {
    /// minijinja source rendered against the context.
    Source(String),
    Native(RenderFn),
}

impl fmt::Debug for TemplateBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateBody::Source(source) => f.debug_tuple("Source").field(&source.len()).finish(),
            TemplateBody::Native(_) => f.write_str("Native"),
        }
    }
}

/// Everything needed to turn a [`GenerationContext`] into one target language's
/// source files.
#[derive(Clone, Default)]
pub struct LanguageProfile {
    pub name: String,
    /// Output file name → template.
    pub templates: IndexMap<String, TemplateBody>,
    /// Named fragments available to templates through `include` and `import`.
    pub partials: IndexMap<String, String>,
    pub helpers: IndexMap<String, HelperFn>,
    pub format: FormatOverrides,
    /// Defaults for the render options; callers' options take precedence.
    pub options: IndexMap<String, serde_json::Value>,
    pub files: Option<FilesFn>,
}

impl LanguageProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_template(mut self, file: impl Into<String>, source: impl Into<String>) -> Self {
        self.templates
            .insert(file.into(), TemplateBody::Source(source.into()));
        self
    }

    pub fn with_native_template(
        mut self,
        file: impl Into<String>,
        render: impl Fn(&GenerationContext, &RenderOptions) -> Result<String, GenerateError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.templates
            .insert(file.into(), TemplateBody::Native(Arc::new(render)));
        self
    }

    pub fn with_partial(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.partials.insert(name.into(), source.into());
        self
    }

    pub fn with_helper(
        mut self,
        name: impl Into<String>,
        helper: impl Fn(&[Value]) -> Result<Value, minijinja::Error> + Send + Sync + 'static,
    ) -> Self {
        self.helpers.insert(name.into(), Arc::new(helper));
        self
    }

    pub fn with_format(mut self, format: FormatOverrides) -> Self {
        self.format = format;
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    pub fn with_files(
        mut self,
        files: impl Fn(
            &Renderer<'_>,
            &GenerationContext,
            &RenderOptions,
        ) -> Result<Files, GenerateError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.files = Some(Arc::new(files));
        self
    }
}

impl fmt::Debug for LanguageProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageProfile")
            .field("name", &self.name)
            .field("templates", &self.templates)
            .field("partials", &self.partials.keys().collect::<Vec<_>>())
            .field("helpers", &self.helpers.keys().collect::<Vec<_>>())
            .field("format", &self.format)
            .field("options", &self.options)
            .field("files", &self.files.is_some())
            .finish()
    }
}

/// Options visible to templates as `options`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderOptions {
    pub values: IndexMap<String, serde_json::Value>,
}

impl RenderOptions {
    /// Overlay the caller's options onto the profile defaults.
    pub fn resolve(
        defaults: &IndexMap<String, serde_json::Value>,
        user: &IndexMap<String, serde_json::Value>,
    ) -> Self {
        let mut values = defaults.clone();
        for (key, value) in user {
            values.insert(key.clone(), value.clone());
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }
}
