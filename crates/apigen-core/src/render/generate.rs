use std::sync::Arc;

use indexmap::IndexMap;
use minijinja::Environment;
use minijinja::value::Value;

use super::helpers::HelperSet;
use super::profile::{Files, LanguageProfile, RenderOptions, TemplateBody};
use super::view::ContextView;
use crate::error::GenerateError;
use crate::ir::GenerationContext;
use crate::parse::spec::Specification;
use crate::transform::build_context;

/// Result of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub files: Files,
    /// The normalized model, for callers that need more than the rendered text.
    pub context: Arc<GenerationContext>,
    pub options: RenderOptions,
}

/// Normalize `spec` and render every file declared by `profile`.
///
/// Fails before any tree building when the profile has no `variable` formatter.
pub fn generate(
    spec: &Specification,
    profile: &LanguageProfile,
    user_options: &IndexMap<String, serde_json::Value>,
) -> Result<GenerationOutput, GenerateError> {
    let format = profile.format.resolve()?;
    let context = Arc::new(build_context(spec, &format));
    let options = RenderOptions::resolve(&profile.options, user_options);

    let renderer = Renderer::new(profile, Arc::clone(&context), &options)?;
    let files = match &profile.files {
        Some(files) => files(&renderer, &context, &options)?,
        None => renderer.render_all()?,
    };

    log::debug!("profile `{}` produced {} files", profile.name, files.len());
    Ok(GenerationOutput {
        files,
        context,
        options,
    })
}

/// A language profile's templates bound to one context.
pub struct Renderer<'a> {
    env: Environment<'a>,
    profile: &'a LanguageProfile,
    context: Arc<GenerationContext>,
    options: &'a RenderOptions,
    root: Value,
}

impl<'a> Renderer<'a> {
    pub fn new(
        profile: &'a LanguageProfile,
        context: Arc<GenerationContext>,
        options: &'a RenderOptions,
    ) -> Result<Self, GenerateError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        HelperSet::new(profile.helpers.clone()).register(&mut env);

        for (name, source) in &profile.partials {
            env.add_template(name.as_str(), source.as_str())
                .map_err(|e| GenerateError::render(name, e))?;
        }
        for (file, body) in &profile.templates {
            if let TemplateBody::Source(source) = body {
                env.add_template(file.as_str(), source.as_str())
                    .map_err(|e| GenerateError::render(file, e))?;
            }
        }

        let root = ContextView::value(
            Arc::clone(&context),
            Value::from_serialize(&options.values),
        );

        Ok(Self {
            env,
            profile,
            context,
            options,
            root,
        })
    }

    /// Output file names in declaration order.
    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.profile.templates.keys().map(String::as_str)
    }

    /// Render the template declared for `file`.
    pub fn render(&self, file: &str) -> Result<String, GenerateError> {
        log::debug!("rendering {file}");
        match self.profile.templates.get(file) {
            Some(TemplateBody::Source(_)) => self
                .env
                .get_template(file)
                .and_then(|template| template.render(&self.root))
                .map_err(|e| GenerateError::render(file, e)),
            Some(TemplateBody::Native(render)) => render(&self.context, self.options),
            None => Err(GenerateError::Template(format!(
                "profile `{}` has no template for `{file}`",
                self.profile.name
            ))),
        }
    }

    /// Render an ad-hoc template string, e.g. a computed file name.
    pub fn render_str(&self, source: &str) -> Result<String, GenerateError> {
        self.env
            .render_str(source, &self.root)
            .map_err(|e| GenerateError::render(source, e))
    }

    /// Render every declared template into its own file.
    pub fn render_all(&self) -> Result<Files, GenerateError> {
        self.template_names()
            .map(|file| Ok((file.to_string(), self.render(file)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatOverrides;
    use crate::parse;

    const USERS: &str = r#"
title: Users API
version: v1
baseUri: https://api.example.com/{version}/
resources:
  - relativeUri: /users
    description: Every user.
    methods:
      - method: get
      - method: post
    resources:
      - relativeUri: /{id}
        uriParameters:
          id:
            type: string
        methods:
          - method: get
"#;

    fn identity_profile() -> LanguageProfile {
        LanguageProfile::new("test")
            .with_format(FormatOverrides::default().with_variable(|s| s.to_string()))
    }

    fn render(source: &str) -> String {
        let spec = parse::from_yaml(USERS).unwrap();
        let profile = identity_profile().with_template("out.txt", source);
        let output = generate(&spec, &profile, &IndexMap::new()).unwrap();
        output.files["out.txt"].clone()
    }

    #[test]
    fn test_root_attributes() {
        assert_eq!(
            render("{{ id }} {{ title }} {{ version }} {{ base_uri }}"),
            "client0 Users API v1 https://api.example.com/{version}"
        );
    }

    #[test]
    fn test_walks_resource_tree() {
        let out = render(
            "{% for key, child in resources.children|items %}{{ key }}={{ child.relative_uri }}\
             {% for k, c in child.children|items %} {{ k }}=\
             {{ c.relative_uri }}:{{ c.parent.key }}{% endfor %}\
             {% endfor %}",
        );
        assert_eq!(out, "users=/users id=/{0}:users");
    }

    #[test]
    fn test_flattened_views() {
        assert_eq!(
            render("{% for r in all_resources %}[{{ r.key }}]{% endfor %}"),
            "[][users][id]"
        );
        assert_eq!(
            render("{% for m in all_methods %}{{ m.resource.key }}.{{ m.key }} {% endfor %}"),
            "users.get users.post id.get "
        );
    }

    #[test]
    fn test_parameters_and_description() {
        assert_eq!(
            render(
                "{{ resources.children.users.description }} \
                 {{ resources.children.users.children.id.uri_parameters[0].type }}"
            ),
            "Every user. string"
        );
    }

    #[test]
    fn test_builtin_helpers_available() {
        assert_eq!(
            render(
                "{{ pascal_case(title) }} {{ title|kebab_case }} {{ supported_methods|join(' ') }}"
            ),
            "UsersApi users-api get post put delete patch options head trace connect"
        );
    }

    #[test]
    fn test_profile_helper_overrides_builtin() {
        let spec = parse::from_yaml(USERS).unwrap();
        let profile = identity_profile()
            .with_helper("upper_case", |_| Ok(Value::from("custom")))
            .with_template("out.txt", "{{ upper_case(title) }}|{{ title|upper_case }}");
        let output = generate(&spec, &profile, &IndexMap::new()).unwrap();
        assert_eq!(output.files["out.txt"], "custom|custom");
    }

    #[test]
    fn test_partials() {
        let spec = parse::from_yaml(USERS).unwrap();
        let profile = identity_profile()
            .with_partial("header", "// {{ title }}")
            .with_template("out.txt", "{% include 'header' %}");
        let output = generate(&spec, &profile, &IndexMap::new()).unwrap();
        assert_eq!(output.files["out.txt"], "// Users API");
    }

    #[test]
    fn test_options_overlay() {
        let spec = parse::from_yaml(USERS).unwrap();
        let profile = identity_profile()
            .with_option("name", serde_json::json!("default"))
            .with_option("semicolons", serde_json::json!(true))
            .with_template("out.txt", "{{ options.name }} {{ options.semicolons|stringify }}");
        let mut user = IndexMap::new();
        user.insert("name".to_string(), serde_json::json!("custom"));
        let output = generate(&spec, &profile, &user).unwrap();
        assert_eq!(output.files["out.txt"], "custom true");
        assert_eq!(output.options.values.len(), 2);
    }

    #[test]
    fn test_native_template() {
        let spec = parse::from_yaml(USERS).unwrap();
        let profile = identity_profile().with_native_template("count.txt", |ctx, _| {
            Ok(ctx.all_methods.len().to_string())
        });
        let output = generate(&spec, &profile, &IndexMap::new()).unwrap();
        assert_eq!(output.files["count.txt"], "3");
    }

    #[test]
    fn test_custom_files_override() {
        let spec = parse::from_yaml(USERS).unwrap();
        let profile = identity_profile()
            .with_template("resource", "{{ title }}")
            .with_files(|renderer, ctx, _| {
                let mut files = Files::new();
                for node in ctx.resources().filter(|node| !node.is_root()) {
                    let source = format!("{{{{ '{}'|snake_case }}}}.txt", node.key);
                    let name = renderer.render_str(&source)?;
                    files.insert(name, renderer.render("resource")?);
                }
                Ok(files)
            });
        let output = generate(&spec, &profile, &IndexMap::new()).unwrap();
        assert_eq!(
            output.files.keys().collect::<Vec<_>>(),
            vec!["users.txt", "id.txt"]
        );
        assert_eq!(output.files["users.txt"], "Users API");
    }

    #[test]
    fn test_missing_variable_formatter_fails_before_rendering() {
        let spec = parse::from_yaml(USERS).unwrap();
        let profile = LanguageProfile::new("broken").with_template("out.txt", "{{ title }}");
        let err = generate(&spec, &profile, &IndexMap::new()).unwrap_err();
        assert!(matches!(err, GenerateError::Configuration(_)));
    }

    #[test]
    fn test_template_errors_name_the_file() {
        let spec = parse::from_yaml(USERS).unwrap();
        let profile = identity_profile().with_template("bad.txt", "{% for %}");
        let err = generate(&spec, &profile, &IndexMap::new()).unwrap_err();
        assert!(matches!(err, GenerateError::Render { ref file, .. } if file == "bad.txt"));
    }

    #[test]
    fn test_rendered_snapshot() {
        let out = render("{{ title }} {{ version }}: {{ all_resources|length }} resources");
        insta::assert_snapshot!(out, @"Users API v1: 3 resources");
    }
}
