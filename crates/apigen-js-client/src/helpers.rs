//! Helpers only the JavaScript client templates need.

use minijinja::value::Value;
use minijinja::{Error, ErrorKind};

use crate::format::binding_name;
use crate::type_mapper::param_type_to_js;

fn first(args: &[Value]) -> Result<&Value, Error> {
    args.first().ok_or_else(|| {
        Error::new(
            ErrorKind::MissingArgument,
            "helper expects at least 1 argument",
        )
    })
}

fn absent(value: &Value) -> bool {
    value.is_undefined() || value.is_none()
}

/// Keep text from closing the surrounding `/** ... */` block.
pub fn js_doc(args: &[Value]) -> Result<Value, Error> {
    let value = first(args)?;
    if absent(value) {
        return Ok(Value::from(""));
    }
    let text = value.to_string().replace("*/", "*\\/");
    Ok(Value::from(text.lines().collect::<Vec<_>>().join(" ")))
}

/// JSDoc type for a parameter's declared type.
pub fn js_type(args: &[Value]) -> Result<Value, Error> {
    let value = first(args)?;
    Ok(Value::from(param_type_to_js(value.as_str().unwrap_or("string"))))
}

/// npm package name derived from an API title.
pub fn package_name(args: &[Value]) -> Result<Value, Error> {
    Ok(Value::from(slugify(&first(args)?.to_string())))
}

/// Comma separated JavaScript bindings for a resource's URI parameters.
pub fn param_list(args: &[Value]) -> Result<Value, Error> {
    let names = uri_parameter_names(first(args)?)?;
    let bindings: Vec<String> = names.iter().map(|name| binding_name(name)).collect();
    Ok(Value::from(bindings.join(", ")))
}

/// The full URI of a resource with placeholders restored to parameter names,
/// e.g. `/books/{isbn}/loans`.
pub fn display_uri(args: &[Value]) -> Result<Value, Error> {
    let mut resource = first(args)?.clone();
    let mut segments = Vec::new();
    while !absent(&resource) {
        let relative_uri = resource.get_attr("relative_uri")?;
        let names = uri_parameter_names(&resource)?;
        segments.push(fill_placeholders(relative_uri.as_str().unwrap_or_default(), &names));
        resource = resource.get_attr("parent")?;
    }
    segments.reverse();
    let uri = segments.concat();
    Ok(Value::from(if uri.is_empty() { "/".to_string() } else { uri }))
}

fn uri_parameter_names(resource: &Value) -> Result<Vec<String>, Error> {
    let params = resource.get_attr("uri_parameters")?;
    if absent(&params) {
        return Ok(Vec::new());
    }
    params
        .try_iter()?
        .map(|param| param.get_attr("name").map(|name| name.to_string()))
        .collect()
}

/// Replace `{0}`, `{1}`, ... with `{name}` for the matching parameter.
fn fill_placeholders(template: &str, names: &[String]) -> String {
    let mut out = template.to_string();
    for (index, name) in names.iter().enumerate() {
        out = out.replace(&format!("{{{index}}}"), &format!("{{{name}}}"));
    }
    out
}

fn slugify(title: &str) -> String {
    let mut slug = String::new();
    let mut prev_dash = true;
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "api-client".to_string()
    } else {
        format!("{slug}-client")
    }
}
