/// Map a declared parameter type to the JSDoc type used in generated comments.
pub fn param_type_to_js(param_type: &str) -> &'static str {
    match param_type {
        "string" | "date" => "string",
        "integer" | "number" => "number",
        "boolean" => "boolean",
        "file" => "Buffer",
        _ => "*",
    }
}
