use heck::ToLowerCamelCase;

const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "let", "new", "null", "return", "static", "super", "switch",
    "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Property and parameter names: lowerCamelCase.
pub fn variable_name(name: &str) -> String {
    name.to_lower_camel_case()
}

/// A name usable as a JavaScript binding: lowerCamelCase, prefixed with `_` when
/// it is a reserved word or starts with a digit.
pub fn binding_name(name: &str) -> String {
    let name = variable_name(name);
    let starts_with_digit = name.chars().next().is_some_and(|c| c.is_ascii_digit());
    if name.is_empty() || starts_with_digit || RESERVED.contains(&name.as_str()) {
        format!("_{name}")
    } else {
        name
    }
}
