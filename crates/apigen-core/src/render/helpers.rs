use std::sync::Arc;

use heck::{
    ToKebabCase, ToLowerCamelCase, ToPascalCase, ToShoutySnakeCase, ToSnakeCase, ToTitleCase,
};
use indexmap::IndexMap;
use minijinja::value::{Rest, Value, ValueKind};
use minijinja::{Environment, Error, ErrorKind};
use serde::Serialize;

/// A helper function callable from templates, both as `name(args)` and as a
/// filter `value|name(args)`.
pub type HelperFn = Arc<dyn Fn(&[Value]) -> Result<Value, Error> + Send + Sync>;

/// Helpers every template can use. `and`, `or` and `not` are template keywords,
/// so the boolean combinators are named `all_of`, `any_of` and `negate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinHelper {
    CamelCase,
    PascalCase,
    SnakeCase,
    KebabCase,
    ConstantCase,
    TitleCase,
    UpperCase,
    LowerCase,
    UpperFirst,
    LowerFirst,
    And,
    Or,
    Not,
    Equal,
    Keys,
    Values,
    Length,
    IsArray,
    IsObject,
    Stringify,
    Join,
}

impl BuiltinHelper {
    pub const ALL: [BuiltinHelper; 21] = [
        BuiltinHelper::CamelCase,
        BuiltinHelper::PascalCase,
        BuiltinHelper::SnakeCase,
        BuiltinHelper::KebabCase,
        BuiltinHelper::ConstantCase,
        BuiltinHelper::TitleCase,
        BuiltinHelper::UpperCase,
        BuiltinHelper::LowerCase,
        BuiltinHelper::UpperFirst,
        BuiltinHelper::LowerFirst,
        BuiltinHelper::And,
        BuiltinHelper::Or,
        BuiltinHelper::Not,
        BuiltinHelper::Equal,
        BuiltinHelper::Keys,
        BuiltinHelper::Values,
        BuiltinHelper::Length,
        BuiltinHelper::IsArray,
        BuiltinHelper::IsObject,
        BuiltinHelper::Stringify,
        BuiltinHelper::Join,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinHelper::CamelCase => "camel_case",
            BuiltinHelper::PascalCase => "pascal_case",
            BuiltinHelper::SnakeCase => "snake_case",
            BuiltinHelper::KebabCase => "kebab_case",
            BuiltinHelper::ConstantCase => "constant_case",
            BuiltinHelper::TitleCase => "title_case",
            BuiltinHelper::UpperCase => "upper_case",
            BuiltinHelper::LowerCase => "lower_case",
            BuiltinHelper::UpperFirst => "upper_first",
            BuiltinHelper::LowerFirst => "lower_first",
            BuiltinHelper::And => "all_of",
            BuiltinHelper::Or => "any_of",
            BuiltinHelper::Not => "negate",
            BuiltinHelper::Equal => "equal",
            BuiltinHelper::Keys => "keys",
            BuiltinHelper::Values => "values",
            BuiltinHelper::Length => "length",
            BuiltinHelper::IsArray => "is_array",
            BuiltinHelper::IsObject => "is_object",
            BuiltinHelper::Stringify => "stringify",
            BuiltinHelper::Join => "join",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.name() == name)
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, Error> {
        match self {
            BuiltinHelper::CamelCase => text(args, |s| s.to_lower_camel_case()),
            BuiltinHelper::PascalCase => text(args, |s| s.to_pascal_case()),
            BuiltinHelper::SnakeCase => text(args, |s| s.to_snake_case()),
            BuiltinHelper::KebabCase => text(args, |s| s.to_kebab_case()),
            BuiltinHelper::ConstantCase => text(args, |s| s.to_shouty_snake_case()),
            BuiltinHelper::TitleCase => text(args, |s| s.to_title_case()),
            BuiltinHelper::UpperCase => text(args, |s| s.to_uppercase()),
            BuiltinHelper::LowerCase => text(args, |s| s.to_lowercase()),
            BuiltinHelper::UpperFirst => text(args, |s| map_first(s, char::to_uppercase)),
            BuiltinHelper::LowerFirst => text(args, |s| map_first(s, char::to_lowercase)),
            BuiltinHelper::And => Ok(Value::from(args.iter().all(Value::is_true))),
            BuiltinHelper::Or => Ok(Value::from(args.iter().any(Value::is_true))),
            BuiltinHelper::Not => Ok(Value::from(!arg(args, 0)?.is_true())),
            BuiltinHelper::Equal => {
                let first = arg(args, 0)?;
                Ok(Value::from(args[1..].iter().all(|other| other == first)))
            }
            BuiltinHelper::Keys => {
                let value = arg(args, 0)?;
                if value.kind() != ValueKind::Map {
                    return Ok(Value::from(Vec::<Value>::new()));
                }
                Ok(Value::from(value.try_iter()?.collect::<Vec<_>>()))
            }
            BuiltinHelper::Values => {
                let value = arg(args, 0)?;
                match value.kind() {
                    ValueKind::Map => {
                        let mut values = Vec::new();
                        for key in value.try_iter()? {
                            values.push(value.get_item(&key)?);
                        }
                        Ok(Value::from(values))
                    }
                    ValueKind::Seq => Ok(Value::from(value.try_iter()?.collect::<Vec<_>>())),
                    _ => Ok(Value::from(Vec::<Value>::new())),
                }
            }
            BuiltinHelper::Length => Ok(Value::from(arg(args, 0)?.len().unwrap_or(0))),
            BuiltinHelper::IsArray => Ok(Value::from(arg(args, 0)?.kind() == ValueKind::Seq)),
            BuiltinHelper::IsObject => Ok(Value::from(arg(args, 0)?.kind() == ValueKind::Map)),
            BuiltinHelper::Stringify => {
                let indent = args.get(1).and_then(|v| u32::try_from(v.clone()).ok());
                stringify(arg(args, 0)?, indent.unwrap_or(0)).map(Value::from)
            }
            BuiltinHelper::Join => {
                let value = arg(args, 0)?;
                let separator = args
                    .get(1)
                    .and_then(|v| v.as_str().map(String::from))
                    .unwrap_or_else(|| ",".to_string());
                if value.is_undefined() || value.is_none() {
                    return Ok(Value::from(""));
                }
                let parts: Vec<String> = value.try_iter()?.map(|v| v.to_string()).collect();
                Ok(Value::from(parts.join(&separator)))
            }
        }
    }
}

fn arg(args: &[Value], index: usize) -> Result<&Value, Error> {
    args.get(index).ok_or_else(|| {
        Error::new(
            ErrorKind::MissingArgument,
            format!("helper expects at least {} argument(s)", index + 1),
        )
    })
}

fn text(args: &[Value], f: impl Fn(&str) -> String) -> Result<Value, Error> {
    let value = arg(args, 0)?;
    if value.is_undefined() || value.is_none() {
        return Ok(Value::from(""));
    }
    let s = match value.as_str() {
        Some(s) => f(s),
        None => f(&value.to_string()),
    };
    Ok(Value::from(s))
}

fn map_first<I: Iterator<Item = char>>(s: &str, f: impl Fn(char) -> I) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => f(first).chain(chars).collect(),
        None => String::new(),
    }
}

fn stringify(value: &Value, indent: u32) -> Result<String, Error> {
    let to_error = |e: serde_json::Error| Error::new(ErrorKind::BadSerialization, e.to_string());
    if indent == 0 {
        return serde_json::to_string(value).map_err(to_error);
    }

    let indent = " ".repeat(indent as usize);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer).map_err(to_error)?;
    String::from_utf8(out).map_err(|e| Error::new(ErrorKind::BadSerialization, e.to_string()))
}

/// Where a helper name resolved to.
pub enum Helper<'a> {
    Profile(&'a HelperFn),
    Builtin(BuiltinHelper),
}

/// Profile helpers layered over the built-in table. A profile helper shadows a
/// built-in of the same name.
#[derive(Clone, Default)]
pub struct HelperSet {
    profile: IndexMap<String, HelperFn>,
}

impl HelperSet {
    pub fn new(profile: IndexMap<String, HelperFn>) -> Self {
        Self { profile }
    }

    pub fn lookup(&self, name: &str) -> Option<Helper<'_>> {
        self.profile
            .get(name)
            .map(Helper::Profile)
            .or_else(|| BuiltinHelper::from_name(name).map(Helper::Builtin))
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, Error> {
        match self.lookup(name) {
            Some(Helper::Profile(f)) => f(args),
            Some(Helper::Builtin(builtin)) => builtin.call(args),
            None => Err(Error::new(
                ErrorKind::UnknownFunction,
                format!("unknown helper `{name}`"),
            )),
        }
    }

    /// Every resolvable helper name: built-ins first, then profile-only helpers.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = BuiltinHelper::ALL.iter().map(BuiltinHelper::name).collect();
        names.extend(
            self.profile
                .keys()
                .map(String::as_str)
                .filter(|name| BuiltinHelper::from_name(name).is_none()),
        );
        names
    }

    /// Register every helper as both a function and a filter.
    pub(crate) fn register(&self, env: &mut Environment<'_>) {
        for name in self.names() {
            let helper: HelperFn = match self.lookup(name) {
                Some(Helper::Profile(f)) => f.clone(),
                Some(Helper::Builtin(builtin)) => {
                    Arc::new(move |args: &[Value]| builtin.call(args))
                }
                None => continue,
            };
            let filter = helper.clone();
            env.add_function(name.to_string(), move |args: Rest<Value>| helper(&args));
            env.add_filter(name.to_string(), move |args: Rest<Value>| filter(&args));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(helper: BuiltinHelper, args: &[Value]) -> Value {
        helper.call(args).unwrap()
    }

    #[test]
    fn test_names_round_trip() {
        for helper in BuiltinHelper::ALL {
            assert_eq!(BuiltinHelper::from_name(helper.name()), Some(helper));
        }
        assert_eq!(BuiltinHelper::from_name("nope"), None);
    }

    #[test]
    fn test_case_helpers() {
        let input = [Value::from("user groups")];
        assert_eq!(call(BuiltinHelper::CamelCase, &input).as_str(), Some("userGroups"));
        assert_eq!(call(BuiltinHelper::PascalCase, &input).as_str(), Some("UserGroups"));
        assert_eq!(call(BuiltinHelper::SnakeCase, &input).as_str(), Some("user_groups"));
        assert_eq!(call(BuiltinHelper::KebabCase, &input).as_str(), Some("user-groups"));
        assert_eq!(call(BuiltinHelper::ConstantCase, &input).as_str(), Some("USER_GROUPS"));
        assert_eq!(call(BuiltinHelper::UpperFirst, &input).as_str(), Some("User groups"));
        assert_eq!(
            call(BuiltinHelper::LowerFirst, &[Value::from("GET")]).as_str(),
            Some("gET")
        );
        assert_eq!(call(BuiltinHelper::UpperCase, &[Value::UNDEFINED]).as_str(), Some(""));
    }

    #[test]
    fn test_boolean_helpers() {
        let t = Value::from(true);
        let f = Value::from(false);
        assert!(call(BuiltinHelper::And, &[t.clone(), t.clone()]).is_true());
        assert!(!call(BuiltinHelper::And, &[t.clone(), f.clone()]).is_true());
        assert!(call(BuiltinHelper::Or, &[f.clone(), t.clone()]).is_true());
        assert!(call(BuiltinHelper::Not, &[f]).is_true());
        assert!(call(BuiltinHelper::Equal, &[Value::from("a"), Value::from("a")]).is_true());
        assert!(!call(BuiltinHelper::Equal, &[Value::from("a"), Value::from("b")]).is_true());
        assert!(BuiltinHelper::Not.call(&[]).is_err());
    }

    #[test]
    fn test_collection_helpers() {
        let map = Value::from_serialize(serde_json::json!({"b": 1, "a": 2}));
        let keys = call(BuiltinHelper::Keys, &[map.clone()]);
        assert_eq!(keys.to_string(), r#"["b", "a"]"#);
        assert_eq!(call(BuiltinHelper::Values, &[map.clone()]).to_string(), "[1, 2]");
        assert!(call(BuiltinHelper::IsObject, &[map.clone()]).is_true());
        assert!(!call(BuiltinHelper::IsArray, &[map]).is_true());

        let seq = Value::from(vec!["x", "y", "z"]);
        assert_eq!(call(BuiltinHelper::Length, &[seq.clone()]), Value::from(3));
        assert_eq!(
            call(BuiltinHelper::Join, &[seq.clone(), Value::from(", ")]).as_str(),
            Some("x, y, z")
        );
        assert_eq!(call(BuiltinHelper::Join, &[seq]).as_str(), Some("x,y,z"));
    }

    #[test]
    fn test_stringify() {
        let value = Value::from_serialize(serde_json::json!({"a": [1, "two"]}));
        assert_eq!(
            call(BuiltinHelper::Stringify, &[value.clone()]).as_str(),
            Some(r#"{"a":[1,"two"]}"#)
        );
        assert_eq!(
            call(BuiltinHelper::Stringify, &[value, Value::from(2)]).as_str(),
            Some("{\n  \"a\": [\n    1,\n    \"two\"\n  ]\n}")
        );
    }

    #[test]
    fn test_profile_helper_shadows_builtin() {
        let mut profile: IndexMap<String, HelperFn> = IndexMap::new();
        profile.insert(
            "camel_case".to_string(),
            Arc::new(|_: &[Value]| -> Result<Value, Error> { Ok(Value::from("overridden")) }),
        );
        profile.insert(
            "shout".to_string(),
            Arc::new(|args: &[Value]| -> Result<Value, Error> {
                Ok(Value::from(format!("{}!", args[0])))
            }),
        );
        let helpers = HelperSet::new(profile);

        assert!(matches!(helpers.lookup("camel_case"), Some(Helper::Profile(_))));
        assert!(matches!(
            helpers.lookup("snake_case"),
            Some(Helper::Builtin(BuiltinHelper::SnakeCase))
        ));
        assert_eq!(
            helpers.call("camel_case", &[Value::from("a b")]).unwrap().as_str(),
            Some("overridden")
        );
        assert_eq!(
            helpers.call("shout", &[Value::from("hi")]).unwrap().as_str(),
            Some("hi!")
        );
        assert!(helpers.call("missing", &[]).is_err());

        let names = helpers.names();
        assert_eq!(names.iter().filter(|n| **n == "camel_case").count(), 1);
        assert!(names.contains(&"shout"));
    }
}
