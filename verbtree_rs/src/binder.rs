//! Option binder: turns the raw option map into typed values for one command.
//!
//! Each declared option is looked up by `--long` first, then `-short`.
//! Missing or empty required options fail, omitted optional ones take their
//! fallback, and any raw key no option consumed is rejected at the end.
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::descriptor::{CommandDescriptor, OptionDescriptor, Value, ValueType};
use crate::error::{BindError, ExtractError};
use crate::suggest;

/// A command whose options were bound successfully.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundCommand<'r> {
    #[serde(rename = "command", serialize_with = "serialize_name")]
    descriptor: &'r CommandDescriptor,
    values: BTreeMap<String, Value>,
}

fn serialize_name<S: serde::Serializer>(
    descriptor: &&CommandDescriptor,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&descriptor.name())
}

impl<'r> BoundCommand<'r> {
    pub fn descriptor(&self) -> &'r CommandDescriptor {
        self.descriptor
    }

    pub fn verb_path(&self) -> &'r [String] {
        self.descriptor.verb_path()
    }

    /// True when the primary verb path equals `path`, ignoring case.
    pub fn is<S: AsRef<str>>(&self, path: &[S]) -> bool {
        let own = self.descriptor.verb_path();
        own.len() == path.len()
            && own
                .iter()
                .zip(path)
                .all(|(a, b)| crate::fold(a) == crate::fold(b.as_ref()))
    }

    /// Bound values keyed by long name, one per declared option.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    pub fn get(&self, long_name: &str) -> Option<&Value> {
        self.values.get(long_name)
    }

    /// Typed read of one value.
    pub fn value<T: FromValue>(&self, long_name: &str) -> Result<T, ExtractError> {
        let value = self
            .values
            .get(long_name)
            .ok_or_else(|| ExtractError::MissingField(long_name.to_string()))?;
        T::from_value(value).ok_or_else(|| ExtractError::TypeMismatch {
            option: long_name.to_string(),
            expected: T::EXPECTED,
            actual: value.kind().to_string(),
        })
    }

    /// Build a host-side typed command.
    pub fn extract<T: FromBound>(&self) -> Result<T, ExtractError> {
        T::from_bound(self)
    }
}

/// Conversion from a bound [`Value`] into a Rust type.
pub trait FromValue: Sized {
    /// Type name reported on mismatch.
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

/// Typed command built from a [`BoundCommand`].
pub trait FromBound: Sized {
    fn from_bound(command: &BoundCommand<'_>) -> Result<Self, ExtractError>;
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) | Value::Enum(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "decimal";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Decimal(d) => Some(*d),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Binds raw options against a descriptor.
#[derive(Debug, Clone, Copy)]
pub struct Binder {
    suggestion_distance: usize,
}

impl Default for Binder {
    fn default() -> Self {
        Self {
            suggestion_distance: 2,
        }
    }
}

impl Binder {
    pub fn new(suggestion_distance: usize) -> Self {
        Self {
            suggestion_distance,
        }
    }

    pub fn bind<'r>(
        &self,
        descriptor: &'r CommandDescriptor,
        options: &BTreeMap<String, String>,
    ) -> Result<BoundCommand<'r>, BindError> {
        let mut consumed: BTreeSet<String> = BTreeSet::new();
        let mut values = BTreeMap::new();

        for opt in descriptor.options() {
            let raw = lookup(opt, options, &mut consumed);
            let value = bind_one(opt, raw)?;
            values.insert(opt.long_name().to_string(), value);
        }

        if let Some(unknown) = options.keys().find(|k| !consumed.contains(*k)) {
            let declared: Vec<String> = descriptor.options().iter().map(|o| o.long_flag()).collect();
            let suggestion = suggest::closest(
                unknown,
                declared.iter().map(String::as_str),
                self.suggestion_distance,
            )
            .map(str::to_string);
            return Err(BindError::UnrecognizedOption {
                option: unknown.clone(),
                suggestion,
            });
        }

        Ok(BoundCommand { descriptor, values })
    }
}

/// Bind with the default suggestion distance.
pub fn bind<'r>(
    descriptor: &'r CommandDescriptor,
    options: &BTreeMap<String, String>,
) -> Result<BoundCommand<'r>, BindError> {
    Binder::default().bind(descriptor, options)
}

fn lookup<'a>(
    opt: &OptionDescriptor,
    options: &'a BTreeMap<String, String>,
    consumed: &mut BTreeSet<String>,
) -> Option<&'a str> {
    let long = opt.long_flag();
    if let Some(raw) = options.get(&long) {
        consumed.insert(long);
        return Some(raw);
    }
    let short = opt.short_flag()?;
    let raw = options.get(&short)?;
    consumed.insert(short);
    Some(raw)
}

fn bind_one(opt: &OptionDescriptor, raw: Option<&str>) -> Result<Value, BindError> {
    let required = || BindError::RequiredArgumentNotProvided {
        option: opt.long_name().to_string(),
    };

    let Some(raw) = raw else {
        if opt.is_required() {
            return Err(required());
        }
        return Ok(opt.fallback());
    };

    if raw.is_empty() {
        // A bare flag switches a bool on.
        if matches!(opt.value_type(), ValueType::Bool) {
            return Ok(Value::Bool(true));
        }
        if opt.is_required() {
            return Err(required());
        }
        return Ok(opt.fallback());
    }

    opt.value_type()
        .parse(raw)
        .ok_or_else(|| BindError::InvalidArgumentType {
            option: opt.long_name().to_string(),
            value: raw.to_string(),
            expected: opt.value_type().name().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::EnumType;

    fn raw(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn table_create() -> CommandDescriptor {
        CommandDescriptor::builder(["table", "create"])
            .option(OptionDescriptor::string("name").short("n").required())
            .option(OptionDescriptor::string("schemaName").default_value("new_table"))
            .option(OptionDescriptor::integer("size").nullable())
            .option(OptionDescriptor::bool("audit"))
            .option(OptionDescriptor::decimal("ratio").default_value(0.5))
            .option(OptionDescriptor::new(
                "stage",
                ValueType::Enum(EnumType::new("PluginStage", ["PreOperation", "PostOperation"])),
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn test_binds_long_and_short_names() {
        let desc = table_create();
        let long = bind(&desc, &raw(&[("--name", "Foo")])).unwrap();
        let short = bind(&desc, &raw(&[("-n", "Foo")])).unwrap();
        assert_eq!(long.get("name"), Some(&Value::String("Foo".into())));
        assert_eq!(long, short);
    }

    #[test]
    fn test_long_name_wins_over_short() {
        let desc = table_create();
        let err = bind(&desc, &raw(&[("--name", "Long"), ("-n", "Short")])).unwrap_err();
        // the short form is left unconsumed
        assert_eq!(
            err,
            BindError::UnrecognizedOption {
                option: "-n".into(),
                suggestion: None,
            }
        );
    }

    #[test]
    fn test_required_missing_or_empty() {
        let desc = table_create();
        let expected = BindError::RequiredArgumentNotProvided {
            option: "name".into(),
        };
        assert_eq!(bind(&desc, &raw(&[])).unwrap_err(), expected);
        assert_eq!(bind(&desc, &raw(&[("--name", "")])).unwrap_err(), expected);
    }

    #[test]
    fn test_defaults_and_nullables() {
        let desc = table_create();
        let bound = bind(&desc, &raw(&[("--name", "Foo")])).unwrap();
        assert_eq!(
            bound.get("schemaName"),
            Some(&Value::String("new_table".into()))
        );
        assert_eq!(bound.get("size"), Some(&Value::Null));
        assert_eq!(bound.get("audit"), Some(&Value::Bool(false)));
        assert_eq!(bound.get("ratio"), Some(&Value::Decimal(0.5)));
        assert_eq!(
            bound.get("stage"),
            Some(&Value::Enum("PreOperation".into()))
        );
    }

    #[test]
    fn test_empty_string_falls_back_to_default() {
        let desc = table_create();
        let bound = bind(&desc, &raw(&[("--name", "Foo"), ("--schemaName", "")])).unwrap();
        assert_eq!(
            bound.get("schemaName"),
            Some(&Value::String("new_table".into()))
        );
    }

    #[test]
    fn test_bool_flag_and_explicit_value() {
        let desc = table_create();
        let bound = bind(&desc, &raw(&[("--name", "Foo"), ("--audit", "")])).unwrap();
        assert_eq!(bound.get("audit"), Some(&Value::Bool(true)));
        let bound = bind(&desc, &raw(&[("--name", "Foo"), ("--audit", "false")])).unwrap();
        assert_eq!(bound.get("audit"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_empty_value_for_typed_option_uses_fallback() {
        let desc = table_create();
        let bound = bind(&desc, &raw(&[("--name", "Foo"), ("--size", "")])).unwrap();
        assert_eq!(bound.get("size"), Some(&Value::Null));
    }

    #[test]
    fn test_enum_coercion() {
        let desc = table_create();
        let bound = bind(&desc, &raw(&[("--name", "Foo"), ("--stage", "preoperation")])).unwrap();
        assert_eq!(
            bound.get("stage"),
            Some(&Value::Enum("PreOperation".into()))
        );

        let err = bind(&desc, &raw(&[("--name", "Foo"), ("--stage", "Unknown")])).unwrap_err();
        assert_eq!(
            err,
            BindError::InvalidArgumentType {
                option: "stage".into(),
                value: "Unknown".into(),
                expected: "PluginStage".into(),
            }
        );
    }

    #[test]
    fn test_invalid_number() {
        let desc = table_create();
        let err = bind(&desc, &raw(&[("--name", "Foo"), ("--size", "ten")])).unwrap_err();
        assert!(matches!(err, BindError::InvalidArgumentType { ref expected, .. } if expected == "integer"));

        let bound = bind(&desc, &raw(&[("--name", "Foo"), ("--size", "-5")])).unwrap();
        assert_eq!(bound.get("size"), Some(&Value::Integer(-5)));
    }

    #[test]
    fn test_unknown_option_rejected_with_suggestion() {
        let desc = table_create();
        let err = bind(
            &desc,
            &raw(&[("--name", "x"), ("--schemaNam", "y")]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            BindError::UnrecognizedOption {
                option: "--schemaNam".into(),
                suggestion: Some("--schemaName".into()),
            }
        );
    }

    #[test]
    fn test_unknown_option_names_the_typo() {
        let desc = CommandDescriptor::builder(["cmd"])
            .option(OptionDescriptor::string("name"))
            .build()
            .unwrap();
        let err = bind(&desc, &raw(&[("--name", "x"), ("--typo", "y")])).unwrap_err();
        assert_eq!(err.option(), "--typo");
    }

    #[test]
    fn test_typed_extraction() {
        struct TableCreate {
            name: String,
            size: Option<i64>,
            audit: bool,
        }

        impl FromBound for TableCreate {
            fn from_bound(command: &BoundCommand<'_>) -> Result<Self, ExtractError> {
                Ok(Self {
                    name: command.value("name")?,
                    size: command.value("size")?,
                    audit: command.value("audit")?,
                })
            }
        }

        let desc = table_create();
        let bound = bind(&desc, &raw(&[("-n", "Foo"), ("--size", "10")])).unwrap();
        let typed: TableCreate = bound.extract().unwrap();
        assert_eq!(typed.name, "Foo");
        assert_eq!(typed.size, Some(10));
        assert!(!typed.audit);
        assert!(bound.is(&["TABLE", "create"]));

        assert_eq!(
            bound.value::<i64>("name"),
            Err(ExtractError::TypeMismatch {
                option: "name".into(),
                expected: "integer",
                actual: "string".into(),
            })
        );
        assert_eq!(
            bound.value::<bool>("nope"),
            Err(ExtractError::MissingField("nope".into()))
        );
    }
}
