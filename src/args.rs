//! The argument-vector source reader.
//!
//! Scans tokens after the program and script entries, matching `-s`, `--long`
//! and (for booleans) `--no-long` forms, with `=value` splitting on the first
//! `=`. Tokens that match no name fall through to the schema's single
//! default-receiver field; a token that matches nothing at all fails the read.
//!
//! Array fields accumulate across occurrences — `--f a --f b` builds the same
//! collection as `--f a,b` — and append onto whatever a lower-precedence
//! source already put there.

use std::collections::BTreeMap;

use crate::convert::{self, Converters};
use crate::error::ResolveError;
use crate::field::Key;
use crate::kind::Kind;
use crate::names;
use crate::schema::Schema;
use crate::value::Value;

pub(crate) fn read(
    entries: &mut BTreeMap<Key, Value>,
    schema: &Schema,
    converters: &Converters,
    args: &[String],
) -> Result<(), ResolveError> {
    let arg_prefix = schema.effective_arg_prefix();

    let mut i = 2;
    while i < args.len() {
        let token = &args[i];
        let (name, eq_value) = match token.split_once('=') {
            Some((n, v)) => (n, Some(v)),
            None => (token.as_str(), None),
        };
        let negated = name.starts_with("--no-");

        let found = schema.descriptors().iter().find(|d| {
            let flag = names::flag_name(&d.long, arg_prefix);
            if name == format!("--{flag}") || name == format!("-{}", d.short) {
                return true;
            }
            d.kind == Kind::Bool && name == format!("--no-{flag}")
        });
        let by_name = found.is_some();

        // A default receiver swallows anything that matched no name.
        let Some(d) = found.or_else(|| schema.descriptors().iter().find(|d| d.default)) else {
            return Err(ResolveError::UnknownArgument {
                token: name.to_string(),
            });
        };

        if d.kind == Kind::Bool {
            let value = match eq_value {
                Some(raw) => match convert::convert_raw(d, converters, raw)? {
                    Value::Bool(b) => Value::Bool(if negated { !b } else { b }),
                    other => other,
                },
                None => Value::Bool(!negated),
            };
            entries.insert(d.key.clone(), value);
        } else {
            let raw = match eq_value {
                Some(v) => v.to_string(),
                None if by_name => match args.get(i + 1) {
                    Some(v) => {
                        i += 1;
                        v.clone()
                    }
                    None => {
                        return Err(ResolveError::Conversion {
                            raw: String::new(),
                            kind: d.kind_name(),
                            reason: format!("no value followed '{name}'"),
                        });
                    }
                },
                // Matched by default fallback: the token itself is the value.
                None => token.clone(),
            };

            if d.is_array() {
                let mut items = match entries.remove(&d.key) {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                };
                match convert::convert_raw(d, converters, &raw)? {
                    Value::Array(new_items) => items.extend(new_items),
                    other => items.push(other),
                }
                entries.insert(d.key.clone(), Value::Array(items));
            } else {
                let value = convert::convert_raw(d, converters, &raw)?;
                entries.insert(d.key.clone(), value);
            }
        }

        i += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::fixtures::test::argv;

    fn run(schema: &Schema, rest: &[&str]) -> Result<BTreeMap<Key, Value>, ResolveError> {
        let mut entries = BTreeMap::new();
        read(&mut entries, schema, &Converters::builtin(), &argv(rest))?;
        Ok(entries)
    }

    fn get<'a>(entries: &'a BTreeMap<Key, Value>, key: &str) -> &'a Value {
        &entries[&Key::Named(key.to_string())]
    }

    fn bool_schema() -> Schema {
        Schema::builder()
            .field(Field::new("what").kind(Kind::Bool).description("what"))
            .build()
            .unwrap()
    }

    #[test]
    fn bool_presence_sets_true() {
        for rest in [&["--what"][..], &["-w"][..], &["--what=true"][..]] {
            let entries = run(&bool_schema(), rest).unwrap();
            assert_eq!(get(&entries, "what"), &Value::Bool(true), "{rest:?}");
        }
    }

    #[test]
    fn bool_negation_sets_false() {
        for rest in [&["--no-what"][..], &["--what=false"][..]] {
            let entries = run(&bool_schema(), rest).unwrap();
            assert_eq!(get(&entries, "what"), &Value::Bool(false), "{rest:?}");
        }
    }

    #[test]
    fn negated_flag_with_value_flips_it() {
        let entries = run(&bool_schema(), &["--no-what=true"]).unwrap();
        assert_eq!(get(&entries, "what"), &Value::Bool(false));

        let entries = run(&bool_schema(), &["--no-what=false"]).unwrap();
        assert_eq!(get(&entries, "what"), &Value::Bool(true));
    }

    #[test]
    fn string_takes_next_token_or_eq_value() {
        let schema = Schema::builder().field(Field::new("what")).build().unwrap();
        for rest in [&["--what", "isit"][..], &["--what=isit"][..]] {
            let entries = run(&schema, rest).unwrap();
            assert_eq!(get(&entries, "what"), &Value::Str("isit".into()), "{rest:?}");
        }
    }

    #[test]
    fn string_array_accumulates() {
        let schema = Schema::builder()
            .field(Field::new("what").kind(Kind::parse("string[]")))
            .build()
            .unwrap();
        let expected = Value::Array(vec![Value::Str("isit".into()), Value::Str("more".into())]);
        for rest in [
            &["--what=isit,more"][..],
            &["--what", "isit,more"][..],
            &["--what", "isit", "--what", "more"][..],
        ] {
            let entries = run(&schema, rest).unwrap();
            assert_eq!(get(&entries, "what"), &expected, "{rest:?}");
        }
    }

    #[test]
    fn number_array_via_item_kind() {
        let schema = Schema::builder()
            .field(Field::new("what").item_kind(Kind::Number))
            .build()
            .unwrap();
        let entries = run(&schema, &["--what", "0", "--what", "1"]).unwrap();
        assert_eq!(
            get(&entries, "what"),
            &Value::Array(vec![Value::Number(0.0), Value::Number(1.0)])
        );
    }

    #[test]
    fn array_appends_onto_existing_entry() {
        let schema = Schema::builder()
            .field(Field::new("what").kind(Kind::parse("string[]")))
            .build()
            .unwrap();
        let mut entries = BTreeMap::new();
        entries.insert(
            Key::Named("what".into()),
            Value::Array(vec![Value::Str("low".into())]),
        );
        read(
            &mut entries,
            &schema,
            &Converters::builtin(),
            &argv(&["--what", "high"]),
        )
        .unwrap();
        assert_eq!(
            get(&entries, "what"),
            &Value::Array(vec![Value::Str("low".into()), Value::Str("high".into())])
        );
    }

    #[test]
    fn default_receiver_swallows_bare_tokens() {
        let schema = Schema::builder()
            .field(Field::new("what").default_receiver())
            .build()
            .unwrap();
        let entries = run(&schema, &["yes"]).unwrap();
        assert_eq!(get(&entries, "what"), &Value::Str("yes".into()));
    }

    #[test]
    fn default_receiver_array_collects_tokens() {
        let schema = Schema::builder()
            .field(Field::new("what").item_kind(Kind::Str).default_receiver())
            .build()
            .unwrap();
        let entries = run(&schema, &["1", "2"]).unwrap();
        assert_eq!(
            get(&entries, "what"),
            &Value::Array(vec![Value::Str("1".into()), Value::Str("2".into())])
        );
    }

    #[test]
    fn named_field_and_default_receiver_mix() {
        let schema = Schema::builder()
            .field(Field::new("what").item_kind(Kind::Str).default_receiver())
            .field(Field::new("more").description("test"))
            .build()
            .unwrap();
        let entries = run(&schema, &["--more", "2", "1"]).unwrap();
        assert_eq!(get(&entries, "more"), &Value::Str("2".into()));
        assert_eq!(
            get(&entries, "what"),
            &Value::Array(vec![Value::Str("1".into())])
        );
    }

    #[test]
    fn explicit_long_matches_long_and_derived_short() {
        let schema = Schema::builder()
            .field(Field::new("what").long("more"))
            .build()
            .unwrap();
        for rest in [&["--more", "stuff"][..], &["-m", "stuff"][..]] {
            let entries = run(&schema, rest).unwrap();
            assert_eq!(get(&entries, "what"), &Value::Str("stuff".into()), "{rest:?}");
        }
    }

    #[test]
    fn prefixed_flags() {
        let schema = Schema::builder()
            .prefix("config")
            .resolution(vec![crate::schema::Source::Arg])
            .field(Field::new("what").kind(Kind::Bool))
            .build()
            .unwrap();
        let entries = run(&schema, &["--config-what"]).unwrap();
        assert_eq!(get(&entries, "what"), &Value::Bool(true));

        let entries = run(&schema, &["--no-config-what"]).unwrap();
        assert_eq!(get(&entries, "what"), &Value::Bool(false));

        // The unprefixed spelling no longer matches anything.
        assert!(matches!(
            run(&schema, &["--what"]),
            Err(ResolveError::UnknownArgument { .. })
        ));
    }

    #[test]
    fn camel_case_long_matches_kebab_flag() {
        let schema = Schema::builder()
            .prefix("configIt")
            .resolution(vec![crate::schema::Source::Arg])
            .field(Field::new("whatThe"))
            .build()
            .unwrap();
        let entries = run(&schema, &["--config-it-what-the", "heel"]).unwrap();
        assert_eq!(get(&entries, "whatThe"), &Value::Str("heel".into()));
    }

    #[test]
    fn unknown_argument_without_default_fails() {
        let schema = Schema::builder().field(Field::new("what")).build().unwrap();
        let err = run(&schema, &["--bogus", "x"]).unwrap_err();
        match err {
            ResolveError::UnknownArgument { token } => assert_eq!(token, "--bogus"),
            other => panic!("expected UnknownArgument, got {other:?}"),
        }
    }

    #[test]
    fn integer_truncates_fractional_input() {
        let schema = Schema::builder()
            .field(Field::new("test").kind(Kind::Int))
            .build()
            .unwrap();
        let entries = run(&schema, &["--test", "1.1"]).unwrap();
        assert_eq!(get(&entries, "test"), &Value::Int(1));
    }

    #[test]
    fn conversion_failure_surfaces() {
        let schema = Schema::builder()
            .field(Field::new("test").kind(Kind::Int))
            .build()
            .unwrap();
        let err = run(&schema, &["--test", "zap"]).unwrap_err();
        assert!(matches!(err, ResolveError::Conversion { .. }));
        assert!(err.to_string().contains("'zap'"));
    }

    #[test]
    fn custom_converter_applies() {
        let schema = Schema::builder()
            .field(Field::new("what").converter(|v| Ok(Value::Str(format!("-{v}-")))))
            .build()
            .unwrap();
        let entries = run(&schema, &["--what", "stuff"]).unwrap();
        assert_eq!(get(&entries, "what"), &Value::Str("-stuff-".into()));
    }

    #[test]
    fn json_field_as_default_receiver() {
        let schema = Schema::builder()
            .field(Field::new("what").kind(Kind::Bool))
            .field(Field::new("json").kind(Kind::Json).default_receiver())
            .build()
            .unwrap();
        let entries = run(&schema, &["-w", r#"{"what": 1}"#]).unwrap();
        assert_eq!(get(&entries, "what"), &Value::Bool(true));
        assert_eq!(
            get(&entries, "json").as_json().unwrap()["what"],
            serde_json::json!(1)
        );
    }

    #[test]
    fn trailing_flag_without_value_fails() {
        let schema = Schema::builder().field(Field::new("what")).build().unwrap();
        let err = run(&schema, &["--what"]).unwrap_err();
        assert!(matches!(err, ResolveError::Conversion { .. }));
    }
}
