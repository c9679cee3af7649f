//! The resolution pipeline: run the source readers in precedence order and
//! validate the result.
//!
//! Operates on injected inputs (token slice, env map, converter table) with
//! no process state, so the full pipeline is testable with synthetic data.
//! Steps:
//!
//! 1. Help interception — `-h`/`--help` anywhere short-circuits to the
//!    callback with no message
//! 2. Walk the configured source ranking from lowest to highest precedence;
//!    each reader writes over earlier readers' entries, so the last writer
//!    for a field is the highest-ranked source that supplied it
//! 3. A reader failure stops the walk and reports through the callback
//! 4. Validate required fields
//!
//! The callback is invoked exactly once on help or failure, never on
//! success, and nothing here ever terminates the process.

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;

use crate::args;
use crate::convert::Converters;
use crate::env;
use crate::error::ResolveError;
use crate::field::{FieldDescriptor, Key};
use crate::file;
use crate::help;
use crate::manifest;
use crate::schema::{Schema, Source};
use crate::value::Value;

/// The outcome of a successful resolution: one typed value per field that
/// some source supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    entries: BTreeMap<Key, Value>,
}

impl Resolved {
    /// Look up a named field's value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(&Key::Named(key.to_string()))
    }

    /// Look up by full key — the only way to reach opaque-keyed fields.
    pub fn get_key(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_int)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }

    /// Deserialize the named entries into a caller struct, via JSON: dates
    /// become `%Y-%m-%d` strings, regexes their pattern text. Opaque-keyed
    /// entries are not included — reach them with [`get_key`](Self::get_key).
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        let mut object = serde_json::Map::new();
        for (key, value) in &self.entries {
            if let Key::Named(name) = key {
                object.insert(name.clone(), value.to_json());
            }
        }
        serde_json::from_value(serde_json::Value::Object(object))
    }
}

/// Resolve a schema against the given inputs.
///
/// `args` follows the argument-vector contract: token 0 is the process path
/// (ignored), token 1 the script name surfaced in diagnostics, the rest are
/// parsed. On help or any failure the callback runs exactly once and the
/// result is `None`.
pub fn resolve<F>(
    schema: &Schema,
    args: &[String],
    env_vars: &HashMap<String, String>,
    converters: &Converters,
    mut on_failure: F,
) -> Option<Resolved>
where
    F: FnMut(&str, &[FieldDescriptor], Option<&str>),
{
    let script = args.get(1).map(String::as_str).unwrap_or("");

    if args.iter().any(|t| t == "-h" || t == "--help") {
        on_failure(script, schema.descriptors(), None);
        return None;
    }

    let mut entries: BTreeMap<Key, Value> = BTreeMap::new();

    // The ranking lists sources highest-first; run them lowest-first so a
    // later write is a higher-ranked source winning the field.
    for source in schema.effective_resolution().iter().rev() {
        let outcome = match source {
            Source::Arg => args::read(&mut entries, schema, converters, args),
            Source::Env => env::read(&mut entries, schema, converters, env_vars),
            Source::File => file::read(&mut entries, schema),
            Source::Package => manifest::read(&mut entries, schema),
        };
        if let Err(e) = outcome {
            on_failure(script, schema.descriptors(), Some(&e.to_string()));
            return None;
        }
    }

    if let Some(missing) = schema
        .descriptors()
        .iter()
        .find(|d| d.required && !entries.contains_key(&d.key))
    {
        let e = ResolveError::MissingRequired {
            field: missing.key.to_string(),
        };
        on_failure(script, schema.descriptors(), Some(&e.to_string()));
        return None;
    }

    Some(Resolved { entries })
}

/// Resolve from the process environment: `std::env::args` / `std::env::vars`,
/// the builtin converter table, and [`print_usage`](crate::print_usage) as
/// the callback. The process path slot of the argument-vector contract is
/// filled with an empty token so the program name lands in the script slot.
pub fn resolve_os(schema: &Schema) -> Option<Resolved> {
    let args: Vec<String> = std::iter::once(String::new())
        .chain(std::env::args())
        .collect();
    let env_vars: HashMap<String, String> = std::env::vars().collect();
    resolve(
        schema,
        &args,
        &env_vars,
        &Converters::builtin(),
        help::print_usage,
    )
}
