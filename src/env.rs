//! The environment-map source reader.
//!
//! Looks up one key per descriptor (`[PREFIX_]LONG_NAME` upper-snake). For
//! boolean fields the `NO_`-prefixed variant is checked first and its
//! converted value inverted, mirroring the `--no-` flag form. Absent keys
//! leave the target untouched — this reader never writes nulls over values a
//! lower-precedence source supplied.
//!
//! Takes a plain map so tests can pass synthetic data instead of
//! `std::env::vars()`.

use std::collections::{BTreeMap, HashMap};

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
    env: &HashMap<String, String>,
) -> Result<(), ResolveError> {
    let env_prefix = schema.effective_env_prefix();

    for d in schema.descriptors() {
        let key = names::env_key(&d.long, env_prefix);

        if d.kind == Kind::Bool {
            if let Some(raw) = env.get(&names::negated_env_key(&key)) {
                let value = match convert::convert_raw(d, converters, raw)? {
                    Value::Bool(b) => Value::Bool(!b),
                    other => other,
                };
                entries.insert(d.key.clone(), value);
                continue;
            }
        }

        if let Some(raw) = env.get(&key) {
            let value = convert::convert_raw(d, converters, raw)?;
            entries.insert(d.key.clone(), value);
        }
    }

    Ok(())
}
