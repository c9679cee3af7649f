//! The package-manifest source reader.
//!
//! Tool configuration carried in the crate manifest, under
//! `[package.metadata.<package_key>]` in `Cargo.toml`. Values are already
//! typed and assigned directly, like the rc-file reader. Every lookup failure
//! — manifest absent, unparseable, key absent — is an empty contribution,
//! never a hard error.

use std::collections::BTreeMap;

use crate::error::ResolveError;
use crate::field::Key;
use crate::schema::Schema;
use crate::value::Value;

pub(crate) fn read(
    entries: &mut BTreeMap<Key, Value>,
    schema: &Schema,
) -> Result<(), ResolveError> {
    let Some(package_key) = schema.effective_package_key() else {
        return Ok(());
    };
    let path = schema.effective_manifest_path();

    let Ok(content) = std::fs::read_to_string(&path) else {
        return Ok(());
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return Ok(());
    };
    let Some(section) = table
        .get("package")
        .and_then(|p| p.get("metadata"))
        .and_then(|m| m.get(package_key))
        .and_then(|v| v.as_table())
    else {
        return Ok(());
    };

    for d in schema.descriptors() {
        if let Some(value) = section.get(&d.long) {
            entries.insert(d.key.clone(), Value::from_toml(value.clone()));
        }
    }

    Ok(())
}
