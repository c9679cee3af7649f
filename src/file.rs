//! The rc-file source reader.
//!
//! The rc file (default name `.{prefix}rc`) is looked up in the current
//! directory, then the user's home directory. The configured parser turns it
//! into a flat mapping; `Ok(None)` — the missing-file case — contributes
//! nothing. Parsed values are already typed, so they are assigned directly
//! under each descriptor's unprefixed long name with no string conversion.
//!
//! A present-but-unreadable or unparseable file fails the read: silently
//! dropping a typo'd config would be worse than the diagnostic.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ResolveError;
use crate::field::Key;
use crate::schema::Schema;
use crate::value::Value;

/// Parses an rc file into a flat mapping of long names to typed values.
/// Return `Ok(None)` when the file does not exist.
pub type RcParser = Arc<
    dyn Fn(&Path) -> Result<Option<BTreeMap<String, Value>>, Box<dyn std::error::Error + Send + Sync>>
        + Send
        + Sync,
>;

/// The default parser: the rc file is a JSON object.
pub fn json_parser() -> RcParser {
    Arc::new(|path| {
        let Some(content) = read_if_present(path)? else {
            return Ok(None);
        };
        let parsed: serde_json::Value = serde_json::from_str(&content)?;
        let serde_json::Value::Object(object) = parsed else {
            return Err("rc file must hold a top-level object".into());
        };
        Ok(Some(
            object
                .into_iter()
                .map(|(k, v)| (k, Value::from_json(v)))
                .collect(),
        ))
    })
}

/// An alternative parser for TOML rc files.
pub fn toml_parser() -> RcParser {
    Arc::new(|path| {
        let Some(content) = read_if_present(path)? else {
            return Ok(None);
        };
        let table: toml::Table = content.parse()?;
        Ok(Some(
            table
                .into_iter()
                .map(|(k, v)| (k, Value::from_toml(v)))
                .collect(),
        ))
    })
}

fn read_if_present(
    path: &Path,
) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Where the rc file lives: the current directory if the file exists there,
/// else the home directory if it exists there, else the bare name (which the
/// parser will report as missing).
fn locate(name: &str) -> PathBuf {
    let cwd = PathBuf::from(name);
    if cwd.exists() {
        return cwd;
    }
    if let Some(user) = directories::UserDirs::new() {
        let home = user.home_dir().join(name);
        if home.exists() {
            return home;
        }
    }
    cwd
}

pub(crate) fn read(
    entries: &mut BTreeMap<Key, Value>,
    schema: &Schema,
) -> Result<(), ResolveError> {
    let Some(name) = schema.effective_rc_file() else {
        return Ok(());
    };
    let path = locate(&name);
    let parser = schema.effective_rc_parser();

    let parsed = parser(&path).map_err(|e| ResolveError::RcFile {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    let Some(map) = parsed else {
        return Ok(());
    };

    for d in schema.descriptors() {
        if let Some(value) = map.get(&d.long) {
            entries.insert(d.key.clone(), value.clone());
        }
    }

    Ok(())
}
