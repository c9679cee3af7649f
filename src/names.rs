//! Canonical name derivation for flags and environment keys.
//!
//! Pure functions over a field's long name: `whatThe` (or `what_the`) becomes
//! the flag `what-the` and the env key `WHAT_THE`. Prefixes from the schema
//! options join with the same separators (`--config-what-the`,
//! `CONFIG_WHAT_THE`). Derivations are recomputed at each use — they are
//! cheap, and caching them would invite staleness.

use heck::{ToKebabCase, ToShoutySnakeCase};

/// The flag name matched after `--`, without the dashes.
pub fn flag_name(long: &str, arg_prefix: Option<&str>) -> String {
    let name = long.to_kebab_case();
    match arg_prefix {
        Some(prefix) => format!("{}-{name}", prefix.to_kebab_case()),
        None => name,
    }
}

/// The environment key for a field.
pub fn env_key(long: &str, env_prefix: Option<&str>) -> String {
    let name = long.to_shouty_snake_case();
    match env_prefix {
        Some(prefix) => format!("{}_{name}", prefix.to_shouty_snake_case()),
        None => name,
    }
}

/// The negated variant of an environment key, for boolean fields.
pub fn negated_env_key(key: &str) -> String {
    format!("NO_{key}")
}
