//! The field descriptor registry and its options.
//!
//! A [`Schema`] is built once, up front, and is read-only for its whole life:
//! every registration check (name collisions, reserved names, the
//! single-default rule) happens in [`SchemaBuilder::build`], and the first
//! violation aborts the build — a schema either exists completely or not at
//! all.
//!
//! Option defaults derive lazily from the `prefix`, the way a single
//! `app_name` seeds file name and env prefix elsewhere: prefix `config` gives
//! the flag prefix `config-`, the env prefix `CONFIG_`, the rc file
//! `.configrc` and the manifest key `config`.

use std::path::PathBuf;

use heck::ToKebabCase;

use crate::error::SchemaError;
use crate::field::{Field, FieldDescriptor, Key};
use crate::file::{self, RcParser};
use crate::kind::Kind;

/// One of the four ranked origins of configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Arg,
    Env,
    File,
    Package,
}

pub(crate) struct SchemaOptions {
    prefix: Option<String>,
    rc_file: Option<String>,
    arg_prefix: Option<String>,
    env_prefix: Option<String>,
    package_key: Option<String>,
    resolution: Option<Vec<Source>>,
    parser: Option<RcParser>,
    manifest_path: Option<PathBuf>,
}

impl std::fmt::Debug for SchemaOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaOptions")
            .field("prefix", &self.prefix)
            .field("rc_file", &self.rc_file)
            .field("arg_prefix", &self.arg_prefix)
            .field("env_prefix", &self.env_prefix)
            .field("package_key", &self.package_key)
            .field("resolution", &self.resolution)
            .field("parser", &self.parser.as_ref().map(|_| "<fn>"))
            .field("manifest_path", &self.manifest_path)
            .finish()
    }
}

impl SchemaOptions {
    fn new() -> Self {
        Self {
            prefix: None,
            rc_file: None,
            arg_prefix: None,
            env_prefix: None,
            package_key: None,
            resolution: None,
            parser: None,
            manifest_path: None,
        }
    }

    /// Whether any multi-source option was touched. Plain schemas resolve
    /// from the argument vector only.
    fn multi_source(&self) -> bool {
        self.prefix.is_some()
            || self.rc_file.is_some()
            || self.arg_prefix.is_some()
            || self.env_prefix.is_some()
            || self.package_key.is_some()
            || self.parser.is_some()
            || self.manifest_path.is_some()
    }
}

/// An immutable schema: ordered field descriptors plus source options.
#[derive(Debug)]
pub struct Schema {
    descriptors: Vec<FieldDescriptor>,
    options: SchemaOptions,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Descriptors in registration order.
    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    pub(crate) fn effective_arg_prefix(&self) -> Option<&str> {
        self.options
            .arg_prefix
            .as_deref()
            .or(self.options.prefix.as_deref())
    }

    pub(crate) fn effective_env_prefix(&self) -> Option<&str> {
        self.options
            .env_prefix
            .as_deref()
            .or(self.options.prefix.as_deref())
    }

    pub(crate) fn effective_rc_file(&self) -> Option<String> {
        if let Some(name) = &self.options.rc_file {
            return Some(name.clone());
        }
        let prefix = self.options.prefix.as_deref()?;
        Some(format!(".{}rc", prefix.to_kebab_case().replace('-', "")))
    }

    pub(crate) fn effective_package_key(&self) -> Option<&str> {
        self.options
            .package_key
            .as_deref()
            .or(self.options.prefix.as_deref())
    }

    /// The configured source ranking, highest precedence first. Defaults to
    /// `[Arg]` for plain schemas and the full `[Arg, Env, File, Package]`
    /// ranking once any multi-source option is set.
    pub(crate) fn effective_resolution(&self) -> Vec<Source> {
        if let Some(order) = &self.options.resolution {
            return order.clone();
        }
        if self.options.multi_source() {
            vec![Source::Arg, Source::Env, Source::File, Source::Package]
        } else {
            vec![Source::Arg]
        }
    }

    pub(crate) fn effective_rc_parser(&self) -> RcParser {
        self.options
            .parser
            .clone()
            .unwrap_or_else(file::json_parser)
    }

    pub(crate) fn effective_manifest_path(&self) -> PathBuf {
        self.options
            .manifest_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("Cargo.toml"))
    }
}

/// Accumulates field declarations and options, then builds the schema.
pub struct SchemaBuilder {
    fields: Vec<Field>,
    options: SchemaOptions,
}

impl SchemaBuilder {
    fn new() -> Self {
        Self {
            fields: Vec::new(),
            options: SchemaOptions::new(),
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Seed prefix for all derived names: flag prefix, env prefix, rc-file
    /// name and manifest key. Setting it enables the full source ranking.
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.options.prefix = Some(prefix.to_string());
        self
    }

    /// Override the rc file name (default: `.{prefix}rc`).
    pub fn rc_file(mut self, name: &str) -> Self {
        self.options.rc_file = Some(name.to_string());
        self
    }

    /// Override the flag prefix (default: the schema prefix).
    pub fn arg_prefix(mut self, prefix: &str) -> Self {
        self.options.arg_prefix = Some(prefix.to_string());
        self
    }

    /// Override the environment key prefix (default: the schema prefix,
    /// upper-snake-cased).
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.options.env_prefix = Some(prefix.to_string());
        self
    }

    /// Override the manifest metadata key (default: the schema prefix).
    pub fn package_key(mut self, key: &str) -> Self {
        self.options.package_key = Some(key.to_string());
        self
    }

    /// Rank the sources explicitly, highest precedence first. A subset is
    /// fine — unlisted sources never run.
    pub fn resolution(mut self, order: Vec<Source>) -> Self {
        self.options.resolution = Some(order);
        self
    }

    /// Replace the rc-file parser (default: [`json_parser`](crate::json_parser)).
    pub fn rc_parser(mut self, parser: RcParser) -> Self {
        self.options.parser = Some(parser);
        self
    }

    /// Where the package manifest lives (default: `Cargo.toml`).
    pub fn manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.manifest_path = Some(path.into());
        self
    }

    /// Register every field, applying name defaults and running the
    /// construction-time checks in declaration order.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut descriptors: Vec<FieldDescriptor> = Vec::new();
        let mut default_key: Option<Key> = None;

        for field in self.fields {
            let Field {
                key,
                long,
                short,
                kind,
                item_kind,
                converter,
                description,
                required,
                default,
            } = field;

            let long = match long {
                Some(l) => l,
                None => match &key {
                    Key::Named(name) => name.clone(),
                    Key::Opaque(_) => {
                        return Err(SchemaError::MissingLongName {
                            key: key.to_string(),
                        });
                    }
                },
            };
            let short = short.unwrap_or_else(|| long.chars().next().unwrap_or('_'));

            let canon = long.to_kebab_case();
            if canon == "help" || short == 'h' {
                let name = if canon == "help" {
                    canon
                } else {
                    short.to_string()
                };
                return Err(SchemaError::ReservedName {
                    field: key.to_string(),
                    name,
                });
            }

            if let Some(existing) = descriptors
                .iter()
                .find(|d| d.long.to_kebab_case() == canon || d.short == short)
            {
                let name = if existing.long.to_kebab_case() == canon {
                    canon
                } else {
                    short.to_string()
                };
                return Err(SchemaError::DuplicateName {
                    field: key.to_string(),
                    other: existing.key.to_string(),
                    name,
                });
            }

            if default {
                if let Some(first) = &default_key {
                    return Err(SchemaError::MultipleDefaults {
                        field: key.to_string(),
                        other: first.to_string(),
                    });
                }
                default_key = Some(key.clone());
            }

            // The type tag is fixed here, once; item_kind alone implies an array.
            let kind = match (kind, &item_kind) {
                (Some(k), _) => k,
                (None, Some(item)) => Kind::Array(Box::new(item.clone())),
                (None, None) => Kind::Str,
            };

            descriptors.push(FieldDescriptor {
                key,
                long,
                short,
                kind,
                item_kind,
                converter,
                description,
                required,
                default,
            });
        }

        Ok(Schema {
            descriptors,
            options: self.options,
        })
    }
}
