use std::path::PathBuf;
use thiserror::Error;

/// Construction-time schema violations.
///
/// Returned from [`SchemaBuilder::build`](crate::SchemaBuilder::build). Any
/// violation aborts schema setup entirely — there is no partial registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("duplicate name '{name}': field '{field}' collides with '{other}'")]
    DuplicateName {
        field: String,
        other: String,
        name: String,
    },

    #[error("multiple fields marked as the default receiver: '{field}' and '{other}'")]
    MultipleDefaults { field: String, other: String },

    #[error("field {key} has an opaque key and needs an explicit long name")]
    MissingLongName { key: String },

    #[error("name '{name}' on field '{field}' is reserved for the help trigger")]
    ReservedName { field: String, name: String },
}

/// Resolution-time failures.
///
/// These never cross the resolution boundary as errors: [`resolve`](crate::resolve())
/// renders them to a message and hands it to the failure callback exactly once.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unknown argument '{token}'")]
    UnknownArgument { token: String },

    #[error("converting '{raw}' to type '{kind}' failed: {reason}")]
    Conversion {
        raw: String,
        kind: String,
        reason: String,
    },

    #[error("required argument '{field}' was not supplied")]
    MissingRequired { field: String },

    #[error("failed to read rc file {path}: {reason}")]
    RcFile { path: PathBuf, reason: String },
}

/// Failure of a single string-to-value conversion.
///
/// Custom converters return this; the calling source reader wraps it into a
/// [`ResolveError::Conversion`] carrying the raw value and target type name.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ConvertError {
    message: String,
}

impl ConvertError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
