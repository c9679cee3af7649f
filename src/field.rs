//! Field declarations and the descriptors derived from them.
//!
//! A [`Field`] is the caller-facing partial declaration — the builder
//! equivalent of a field annotation. Registration on a
//! [`Schema`](crate::Schema) turns it into an immutable [`FieldDescriptor`]
//! with the name defaults applied: `long` falls back to the stringified key,
//! `short` to the first character of `long`.

use std::fmt;

use crate::convert::Converter;
use crate::error::ConvertError;
use crate::kind::Kind;
use crate::value::Value;

/// Identifier of a field within its schema.
///
/// `Named` keys double as the default long name. `Opaque` keys cannot be
/// rendered into a usable flag name, so they require an explicit `long`
/// (enforced at registration).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Named(String),
    Opaque(u64),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Named(name) => write!(f, "{name}"),
            Key::Opaque(id) => write!(f, "#{id}"),
        }
    }
}

/// A partial field declaration, completed at registration.
pub struct Field {
    pub(crate) key: Key,
    pub(crate) long: Option<String>,
    pub(crate) short: Option<char>,
    pub(crate) kind: Option<Kind>,
    pub(crate) item_kind: Option<Kind>,
    pub(crate) converter: Option<Converter>,
    pub(crate) description: Option<String>,
    pub(crate) required: bool,
    pub(crate) default: bool,
}

impl Field {
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_key(Key::Named(key.into()))
    }

    /// A field whose storage key is not human-readable. Must be given a
    /// [`long`](Self::long) name before the schema will build.
    pub fn opaque(id: u64) -> Self {
        Self::with_key(Key::Opaque(id))
    }

    fn with_key(key: Key) -> Self {
        Self {
            key,
            long: None,
            short: None,
            kind: None,
            item_kind: None,
            converter: None,
            description: None,
            required: false,
            default: false,
        }
    }

    /// Override the multi-character name used for `--name` matching and
    /// env-key derivation.
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    /// Override the single-character alias used for `-x` matching.
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Element type for array fields. Setting this alone marks the field as
    /// an array.
    pub fn item_kind(mut self, kind: Kind) -> Self {
        self.item_kind = Some(kind);
        self
    }

    /// Explicit string-to-value conversion, overriding type-based lookup.
    pub fn converter<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Value, ConvertError> + Send + Sync + 'static,
    {
        self.converter = Some(std::sync::Arc::new(f));
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Resolution fails unless some source supplies a value for this field.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark this field as the receiver for unlabeled positional tokens.
    /// At most one field per schema may carry this.
    pub fn default_receiver(mut self) -> Self {
        self.default = true;
        self
    }
}

/// The immutable metadata record for one configurable field.
///
/// Created once at schema build time; read, never written, during every
/// resolution call.
#[derive(Clone)]
pub struct FieldDescriptor {
    pub key: Key,
    pub long: String,
    pub short: char,
    pub kind: Kind,
    pub item_kind: Option<Kind>,
    pub converter: Option<Converter>,
    pub description: Option<String>,
    pub required: bool,
    pub default: bool,
}

impl FieldDescriptor {
    pub fn is_array(&self) -> bool {
        self.item_kind.is_some() || matches!(self.kind, Kind::Array(_))
    }

    /// The element type for array fields: `item_kind` if present, else the
    /// declared array's element, else string.
    pub fn elem_kind(&self) -> Kind {
        if let Some(item) = &self.item_kind {
            return item.clone();
        }
        match &self.kind {
            Kind::Array(elem) => (**elem).clone(),
            _ => Kind::Str,
        }
    }

    /// The type name used in conversion diagnostics.
    pub(crate) fn kind_name(&self) -> String {
        if self.is_array() {
            format!("{}[]", self.elem_kind())
        } else {
            self.kind.to_string()
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("key", &self.key)
            .field("long", &self.long)
            .field("short", &self.short)
            .field("kind", &self.kind)
            .field("item_kind", &self.item_kind)
            .field("converter", &self.converter.as_ref().map(|_| "<fn>"))
            .field("required", &self.required)
            .field("default", &self.default)
            .finish()
    }
}
