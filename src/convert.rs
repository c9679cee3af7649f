//! String-to-value conversion.
//!
//! A [`Converters`] table maps type tags to conversion functions. The default
//! table is built once by [`Converters::builtin`] and passed by reference into
//! every resolution call — callers needing custom behavior pass an extended
//! table (or set a per-field converter) instead of mutating shared state.
//!
//! Lookup priority for a field: its explicit converter, then the table's
//! resolver hook (if any), then the table entry for its (array-element) type
//! tag, then the supplied fallback.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{ConvertError, ResolveError};
use crate::field::FieldDescriptor;
use crate::kind::Kind;
use crate::value::Value;

/// Turns a raw source string into a typed value.
pub type Converter = Arc<dyn Fn(&str) -> Result<Value, ConvertError> + Send + Sync>;

/// Picks a converter for a whole descriptor, overriding table lookup.
pub type ConverterResolveFn =
    Arc<dyn Fn(&FieldDescriptor) -> Option<Converter> + Send + Sync>;

/// An immutable type-tag-to-converter table, optionally fronted by a
/// descriptor-level resolver hook.
pub struct Converters {
    table: HashMap<Kind, Converter>,
    resolver: Option<ConverterResolveFn>,
}

impl Converters {
    /// The built-in table covering every scalar tag. Array conversion is
    /// structural (split, then the element tag's entry) and has no entry here.
    pub fn builtin() -> Self {
        let mut table: HashMap<Kind, Converter> = HashMap::new();
        table.insert(Kind::Bool, Arc::new(|s| Ok(Value::Bool(parse_bool(s)))));
        table.insert(Kind::Str, str_converter());
        table.insert(Kind::Opaque, str_converter());
        table.insert(Kind::Int, Arc::new(int_converter));
        table.insert(Kind::Number, Arc::new(number_converter));
        table.insert(Kind::Date, Arc::new(date_converter));
        table.insert(Kind::Json, Arc::new(json_converter));
        table.insert(Kind::Regex, Arc::new(regex_converter));
        Self {
            table,
            resolver: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
            resolver: None,
        }
    }

    /// Return a table with `converter` registered for `kind`, replacing any
    /// existing entry.
    pub fn with(mut self, kind: Kind, converter: Converter) -> Self {
        self.table.insert(kind, converter);
        self
    }

    /// Front the table with a descriptor-level resolver. It runs after a
    /// field's explicit converter but before table lookup; returning `None`
    /// falls through to the table.
    pub fn with_resolver(mut self, resolver: ConverterResolveFn) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn get(&self, kind: &Kind) -> Option<&Converter> {
        self.table.get(kind)
    }

    /// Resolve the converter for a field: explicit converter first, then the
    /// resolver hook, then the table entry for its (array-element) type tag,
    /// then `fallback`.
    pub fn resolve(&self, descriptor: &FieldDescriptor, fallback: Converter) -> Converter {
        if let Some(explicit) = &descriptor.converter {
            return explicit.clone();
        }
        if let Some(resolver) = &self.resolver
            && let Some(resolved) = resolver(descriptor)
        {
            return resolved;
        }
        let kind = if descriptor.is_array() {
            descriptor.elem_kind()
        } else {
            descriptor.kind.clone()
        };
        self.table.get(&kind).cloned().unwrap_or(fallback)
    }

    fn hooked(&self, descriptor: &FieldDescriptor) -> Option<Converter> {
        self.resolver.as_ref().and_then(|resolver| resolver(descriptor))
    }

    fn for_kind(&self, kind: &Kind) -> Converter {
        self.table.get(kind).cloned().unwrap_or_else(str_converter)
    }
}

/// Convert one raw source string for a field, honoring lookup priority and
/// array splitting. Failures are wrapped with the raw value and type name.
pub(crate) fn convert_raw(
    descriptor: &FieldDescriptor,
    converters: &Converters,
    raw: &str,
) -> Result<Value, ResolveError> {
    let wrap = |e: ConvertError| ResolveError::Conversion {
        raw: raw.to_string(),
        kind: descriptor.kind_name(),
        reason: e.to_string(),
    };

    if let Some(explicit) = &descriptor.converter {
        return explicit(raw).map_err(wrap);
    }
    if let Some(hooked) = converters.hooked(descriptor) {
        return hooked(raw).map_err(wrap);
    }

    if descriptor.is_array() {
        let elem = converters.for_kind(&descriptor.elem_kind());
        let mut items = Vec::new();
        for piece in split_elements(raw) {
            items.push(elem(piece).map_err(wrap)?);
        }
        return Ok(Value::Array(items));
    }

    converters.for_kind(&descriptor.kind)(raw).map_err(wrap)
}

/// Split an array value on commas, dropping whitespace that follows a comma
/// (`"a, b"` and `"a,b"` both yield `["a", "b"]`).
pub(crate) fn split_elements(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',')
        .enumerate()
        .map(|(i, piece)| if i == 0 { piece } else { piece.trim_start() })
}

fn str_converter() -> Converter {
    Arc::new(|s| Ok(Value::Str(s.to_string())))
}

/// True iff the raw value is `true` or `1`, case-insensitively; surrounding
/// quotes are tolerated. Anything else is false.
fn parse_bool(raw: &str) -> bool {
    let s = raw.trim();
    let s = s
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s);
    s.eq_ignore_ascii_case("true") || s == "1"
}

/// Base-10 integer parse; fractional input truncates (`"1.1"` is 1).
fn int_converter(raw: &str) -> Result<Value, ConvertError> {
    let s = raw.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Ok(Value::Int(i));
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(Value::Int(f.trunc() as i64)),
        _ => Err(ConvertError::new(format!("'{raw}' is not an integer"))),
    }
}

fn number_converter(raw: &str) -> Result<Value, ConvertError> {
    raw.trim()
        .parse::<f64>()
        .map(Value::Number)
        .map_err(|e| ConvertError::new(e.to_string()))
}

/// Standard date-string parsing: RFC 3339, then `%Y-%m-%d`, `%m/%d/%Y` and
/// `%m/%d/%y` (so `"10/10/10"` lands on 2010-10-10).
fn date_converter(raw: &str) -> Result<Value, ConvertError> {
    let s = raw.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Ok(Value::Date(dt.date_naive()));
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(Value::Date(date));
        }
    }
    Err(ConvertError::new(format!("unrecognized date '{raw}'")))
}

fn json_converter(raw: &str) -> Result<Value, ConvertError> {
    serde_json::from_str(raw)
        .map(Value::Json)
        .map_err(|e| ConvertError::new(e.to_string()))
}

/// `/pattern/flags` extracts pattern and flags; anything else is a bare
/// pattern with no flags. Flags map to the engine's inline groups.
fn regex_converter(raw: &str) -> Result<Value, ConvertError> {
    let (pattern, flags) = match raw.strip_prefix('/').and_then(|rest| rest.rfind('/').map(|i| rest.split_at(i))) {
        Some((pattern, slash_flags)) => (pattern, &slash_flags[1..]),
        None => (raw, ""),
    };
    let mut inline = String::new();
    for flag in flags.chars() {
        match flag {
            'i' | 'm' | 's' | 'x' | 'U' => inline.push(flag),
            other => {
                return Err(ConvertError::new(format!("unsupported regex flag '{other}'")));
            }
        }
    }
    let source = if inline.is_empty() {
        pattern.to_string()
    } else {
        format!("(?{inline}){pattern}")
    };
    Regex::new(&source)
        .map(Value::Regex)
        .map_err(|e| ConvertError::new(e.to_string()))
}
