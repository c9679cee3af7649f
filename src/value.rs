//! The dynamic value model written during resolution.
//!
//! Source readers produce `Value`s: the ARG and ENV readers by converting raw
//! strings, the FILE and PACKAGE readers by translating already-typed parser
//! output ([`Value::from_json`], [`Value::from_toml`]). [`Value::to_json`] is
//! the bridge back out for typed extraction.

use chrono::NaiveDate;
use regex::Regex;

#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Str(String),
    Int(i64),
    Number(f64),
    Date(NaiveDate),
    Json(serde_json::Value),
    Regex(Regex),
    Array(Vec<Value>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Json(j) => Some(j),
            _ => None,
        }
    }

    /// Translate a parsed JSON value (rc-file output) into the value model.
    ///
    /// Integral numbers become `Int`, other numbers `Number`; objects and
    /// nulls stay structured as `Json`.
    pub fn from_json(v: serde_json::Value) -> Value {
        match v {
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_json).collect())
            }
            other => Value::Json(other),
        }
    }

    /// Translate a parsed TOML value (manifest or TOML rc output) into the
    /// value model. Datetimes with a date component become `Date`.
    pub fn from_toml(v: toml::Value) -> Value {
        match v {
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::String(s) => Value::Str(s),
            toml::Value::Integer(i) => Value::Int(i),
            toml::Value::Float(f) => Value::Number(f),
            toml::Value::Datetime(dt) => match dt.date {
                Some(d) => match NaiveDate::from_ymd_opt(
                    i32::from(d.year),
                    u32::from(d.month),
                    u32::from(d.day),
                ) {
                    Some(date) => Value::Date(date),
                    None => Value::Str(dt.to_string()),
                },
                None => Value::Str(dt.to_string()),
            },
            toml::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_toml).collect())
            }
            toml::Value::Table(t) => Value::Json(
                serde_json::to_value(t).unwrap_or(serde_json::Value::Null),
            ),
        }
    }

    /// Render as JSON for typed extraction: dates as `%Y-%m-%d` strings,
    /// regexes as their pattern text.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
            Value::Json(j) => j.clone(),
            Value::Regex(r) => serde_json::Value::String(r.as_str().to_string()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
        }
    }
}

// Regexes have no structural equality; pattern text is the identity that
// matters for resolution results.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Json(a), Value::Json(b)) => a == b,
            (Value::Regex(a), Value::Regex(b)) => a.as_str() == b.as_str(),
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => false,
        }
    }
}
