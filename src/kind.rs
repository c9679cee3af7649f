use std::fmt;

/// Normalized type tag for a field.
///
/// A closed union: every declared type resolves to one of these at
/// registration time and is never reinterpreted afterward. `Opaque` is the
/// escape hatch for values the resolver should not interpret — it converts
/// as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Str,
    Number,
    Int,
    Date,
    Json,
    Regex,
    Array(Box<Kind>),
    Opaque,
}

impl Kind {
    /// Normalize a string-named type into a tag.
    ///
    /// Accepts the conventional spellings case-insensitively (`"Int"`,
    /// `"integer"`, `"bool"`, `"number"`, `"float"`, …) and a trailing `[]`
    /// array marker (`"Number[]"`). Unrecognized names normalize to `Str`.
    pub fn parse(name: &str) -> Kind {
        let name = name.trim();
        if let Some(elem) = name.strip_suffix("[]") {
            return Kind::Array(Box::new(Kind::parse(elem)));
        }
        match name.to_ascii_lowercase().as_str() {
            "bool" | "boolean" => Kind::Bool,
            "int" | "integer" => Kind::Int,
            "number" | "float" | "f64" => Kind::Number,
            "date" => Kind::Date,
            "json" => Kind::Json,
            "regex" => Kind::Regex,
            "array" => Kind::Array(Box::new(Kind::Str)),
            "opaque" => Kind::Opaque,
            _ => Kind::Str,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Bool => write!(f, "boolean"),
            Kind::Str => write!(f, "string"),
            Kind::Number => write!(f, "number"),
            Kind::Int => write!(f, "integer"),
            Kind::Date => write!(f, "date"),
            Kind::Json => write!(f, "json"),
            Kind::Regex => write!(f, "regex"),
            Kind::Array(elem) => write!(f, "{elem}[]"),
            Kind::Opaque => write!(f, "opaque"),
        }
    }
}
