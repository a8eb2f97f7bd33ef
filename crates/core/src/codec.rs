//! Typed codec: text ↔ [`Value`] ↔ JSON wire form.
//!
//! Type selection is driven by an explicit [`TypeTag`] supplied by the
//! caller, never inferred from the text — the interactive input is untyped.
//! Rules:
//!
//! 1. Unknown type tokens are rejected before any store call
//! 2. For the `string` tag, bare (unquoted) text is accepted as-is
//! 3. Everything else must parse as JSON of the tagged shape
//! 4. Non-finite floats are rejected at decode, so [`encode`] is total
//!    over decoded values and `decode(tag, encode(v)).value == v` holds

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::value::Value;

/// Runtime type tag selecting the codec variant.
///
/// A closed sum over the eight supported logical types. Parsed from the
/// tokens users type (`int`, `int[]`, `string`, ...); an unrecognized token
/// fails with [`Error::UnsupportedType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `int` — 64-bit signed integer
    Int,
    /// `int[]`
    IntArray,
    /// `float` — 32-bit float
    Float,
    /// `float[]`
    FloatArray,
    /// `bool`
    Bool,
    /// `bool[]`
    BoolArray,
    /// `string`
    Str,
    /// `string[]`
    StrArray,
}

impl TypeTag {
    /// All tags, in the order the original command table listed them.
    pub const ALL: [TypeTag; 8] = [
        TypeTag::Int,
        TypeTag::IntArray,
        TypeTag::Str,
        TypeTag::StrArray,
        TypeTag::Float,
        TypeTag::FloatArray,
        TypeTag::Bool,
        TypeTag::BoolArray,
    ];

    /// The token users type for this tag.
    pub fn token(&self) -> &'static str {
        match self {
            TypeTag::Int => "int",
            TypeTag::IntArray => "int[]",
            TypeTag::Float => "float",
            TypeTag::FloatArray => "float[]",
            TypeTag::Bool => "bool",
            TypeTag::BoolArray => "bool[]",
            TypeTag::Str => "string",
            TypeTag::StrArray => "string[]",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for TypeTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "int" => Ok(TypeTag::Int),
            "int[]" => Ok(TypeTag::IntArray),
            "float" => Ok(TypeTag::Float),
            "float[]" => Ok(TypeTag::FloatArray),
            "bool" => Ok(TypeTag::Bool),
            "bool[]" => Ok(TypeTag::BoolArray),
            "string" => Ok(TypeTag::Str),
            "string[]" => Ok(TypeTag::StrArray),
            other => Err(Error::UnsupportedType {
                token: other.to_string(),
            }),
        }
    }
}

/// A successfully decoded value together with its canonical JSON form.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// The typed in-memory value.
    pub value: Value,
    /// Canonical JSON wire form of `value`.
    pub json: String,
}

/// Decode user-supplied text as the tagged type.
///
/// Fails with [`Error::MalformedInput`] when the text cannot be parsed as
/// the requested type (non-numeric text for `int`, unbalanced brackets for
/// an array tag, ...). On failure nothing downstream is invoked.
pub fn decode(tag: TypeTag, text: &str) -> Result<Decoded> {
    // Bare strings are accepted for the string tag; quoted strings fall
    // through to the JSON path so unbalanced quotes are still rejected.
    if tag == TypeTag::Str && !text.starts_with('"') {
        let value = Value::Str(text.to_string());
        let json = encode(&value);
        return Ok(Decoded { value, json });
    }

    let parsed: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| Error::malformed(tag.token(), text, e.to_string()))?;

    let value = value_from_json(tag, &parsed)
        .map_err(|reason| Error::malformed(tag.token(), text, reason))?;
    let json = encode(&value);
    Ok(Decoded { value, json })
}

/// Encode a value as canonical JSON text.
///
/// Never fails for values produced by [`decode`]: the codec only admits
/// finite floats, and every other variant serializes unconditionally.
pub fn encode(value: &Value) -> String {
    to_json(value).to_string()
}

/// Interpret an already-parsed JSON value as the tagged type.
///
/// Used by [`decode`] on user text and by the client when re-typing a
/// stored payload. Returns a human-readable reason on shape mismatch so
/// callers can wrap it in the appropriate error kind.
pub fn value_from_json(tag: TypeTag, json: &serde_json::Value) -> std::result::Result<Value, String> {
    match tag {
        TypeTag::Int => json
            .as_i64()
            .map(Value::Int)
            .ok_or_else(|| shape_reason("an integer", json)),
        TypeTag::Float => float_from_json(json).map(Value::Float),
        TypeTag::Bool => json
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| shape_reason("a boolean", json)),
        TypeTag::Str => json
            .as_str()
            .map(|s| Value::Str(s.to_string()))
            .ok_or_else(|| shape_reason("a string", json)),
        TypeTag::IntArray => {
            elements(json)?
                .iter()
                .map(|e| e.as_i64().ok_or_else(|| shape_reason("an integer", e)))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Value::IntArray)
        }
        TypeTag::FloatArray => {
            elements(json)?
                .iter()
                .map(float_from_json)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Value::FloatArray)
        }
        TypeTag::BoolArray => {
            elements(json)?
                .iter()
                .map(|e| e.as_bool().ok_or_else(|| shape_reason("a boolean", e)))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Value::BoolArray)
        }
        TypeTag::StrArray => {
            elements(json)?
                .iter()
                .map(|e| {
                    e.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| shape_reason("a string", e))
                })
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Value::StrArray)
        }
    }
}

fn elements(json: &serde_json::Value) -> std::result::Result<&Vec<serde_json::Value>, String> {
    match json {
        serde_json::Value::Array(items) => Ok(items),
        other => Err(shape_reason("an array", other)),
    }
}

fn float_from_json(json: &serde_json::Value) -> std::result::Result<f32, String> {
    let f = json
        .as_f64()
        .ok_or_else(|| shape_reason("a number", json))?;
    let f = f as f32;
    if !f.is_finite() {
        return Err("number is out of range for a 32-bit float".to_string());
    }
    Ok(f)
}

fn shape_reason(expected: &str, got: &serde_json::Value) -> String {
    let kind = match got {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    };
    format!("expected {}, got {}", expected, kind)
}

fn to_json(value: &Value) -> serde_json::Value {
    use serde_json::Value as Json;
    match value {
        Value::Int(i) => Json::from(*i),
        // Invariant: codec floats are finite, so from_f64 cannot fail.
        Value::Float(x) => Json::from(f64::from(*x)),
        Value::Bool(b) => Json::from(*b),
        Value::Str(s) => Json::from(s.as_str()),
        Value::IntArray(items) => Json::from(items.clone()),
        Value::FloatArray(items) => {
            Json::Array(items.iter().map(|x| Json::from(f64::from(*x))).collect())
        }
        Value::BoolArray(items) => Json::from(items.clone()),
        Value::StrArray(items) => Json::from(items.clone()),
    }
}
