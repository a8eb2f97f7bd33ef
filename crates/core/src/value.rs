//! Value types for Depot.
//!
//! This module defines:
//! - Value: closed enum over the supported logical types
//!
//! ## Value Model (Frozen)
//!
//! The Value enum has exactly 8 variants, matching the store contract:
//! four scalars (Int, Float, Bool, Str) and a homogeneous array of each.
//!
//! ### Type Rules
//!
//! - Eight types only; arrays are homogeneous
//! - No implicit coercions: `Int(1) != Float(1.0)`
//! - Floats are 32-bit; non-finite floats never enter the model
//!   (the codec rejects them at decode, see [`crate::codec`])

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical value type carried between the codec and the store client.
///
/// Different variants are never equal, even when they print the same:
/// `Int(1) != Float(1.0)`. Float equality follows IEEE-754 semantics, but
/// NaN cannot be produced by the codec so `PartialEq` behaves as expected
/// for every value the system actually carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// 64-bit signed integer
    Int(i64),
    /// 32-bit floating point (IEEE-754)
    Float(f32),
    /// Boolean value
    Bool(bool),
    /// UTF-8 string
    Str(String),
    /// Homogeneous integer array
    IntArray(Vec<i64>),
    /// Homogeneous float array
    FloatArray(Vec<f32>),
    /// Homogeneous boolean array
    BoolArray(Vec<bool>),
    /// Homogeneous string array
    StrArray(Vec<String>),
}

impl Value {
    /// Get the type name as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::IntArray(_) => "int[]",
            Value::FloatArray(_) => "float[]",
            Value::BoolArray(_) => "bool[]",
            Value::StrArray(_) => "string[]",
        }
    }

    /// True for the four array variants.
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            Value::IntArray(_) | Value::FloatArray(_) | Value::BoolArray(_) | Value::StrArray(_)
        )
    }

    /// Get as i64 if this is an Int value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f32 if this is a Float value.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as &str if this is a Str value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Human-readable form used in log lines. Matches the JSON wire form
    /// except for bare strings, which print unquoted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            other => write!(f, "{}", crate::codec::encode(other)),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Value::IntArray(v)
    }
}
