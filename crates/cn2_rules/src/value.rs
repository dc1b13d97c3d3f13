use core::fmt;
use serde::{Deserialize, Serialize};

/// A single categorical cell. Continuous features are expected to be binned
/// into one of these before induction.
///
/// The derived ordering (`Bool < Int < Str`, then by payload) fixes the order
/// in which atoms and candidate bodies are enumerated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Value {
    /// Read a value from text: booleans and integers are recognised, anything
    /// else stays a string.
    pub fn parse_text(s: &str) -> Self {
        let trimmed = s.trim();
        if let Ok(b) = trimmed.parse::<bool>() {
            Value::Bool(b)
        } else if let Ok(i) = trimmed.parse::<i64>() {
            Value::Int(i)
        } else {
            Value::Str(s.to_string())
        }
    }

    /// Whether a boolean-typed feature holding this value reads as negated.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Bool(b) => !*b,
            Value::Int(i) => *i == 0,
            Value::Str(s) => {
                let s = s.trim();
                s == "0" || s.eq_ignore_ascii_case("false")
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
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

/// A single `feature == value` condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Atom {
    pub feature: usize,
    pub value: Value,
}

impl Atom {
    pub fn new(feature: usize, value: impl Into<Value>) -> Self {
        Self {
            feature,
            value: value.into(),
        }
    }

    /// Out-of-range feature indices never hold.
    pub fn holds(&self, example: &[Value]) -> bool {
        example.get(self.feature) == Some(&self.value)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x[{}] == {}", self.feature, self.value)
    }
}
