//! Declared types and the typed values they coerce to.

use serde::Serialize;
use std::fmt;

const TRUE_TOKENS: &[&str] = &["true", "1", "yes", "on", "t", "y"];
const FALSE_TOKENS: &[&str] = &["false", "0", "no", "off", "f", "n"];

/// The type a declared variable is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Type {
    /// Raw text, unchanged.
    String,
    /// Signed 64-bit decimal integer.
    Integer,
    /// 64-bit finite float.
    Float,
    /// Boolean from a recognized token (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`, ...).
    Boolean,
}

impl Type {
    /// Human-readable type name.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
        }
    }

    /// Coerce raw text into a typed value.
    ///
    /// # Errors
    ///
    /// Returns the reason the text is not a valid value of this type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kosei::core::{Type, Value};
    ///
    /// assert_eq!(Type::Integer.coerce(" 42 "), Ok(Value::Integer(42)));
    /// assert_eq!(Type::Boolean.coerce("Yes"), Ok(Value::Boolean(true)));
    /// assert!(Type::Integer.coerce("4.2").is_err());
    /// ```
    pub fn coerce(self, raw: &str) -> Result<Value, String> {
        match self {
            Self::String => Ok(Value::String(raw.to_string())),
            Self::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| e.to_string()),
            Self::Float => {
                let parsed = raw.trim().parse::<f64>().map_err(|e| e.to_string())?;
                if parsed.is_finite() {
                    Ok(Value::Float(parsed))
                } else {
                    Err("value is not a finite number".to_string())
                }
            }
            Self::Boolean => {
                let token = raw.trim().to_ascii_lowercase();
                if TRUE_TOKENS.contains(&token.as_str()) {
                    Ok(Value::Boolean(true))
                } else if FALSE_TOKENS.contains(&token.as_str()) {
                    Ok(Value::Boolean(false))
                } else {
                    Err("expected one of true/false, 1/0, yes/no, on/off".to_string())
                }
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A coerced configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// String value
    String(String),
    /// Integer value
    Integer(i64),
    /// Float value
    Float(f64),
    /// Boolean value
    Boolean(bool),
}

impl Value {
    /// The type tag of this value.
    pub fn ty(&self) -> Type {
        match self {
            Self::String(_) => Type::String,
            Self::Integer(_) => Type::Integer,
            Self::Float(_) => Type::Float,
            Self::Boolean(_) => Type::Boolean,
        }
    }

    /// The string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer, if this is an integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The number as a float; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            Self::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// The boolean, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}
