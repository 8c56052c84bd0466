use compact_str::{CompactString, ToCompactString};

use super::error::CoercionError;
use crate::parser::expression::{Literal, LiteralKind};
use crate::string::{normalize_width, strip_quotes};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    String(CompactString),
    Bool(bool),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl Value {
    /// Numbers parse as base-10 floats, strings lose their quote markers and
    /// bare words stay as written. Never fails.
    pub fn from_literal(literal: &Literal) -> Self {
        match literal.kind {
            LiteralKind::Number => normalize_width(&literal.text)
                .parse()
                .map(Value::Number)
                .unwrap_or_else(|_| Value::String(literal.text.clone())),
            LiteralKind::String => Value::String(
                strip_quotes(&literal.text)
                    .unwrap_or(literal.text.as_str())
                    .to_compact_string(),
            ),
            LiteralKind::Word => Value::String(literal.text.clone()),
        }
    }
}

// Coercions
impl Value {
    pub fn as_number(&self) -> Result<f64, CoercionError> {
        match self {
            Value::Number(v) => Ok(*v),
            Value::Bool(v) => Ok(if *v { 1.0 } else { 0.0 }),
            Value::String(v) => normalize_width(v.trim())
                .parse()
                .map_err(|_| CoercionError::NonNumeric(v.clone())),
        }
    }

    pub fn as_bool(&self) -> Result<bool, CoercionError> {
        match self {
            Value::Bool(v) => Ok(*v),
            Value::Number(v) => Ok(*v != 0.0),
            Value::String(v) => {
                let text = v.trim();
                if text.eq_ignore_ascii_case("true") {
                    Ok(true)
                } else if text.eq_ignore_ascii_case("false") {
                    Ok(false)
                } else {
                    Err(CoercionError::NonBoolean(v.clone()))
                }
            }
        }
    }

    /// Total conversion: anything unreadable becomes `0`.
    pub fn to_number(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }

    /// Total conversion: anything unreadable becomes `false`.
    pub fn to_bool(&self) -> bool {
        self.as_bool().unwrap_or(false)
    }
}
