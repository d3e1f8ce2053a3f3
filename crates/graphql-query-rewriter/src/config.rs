//! Serializable descriptions of rewrite rules, for loading rule lists from
//! configuration files rather than constructing [`Rewriter`]s in code.
//!
//! Rules are tagged by `kind` and use camelCase option names:
//!
//! ```json
//! [
//!   {
//!     "kind": "fieldArgType",
//!     "fieldName": "things",
//!     "argName": "identifier",
//!     "oldType": "String!",
//!     "newType": "Int!",
//!     "coerceVariable": "parseInt"
//!   },
//!   { "kind": "fieldName", "oldFieldName": "stuff", "newFieldName": "items" }
//! ]
//! ```

use crate::rewriters::FieldArgNameRewriter;
use crate::rewriters::FieldArgTypeRewriter;
use crate::rewriters::FieldNameRewriter;
use crate::Rewriter;
use crate::RewriterConfigError;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RewriterConfig {
    #[serde(rename_all = "camelCase")]
    FieldArgType {
        field_name: String,
        arg_name: String,
        old_type: String,
        new_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coerce_variable: Option<Coercion>,
    },

    #[serde(rename_all = "camelCase")]
    FieldArgName {
        field_name: String,
        old_arg_name: String,
        new_arg_name: String,
    },

    #[serde(rename_all = "camelCase")]
    FieldName {
        old_field_name: String,
        new_field_name: String,
    },
}
impl RewriterConfig {
    /// Validate this rule and produce the [`Rewriter`] it describes.
    pub fn build(&self) -> Result<Box<dyn Rewriter>, RewriterConfigError> {
        Ok(match self {
            Self::FieldArgType {
                field_name,
                arg_name,
                old_type,
                new_type,
                coerce_variable,
            } => {
                let mut rewriter = FieldArgTypeRewriter::new(
                    field_name.as_str(),
                    arg_name.as_str(),
                    old_type,
                    new_type,
                )?;
                if let Some(coercion) = *coerce_variable {
                    rewriter = rewriter.with_coerce_variable(move |value| {
                        Ok(coercion.apply(value)?)
                    });
                }
                Box::new(rewriter)
            },

            Self::FieldArgName {
                field_name,
                old_arg_name,
                new_arg_name,
            } => Box::new(FieldArgNameRewriter::new(
                field_name.as_str(),
                old_arg_name.as_str(),
                new_arg_name.as_str(),
            )?),

            Self::FieldName {
                old_field_name,
                new_field_name,
            } => Box::new(FieldNameRewriter::new(
                old_field_name.as_str(),
                new_field_name.as_str(),
            )?),
        })
    }
}

/// A built-in variable value conversion that can be named in configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Coercion {
    /// Strings are parsed as a (possibly signed) decimal integer prefix, so
    /// `"42px"` becomes `42`. Floats are truncated towards zero.
    ParseInt,

    /// Strings are parsed as a finite decimal number.
    ParseFloat,

    /// Numbers and booleans are converted to their JSON text.
    ToString,

    /// The strings `"true"` and `"false"` become booleans; numbers are `true`
    /// when non-zero.
    ToBoolean,
}
impl Coercion {
    /// Convert `value`. `null` is passed through by every coercion so that
    /// nullable variables stay null.
    pub fn apply(self, value: &Value) -> Result<Value, CoercionError> {
        let err = || CoercionError {
            coercion: self,
            value: value.clone(),
        };

        if value.is_null() {
            return Ok(Value::Null);
        }

        match self {
            Self::ParseInt => match value {
                Value::Number(num) if num.is_i64() || num.is_u64() => Ok(value.clone()),
                Value::Number(num) => num.as_f64()
                    .map(f64::trunc)
                    .filter(|int| (-I64_BOUND..I64_BOUND).contains(int))
                    .map(|int| Value::from(int as i64))
                    .ok_or_else(err),
                Value::String(s) => parse_int_prefix(s)
                    .map(Value::from)
                    .ok_or_else(err),
                _ => Err(err()),
            },

            Self::ParseFloat => match value {
                Value::Number(_) => Ok(value.clone()),
                Value::String(s) => s.trim().parse::<f64>().ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(err),
                _ => Err(err()),
            },

            Self::ToString => match value {
                Value::String(_) => Ok(value.clone()),
                Value::Number(num) => Ok(Value::String(num.to_string())),
                Value::Bool(b) => Ok(Value::String(b.to_string())),
                _ => Err(err()),
            },

            Self::ToBoolean => match value {
                Value::Bool(_) => Ok(value.clone()),
                Value::Number(num) => Ok(Value::Bool(num.as_f64() != Some(0.0))),
                Value::String(s) => match s.trim() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    _ => Err(err()),
                },
                _ => Err(err()),
            },
        }
    }
}
impl fmt::Display for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ParseInt => "parseInt",
            Self::ParseFloat => "parseFloat",
            Self::ToString => "toString",
            Self::ToBoolean => "toBoolean",
        })
    }
}

/// 2^63. Truncated floats in `-I64_BOUND..I64_BOUND` convert to `i64`
/// exactly.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let digits_start = if s.starts_with(['+', '-']) { 1 } else { 0 };
    let digits_end = s[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |idx| digits_start + idx);
    if digits_end == digits_start {
        return None;
    }
    s[..digits_end].parse().ok()
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("`{coercion}` cannot convert the value {value}")]
pub struct CoercionError {
    pub coercion: Coercion,
    pub value: Value,
}
