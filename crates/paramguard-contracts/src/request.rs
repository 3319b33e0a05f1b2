//! The validation call record.
//!
//! Loosely-typed hosts pass `params`, `spec` and `allow_extra` as one
//! keyword-style record. [`ValidationRequest::from_value`] turns that record
//! into a typed request and rejects anything it does not recognise.

use serde_json::{Map, Value};

use crate::error::{bracket_list, ParamError, ParamResult};
use crate::field::kind_name;

/// Keys a request record may contain.
const REQUEST_KEYS: [&str; 3] = ["params", "spec", "allow_extra"];

/// Parameter values keyed by field name.
pub type ParameterMap = Map<String, Value>;

/// Options for a single validation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Tolerate parameters that the specification does not declare.
    pub allow_extra: bool,
}

impl ValidateOptions {
    pub fn allow_extra() -> Self {
        Self { allow_extra: true }
    }
}

/// Everything one validation call needs.
///
/// `params` and `spec` stay as raw values: their shape is checked by the
/// engine, which reports a wrong shape with the observed kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRequest {
    pub params: Value,
    pub spec: Value,
    pub allow_extra: bool,
}

impl ValidationRequest {
    pub fn options(&self) -> ValidateOptions {
        ValidateOptions {
            allow_extra: self.allow_extra,
        }
    }

    /// Build a request from a keyword-style record.
    ///
    /// Checks, in order: the record is an object, it has no unknown keys
    /// (all reported, sorted), `params` and `spec` are present, and
    /// `allow_extra` is a boolean when given.
    pub fn from_value(record: &Value) -> ParamResult<Self> {
        let args = record.as_object().ok_or_else(|| {
            ParamError::schema(format!(
                "validate_with arguments need to be a dictionary but got: {}",
                kind_name(record)
            ))
        })?;

        let mut invalid: Vec<&str> = args
            .keys()
            .map(String::as_str)
            .filter(|k| !REQUEST_KEYS.contains(k))
            .collect();
        invalid.sort_unstable();
        if !invalid.is_empty() {
            return Err(ParamError::schema(format!(
                "validate_with arguments has invalid keys: {}",
                bracket_list(&invalid)
            )));
        }

        let params = args.get("params").ok_or_else(|| {
            ParamError::schema("validate_with is called without params in arguments")
        })?;
        let spec = args.get("spec").ok_or_else(|| {
            ParamError::schema("validate_with is called without spec in arguments")
        })?;
        let allow_extra = match args.get("allow_extra") {
            None => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                return Err(ParamError::schema(
                    "validate_with allow_extra argument needs to be boolean",
                ))
            }
        };

        Ok(Self {
            params: params.clone(),
            spec: spec.clone(),
            allow_extra,
        })
    }
}
