//! Parameter validation against a full specification.
//!
//! `ParameterValidator::validate` runs one stateless pass:
//!
//! 1. **Shape**: `params` and `spec` must be objects, `spec` non-empty.
//! 2. **Spec**: every field spec is compiled, in sorted field order.
//! 3. **Presence**: missing required fields, then (unless `allow_extra`)
//!    undeclared fields. Both are reported in full, sorted.
//! 4. **Fields**: each supplied value is type-checked, copied, and passed
//!    through its callbacks, in sorted key order.
//! 5. **Defaults**: omitted optional fields with a default receive a copy.
//!
//! Any failure aborts the pass; no partial result is returned.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use paramguard_contracts::{
    callback::{predicate, Callback, CallbackRegistry},
    error::{bracket_list, ParamError, ParamResult},
    field::{kind_name, FieldSpec},
    request::{ParameterMap, ValidateOptions, ValidationRequest},
};

use crate::spec::SpecValidator;

/// Validates parameter mappings against specification documents.
///
/// Holds the callbacks that spec documents may reference by name. A
/// validator is immutable during validation, so one instance can serve
/// concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct ParameterValidator {
    specs: SpecValidator,
}

impl ParameterValidator {
    /// Create a validator with no callbacks registered.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callbacks(callbacks: CallbackRegistry) -> Self {
        Self {
            specs: SpecValidator::new(callbacks),
        }
    }

    /// Register `callback` under `name` for use in `callbacks` tables.
    pub fn register_callback(&mut self, name: impl Into<String>, callback: Callback) {
        self.specs.callbacks_mut().register(name, callback);
    }

    /// Register a plain boolean predicate under `name`.
    pub fn register_predicate<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&str, &Value) -> bool + Send + Sync + 'static,
    {
        self.register_callback(name, predicate(f));
    }

    /// Compile every field spec in `spec`, in sorted field order.
    pub fn compile(&self, spec: &Value) -> ParamResult<BTreeMap<String, FieldSpec>> {
        let spec = spec.as_object().ok_or_else(|| {
            ParamError::schema(format!(
                "spec need to be a dictionary but got: {}",
                kind_name(spec)
            ))
        })?;
        if spec.is_empty() {
            return Err(ParamError::schema("Empty specification provided"));
        }

        let mut names: Vec<&String> = spec.keys().collect();
        names.sort();

        let mut compiled = BTreeMap::new();
        for name in names {
            let field = self.specs.validate_spec(name, &spec[name.as_str()])?;
            compiled.insert(name.clone(), field);
        }
        Ok(compiled)
    }

    /// Validate `params` against `spec` and return the normalized mapping.
    pub fn validate(
        &self,
        params: &Value,
        spec: &Value,
        options: ValidateOptions,
    ) -> ParamResult<ParameterMap> {
        let params = params.as_object().ok_or_else(|| {
            ParamError::data(format!(
                "params need to be a dictionary but got: {}",
                kind_name(params)
            ))
        })?;
        let fields = self.compile(spec)?;

        // ── Presence ─────────────────────────────────────────────────────────
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(name, field)| field.is_required() && !params.contains_key(name.as_str()))
            .map(|(name, _)| name.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(rejected(format!(
                "Missing arguments {}",
                bracket_list(&missing)
            )));
        }

        let mut keys: Vec<&String> = params.keys().collect();
        keys.sort();

        if !options.allow_extra {
            let extra: Vec<&str> = keys
                .iter()
                .filter(|k| !fields.contains_key(k.as_str()))
                .map(|k| k.as_str())
                .collect();
            if !extra.is_empty() {
                return Err(rejected(format!(
                    "extra arguments found: {}",
                    bracket_list(&extra)
                )));
            }
        }

        // ── Fields ───────────────────────────────────────────────────────────
        let mut result = ParameterMap::new();
        for key in keys {
            let value = &params[key.as_str()];
            let validated = match fields.get(key) {
                Some(field) => check_field(key, value, field)?,
                None => {
                    debug!(field = %key, "passing through undeclared field");
                    value.clone()
                }
            };
            result.insert(key.clone(), validated);
        }

        // ── Defaults ─────────────────────────────────────────────────────────
        for (name, field) in &fields {
            if result.contains_key(name) {
                continue;
            }
            if let Some(default) = &field.default {
                debug!(field = %name, "applying default");
                result.insert(name.clone(), default.clone());
            }
        }

        debug!(field_count = result.len(), "parameters validated");
        Ok(result)
    }

    /// Validate a typed request.
    pub fn validate_request(&self, request: &ValidationRequest) -> ParamResult<ParameterMap> {
        self.validate(&request.params, &request.spec, request.options())
    }

    /// Validate a keyword-style record of `params`, `spec` and `allow_extra`.
    pub fn validate_with(&self, record: &Value) -> ParamResult<ParameterMap> {
        let request = ValidationRequest::from_value(record)?;
        self.validate_request(&request)
    }
}

/// Type-check one supplied value, copy it, and run its callbacks on the copy.
fn check_field(name: &str, value: &Value, field: &FieldSpec) -> ParamResult<Value> {
    if let Some(expected) = field.field_type {
        if !expected.matches(value) {
            return Err(rejected(format!(
                "Expecting value for argument [{name}] to be [{expected}] but got: [{}]",
                kind_name(value)
            )));
        }
    }

    let copy = value.clone();

    for (cb_name, callback) in &field.callbacks {
        debug!(field = name, callback = %cb_name, "running callback");
        match callback(name, &copy).map_err(ParamError::Callback)? {
            Value::Bool(true) => {}
            Value::Bool(false) => {
                return Err(rejected(format!(
                    "callback [{cb_name}] failed for argument [{name}]"
                )))
            }
            _ => {
                return Err(ParamError::schema(format!(
                    "callback [{cb_name}] does not return boolean for argument [{name}]"
                )))
            }
        }
    }

    Ok(copy)
}

fn rejected(reason: String) -> ParamError {
    warn!(%reason, "parameters rejected");
    ParamError::data(reason)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
