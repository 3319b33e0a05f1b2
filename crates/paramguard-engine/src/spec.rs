//! Field spec validation and compilation.
//!
//! `SpecValidator` checks one field spec document and, when it is
//! well-formed, compiles it into a [`FieldSpec`]. Checks run in a fixed
//! order and the first failing category is reported:
//!
//! 1. the spec is an object
//! 2. no unknown keys (all of them reported, sorted)
//! 3. `type` names a known kind
//! 4. `optional` is a boolean
//! 5. `default` matches `type`
//! 6. `default` only appears on optional fields
//! 7. `callbacks` is a non-empty object of registered callback names

use serde_json::{Map, Value};
use tracing::debug;

use paramguard_contracts::{
    callback::{Callback, CallbackRegistry},
    error::{bracket_list, ParamError, ParamResult},
    field::{FieldSpec, FieldType, FIELD_SPEC_KEYS},
};

/// Validates field spec documents against the callbacks it knows about.
#[derive(Debug, Clone, Default)]
pub struct SpecValidator {
    callbacks: CallbackRegistry,
}

impl SpecValidator {
    pub fn new(callbacks: CallbackRegistry) -> Self {
        Self { callbacks }
    }

    pub fn callbacks_mut(&mut self) -> &mut CallbackRegistry {
        &mut self.callbacks
    }

    /// Check the spec document for field `name` and compile it.
    ///
    /// Every failure is a `ParamError::SchemaError`.
    pub fn validate_spec(&self, name: &str, spec: &Value) -> ParamResult<FieldSpec> {
        let Some(spec) = spec.as_object() else {
            return Err(ParamError::schema(format!(
                "spec for [{name}] is not a dictionary"
            )));
        };

        let mut invalid: Vec<&str> = spec
            .keys()
            .map(String::as_str)
            .filter(|k| !FIELD_SPEC_KEYS.contains(k))
            .collect();
        if !invalid.is_empty() {
            invalid.sort_unstable();
            return Err(ParamError::schema(format!(
                "Invalid spec keys found for [{name}]: {}",
                bracket_list(&invalid)
            )));
        }

        let field_type = match spec.get("type") {
            None => None,
            Some(t) => Some(
                t.as_str()
                    .and_then(FieldType::from_name)
                    .ok_or_else(|| {
                        ParamError::schema(format!(
                            "spec type [type] is not one of {} for [{name}]",
                            FieldType::allowed_names()
                        ))
                    })?,
            ),
        };

        let optional = match spec.get("optional") {
            None => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                return Err(ParamError::schema(format!(
                    "spec type [optional] is not a boolean for spec [{name}]"
                )))
            }
        };

        let default = spec.get("default");
        if let (Some(default), Some(t)) = (default, field_type) {
            if !t.matches(default) {
                return Err(ParamError::schema(format!(
                    "value of [default] for spec [{name}] is not of required type"
                )));
            }
        }
        if default.is_some() && !optional {
            return Err(ParamError::schema(format!(
                "[default] spec provided for non optional argument [{name}]"
            )));
        }

        let callbacks = match spec.get("callbacks") {
            None => Vec::new(),
            Some(cbs) => self.resolve_callbacks(name, cbs)?,
        };

        debug!(
            field = name,
            field_type = ?field_type,
            optional,
            has_default = default.is_some(),
            callback_count = callbacks.len(),
            "field spec compiled"
        );

        Ok(FieldSpec {
            field_type,
            optional,
            default: default.cloned(),
            callbacks,
        })
    }

    /// Resolve a `callbacks` table to registered functions, keeping the
    /// table's order.
    fn resolve_callbacks(&self, name: &str, cbs: &Value) -> ParamResult<Vec<(String, Callback)>> {
        let cbs: &Map<String, Value> = cbs.as_object().ok_or_else(|| {
            ParamError::schema(format!(
                "spec type [callbacks] is not of type dictionary for [{name}]"
            ))
        })?;
        if cbs.is_empty() {
            return Err(ParamError::schema(format!(
                "spec type [callbacks] is empty dictionary for [{name}]"
            )));
        }

        cbs.iter()
            .map(|(cb_name, target)| {
                target
                    .as_str()
                    .and_then(|fn_name| self.callbacks.get(fn_name))
                    .map(|f| (cb_name.clone(), f.clone()))
                    .ok_or_else(|| {
                        ParamError::schema(format!(
                            "callback [{cb_name}] is not callable for spec [{name}]"
                        ))
                    })
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
