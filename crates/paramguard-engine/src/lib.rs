//! # paramguard-engine
//!
//! Runtime parameter validation for paramguard.
//!
//! This crate provides [`SpecValidator`], which checks and compiles a single
//! field spec, and [`ParameterValidator`], which validates a whole parameter
//! mapping against a specification:
//!
//! 1. **Spec**: every field spec is checked before any data is looked at.
//! 2. **Presence**: missing required and undeclared fields are rejected.
//! 3. **Fields**: values are type-checked, copied and refined by callbacks.
//! 4. **Defaults**: omitted optional fields are filled in.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use serde_json::json;
//! use paramguard_engine::ParameterValidator;
//! use paramguard_contracts::ValidateOptions;
//!
//! let mut validator = ParameterValidator::new();
//! validator.register_predicate("non_empty", |_, v| {
//!     v.as_str().is_some_and(|s| !s.is_empty())
//! });
//!
//! let spec = json!({
//!     "name":  { "type": "str", "callbacks": { "name is set": "non_empty" } },
//!     "limit": { "type": "int", "optional": true, "default": 10 },
//! });
//! let params = validator.validate(&json!({ "name": "svc" }), &spec, ValidateOptions::default())?;
//! assert_eq!(params["limit"], json!(10));
//! ```

pub mod document;
pub mod spec;
pub mod validator;

pub use document::{load_document, parse_document, DocumentFormat};
pub use spec::SpecValidator;
pub use validator::ParameterValidator;
