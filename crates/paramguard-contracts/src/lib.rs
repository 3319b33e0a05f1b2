//! # paramguard-contracts
//!
//! Shared types and errors for the paramguard validation engine.
//!
//! The engine crate imports from here. No validation logic lives in this
//! crate, only data definitions, type predicates and error types.

pub mod callback;
pub mod error;
pub mod field;
pub mod request;

pub use callback::{from_fn, predicate, Callback, CallbackRegistry};
pub use error::{CallbackError, ParamError, ParamResult};
pub use field::{kind_name, FieldSpec, FieldType};
pub use request::{ParameterMap, ValidateOptions, ValidationRequest};
