//! Error types for the paramguard validation pipeline.
//!
//! Every fallible operation returns `ParamResult<T>`. The two central
//! variants separate authoring mistakes (`SchemaError`) from bad input
//! (`DataError`) so callers can tell "fix the spec" from "reject the request".

use thiserror::Error;

/// Error raised by a caller-supplied callback.
///
/// Callbacks are opaque to the engine; whatever they return as an error is
/// handed back to the caller unchanged inside `ParamError::Callback`.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The unified error type for paramguard.
#[derive(Debug, Error)]
pub enum ParamError {
    /// The specification (or the shape of the validation call) is malformed.
    ///
    /// Always a programming error on the spec author's side, never caused by
    /// the data being validated.
    #[error("schema error: {reason}")]
    SchemaError { reason: String },

    /// The specification is well-formed but the supplied data fails it.
    #[error("data error: {reason}")]
    DataError { reason: String },

    /// A callback raised its own error instead of returning a verdict.
    #[error(transparent)]
    Callback(CallbackError),

    /// A specification or parameter document could not be read or parsed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

impl ParamError {
    pub fn schema(reason: impl Into<String>) -> Self {
        Self::SchemaError {
            reason: reason.into(),
        }
    }

    pub fn data(reason: impl Into<String>) -> Self {
        Self::DataError {
            reason: reason.into(),
        }
    }

    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::SchemaError { .. })
    }

    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::DataError { .. })
    }
}

/// Convenience alias used throughout the paramguard crates.
pub type ParamResult<T> = Result<T, ParamError>;

/// Render a list of names the way batch errors report them: `[a,b,c]`.
pub fn bracket_list<S: AsRef<str>>(names: &[S]) -> String {
    let joined: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    format!("[{}]", joined.join(","))
}
