//! Loading specification and parameter documents.
//!
//! Documents are TOML or JSON; the format is picked from the file extension
//! (`.toml` is TOML, anything else is JSON). Both parse into
//! `serde_json::Value` so the validator sees one value model.
//!
//! A spec document in TOML:
//!
//! ```toml
//! [name]
//! type = "str"
//!
//! [tags]
//! type = "list"
//! optional = true
//! default = []
//!
//! [tags.callbacks]
//! "has no blanks" = "no_blank_items"
//! ```

use std::path::Path;

use serde_json::{Map, Number, Value};
use tracing::debug;

use paramguard_contracts::error::{ParamError, ParamResult};

/// Supported document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Json,
        }
    }
}

/// Parse `text` as TOML.
///
/// Returns `ParamError::ConfigError` if the text is not valid TOML or holds
/// a float JSON cannot represent. TOML datetimes become RFC 3339 strings.
pub fn from_toml_str(text: &str) -> ParamResult<Value> {
    let table: toml::Table = toml::from_str(text).map_err(|e| ParamError::ConfigError {
        reason: format!("failed to parse TOML document: {e}"),
    })?;
    toml_table_to_json(table)
}

fn toml_table_to_json(table: toml::Table) -> ParamResult<Value> {
    table
        .into_iter()
        .map(|(k, v)| -> ParamResult<(String, Value)> { Ok((k, toml_to_json(v)?)) })
        .collect::<ParamResult<Map<String, Value>>>()
        .map(Value::Object)
}

fn toml_to_json(value: toml::Value) -> ParamResult<Value> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Number::from_f64(f).map(Value::Number).ok_or_else(|| {
            ParamError::ConfigError {
                reason: format!("TOML float {f} has no JSON representation"),
            }
        })?,
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(toml_to_json)
                .collect::<ParamResult<Vec<Value>>>()?,
        ),
        toml::Value::Table(table) => toml_table_to_json(table)?,
    })
}

/// Parse `text` as JSON.
pub fn from_json_str(text: &str) -> ParamResult<Value> {
    serde_json::from_str(text).map_err(|e| ParamError::ConfigError {
        reason: format!("failed to parse JSON document: {e}"),
    })
}

pub fn parse_document(text: &str, format: DocumentFormat) -> ParamResult<Value> {
    match format {
        DocumentFormat::Json => from_json_str(text),
        DocumentFormat::Toml => from_toml_str(text),
    }
}

/// Read the file at `path` and parse it in the format its extension names.
pub fn load_document(path: &Path) -> ParamResult<Value> {
    let contents = std::fs::read_to_string(path).map_err(|e| ParamError::ConfigError {
        reason: format!("failed to read document file '{}': {}", path.display(), e),
    })?;
    let format = DocumentFormat::from_path(path);
    debug!(path = %path.display(), ?format, "loading document");
    parse_document(&contents, format)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
