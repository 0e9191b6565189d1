//! Structured encoders for the summary document
//!
//! JSON is the exchange format for downstream tooling. TOON (Token-Oriented
//! Object Notation) renders the same document compactly: the uniform
//! `results` array becomes a single tabular block with one header row.

use rtoon::encode_default;
use serde_json::Value;

use crate::error::{IpiError, Result};
use crate::report::SummaryDocument;

/// Pretty-printed JSON
pub fn encode_json(doc: &SummaryDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// TOON encoding of the summary document
pub fn encode_toon(doc: &SummaryDocument) -> Result<String> {
    let value: Value = serde_json::to_value(doc)?;
    encode_default(&value).map_err(|e| IpiError::Serialization {
        message: format!("TOON encoding error: {}", e),
    })
}
