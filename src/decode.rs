//! YAML record decoder.
//!
//! Definition files look like:
//!
//! ```yaml
//! file_info:
//!   type: chanmodes
//!   revision: 1.0.0
//! page:
//!   name: Channel Modes
//! format:
//!   char: mode character
//! values:
//!   - name: ban
//!     char: b
//!     origin: RFC 1459
//! ```
//!
//! Field values are mapped onto [`Value`]: strings, booleans and integers
//! keep their type. Nulls, floats, lists and nested maps have no
//! counterpart and are dropped from the record, which the total accessors
//! then treat like a missing field.

use crate::document::Document;
use crate::errors::DecodeError;
use crate::record::{Record, Value};
use serde::Deserialize;
use serde_yaml::{Mapping, Value as Yaml};
use tracing::trace;

#[derive(Debug, Default, Deserialize)]
struct RawDocument {
    #[serde(default)]
    file_info: RawFileInfo,
    #[serde(default)]
    page: RawPage,
    #[serde(default)]
    format: Option<Mapping>,
    #[serde(default)]
    values: Option<Vec<Mapping>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFileInfo {
    #[serde(rename = "type", default)]
    kind: Option<Yaml>,
    #[serde(default)]
    revision: Option<Yaml>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPage {
    #[serde(default)]
    name: Option<Yaml>,
}

/// Decode one definition file.
pub fn decode_document(bytes: &[u8]) -> Result<Document, DecodeError> {
    let raw: RawDocument = serde_yaml::from_slice(bytes)?;

    Ok(Document {
        kind: scalar_text(raw.file_info.kind.as_ref()),
        revision: scalar_text(raw.file_info.revision.as_ref()),
        page_name: scalar_text(raw.page.name.as_ref()),
        format: raw.format.as_ref().map(to_record).unwrap_or_default(),
        values: raw.values.unwrap_or_default().iter().map(to_record).collect(),
    })
}

/// Render a scalar as text; revisions like `1.2` come through as numbers.
fn scalar_text(value: Option<&Yaml>) -> String {
    match value {
        Some(Yaml::String(s)) => s.clone(),
        Some(Yaml::Number(n)) => n.to_string(),
        Some(Yaml::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn to_value(value: &Yaml) -> Option<Value> {
    match value {
        Yaml::String(s) => Some(Value::Str(s.clone())),
        Yaml::Bool(b) => Some(Value::Bool(*b)),
        Yaml::Number(n) => n.as_i64().map(Value::Int),
        Yaml::Tagged(tagged) => to_value(&tagged.value),
        Yaml::Null | Yaml::Sequence(_) | Yaml::Mapping(_) => None,
    }
}

fn to_record(mapping: &Mapping) -> Record {
    let mut record = Record::new();
    for (key, value) in mapping {
        let Some(key) = key.as_str() else {
            trace!(?key, "skipping non-string key");
            continue;
        };
        match to_value(value) {
            Some(value) => record.insert(key, value),
            None => trace!(key, "dropping unsupported value"),
        }
    }
    record
}
