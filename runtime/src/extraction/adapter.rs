//! Item-to-mapping conversion.
//!
//! The adapter is handed to the extract handler through its state instead
//! of being registered globally, so tests can swap in their own.

use super::items::Item;
use super::ExtractionError;
use serde_json::{Map, Value};

/// Converts an extracted item into the JSON mapping placed in a response.
pub trait ItemAdapter: Send + Sync {
    fn to_mapping(&self, item: &Item) -> Result<Value, ExtractionError>;
}

/// Serializes items and omits every unset field.
///
/// `null`, empty lists and objects left empty after pruning are dropped at
/// any depth, the way the extraction API never reports absent attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZyteItemAdapter;

impl ItemAdapter for ZyteItemAdapter {
    fn to_mapping(&self, item: &Item) -> Result<Value, ExtractionError> {
        let mut value = serde_json::to_value(item)?;
        prune_empty(&mut value);
        Ok(value)
    }
}

/// Serializes items verbatim, keeping `null` and empty fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawItemAdapter;

impl ItemAdapter for RawItemAdapter {
    fn to_mapping(&self, item: &Item) -> Result<Value, ExtractionError> {
        Ok(serde_json::to_value(item)?)
    }
}

fn prune_empty(value: &mut Value) {
    match value {
        Value::Object(map) => prune_map(map),
        Value::Array(items) => items.iter_mut().for_each(prune_empty),
        _ => {}
    }
}

fn prune_map(map: &mut Map<String, Value>) {
    for v in map.values_mut() {
        prune_empty(v);
    }
    map.retain(|_, v| !is_empty(v));
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}
