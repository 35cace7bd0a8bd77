//! Codec between plain JSON and Firestore's typed value representation.
//!
//! Firestore documents don't carry raw JSON: every field is wrapped in a
//! type discriminator (`{"stringValue": "x"}`, `{"integerValue": "42"}`, …)
//! and integers ride as strings. The rest of the crate only ever sees
//! `serde_json::Value`; this module does the wrapping at the wire boundary.

use serde_json::{json, Map, Value};

use crate::error::{Result, StoreError};

/// Encode a JSON object into a Firestore `fields` map.
///
/// Document bodies must be objects; anything else is rejected.
pub fn to_fields(value: &Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map.iter().map(|(k, v)| (k.clone(), encode(v))).collect()),
        other => Err(StoreError::Dataset(format!(
            "document body must be a JSON object, got {other}"
        ))),
    }
}

/// Decode a Firestore `fields` map back into a JSON object.
pub fn from_fields(fields: &Map<String, Value>) -> Value {
    Value::Object(fields.iter().map(|(k, v)| (k.clone(), decode(v))).collect())
}

/// Encode one JSON value as a Firestore typed value.
pub fn encode(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                // integers are transported as decimal strings
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => {
            let fields: Map<String, Value> =
                map.iter().map(|(k, v)| (k.clone(), encode(v))).collect();
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

/// Decode one Firestore typed value into plain JSON.
///
/// Timestamp and reference values decode to their string forms; an
/// unrecognized wrapper decodes to null rather than failing the whole
/// document.
pub fn decode(value: &Value) -> Value {
    let Some(map) = value.as_object() else {
        return Value::Null;
    };

    if map.contains_key("nullValue") {
        return Value::Null;
    }
    if let Some(b) = map.get("booleanValue") {
        return b.clone();
    }
    if let Some(i) = map.get("integerValue") {
        if let Some(parsed) = i.as_str().and_then(|s| s.parse::<i64>().ok()) {
            return json!(parsed);
        }
        return i.clone();
    }
    if let Some(d) = map.get("doubleValue") {
        return d.clone();
    }
    if let Some(s) = map
        .get("stringValue")
        .or_else(|| map.get("timestampValue"))
        .or_else(|| map.get("referenceValue"))
    {
        return s.clone();
    }
    if let Some(arr) = map.get("arrayValue") {
        let values = arr
            .get("values")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(decode).collect())
            .unwrap_or_default();
        return Value::Array(values);
    }
    if let Some(inner) = map.get("mapValue") {
        let fields = inner
            .get("fields")
            .and_then(Value::as_object)
            .map(|f| f.iter().map(|(k, v)| (k.clone(), decode(v))).collect())
            .unwrap_or_default();
        return Value::Object(fields);
    }

    Value::Null
}
