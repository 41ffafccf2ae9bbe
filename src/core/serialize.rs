//! Serialization of stored documents into their external form
//!
//! This is the only place where the store's native identifier type is turned
//! into strings. Two things change:
//!
//! - `_id` is renamed to `id` and rendered as a string
//! - `items[].material_id` is rendered as a string when it holds an `ObjectId`
//!
//! Both conversions only fire on native values, so serializing an already
//! serialized document changes nothing.

use bson::{Bson, Document};
use serde_json::Value;

/// Convert a stored document into its externally safe representation
pub fn serialize(mut doc: Document) -> Document {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", reference_string(id));
    }

    if let Ok(items) = doc.get_array_mut("items") {
        for item in items.iter_mut() {
            let Bson::Document(item) = item else {
                continue;
            };
            let hex = match item.get("material_id") {
                Some(Bson::ObjectId(oid)) => Some(oid.to_hex()),
                _ => None,
            };
            if let Some(hex) = hex {
                item.insert("material_id", hex);
            }
        }
    }

    doc
}

/// Serialize a document and render it as JSON
pub fn to_json(doc: Document) -> Value {
    Bson::Document(serialize(doc)).into_relaxed_extjson()
}

fn reference_string(value: Bson) -> Bson {
    match value {
        Bson::ObjectId(oid) => Bson::String(oid.to_hex()),
        Bson::String(s) => Bson::String(s),
        other => Bson::String(other.to_string()),
    }
}
