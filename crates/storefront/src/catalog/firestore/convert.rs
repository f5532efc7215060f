//! Conversion between Firestore typed values and plain JSON.
//!
//! Firestore wraps every value in a single-key object naming its type
//! (`{"stringValue": "x"}`, `{"integerValue": "3"}`). Documents are flattened
//! into plain JSON and then validated through [`ProductDocument`], so the
//! same rules apply to every backend.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use wishshop_core::{Product, ProductDraft};

use crate::catalog::{DocumentError, ProductDocument};

/// A document as returned by the REST API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name, ending in `/<collection>/<id>`.
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// The document id, the last segment of its resource name.
    #[must_use]
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    /// Validate into a [`Product`].
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] if required fields are missing or have
    /// the wrong type.
    pub fn into_product(self) -> Result<Product, DocumentError> {
        let id = self.id().to_string();
        ProductDocument::from_json(fields_to_json(&self.fields))?.into_product(Some(&id))
    }
}

/// One element of a `runQuery` response stream.
///
/// Elements without a document carry only progress metadata.
#[derive(Debug, Deserialize)]
pub struct RunQueryResponse {
    #[serde(default)]
    pub document: Option<Document>,
}

/// Flatten a Firestore `fields` map into a plain JSON object.
#[must_use]
pub fn fields_to_json(fields: &Map<String, Value>) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(key, value)| (key.clone(), decode_value(value)))
            .collect(),
    )
}

/// Decode one typed value. Unknown shapes decode to `null`.
#[must_use]
pub fn decode_value(value: &Value) -> Value {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Value::Null;
    };

    match kind.as_str() {
        "stringValue" | "timestampValue" | "referenceValue" | "booleanValue" | "doubleValue" => {
            inner.clone()
        }
        // int64 travels as a decimal string
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .map_or_else(|| inner.clone(), Value::from),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => inner
            .get("fields")
            .and_then(Value::as_object)
            .map_or_else(|| Value::Object(Map::new()), fields_to_json),
        _ => Value::Null,
    }
}

fn string(s: &str) -> Value {
    json!({ "stringValue": s })
}

fn strings(values: &[String]) -> Value {
    json!({ "arrayValue": { "values": values.iter().map(|s| string(s)).collect::<Vec<_>>() } })
}

fn timestamp(at: DateTime<Utc>) -> Value {
    json!({ "timestampValue": at.to_rfc3339_opts(SecondsFormat::Micros, true) })
}

/// Field paths written by [`draft_fields`] on update, `createdAt` excluded.
pub const UPDATE_MASK: &[&str] = &[
    "name",
    "description",
    "price",
    "category",
    "image",
    "images",
    "stock",
    "colors",
    "specifications",
    "updatedAt",
];

/// Encode a draft as a Firestore `fields` map.
///
/// `createdAt` is only written when `created_at` is given, so updates leave
/// the original value alone. Prices are stored as doubles, matching the
/// documents the catalog already holds.
#[must_use]
pub fn draft_fields(
    draft: &ProductDraft,
    created_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("name".into(), string(&draft.name));
    fields.insert("description".into(), string(&draft.description));
    fields.insert(
        "price".into(),
        json!({ "doubleValue": draft.price.amount().to_f64().unwrap_or_default() }),
    );
    fields.insert("category".into(), string(&draft.category));
    fields.insert("image".into(), string(&draft.image));
    fields.insert("images".into(), strings(&draft.images));
    fields.insert(
        "stock".into(),
        json!({ "integerValue": draft.stock.to_string() }),
    );
    fields.insert("colors".into(), strings(&draft.colors));
    fields.insert(
        "specifications".into(),
        draft
            .specifications
            .as_deref()
            .map_or_else(|| json!({ "nullValue": null }), string),
    );
    if let Some(created_at) = created_at {
        fields.insert("createdAt".into(), timestamp(created_at));
    }
    fields.insert("updatedAt".into(), timestamp(updated_at));
    fields
}

/// `runQuery` body listing `collection`, newest first.
#[must_use]
pub fn list_query(collection: &str) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "orderBy": [newest_first()]
        }
    })
}

/// `runQuery` body selecting documents whose `category` equals `category`,
/// newest first.
///
/// Needs a composite index on `(category, createdAt desc)`.
#[must_use]
pub fn category_query(collection: &str, category: &str) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": "category" },
                    "op": "EQUAL",
                    "value": string(category)
                }
            },
            "orderBy": [newest_first()]
        }
    })
}

fn newest_first() -> Value {
    json!({
        "field": { "fieldPath": "createdAt" },
        "direction": "DESCENDING"
    })
}
