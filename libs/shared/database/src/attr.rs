//! AttributeValue marshalling for the DynamoDB low-level JSON protocol.
//!
//! The services work with plain JSON documents; on the wire every value is
//! wrapped in a type descriptor (`{"S": "..."}`, `{"N": "6"}`, `{"M": {...}}`).
//! This module converts between the two shapes, the same job the AWS SDK
//! DocumentClient does for the original services.

use serde_json::{json, Map, Value};

use crate::error::DynamoError;

/// Wrap a plain JSON value in its AttributeValue descriptor.
pub fn to_attr(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "NULL": true }),
        Value::Bool(b) => json!({ "BOOL": b }),
        Value::Number(n) => json!({ "N": n.to_string() }),
        Value::String(s) => json!({ "S": s }),
        Value::Array(items) => json!({ "L": items.iter().map(to_attr).collect::<Vec<_>>() }),
        Value::Object(map) => {
            let fields: Map<String, Value> = map
                .iter()
                .map(|(key, value)| (key.clone(), to_attr(value)))
                .collect();
            json!({ "M": fields })
        }
    }
}

/// Unwrap an AttributeValue descriptor back into plain JSON.
pub fn from_attr(attr: &Value) -> Result<Value, DynamoError> {
    let map = attr
        .as_object()
        .ok_or_else(|| malformed(attr))?;

    let mut entries = map.iter();
    let (tag, inner) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        _ => return Err(malformed(attr)),
    };

    match (tag.as_str(), inner) {
        ("S", Value::String(s)) => Ok(Value::String(s.clone())),
        ("N", Value::String(n)) => parse_number(n),
        ("BOOL", Value::Bool(b)) => Ok(Value::Bool(*b)),
        ("NULL", _) => Ok(Value::Null),
        ("L", Value::Array(items)) => items
            .iter()
            .map(from_attr)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        ("M", Value::Object(fields)) => fields
            .iter()
            .map(|(key, value)| Ok((key.clone(), from_attr(value)?)))
            .collect::<Result<Map<_, _>, DynamoError>>()
            .map(Value::Object),
        ("SS", Value::Array(items)) => Ok(Value::Array(items.clone())),
        ("NS", Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(n) => parse_number(n),
                other => Err(malformed(other)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        _ => Err(malformed(attr)),
    }
}

/// Marshal a whole document into the `{"field": AttributeValue}` map used by
/// `Item`, `Attributes` and `ExpressionAttributeValues`.
pub fn marshal_item(item: &Value) -> Result<Value, DynamoError> {
    let map = item
        .as_object()
        .ok_or_else(|| DynamoError::Malformed(format!("expected an object, got: {item}")))?;

    let fields: Map<String, Value> = map
        .iter()
        .map(|(key, value)| (key.clone(), to_attr(value)))
        .collect();

    Ok(Value::Object(fields))
}

/// Unmarshal an `Item`/`Attributes` map back into a plain JSON document.
pub fn unmarshal_item(item: &Value) -> Result<Value, DynamoError> {
    let map = item
        .as_object()
        .ok_or_else(|| DynamoError::Malformed(format!("expected an item map, got: {item}")))?;

    map.iter()
        .map(|(key, value)| Ok((key.clone(), from_attr(value)?)))
        .collect::<Result<Map<_, _>, DynamoError>>()
        .map(Value::Object)
}

fn parse_number(literal: &str) -> Result<Value, DynamoError> {
    literal
        .parse::<serde_json::Number>()
        .map(Value::Number)
        .map_err(|_| DynamoError::Malformed(format!("bad number literal: {literal}")))
}

fn malformed(value: &Value) -> DynamoError {
    DynamoError::Malformed(format!("not an attribute value: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_wrap_and_unwrap() {
        assert_eq!(to_attr(&json!("Max")), json!({ "S": "Max" }));
        assert_eq!(to_attr(&json!(6)), json!({ "N": "6" }));
        assert_eq!(to_attr(&json!(2.5)), json!({ "N": "2.5" }));
        assert_eq!(to_attr(&json!(true)), json!({ "BOOL": true }));
        assert_eq!(to_attr(&Value::Null), json!({ "NULL": true }));

        assert_eq!(from_attr(&json!({ "S": "Max" })).unwrap(), json!("Max"));
        assert_eq!(from_attr(&json!({ "N": "6" })).unwrap(), json!(6));
        assert_eq!(from_attr(&json!({ "NULL": true })).unwrap(), Value::Null);
    }

    #[test]
    fn nested_documents_round_trip() {
        let hospital = json!({
            "id": "h-1",
            "name": "North Clinic",
            "capacity": 120,
            "email": null,
            "services": ["surgery", "dental"],
            "operatingHours": { "monday": "09:00-17:00" }
        });

        let marshalled = marshal_item(&hospital).unwrap();
        assert_eq!(marshalled["services"], json!({ "L": [{ "S": "surgery" }, { "S": "dental" }] }));
        assert_eq!(
            marshalled["operatingHours"],
            json!({ "M": { "monday": { "S": "09:00-17:00" } } })
        );

        assert_eq!(unmarshal_item(&marshalled).unwrap(), hospital);
    }

    #[test]
    fn string_and_number_sets_unwrap() {
        assert_eq!(
            from_attr(&json!({ "SS": ["a", "b"] })).unwrap(),
            json!(["a", "b"])
        );
        assert_eq!(
            from_attr(&json!({ "NS": ["1", "2"] })).unwrap(),
            json!([1, 2])
        );
    }

    #[test]
    fn rejects_malformed_attributes() {
        assert!(from_attr(&json!("bare string")).is_err());
        assert!(from_attr(&json!({ "S": "x", "N": "1" })).is_err());
        assert!(from_attr(&json!({ "N": "not-a-number" })).is_err());
        assert!(marshal_item(&json!(["not", "an", "object"])).is_err());
    }
}
