// src/record.rs
//
// The flat event record. Identity is the required (event_id, epoch) pair;
// everything else lives in an insertion-ordered field map that serializes
// inline, so a persisted record is one flat JSON object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_id: i64,
    pub epoch: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl EventRecord {
    pub fn new(event_id: i64, epoch: i64) -> Self {
        Self { event_id, epoch, fields: Map::new() }
    }

    /// Identity key used for dedupe and consolidation.
    pub fn key(&self) -> (i64, i64) {
        (self.event_id, self.epoch)
    }

    /// Field names in serialization order: identity first, then the map.
    pub fn field_names(&self) -> Vec<String> {
        let mut names = vec![s!("event_id"), s!("epoch")];
        names.extend(self.fields.keys().cloned());
        names
    }

    /// Uniform lookup across identity and pass-through fields.
    pub fn value_of(&self, name: &str) -> Option<Value> {
        match name {
            "event_id" => Some(Value::from(self.event_id)),
            "epoch" => Some(Value::from(self.epoch)),
            _ => self.fields.get(name).cloned(),
        }
    }
}

/// Blank means "carries no information" for the merge policy:
/// JSON null, or a string that is empty or whitespace-only.
pub fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_flat() {
        let mut r = EventRecord::new(101, 1_700_000_000);
        r.fields.insert(s!("currency"), json!("USD"));
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v, json!({"event_id": 101, "epoch": 1_700_000_000, "currency": "USD"}));
    }

    #[test]
    fn round_trips_extra_fields() {
        let v = json!({"event_id": 7, "epoch": 42, "actual": "3.1%", "note": null});
        let r: EventRecord = serde_json::from_value(v.clone()).unwrap();
        assert_eq!(r.key(), (7, 42));
        assert_eq!(r.fields["actual"], json!("3.1%"));
        assert_eq!(serde_json::to_value(&r).unwrap(), v);
    }

    #[test]
    fn missing_identity_fails_deserialize() {
        let v = json!({"event_id": 7, "actual": "x"});
        assert!(serde_json::from_value::<EventRecord>(v).is_err());
        let v = json!({"event_id": "7", "epoch": 42});
        assert!(serde_json::from_value::<EventRecord>(v).is_err());
    }

    #[test]
    fn blank_values() {
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&json!("")));
        assert!(is_blank(&json!("   ")));
        assert!(!is_blank(&json!("0")));
        assert!(!is_blank(&json!(0)));
        assert!(!is_blank(&json!(false)));
    }
}
