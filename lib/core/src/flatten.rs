//! Converts an arbitrary nested JSON value into a list of flat records.
//!
//! The rules are intentionally asymmetric around nested arrays: an array
//! inside an object explodes into one record per object element, and those
//! records replace the parent's own scalar fields entirely. A document like
//! `{"sirket": "X", "calisanlar": [{"isim": "A"}, {"isim": "B"}]}` therefore
//! becomes two records carrying only `calisanlar_isim`, not the sibling
//! `sirket` value.

use crate::record::FlatRecord;
use serde_json::Value;

/// Flatten a parsed JSON value into zero or more flat records.
///
/// A root array flattens each element independently and concatenates the
/// results; a scalar element of a root array becomes a one-field
/// `{"value": ...}` record. A scalar root produces no records at all.
pub fn flatten(value: &Value) -> Vec<FlatRecord> {
    match value {
        Value::Array(items) => {
            let mut records = Vec::new();
            for item in items {
                match item {
                    Value::Object(obj) => records.extend(flatten_object(obj, "")),
                    other => {
                        let mut record = FlatRecord::new();
                        record.insert("value", stringify(other));
                        records.push(record);
                    }
                }
            }
            records
        }
        Value::Object(obj) => flatten_object(obj, ""),
        _ => Vec::new(),
    }
}

/// Flatten one object into records.
///
/// Each nested-array object element becomes its own record, appended as
/// encountered. The accumulating record of the object's own scalars is only
/// kept when no nested array was seen and it is non-empty.
fn flatten_object(obj: &serde_json::Map<String, Value>, prefix: &str) -> Vec<FlatRecord> {
    let mut records = Vec::new();
    let mut current = FlatRecord::new();
    let mut has_nested_array = false;

    for (name, value) in obj {
        let key = join_key(prefix, name);

        match value {
            Value::Array(items) => {
                has_nested_array = true;
                for item in items {
                    // Non-object array elements are dropped here; only the
                    // root-array path represents scalars as records.
                    if let Value::Object(nested) = item {
                        let mut record = FlatRecord::new();
                        merge_properties(nested, &mut record, name);
                        records.push(record);
                    }
                }
            }
            Value::Object(nested) => merge_properties(nested, &mut current, &key),
            scalar => current.insert(key, stringify(scalar)),
        }
    }

    if !has_nested_array && !current.is_empty() {
        records.push(current);
    }

    records
}

/// Merge an object's properties into `target` under `prefix`, recursing
/// through nested objects. Arrays met at this depth are kept as their compact
/// JSON text rather than exploded further.
fn merge_properties(obj: &serde_json::Map<String, Value>, target: &mut FlatRecord, prefix: &str) {
    for (name, value) in obj {
        let key = join_key(prefix, name);

        match value {
            Value::Object(nested) => merge_properties(nested, target, &key),
            Value::Array(_) => target.insert(key, value.to_string()),
            scalar => target.insert(key, stringify(scalar)),
        }
    }
}

fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}_{name}")
    }
}

/// Render a scalar JSON value as the text stored in a record. Strings are
/// kept raw (no surrounding quotes); null becomes the empty string.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_array_of_objects() {
        let value = json!([{"ad": "Ali", "yaş": 30}, {"ad": "Veli", "yaş": 25}]);
        let records = flatten(&value);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("ad"), Some("Ali"));
        assert_eq!(records[0].get("yaş"), Some("30"));
        assert_eq!(records[1].get("ad"), Some("Veli"));
    }

    #[test]
    fn test_root_array_scalar_elements_become_value_records() {
        let value = json!([1, "two", true]);
        let records = flatten(&value);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get("value"), Some("1"));
        assert_eq!(records[1].get("value"), Some("two"));
        assert_eq!(records[2].get("value"), Some("true"));
    }

    #[test]
    fn test_nested_array_explodes_and_drops_sibling_scalars() {
        let value = json!({
            "sirket": "X",
            "calisanlar": [{"isim": "A"}, {"isim": "B"}]
        });
        let records = flatten(&value);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record.contains_field("calisanlar_isim"));
            assert!(!record.contains_field("sirket"));
        }
        assert_eq!(records[0].get("calisanlar_isim"), Some("A"));
        assert_eq!(records[1].get("calisanlar_isim"), Some("B"));
    }

    #[test]
    fn test_nested_array_non_object_elements_dropped() {
        let value = json!({"tags": ["a", "b"], "name": "x"});
        let records = flatten(&value);
        assert!(records.is_empty());
    }

    #[test]
    fn test_nested_object_merges_with_underscore_keys() {
        let value = json!({"kisi": {"ad": "Ali", "adres": {"il": "Ankara"}}});
        let records = flatten(&value);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("kisi_ad"), Some("Ali"));
        assert_eq!(records[0].get("kisi_adres_il"), Some("Ankara"));
    }

    #[test]
    fn test_array_inside_merge_kept_as_json_text() {
        let value = json!({"kisi": {"diller": ["tr", "en"]}});
        let records = flatten(&value);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("kisi_diller"), Some(r#"["tr","en"]"#));
    }

    #[test]
    fn test_scalar_root_yields_no_records() {
        assert!(flatten(&json!(42)).is_empty());
        assert!(flatten(&json!("text")).is_empty());
        assert!(flatten(&json!(null)).is_empty());
    }

    #[test]
    fn test_flattening_already_flat_input_is_stable() {
        let value = json!([{"a": "1", "b": "x"}, {"a": "2", "b": "y"}]);
        let first = flatten(&value);
        let reserialized = serde_json::to_value(&first).unwrap();
        let second = flatten(&reserialized);
        assert_eq!(first, second);
    }

    #[test]
    fn test_null_values_stored_as_empty_text() {
        let value = json!([{"ad": null}]);
        let records = flatten(&value);
        assert_eq!(records[0].get("ad"), Some(""));
    }
}
