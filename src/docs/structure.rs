//! JSON Structure Inference
//!
//! Derives a field-path → type map from a parsed JSON value. Arrays are
//! sampled: only element 0 is inspected, on the assumption that arrays in
//! API payloads are homogeneous.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Coarse type tag of a JSON field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Object,
    Array,
    /// Placeholder entry for the sampled first element of an array
    ArrayItem,
    String,
    Integer,
    Float,
    Boolean,
    Null,
}

impl FieldType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::Object,
            Value::Array(_) => Self::Array,
            Value::String(_) => Self::String,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Float,
            Value::Bool(_) => Self::Boolean,
            Value::Null => Self::Null,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::ArrayItem => "array_item",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Null => "null",
        };
        f.write_str(name)
    }
}

/// Field paths (`data.items[0].id`) mapped to their type, sorted by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferredStructure {
    fields: BTreeMap<String, FieldType>,
}

impl InferredStructure {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, path: &str) -> Option<FieldType> {
        self.fields.get(path).copied()
    }

    /// Fields in sorted path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.fields.iter().map(|(path, ty)| (path.as_str(), *ty))
    }

    /// Fields worth listing in documentation.
    ///
    /// Drops the `[0]` sample placeholders and a top-level `type` key.
    pub fn documented_fields(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.iter()
            .filter(|(path, _)| !path.ends_with("[0]") && *path != "type")
    }
}

/// Infer the structure of any JSON value
pub fn infer_structure(value: &Value) -> InferredStructure {
    let mut structure = InferredStructure::default();
    walk(value, "", &mut structure.fields);
    structure
}

fn walk(value: &Value, prefix: &str, fields: &mut BTreeMap<String, FieldType>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                fields.insert(path.clone(), FieldType::of(child));
                if child.is_object() || child.is_array() {
                    walk(child, &path, fields);
                }
            }
        }
        Value::Array(items) => {
            if let Some(first) = items.first() {
                let path = format!("{}[0]", prefix);
                fields.insert(path.clone(), FieldType::ArrayItem);
                if first.is_object() {
                    walk(first, &path, fields);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn as_pairs(structure: &InferredStructure) -> Vec<(String, String)> {
        structure
            .iter()
            .map(|(p, t)| (p.to_string(), t.to_string()))
            .collect()
    }

    #[test]
    fn test_array_is_sampled() {
        let structure = infer_structure(&json!({"a": [1, 2, 3]}));
        assert_eq!(
            as_pairs(&structure),
            vec![
                ("a".to_string(), "array".to_string()),
                ("a[0]".to_string(), "array_item".to_string()),
            ]
        );
    }

    #[test]
    fn test_nested_paths() {
        let structure = infer_structure(&json!({
            "status": true,
            "data": {
                "items": [{"id": 1, "score": 0.5, "tags": []}, {"other": "ignored"}],
                "next": null
            }
        }));
        assert_eq!(structure.get("status"), Some(FieldType::Boolean));
        assert_eq!(structure.get("data"), Some(FieldType::Object));
        assert_eq!(structure.get("data.items"), Some(FieldType::Array));
        assert_eq!(structure.get("data.items[0]"), Some(FieldType::ArrayItem));
        assert_eq!(structure.get("data.items[0].id"), Some(FieldType::Integer));
        assert_eq!(structure.get("data.items[0].score"), Some(FieldType::Float));
        assert_eq!(structure.get("data.items[0].tags"), Some(FieldType::Array));
        assert_eq!(structure.get("data.items[0].tags[0]"), None);
        assert_eq!(structure.get("data.items[0].other"), None);
        assert_eq!(structure.get("data.next"), Some(FieldType::Null));
    }

    #[test]
    fn test_empty_containers() {
        let structure = infer_structure(&json!({"a": {}, "b": []}));
        assert_eq!(structure.len(), 2);
        assert!(infer_structure(&json!([])).is_empty());
        assert!(infer_structure(&json!("text")).is_empty());
    }

    #[test]
    fn test_top_level_array() {
        let structure = infer_structure(&json!([{"id": 1}]));
        assert_eq!(structure.get("[0]"), Some(FieldType::ArrayItem));
        assert_eq!(structure.get("[0].id"), Some(FieldType::Integer));
    }

    #[test]
    fn test_documented_fields_filter() {
        let structure = infer_structure(&json!({"type": "x", "list": [{"type": "y"}]}));
        let documented: Vec<_> = structure.documented_fields().map(|(p, _)| p).collect();
        assert_eq!(documented, vec!["list", "list[0].type"]);
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z ]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 48, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z_]{1,6}", inner, 0..5)
                    .prop_map(|map| Value::Object(map.into_iter().collect())),
            ]
        })
    }

    /// Follow a `a.b[0].c` path through `value`
    fn resolve<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
        let mut current = value;
        for part in path.split('.') {
            let (key, indexed) = match part.strip_suffix("[0]") {
                Some(key) => (key, true),
                None => (part, false),
            };
            if !key.is_empty() {
                current = current.get(key)?;
            }
            if indexed {
                current = current.get(0)?;
            }
        }
        Some(current)
    }

    proptest! {
        #[test]
        fn prop_paths_exist_in_input(value in arb_json()) {
            let structure = infer_structure(&value);
            for (path, ty) in structure.iter() {
                prop_assert!(!path.is_empty());
                let target = resolve(&value, path);
                prop_assert!(target.is_some(), "path {} not found", path);
                if ty != FieldType::ArrayItem {
                    prop_assert_eq!(FieldType::of(target.unwrap()), ty);
                }
            }
        }

        #[test]
        fn prop_inference_is_deterministic(value in arb_json()) {
            prop_assert_eq!(infer_structure(&value), infer_structure(&value));
        }
    }
}
