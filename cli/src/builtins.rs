//! Named callbacks the `paramguard` binary registers for spec documents.

use serde_json::Value;

use paramguard_contracts::callback::{predicate, CallbackRegistry};

/// Names and one-line descriptions, shown in `--help`.
pub const BUILTINS: [(&str, &str); 4] = [
    ("non_empty", "string, list or dict has at least one element; null fails"),
    ("no_blank_items", "list whose string items are not empty or whitespace"),
    ("positive", "number greater than zero"),
    ("non_negative", "number zero or greater"),
];

pub fn registry() -> CallbackRegistry {
    let mut registry = CallbackRegistry::new();
    registry.register("non_empty", predicate(|_, v| non_empty(v)));
    registry.register("no_blank_items", predicate(|_, v| no_blank_items(v)));
    registry.register(
        "positive",
        predicate(|_, v| v.as_f64().is_some_and(|n| n > 0.0)),
    );
    registry.register(
        "non_negative",
        predicate(|_, v| v.as_f64().is_some_and(|n| n >= 0.0)),
    );
    registry
}

fn non_empty(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

fn no_blank_items(value: &Value) -> bool {
    value.as_array().is_some_and(|items| {
        items
            .iter()
            .all(|item| item.as_str().map_or(true, |s| !s.trim().is_empty()))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{registry, BUILTINS};

    fn check(name: &str, value: serde_json::Value) -> bool {
        let registry = registry();
        let cb = registry.get(name).unwrap();
        cb("field", &value).unwrap() == json!(true)
    }

    #[test]
    fn every_listed_builtin_is_registered() {
        let registry = registry();
        for (name, _) in BUILTINS {
            assert!(registry.get(name).is_some(), "{name} not registered");
        }
    }

    #[test]
    fn non_empty_by_kind() {
        assert!(check("non_empty", json!("x")));
        assert!(check("non_empty", json!([0])));
        assert!(check("non_empty", json!({"k": 1})));
        assert!(check("non_empty", json!(0)));
        assert!(!check("non_empty", json!("")));
        assert!(!check("non_empty", json!([])));
        assert!(!check("non_empty", json!({})));
        assert!(!check("non_empty", json!(null)));
    }

    #[test]
    fn no_blank_items_checks_strings_only() {
        assert!(check("no_blank_items", json!(["a", "b", 3])));
        assert!(check("no_blank_items", json!([])));
        assert!(!check("no_blank_items", json!(["a", "  "])));
        assert!(!check("no_blank_items", json!("a")));
    }

    #[test]
    fn number_signs() {
        assert!(check("positive", json!(1)));
        assert!(check("positive", json!(0.5)));
        assert!(!check("positive", json!(0)));
        assert!(!check("positive", json!("1")));
        assert!(check("non_negative", json!(0)));
        assert!(!check("non_negative", json!(-2)));
    }
}
