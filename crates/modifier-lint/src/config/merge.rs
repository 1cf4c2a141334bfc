use serde_json::Value;

/// Deep-merges `overrides` onto `defaults`.
///
/// Objects are merged key by key and keep the key order of `defaults`.
/// Any other value in `overrides`, arrays included, replaces the default.
pub fn merge_options(defaults: Value, overrides: Value) -> Value {
    match (defaults, overrides) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => {
                        let previous = slot.take();
                        *slot = merge_options(previous, value);
                    }
                    None => {
                        base.insert(key, value);
                    }
                }
            }
            Value::Object(base)
        }
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_values_win() {
        let merged = merge_options(
            json!({ "ignoreVisibility": ["internal"], "required": {} }),
            json!({ "ignoreVisibility": ["private"] }),
        );
        assert_eq!(
            merged,
            json!({ "ignoreVisibility": ["private"], "required": {} })
        );
    }

    #[test]
    fn arrays_replace_instead_of_concatenating() {
        let merged = merge_options(json!({ "a": [1, 2] }), json!({ "a": [] }));
        assert_eq!(merged, json!({ "a": [] }));
    }

    #[test]
    fn nested_objects_merge() {
        let merged = merge_options(
            json!({ "required": { "*": ["a"], "*.sol": { "A": ["b"] } } }),
            json!({ "required": { "*.sol": { "B": ["c"] } }, "override": {} }),
        );
        assert_eq!(
            merged,
            json!({
                "required": { "*": ["a"], "*.sol": { "A": ["b"], "B": ["c"] } },
                "override": {}
            })
        );
    }

    #[test]
    fn keeps_default_key_order() {
        let merged = merge_options(
            json!({ "first": 1, "second": 2 }),
            json!({ "third": 3, "first": 10 }),
        );
        let keys: Vec<&String> = merged.as_object().expect("object").keys().collect();
        assert_eq!(keys, ["first", "second", "third"]);
    }
}
