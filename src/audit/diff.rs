//! Field-level diffs between two JSON snapshots of an entity

use serde_json::Value;

const MAX_STRING_CHARS: usize = 47;

/// Summarise top-level field changes, `None` when nothing changed
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            changes
        }
        _ if before != after => vec![format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > MAX_STRING_CHARS + 3 => {
            let truncated: String = s.chars().take(MAX_STRING_CHARS).collect();
            format!("\"{}...\"", truncated)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_percentage_change() {
        let before = json!({"needs_percentage": 50.0, "wants_percentage": 30.0});
        let after = json!({"needs_percentage": 60.0, "wants_percentage": 30.0});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "needs_percentage: 50.0 -> 60.0");
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"name": "Laptop", "description": "Work"});
        let after = json!({"name": "Laptop", "target_date": "2026-12-01"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("description: \"Work\" -> (removed)"));
        assert!(diff.contains("target_date: (added) -> \"2026-12-01\""));
    }

    #[test]
    fn test_no_changes() {
        let goal = json!({"name": "Laptop", "current_amount": 0});
        assert!(generate_diff(&goal, &goal).is_none());
    }

    #[test]
    fn test_scalar_change() {
        let diff = generate_diff(&json!(0), &json!(88000)).unwrap();
        assert_eq!(diff, "0 -> 88000");
    }

    #[test]
    fn test_collections_summarised() {
        let before = json!({"fixed_expenses": [], "is_locked": false});
        let after = json!({"fixed_expenses": [{"name": "Rent"}], "is_locked": true});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("fixed_expenses: [0 items] -> [1 items]"));
        assert!(diff.contains("is_locked: false -> true"));
    }

    #[test]
    fn test_long_strings_truncated_on_char_boundary() {
        let long = "é".repeat(80);
        let diff = generate_diff(&json!({"memo": long}), &json!({"memo": "ok"})).unwrap();
        assert!(diff.contains("...\""));
    }
}
