//! Property flattening: simple key/value maps -> typed property payloads.
//!
//! Callers describe page properties as a flat JSON map; this module maps
//! each entry into the store's typed property-value encoding. Rules are
//! type-directed and evaluated per key in map order, first match wins.
//! Date properties span multiple fields, so they use a namespaced key
//! shorthand `date:<name>:<start|end|is_datetime>` whose entries
//! accumulate into a single date property per `<name>`.
//!
//! The flattener is pure and total: unrecognized structured values pass
//! through opaquely (letting advanced callers supply fully-formed
//! payloads), and nulls are omitted.

use blockdown_core::{PropertyValue, Span};
use serde_json::{Map, Value};

#[derive(Default)]
struct DateParts {
    start: Option<String>,
    end: Option<String>,
    is_datetime: Option<bool>,
}

/// Flatten a simple property map into store-native property payloads,
/// one per distinct field name. Insertion order is preserved; accumulated
/// date properties are emitted after all other keys.
///
/// ```
/// use serde_json::json;
/// use blockdown_props::flatten;
///
/// let input = json!({
///     "Name": "My page",
///     "Tags": ["a", "b"],
///     "Priority": 2,
///     "Done": false,
/// });
/// let props = flatten(input.as_object().unwrap());
///
/// assert!(props["Name"].get("title").is_some());
/// assert_eq!(props["Tags"]["multi_select"][0]["name"], "a");
/// assert_eq!(props["Priority"]["number"], 2.0);
/// assert_eq!(props["Done"]["checkbox"], false);
/// ```
pub fn flatten(input: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    // Accumulation order doubles as emission order.
    let mut dates: Vec<(String, DateParts)> = Vec::new();

    for (key, value) in input {
        if value.is_null() {
            continue;
        }

        if let Some(rest) = key.strip_prefix("date:")
            && let Some((name, field)) = rest.rsplit_once(':')
            && matches!(field, "start" | "end" | "is_datetime")
        {
            let idx = match dates.iter().position(|(n, _)| n == name) {
                Some(idx) => idx,
                None => {
                    dates.push((name.to_string(), DateParts::default()));
                    dates.len() - 1
                }
            };
            let parts = &mut dates[idx].1;
            match field {
                "start" => parts.start = Some(stringify(value)),
                "end" => parts.end = Some(stringify(value)),
                _ => parts.is_datetime = Some(truthy(value)),
            }
            continue;
        }

        let property = if key == "Name" && value.is_string() {
            PropertyValue::Title(vec![Span::plain(value.as_str().unwrap_or_default())])
        } else if let Some(items) = value.as_array() {
            PropertyValue::MultiSelect(items.iter().map(stringify).collect())
        } else if let Some(number) = value.as_f64() {
            PropertyValue::Number(number)
        } else if let Some(flag) = value.as_bool() {
            PropertyValue::Checkbox(flag)
        } else if let Some(text) = value.as_str() {
            PropertyValue::RichText(vec![Span::plain(text)])
        } else {
            PropertyValue::Opaque(value.clone())
        };

        out.insert(key.clone(), property.to_payload());
    }

    for (name, parts) in dates {
        let property = PropertyValue::Date {
            start: parts.start,
            end: parts.end,
            is_datetime: parts.is_datetime,
        };
        out.insert(name, property.to_payload());
    }

    out
}

/// A value's option-name/date-field string form: strings verbatim,
/// everything else via its JSON rendering.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        _ => false,
    }
}
