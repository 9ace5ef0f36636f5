use serde_json::{Map, Value};

/// Renders a JSON value the way it reads in a change log: strings bare,
/// `null` and scalars literally, containers as compact JSON.
pub fn js_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => js_number(number),
        other => other.to_string(),
    }
}

/// Whole-valued floats lose their `.0`, so `1` and `1.0` read the same.
fn js_number(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 1e21 => {
            format!("{}", float as i128)
        }
        _ => number.to_string(),
    }
}

fn field_text(value: Option<&Value>) -> String {
    value.map(js_string).unwrap_or_else(|| "undefined".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: String,
    pub old: String,
    pub new: String,
}

/// Fields of `new` whose rendered value differs from `old`. Keys present only
/// in `old` are not reported.
pub fn field_diff(old: &Map<String, Value>, new: &Map<String, Value>) -> Vec<FieldChange> {
    new.iter()
        .filter_map(|(field, new_value)| {
            let old_text = field_text(old.get(field));
            let new_text = js_string(new_value);
            (old_text != new_text).then(|| FieldChange {
                field: field.clone(),
                old: old_text,
                new: new_text,
            })
        })
        .collect()
}

pub fn pretty_json(values: &Map<String, Value>) -> String {
    serde_json::to_string_pretty(values).unwrap_or_else(|_| Value::Object(values.clone()).to_string())
}

/// First `limit` public event parameters as `(key, value)` labels. Keys
/// starting with `_` are internal; scalar values are cut at 30 characters.
pub fn param_chips(params: &Map<String, Value>, limit: usize) -> Vec<(String, String)> {
    params
        .iter()
        .filter(|(key, _)| !key.starts_with('_'))
        .take(limit)
        .map(|(key, value)| {
            let text = match value {
                Value::Object(_) | Value::Array(_) => value.to_string(),
                scalar => js_string(scalar).chars().take(30).collect(),
            };
            (key.clone(), text)
        })
        .collect()
}
