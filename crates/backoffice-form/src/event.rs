use serde_json::{Value, json};

use crate::error::FormError;
use crate::time::combine_date_time;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputKind {
    #[default]
    Text,
    /// A numeric input. With a `step` it holds decimals, otherwise integers.
    Number { step: bool },
}

/// A change reported by one input widget, tagged with the widget's kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    Text {
        name: String,
        value: String,
        kind: InputKind,
    },
    Checkbox {
        name: String,
        checked: bool,
    },
    Radio {
        name: String,
        value: String,
    },
    /// Operator and value sub-inputs, stored as `[operator, value]` when
    /// `in_array`, else as `{ "operator": .., "value": .. }`.
    Composite {
        name: String,
        operator: String,
        value: String,
        in_array: bool,
    },
    /// Separate `DD/MM/YYYY` date and free-text time inputs.
    Date {
        name: String,
        date: String,
        time: String,
    },
    /// Flips `toggled` in the comma-joined list of currently chosen options.
    MultiSelect {
        name: String,
        current: String,
        toggled: String,
    },
    /// Controlled widgets that already hold a JSON value.
    Select {
        name: String,
        value: Value,
    },
}

impl FieldEvent {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FieldEvent::Text {
            name: name.into(),
            value: value.into(),
            kind: InputKind::Text,
        }
    }

    pub fn number(name: impl Into<String>, value: impl Into<String>, step: bool) -> Self {
        FieldEvent::Text {
            name: name.into(),
            value: value.into(),
            kind: InputKind::Number { step },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FieldEvent::Text { name, .. }
            | FieldEvent::Checkbox { name, .. }
            | FieldEvent::Radio { name, .. }
            | FieldEvent::Composite { name, .. }
            | FieldEvent::Date { name, .. }
            | FieldEvent::MultiSelect { name, .. }
            | FieldEvent::Select { name, .. } => name,
        }
    }

    /// The field path and the value to write there.
    pub fn into_value(self) -> Result<(String, Value), FormError> {
        let pair = match self {
            FieldEvent::Text { name, value, kind } => {
                let value = match kind {
                    InputKind::Text => Value::String(value),
                    InputKind::Number { step } => parse_number(&value, step),
                };
                (name, value)
            }
            FieldEvent::Checkbox { name, checked } => (name, Value::Bool(checked)),
            FieldEvent::Radio { name, value } => (name, Value::String(value)),
            FieldEvent::Composite {
                name,
                operator,
                value,
                in_array,
            } => {
                let value = if in_array {
                    json!([operator, value])
                } else {
                    json!({ "operator": operator, "value": value })
                };
                (name, value)
            }
            FieldEvent::Date { name, date, time } => {
                let value = combine_date_time(&date, &time)?;
                (name, Value::String(value))
            }
            FieldEvent::MultiSelect {
                name,
                current,
                toggled,
            } => (name, toggle_option(&current, &toggled)),
            FieldEvent::Select { name, value } => (name, value),
        };
        Ok(pair)
    }
}

/// Unparseable numbers become `null`.
fn parse_number(raw: &str, step: bool) -> Value {
    let raw = raw.trim();
    if step {
        raw.parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map_or(Value::Null, Value::Number)
    } else {
        raw.parse::<i64>().map_or(Value::Null, Value::from)
    }
}

fn toggle_option(current: &str, toggled: &str) -> Value {
    let mut options: Vec<&str> = current
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .collect();
    match options.iter().position(|o| *o == toggled) {
        Some(index) => {
            options.remove(index);
        }
        None => options.push(toggled),
    }
    Value::from(options)
}
