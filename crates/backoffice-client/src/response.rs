use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `[status, body]` pair every gateway call resolves to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `data` member of the `{ data: ... }` envelope.
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data")
    }

    pub fn into_data(self) -> Value {
        match self.body {
            Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    pub fn into_parts(self) -> (u16, Value) {
        (self.status, self.body)
    }
}
