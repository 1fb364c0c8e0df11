use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use backoffice_client::{ApiResponse, Client, ClientError, Transport};
use backoffice_collection::{CollectionPatch, CollectionStore};
use http::Method;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FormError;
use crate::event::FieldEvent;
use crate::path::write_path;
use crate::status::{StatusKind, StatusMessage};

/// The staged create/update payload for one entity.
///
/// Every change produces a new record; snapshots taken with [`FormState::data`]
/// stay as they were.
#[derive(Debug, Clone)]
pub struct FormState {
    data: Arc<Value>,
    errors: BTreeMap<String, String>,
    status: Option<StatusMessage>,
}

impl FormState {
    pub fn new(initial: Value) -> Self {
        Self {
            data: Arc::new(initial),
            errors: BTreeMap::new(),
            status: None,
        }
    }

    pub fn data(&self) -> Arc<Value> {
        Arc::clone(&self.data)
    }

    /// Replaces the record with whatever `f` builds from the current one.
    pub fn set_data(&mut self, f: impl FnOnce(&Value) -> Value) {
        self.data = Arc::new(f(&self.data));
    }

    /// Writes the event's value at its field path and clears that field's error.
    pub fn on_change(&mut self, event: FieldEvent) -> Result<(), FormError> {
        let (name, value) = event.into_value()?;
        let mut record = (*self.data).clone();
        write_path(&mut record, &name, value)?;
        self.data = Arc::new(record);
        self.errors.remove(&name);
        Ok(())
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn field_error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn set_errors_map(&mut self, errors: BTreeMap<String, String>) {
        self.errors = errors;
    }

    /// The current status message, unless it has been dismissed by time.
    pub fn status_message(&self, now: Instant) -> Option<&StatusMessage> {
        self.status.as_ref().filter(|m| !m.is_expired(now))
    }

    pub fn set_status_message(&mut self, kind: StatusKind, text: impl Into<String>, now: Instant) {
        self.status = Some(StatusMessage::new(kind, text, now));
    }

    /// Sends the record with `method` and, on success, reloads `collection`.
    ///
    /// Failures are returned and also surfaced as an error status message;
    /// a field-keyed `errors` object in a rejected response fills the errors map.
    pub fn submit<T: Transport>(
        &mut self,
        client: &Client<T>,
        method: Method,
        path: &str,
        collection: Option<&mut CollectionStore>,
        now: Instant,
    ) -> Result<ApiResponse, ClientError> {
        let body = serde_json::to_vec(self.data.as_ref())?;
        debug!(%method, path, "submitting form");

        match client.send(method, path, Some(body)) {
            Ok(response) => {
                self.errors.clear();
                self.set_status_message(StatusKind::Success, "Saved", now);
                if let Some(collection) = collection {
                    collection.update(CollectionPatch::reload());
                }
                Ok(response)
            }
            Err(e) => {
                warn!(path, error = %e, "form submission failed");
                if let Some(errors) = e.response().and_then(|r| field_errors(&r.body)) {
                    self.errors = errors;
                }
                let text = failure_message(&e);
                self.set_status_message(StatusKind::Error, text, now);
                Err(e)
            }
        }
    }
}

fn field_errors(body: &Value) -> Option<BTreeMap<String, String>> {
    let errors = body.get("errors")?.as_object()?;
    Some(
        errors
            .iter()
            .map(|(field, message)| {
                let message = match message {
                    Value::String(s) => s.clone(),
                    Value::Array(items) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(", "),
                    other => other.to_string(),
                };
                (field.clone(), message)
            })
            .collect(),
    )
}

/// The server's own `message`/`error` text when it sent one.
fn failure_message(e: &ClientError) -> String {
    if let Some(response) = e.response() {
        for key in ["message", "error"] {
            if let Some(text) = response.body.get(key).and_then(Value::as_str) {
                return text.to_string();
            }
        }
    }
    e.to_string()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    #[test]
    fn on_change_copies_instead_of_mutating() {
        let mut form = FormState::new(json!({ "buyer": { "address": [{ "city": "X" }] } }));
        let before = form.data();

        form.on_change(FieldEvent::text("buyer.address[0].city", "Leeds"))
            .unwrap();
        let after = form.data();

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(*before, json!({ "buyer": { "address": [{ "city": "X" }] } }));
        assert_eq!(*after, json!({ "buyer": { "address": [{ "city": "Leeds" }] } }));
    }

    #[test]
    fn on_change_clears_field_error() {
        let mut form = FormState::new(json!({}));
        form.set_errors_map(BTreeMap::from([
            ("name".to_string(), "required".to_string()),
            ("email".to_string(), "invalid".to_string()),
        ]));
        form.on_change(FieldEvent::text("name", "Ann")).unwrap();
        assert_eq!(form.field_error("name"), None);
        assert_eq!(form.field_error("email"), Some("invalid"));
    }

    #[test]
    fn failed_event_leaves_record_untouched() {
        let mut form = FormState::new(json!({ "tags": ["a"] }));
        let before = form.data();
        assert!(form.on_change(FieldEvent::text("tags.name", "x")).is_err());
        assert!(Arc::ptr_eq(&before, &form.data()));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut form = FormState::new(json!({ "tags": [] }));
        let before = form.data();
        let err = form
            .on_change(FieldEvent::text("tags[18446744073709551615]", "x"))
            .unwrap_err();
        assert_eq!(err, FormError::InvalidPath("tags[18446744073709551615]".into()));
        assert!(Arc::ptr_eq(&before, &form.data()));
    }

    #[test]
    fn set_data_replaces_snapshot() {
        let mut form = FormState::new(json!({ "count": 1 }));
        let before = form.data();
        form.set_data(|old| json!({ "count": old["count"].as_i64().unwrap_or(0) + 1 }));
        assert_eq!(*before, json!({ "count": 1 }));
        assert_eq!(*form.data(), json!({ "count": 2 }));
    }

    #[test]
    fn status_message_expires_after_five_seconds() {
        let now = Instant::now();
        let mut form = FormState::new(json!({}));
        form.set_status_message(StatusKind::Error, "network error", now);

        assert!(form.status_message(now + Duration::from_secs(4)).is_some());
        assert!(form.status_message(now + Duration::from_secs(5)).is_none());
    }

    #[test]
    fn field_errors_accept_strings_and_lists() {
        let errors = field_errors(&json!({
            "errors": { "name": "required", "email": ["invalid", "taken"] }
        }))
        .unwrap();
        assert_eq!(errors["name"], "required");
        assert_eq!(errors["email"], "invalid, taken");
        assert!(field_errors(&json!({ "error": "x" })).is_none());
    }
}
