//! Field descriptors shared by the table and the modal form.

use serde_json::Value;

use crate::Record;

/// One editable attribute of an entity.
///
/// A slice of descriptors defines both the table columns and the modal
/// inputs; slice order is presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    /// Read-only in forms.
    pub disabled: bool,
    pub default: Option<&'static str>,
}

impl FieldDescriptor {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            disabled: false,
            default: None,
        }
    }

    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub const fn with_default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    /// Display text of this field in `record`.
    pub fn cell_text(&self, record: &Record) -> String {
        lookup(record, self.key).map(value_text).unwrap_or_default()
    }
}

/// Value of `key` in `record`. A key that is not present verbatim is read as
/// a dotted path into nested objects, e.g. `"1st Term.amount"`.
pub fn lookup<'a>(record: &'a Record, key: &str) -> Option<&'a Value> {
    if let Some(value) = record.get(key) {
        return Some(value);
    }
    let (head, rest) = key.split_once('.')?;
    match record.get(head)? {
        Value::Object(nested) => lookup(nested, rest),
        _ => None,
    }
}

/// String form of a JSON value as shown in a cell or an input.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Checks that descriptor keys are unique. Used by the entity definitions'
/// tests; descriptor lists are static so there is no runtime check.
pub fn keys_are_unique(fields: &[FieldDescriptor]) -> bool {
    fields
        .iter()
        .enumerate()
        .all(|(i, f)| fields[..i].iter().all(|g| g.key != f.key))
}
