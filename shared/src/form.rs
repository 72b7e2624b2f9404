//! Generic add/edit modal model.
//!
//! The draft is seeded from the field descriptors and either the entity being
//! edited or the add-mode defaults, edited key by key, and handed back
//! verbatim on submit.

use serde_json::Value;

use crate::Record;
use crate::field::{FieldDescriptor, value_text};

/// Add or edit. Decides the submit label and whether delete is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit,
}

impl FormMode {
    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Add => "Add",
            FormMode::Edit => "Update",
        }
    }

    pub fn allows_delete(&self) -> bool {
        matches!(self, FormMode::Edit)
    }
}

/// Builds the initial draft.
///
/// Edit mode copies the entity's value for every descriptor key ("" when
/// absent). Add mode uses the descriptor default, else the matching entry of
/// `defaults`, else ""; `defaults` entries without a descriptor are carried
/// along as well (e.g. the fixed `role`).
pub fn seed_draft(
    fields: &[FieldDescriptor],
    entity: Option<&Record>,
    defaults: &Record,
) -> Record {
    let mut draft = Record::new();
    match entity {
        Some(entity) => {
            for field in fields {
                let value = match entity.get(field.key) {
                    None | Some(Value::Null) => Value::String(String::new()),
                    Some(v) => v.clone(),
                };
                draft.insert(field.key.to_string(), value);
            }
        }
        None => {
            for field in fields {
                let value = match field.default {
                    Some(d) => Value::String(d.to_string()),
                    None => defaults
                        .get(field.key)
                        .cloned()
                        .unwrap_or_else(|| Value::String(String::new())),
                };
                draft.insert(field.key.to_string(), value);
            }
            for (key, value) in defaults {
                if !draft.contains_key(key) {
                    draft.insert(key.clone(), value.clone());
                }
            }
        }
    }
    draft
}

/// State of the open (or closed) modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState {
    visible: bool,
    title: String,
    mode: FormMode,
    entity: Option<Record>,
    draft: Record,
    fields: &'static [FieldDescriptor],
}

impl ModalState {
    /// A closed modal over `fields`.
    pub fn closed(fields: &'static [FieldDescriptor]) -> Self {
        Self {
            visible: false,
            title: String::new(),
            mode: FormMode::Add,
            entity: None,
            draft: Record::new(),
            fields,
        }
    }

    pub fn open_add(&mut self, title: impl Into<String>, defaults: &Record) {
        self.visible = true;
        self.title = title.into();
        self.mode = FormMode::Add;
        self.entity = None;
        self.draft = seed_draft(self.fields, None, defaults);
    }

    /// `overrides` replace the seeded values, disabled fields included.
    pub fn open_edit(&mut self, title: impl Into<String>, entity: Record, overrides: &Record) {
        self.visible = true;
        self.title = title.into();
        self.mode = FormMode::Edit;
        self.draft = seed_draft(self.fields, Some(&entity), &Record::new());
        for (key, value) in overrides {
            self.draft.insert(key.clone(), value.clone());
        }
        self.entity = Some(entity);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// The record being edited; `None` in add mode.
    pub fn entity(&self) -> Option<&Record> {
        self.entity.as_ref()
    }

    pub fn draft(&self) -> &Record {
        &self.draft
    }

    /// Input text for `key`.
    pub fn field_text(&self, key: &str) -> String {
        self.draft.get(key).map(value_text).unwrap_or_default()
    }

    /// Applies user input. Returns `false` (and changes nothing) for disabled
    /// fields and keys outside the descriptor list.
    pub fn update_field(&mut self, key: &str, text: impl Into<String>) -> bool {
        let editable = self.fields.iter().any(|f| f.key == key && !f.disabled);
        if !editable || !self.visible {
            return false;
        }
        self.draft.insert(key.to_string(), Value::String(text.into()));
        true
    }

    /// The draft to hand to the submit callback. The modal stays open until
    /// the caller reports success via [`ModalState::close`].
    pub fn submission(&self) -> Record {
        self.draft.clone()
    }

    /// Closes and discards the draft; used for cancel and after a successful
    /// submit.
    pub fn close(&mut self) {
        *self = Self::closed(self.fields);
    }
}
