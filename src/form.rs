//! The data model behind the dashboard's modal forms.

use std::sync::Mutex;

use crate::{
    lock,
    request::{Payload, Primitive},
};

/// The current values of a form's fields, in the order they were filled in.
#[derive(Debug, Default)]
pub struct FormFields {
    values: Mutex<Payload>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: &str, value: impl Into<Primitive>) {
        lock(&self.values).insert(name, value);
    }

    /// A snapshot of the fields, ready to be submitted.
    pub fn data(&self) -> Payload {
        lock(&self.values).clone()
    }

    /// Empty every field.
    pub fn reset(&self) {
        *lock(&self.values) = Payload::new();
    }
}
