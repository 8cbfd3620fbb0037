//! Bulk population of selection controls from an `{ payload: [{id, text}] }`
//! response.
//!
//! # Design
//! Controls are addressed by selector through an `OptionSink`, so the same
//! loader can drive a UI toolkit or the in-memory `SelectBoard`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DispatchError;

/// One entry of an option payload. `id` may be a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub id: Value,
    pub text: String,
}

impl OptionEntry {
    /// The id as control value text: strings verbatim, anything else as JSON.
    pub fn value(&self) -> String {
        match &self.id {
            Value::String(id) => id.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionPayload {
    pub payload: Vec<OptionEntry>,
}

impl OptionPayload {
    /// Decode a dispatched response payload.
    pub fn from_value(value: Value) -> Result<Self, DispatchError> {
        serde_json::from_value(value).map_err(|e| DispatchError::DeserializationError(e.to_string()))
    }
}

/// A `(label, value)` pair as held by a selection control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl From<&OptionEntry> for SelectOption {
    fn from(entry: &OptionEntry) -> Self {
        SelectOption::new(entry.text.clone(), entry.value())
    }
}

/// Selection controls addressed by selector.
pub trait OptionSink {
    fn clear(&mut self, selector: &str);
    fn append(&mut self, selector: &str, option: SelectOption);
}

/// Clear each selected control and refill it with one option per payload
/// entry, in payload order.
pub fn load_select_with_options<S, T>(payload: &OptionPayload, sink: &mut S, selectors: &[T])
where
    S: OptionSink + ?Sized,
    T: AsRef<str>,
{
    for selector in selectors {
        let selector = selector.as_ref();
        sink.clear(selector);
        for entry in &payload.payload {
            sink.append(selector, SelectOption::from(entry));
        }
    }
}

/// In-memory selection controls.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectBoard {
    controls: BTreeMap<String, Vec<SelectOption>>,
}

impl SelectBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self, selector: &str) -> &[SelectOption] {
        self.controls.get(selector).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SelectOption])> {
        self.controls.iter().map(|(selector, options)| (selector.as_str(), options.as_slice()))
    }
}

impl OptionSink for SelectBoard {
    fn clear(&mut self, selector: &str) {
        self.controls.entry(selector.to_string()).or_default().clear();
    }

    fn append(&mut self, selector: &str, option: SelectOption) {
        self.controls.entry(selector.to_string()).or_default().push(option);
    }
}
