//! JSON envelopes wrapped around every backend response.
//!
//! The backend answers list requests with two different shapes depending on
//! the module: a nested `{data, meta: {...}}` envelope and a flat
//! `{data, current_page, last_page, total, ...}` one. Both are accepted here
//! and adapted into a single [`Page`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pagination::Page;

/// Backend-supplied message carried by both success and error envelopes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ApiMessage {
    pub summary: String,
    /// Plain text, or a `{field: [messages]}` object on validation failures.
    pub detail: Value,
    pub code: Option<Value>,
}

impl ApiMessage {
    pub fn new(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: Value::String(detail.into()),
            code: None,
        }
    }

    /// Detail rendered as a single line of text.
    pub fn detail_text(&self) -> Option<String> {
        let text = match &self.detail {
            Value::Null => return None,
            Value::String(text) => text.clone(),
            other => flatten_messages(other).join(" "),
        };
        let text = text.trim().to_string();
        (!text.is_empty()).then_some(text)
    }

    /// Error code as text; the backend sends it either as a string or a number.
    pub fn code_str(&self) -> Option<String> {
        match self.code.as_ref()? {
            Value::String(code) => Some(code.clone()),
            Value::Number(code) => Some(code.to_string()),
            _ => None,
        }
    }

    /// Per-field messages when `detail` is a `{field: [messages]}` object.
    pub fn field_errors(&self) -> Vec<(String, Vec<String>)> {
        field_errors(&self.detail)
    }
}

/// Extracts `{field: [messages]}` pairs, ordered by field name.
pub fn field_errors(value: &Value) -> Vec<(String, Vec<String>)> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(field, messages)| (field.clone(), flatten_messages(messages)))
            .filter(|(_, messages)| !messages.is_empty())
            .collect(),
        _ => vec![],
    }
}

fn flatten_messages(value: &Value) -> Vec<String> {
    match value {
        Value::String(text) => vec![text.clone()],
        Value::Array(items) => items.iter().flat_map(flatten_messages).collect(),
        Value::Object(map) => map.values().flat_map(flatten_messages).collect(),
        Value::Null => vec![],
        other => vec![other.to_string()],
    }
}

/// Envelope around a single record: `{data, msg?}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub msg: Option<ApiMessage>,
}

/// Result of a create or update: the stored record and the server's message.
pub type Saved<T> = Envelope<T>;

/// Envelope around a message-only response such as a delete acknowledgement.
#[derive(Clone, Debug, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct MessageEnvelope {
    pub msg: Option<ApiMessage>,
}

/// Error body returned with any non-success status.
#[derive(Clone, Debug, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ErrorEnvelope {
    pub msg: Option<ApiMessage>,
    /// Alternative location of `{field: [messages]}` validation errors.
    pub errors: Option<Value>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PageMeta {
    pub current_page: usize,
    #[serde(default)]
    pub per_page: Option<usize>,
    pub total: usize,
    #[serde(default)]
    pub last_page: Option<usize>,
    #[serde(default)]
    pub from: Option<usize>,
    #[serde(default)]
    pub to: Option<usize>,
}

/// Either list envelope the backend produces.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Nested {
        data: Vec<T>,
        meta: PageMeta,
    },
    Flat {
        data: Vec<T>,
        #[serde(flatten)]
        meta: PageMeta,
    },
}

impl<T> ListEnvelope<T> {
    /// Adapts the envelope into a [`Page`], keeping `requested_per_page` when the
    /// backend did not echo the page size.
    pub fn into_page(self, requested_per_page: usize) -> Page<T> {
        let (data, meta) = match self {
            ListEnvelope::Nested { data, meta } | ListEnvelope::Flat { data, meta } => {
                (data, meta)
            }
        };
        let per_page = meta.per_page.unwrap_or(requested_per_page);
        Page::new(data, meta.current_page, per_page, meta.total)
    }
}
