//! Codec error types.

use indexmap::IndexMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Unsupported type for encoding: {type_name} ({reason})")]
    UnsupportedType {
        type_name: &'static str,
        reason: String,
    },

    #[error("Reserved key __type__ names record type {tag} on a plain mapping")]
    ReservedKey { tag: String },

    #[error("JSON syntax error: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("JSON serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Malformed date in {record}.{field}: {value:?}")]
    MalformedDate {
        record: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Malformed decimal in {record}.{field}: {value:?}")]
    MalformedDecimal {
        record: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Malformed {record}.{field}: expected {expected}, found {found}")]
    MalformedField {
        record: &'static str,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Missing field {record}.{field}")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Every field-level failure found while validating one record.
///
/// Messages are grouped per field in the order they were found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{schema} validation failed: {}", summarize(.messages))]
pub struct ValidationError {
    schema: &'static str,
    messages: IndexMap<String, Vec<String>>,
}

impl ValidationError {
    pub fn new(schema: &'static str) -> Self {
        Self {
            schema,
            messages: IndexMap::new(),
        }
    }

    /// Record a failure for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.messages
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn schema(&self) -> &'static str {
        self.schema
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of fields with at least one failure.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Names of failing fields.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.messages.contains_key(field)
    }

    pub fn messages_for(&self, field: &str) -> Option<&[String]> {
        self.messages.get(field).map(Vec::as_slice)
    }
}

fn summarize(messages: &IndexMap<String, Vec<String>>) -> String {
    messages
        .iter()
        .map(|(field, msgs)| format!("{field}: {}", msgs.join(" ")))
        .collect::<Vec<_>>()
        .join("; ")
}
