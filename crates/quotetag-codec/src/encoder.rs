//! Value tree to JSON text.
//!
//! Records at any depth are replaced by their canonical mapping. Bare
//! dates, timestamps and decimals use the same text forms without a tag,
//! subject to `BareValuePolicy`.

use crate::canonical::Canonical;
use crate::config::{BareValuePolicy, CodecConfig};
use crate::error::{CodecError, CodecResult};
use crate::value::{Node, TYPE_TAG};
use quotetag_core::{render_date, render_decimal, render_timestamp, Stock, Trade};
use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

/// JSON encoder for value trees.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: CodecConfig,
}

impl Encoder {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode a value tree to JSON text.
    pub fn encode(&self, node: &Node) -> CodecResult<String> {
        let value = self.to_json(node)?;
        let text = if self.config.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        text.map_err(CodecError::Serialize)
    }

    /// Convert a value tree to a JSON value.
    pub fn to_json(&self, node: &Node) -> CodecResult<Value> {
        match node {
            Node::Null => Ok(Value::Null),
            Node::Bool(b) => Ok(Value::Bool(*b)),
            Node::Number(n) => Ok(Value::Number(n.clone())),
            Node::Float(f) => Number::from_f64(*f).map(Value::Number).ok_or_else(|| {
                warn!(value = %f, "Refusing non-finite float");
                CodecError::UnsupportedType {
                    type_name: node.type_name(),
                    reason: format!("{f} has no JSON representation"),
                }
            }),
            Node::String(s) => Ok(Value::String(s.clone())),
            Node::List(items) => items
                .iter()
                .map(|item| self.to_json(item))
                .collect::<CodecResult<Vec<_>>>()
                .map(Value::Array),
            Node::Map(map) => {
                if let Some(tag) = map.get(TYPE_TAG).and_then(Node::as_str) {
                    if is_record_type(tag) {
                        warn!(tag, "Plain mapping carries a record type tag");
                        return Err(CodecError::ReservedKey {
                            tag: tag.to_string(),
                        });
                    }
                }

                let mut out = Map::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key.clone(), self.to_json(value)?);
                }
                Ok(Value::Object(out))
            }
            Node::Date(d) => self.bare(node, render_date(d)),
            Node::Timestamp(ts) => self.bare(node, render_timestamp(ts)),
            Node::Decimal(d) => self.bare(node, render_decimal(d)),
            Node::Record(record) => {
                debug!(
                    record_type = record.type_name(),
                    symbol = record.symbol(),
                    "Encoding record"
                );
                Ok(Value::Object(record.canonical()))
            }
        }
    }

    fn bare(&self, node: &Node, text: String) -> CodecResult<Value> {
        match self.config.bare_values {
            BareValuePolicy::Plain => Ok(Value::String(text)),
            BareValuePolicy::Reject => Err(CodecError::UnsupportedType {
                type_name: node.type_name(),
                reason: format!("bare {} outside a record is rejected", node.type_name()),
            }),
        }
    }
}

fn is_record_type(tag: &str) -> bool {
    tag == Stock::TYPE_NAME || tag == Trade::TYPE_NAME
}

/// Encode with the default configuration.
pub fn encode(node: &Node) -> CodecResult<String> {
    Encoder::default().encode(node)
}

/// Convert to a JSON value with the default configuration.
pub fn to_json(node: &Node) -> CodecResult<Value> {
    Encoder::default().to_json(node)
}
