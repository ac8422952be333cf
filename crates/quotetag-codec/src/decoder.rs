//! JSON text to value tree.
//!
//! The tree is rebuilt bottom-up: children of a mapping are converted
//! before the mapping itself, so tagged mappings nested anywhere are
//! already records when their parent is examined.
//!
//! A tagged mapping must carry every declared field. A missing field is a
//! `MissingField` error; a field of the wrong JSON type is
//! `MalformedField`. Extra keys are ignored.
//!
//! Decimals are only read from strings. A decimal sent as a JSON number is
//! `MalformedField` here, while the schema path coerces it through its text.

use crate::error::{CodecError, CodecResult};
use crate::value::{Node, NodeMap, TYPE_TAG};
use chrono::{NaiveDate, NaiveDateTime};
use quotetag_core::{parse_date, parse_decimal, parse_timestamp, OrderSide, Record, Stock, Trade};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

/// Parse JSON text and reconstruct tagged records.
///
/// Syntax errors from the JSON parser are returned unchanged as
/// `CodecError::Syntax`.
pub fn decode(text: &str) -> CodecResult<Node> {
    let value: Value = serde_json::from_str(text)?;
    decode_value(value)
}

/// Reconstruct tagged records in an already parsed JSON value.
pub fn decode_value(value: Value) -> CodecResult<Node> {
    match value {
        Value::Null => Ok(Node::Null),
        Value::Bool(b) => Ok(Node::Bool(b)),
        Value::Number(n) => Ok(Node::Number(n)),
        Value::String(s) => Ok(Node::String(s)),
        Value::Array(items) => items
            .into_iter()
            .map(decode_value)
            .collect::<CodecResult<Vec<_>>>()
            .map(Node::List),
        Value::Object(object) => {
            let mut map = NodeMap::with_capacity(object.len());
            for (key, value) in object {
                map.insert(key, decode_value(value)?);
            }
            reconstruct(map)
        }
    }
}

/// Object hook: turn a tagged mapping into a record.
fn reconstruct(map: NodeMap) -> CodecResult<Node> {
    let tag = match map.get(TYPE_TAG) {
        Some(Node::String(tag)) => tag.clone(),
        _ => return Ok(Node::Map(map)),
    };

    let record = match tag.as_str() {
        Stock::TYPE_NAME => Record::Stock(stock_from_fields(&Fields::new(Stock::TYPE_NAME, &map))?),
        Trade::TYPE_NAME => Record::Trade(trade_from_fields(&Fields::new(Trade::TYPE_NAME, &map))?),
        _ => {
            debug!(tag = %tag, "Unrecognized type tag, keeping plain mapping");
            return Ok(Node::Map(map));
        }
    };

    debug!(
        record_type = record.type_name(),
        symbol = record.symbol(),
        "Reconstructed record"
    );
    Ok(Node::Record(record))
}

fn stock_from_fields(fields: &Fields<'_>) -> CodecResult<Stock> {
    Ok(Stock {
        symbol: fields.string("symbol")?,
        date: fields.date("date")?,
        open: fields.decimal("open")?,
        high: fields.decimal("high")?,
        low: fields.decimal("low")?,
        close: fields.decimal("close")?,
        volume: fields.volume("volume")?,
    })
}

fn trade_from_fields(fields: &Fields<'_>) -> CodecResult<Trade> {
    Ok(Trade {
        symbol: fields.string("symbol")?,
        timestamp: fields.timestamp("timestamp")?,
        order_type: fields.order_side("order_type")?,
        price: fields.decimal("price")?,
        volume: fields.volume("volume")?,
        commission: fields.decimal("commission")?,
    })
}

/// Typed field access on a tagged mapping.
struct Fields<'a> {
    record: &'static str,
    map: &'a NodeMap,
}

impl<'a> Fields<'a> {
    fn new(record: &'static str, map: &'a NodeMap) -> Self {
        Self { record, map }
    }

    fn get(&self, field: &'static str) -> CodecResult<&'a Node> {
        self.map.get(field).ok_or(CodecError::MissingField {
            record: self.record,
            field,
        })
    }

    fn text(&self, field: &'static str, expected: &'static str) -> CodecResult<&'a str> {
        let node = self.get(field)?;
        node.as_str().ok_or_else(|| CodecError::MalformedField {
            record: self.record,
            field,
            expected,
            found: node.type_name(),
        })
    }

    fn string(&self, field: &'static str) -> CodecResult<String> {
        self.text(field, "string").map(str::to_string)
    }

    fn date(&self, field: &'static str) -> CodecResult<NaiveDate> {
        let text = self.text(field, "date string")?;
        parse_date(text).map_err(|_| CodecError::MalformedDate {
            record: self.record,
            field,
            value: text.to_string(),
        })
    }

    fn timestamp(&self, field: &'static str) -> CodecResult<NaiveDateTime> {
        let text = self.text(field, "timestamp string")?;
        parse_timestamp(text).map_err(|_| CodecError::MalformedDate {
            record: self.record,
            field,
            value: text.to_string(),
        })
    }

    fn decimal(&self, field: &'static str) -> CodecResult<Decimal> {
        let text = self.text(field, "decimal string")?;
        parse_decimal(text).map_err(|_| CodecError::MalformedDecimal {
            record: self.record,
            field,
            value: text.to_string(),
        })
    }

    fn volume(&self, field: &'static str) -> CodecResult<u64> {
        let node = self.get(field)?;
        node.as_u64().ok_or_else(|| CodecError::MalformedField {
            record: self.record,
            field,
            expected: "non-negative integer",
            found: node.type_name(),
        })
    }

    fn order_side(&self, field: &'static str) -> CodecResult<OrderSide> {
        let text = self.text(field, "buy or sell")?;
        text.parse().map_err(|_| CodecError::MalformedField {
            record: self.record,
            field,
            expected: "buy or sell",
            found: "string",
        })
    }
}
