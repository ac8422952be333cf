//! In-memory value tree shared by the encoder and decoder.
//!
//! `Node` extends the JSON data model with the leaves JSON cannot express
//! natively (dates, timestamps, exact decimals) and with whole records.
//! Maps keep insertion order.

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use quotetag_core::{Record, Stock, Trade};
use rust_decimal::Decimal;
use serde_json::Number;

/// Reserved mapping key carrying the record type name.
pub const TYPE_TAG: &str = "__type__";

/// Ordered string-keyed mapping of nodes.
pub type NodeMap = IndexMap<String, Node>;

/// Value tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    /// JSON number (integer or finite float).
    Number(Number),
    /// Raw float supplied by application code. Non-finite values cannot be encoded.
    Float(f64),
    String(String),
    List(Vec<Node>),
    Map(NodeMap),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Decimal(Decimal),
    Record(Record),
}

impl Node {
    /// Build a map node from key/value pairs, keeping their order.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Node>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a list node.
    pub fn list<V: Into<Node>>(items: impl IntoIterator<Item = V>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Date(_) => "date",
            Self::Timestamp(_) => "timestamp",
            Self::Decimal(_) => "decimal",
            Self::Record(_) => "record",
        }
    }

    /// Look up a key on a map node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Map(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&NodeMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for Node {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Node {
    fn from(v: i32) -> Self {
        Self::Number(v.into())
    }
}

impl From<i64> for Node {
    fn from(v: i64) -> Self {
        Self::Number(v.into())
    }
}

impl From<u64> for Node {
    fn from(v: u64) -> Self {
        Self::Number(v.into())
    }
}

impl From<f64> for Node {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Node {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Node {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<NaiveDate> for Node {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveDateTime> for Node {
    fn from(v: NaiveDateTime) -> Self {
        Self::Timestamp(v)
    }
}

impl From<Decimal> for Node {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<Record> for Node {
    fn from(v: Record) -> Self {
        Self::Record(v)
    }
}

impl From<Stock> for Node {
    fn from(v: Stock) -> Self {
        Self::Record(Record::Stock(v))
    }
}

impl From<Trade> for Node {
    fn from(v: Trade) -> Self {
        Self::Record(Record::Trade(v))
    }
}

impl From<Vec<Node>> for Node {
    fn from(v: Vec<Node>) -> Self {
        Self::List(v)
    }
}

impl From<NodeMap> for Node {
    fn from(v: NodeMap) -> Self {
        Self::Map(v)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
