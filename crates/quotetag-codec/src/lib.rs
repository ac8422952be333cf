//! Tagged JSON interchange for stock quotes and trades.
//!
//! Records are written as JSON objects carrying a reserved `__type__` key so
//! a generic decoder can rebuild the concrete record, with dates, timestamps
//! and exact decimals carried as strings:
//! - `encoder`: value tree (records nested anywhere) to JSON text
//! - `decoder`: JSON text to value tree, reconstructing tagged records bottom-up
//! - `schema`: declarative per-record field tables with aggregated validation

pub mod canonical;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod schema;
pub mod value;

pub use canonical::Canonical;
pub use config::{BareValuePolicy, CodecConfig};
pub use decoder::{decode, decode_value};
pub use encoder::{encode, to_json, Encoder};
pub use error::{CodecError, CodecResult, ValidationError};
pub use schema::{
    deserialize_with_schema, serialize_with_schema, RecordSchema, StockSchema, TradeSchema,
};
pub use value::{Node, NodeMap, TYPE_TAG};

pub use quotetag_core::{OrderSide, Record, Stock, Trade};
