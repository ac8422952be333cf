//! Declarative record schemas.
//!
//! Each record type is described by a table of `FieldSpec`s: field name,
//! semantic kind, and an accessor used when dumping. A single generic
//! routine validates a JSON object against the table, collecting every
//! failure before reporting, and then hands the typed values to the
//! schema's `build` hook.
//!
//! Unlike the tag-driven decoder, the caller picks the schema when loading.

use crate::error::{CodecError, CodecResult, ValidationError};
use crate::value::{Node, TYPE_TAG};
use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use quotetag_core::{
    parse_date, parse_decimal, parse_timestamp, render_date, render_decimal, render_timestamp,
    OrderSide, Record, Stock, Trade,
};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::{debug, warn};

const MISSING: &str = "Missing data for required field.";
const NULL: &str = "Field may not be null.";
const UNKNOWN: &str = "Unknown field.";

/// String rendering rule for decimal fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalFormat {
    /// Exact text, scale preserved.
    Exact,
    /// Quantized to a fixed number of places (banker's rounding).
    Places(u32),
}

impl DecimalFormat {
    fn apply(&self, value: Decimal) -> Decimal {
        match *self {
            Self::Exact => value,
            Self::Places(places) => {
                let mut rounded = value.round_dp(places);
                rounded.rescale(places);
                rounded
            }
        }
    }
}

/// Semantic type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Date,
    DateTime,
    Decimal(DecimalFormat),
    Integer,
    /// String restricted to a fixed set of values.
    Choice(&'static [&'static str]),
}

/// Typed field value produced by validation and consumed by dumping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Decimal(Decimal),
    Integer(u64),
}

impl FieldKind {
    /// Convert a raw JSON value into a typed value, or a validation message.
    fn load(&self, raw: &Value) -> Result<FieldValue, String> {
        match self {
            Self::Str => raw
                .as_str()
                .map(|s| FieldValue::Str(s.to_string()))
                .ok_or_else(|| "Not a valid string.".to_string()),
            Self::Date => raw
                .as_str()
                .and_then(|s| parse_date(s).ok())
                .map(FieldValue::Date)
                .ok_or_else(|| "Not a valid date.".to_string()),
            Self::DateTime => raw
                .as_str()
                .and_then(|s| parse_timestamp(s).ok())
                .map(FieldValue::DateTime)
                .ok_or_else(|| "Not a valid datetime.".to_string()),
            Self::Decimal(format) => {
                let parsed = match raw {
                    Value::String(s) => parse_decimal(s).ok(),
                    Value::Number(n) => parse_decimal(&n.to_string()).ok(),
                    _ => None,
                };
                parsed
                    .map(|d| FieldValue::Decimal(format.apply(d)))
                    .ok_or_else(|| "Not a valid number.".to_string())
            }
            Self::Integer => raw
                .as_u64()
                .map(FieldValue::Integer)
                .ok_or_else(|| "Not a valid integer.".to_string()),
            Self::Choice(choices) => match raw.as_str() {
                Some(s) if choices.contains(&s) => Ok(FieldValue::Str(s.to_string())),
                Some(_) => Err(format!("Must be one of: {}.", choices.join(", "))),
                None => Err("Not a valid string.".to_string()),
            },
        }
    }

    /// Render a typed value as JSON. Decimals are always strings.
    fn dump(&self, value: FieldValue) -> Value {
        match (self, value) {
            (Self::Decimal(format), FieldValue::Decimal(d)) => {
                Value::String(render_decimal(&format.apply(d)))
            }
            (_, FieldValue::Str(s)) => Value::String(s),
            (_, FieldValue::Date(d)) => Value::String(render_date(&d)),
            (_, FieldValue::DateTime(ts)) => Value::String(render_timestamp(&ts)),
            (_, FieldValue::Decimal(d)) => Value::String(render_decimal(&d)),
            (_, FieldValue::Integer(n)) => Value::from(n),
        }
    }
}

/// One row of a schema table.
pub struct FieldSpec<R> {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Read the field from a record.
    pub dump: fn(&R) -> FieldValue,
}

/// Validated values keyed by field name, handed to `RecordSchema::build`.
#[derive(Debug)]
pub struct FieldValues {
    schema: &'static str,
    values: IndexMap<&'static str, FieldValue>,
}

impl FieldValues {
    fn take(&mut self, field: &'static str) -> Result<FieldValue, ValidationError> {
        self.values.shift_remove(field).ok_or_else(|| {
            let mut err = ValidationError::new(self.schema);
            err.add(field, MISSING);
            err
        })
    }

    fn mismatch(&self, field: &'static str) -> ValidationError {
        let mut err = ValidationError::new(self.schema);
        err.add(field, "Validated value has unexpected type.");
        err
    }

    pub fn take_str(&mut self, field: &'static str) -> Result<String, ValidationError> {
        match self.take(field)? {
            FieldValue::Str(s) => Ok(s),
            _ => Err(self.mismatch(field)),
        }
    }

    pub fn take_date(&mut self, field: &'static str) -> Result<NaiveDate, ValidationError> {
        match self.take(field)? {
            FieldValue::Date(d) => Ok(d),
            _ => Err(self.mismatch(field)),
        }
    }

    pub fn take_datetime(&mut self, field: &'static str) -> Result<NaiveDateTime, ValidationError> {
        match self.take(field)? {
            FieldValue::DateTime(ts) => Ok(ts),
            _ => Err(self.mismatch(field)),
        }
    }

    pub fn take_decimal(&mut self, field: &'static str) -> Result<Decimal, ValidationError> {
        match self.take(field)? {
            FieldValue::Decimal(d) => Ok(d),
            _ => Err(self.mismatch(field)),
        }
    }

    pub fn take_integer(&mut self, field: &'static str) -> Result<u64, ValidationError> {
        match self.take(field)? {
            FieldValue::Integer(n) => Ok(n),
            _ => Err(self.mismatch(field)),
        }
    }
}

/// Field table plus post-load construction hook for one record type.
pub trait RecordSchema {
    type Record: 'static;

    /// Type name, also expected in the `__type__` tag when present.
    const NAME: &'static str;

    fn fields() -> &'static [FieldSpec<Self::Record>];

    /// Construct the record from validated values.
    fn build(values: FieldValues) -> Result<Self::Record, ValidationError>;
}

/// Schema for `Stock`.
pub struct StockSchema;

static STOCK_FIELDS: &[FieldSpec<Stock>] = &[
    FieldSpec {
        name: "symbol",
        kind: FieldKind::Str,
        dump: |s| FieldValue::Str(s.symbol.clone()),
    },
    FieldSpec {
        name: "date",
        kind: FieldKind::Date,
        dump: |s| FieldValue::Date(s.date),
    },
    FieldSpec {
        name: "open",
        kind: FieldKind::Decimal(DecimalFormat::Exact),
        dump: |s| FieldValue::Decimal(s.open),
    },
    FieldSpec {
        name: "high",
        kind: FieldKind::Decimal(DecimalFormat::Exact),
        dump: |s| FieldValue::Decimal(s.high),
    },
    FieldSpec {
        name: "low",
        kind: FieldKind::Decimal(DecimalFormat::Exact),
        dump: |s| FieldValue::Decimal(s.low),
    },
    FieldSpec {
        name: "close",
        kind: FieldKind::Decimal(DecimalFormat::Exact),
        dump: |s| FieldValue::Decimal(s.close),
    },
    FieldSpec {
        name: "volume",
        kind: FieldKind::Integer,
        dump: |s| FieldValue::Integer(s.volume),
    },
];

impl RecordSchema for StockSchema {
    type Record = Stock;
    const NAME: &'static str = Stock::TYPE_NAME;

    fn fields() -> &'static [FieldSpec<Stock>] {
        STOCK_FIELDS
    }

    fn build(mut values: FieldValues) -> Result<Stock, ValidationError> {
        Ok(Stock {
            symbol: values.take_str("symbol")?,
            date: values.take_date("date")?,
            open: values.take_decimal("open")?,
            high: values.take_decimal("high")?,
            low: values.take_decimal("low")?,
            close: values.take_decimal("close")?,
            volume: values.take_integer("volume")?,
        })
    }
}

/// Schema for `Trade`.
pub struct TradeSchema;

static TRADE_FIELDS: &[FieldSpec<Trade>] = &[
    FieldSpec {
        name: "symbol",
        kind: FieldKind::Str,
        dump: |t| FieldValue::Str(t.symbol.clone()),
    },
    FieldSpec {
        name: "timestamp",
        kind: FieldKind::DateTime,
        dump: |t| FieldValue::DateTime(t.timestamp),
    },
    FieldSpec {
        name: "order_type",
        kind: FieldKind::Choice(&["buy", "sell"]),
        dump: |t| FieldValue::Str(t.order_type.to_string()),
    },
    FieldSpec {
        name: "price",
        kind: FieldKind::Decimal(DecimalFormat::Exact),
        dump: |t| FieldValue::Decimal(t.price),
    },
    FieldSpec {
        name: "volume",
        kind: FieldKind::Integer,
        dump: |t| FieldValue::Integer(t.volume),
    },
    FieldSpec {
        name: "commission",
        kind: FieldKind::Decimal(DecimalFormat::Exact),
        dump: |t| FieldValue::Decimal(t.commission),
    },
];

impl RecordSchema for TradeSchema {
    type Record = Trade;
    const NAME: &'static str = Trade::TYPE_NAME;

    fn fields() -> &'static [FieldSpec<Trade>] {
        TRADE_FIELDS
    }

    fn build(mut values: FieldValues) -> Result<Trade, ValidationError> {
        let order_type: OrderSide = values.take_str("order_type")?.parse().map_err(|_| {
            let mut err = ValidationError::new(Self::NAME);
            err.add("order_type", "Must be one of: buy, sell.");
            err
        })?;

        Ok(Trade {
            symbol: values.take_str("symbol")?,
            timestamp: values.take_datetime("timestamp")?,
            order_type,
            price: values.take_decimal("price")?,
            volume: values.take_integer("volume")?,
            commission: values.take_decimal("commission")?,
        })
    }
}

/// Validate a JSON value against a schema, reporting every failure at once.
pub fn validate<S: RecordSchema>(value: &Value) -> Result<FieldValues, ValidationError> {
    let mut errors = ValidationError::new(S::NAME);

    let Some(object) = value.as_object() else {
        errors.add("_schema", "Invalid input type.");
        return Err(errors);
    };

    let specs = S::fields();
    let mut values = IndexMap::with_capacity(specs.len());

    for spec in specs {
        match object.get(spec.name) {
            None => errors.add(spec.name, MISSING),
            Some(Value::Null) => errors.add(spec.name, NULL),
            Some(raw) => match spec.kind.load(raw) {
                Ok(value) => {
                    values.insert(spec.name, value);
                }
                Err(message) => errors.add(spec.name, message),
            },
        }
    }

    for (key, raw) in object {
        if key == TYPE_TAG {
            if raw.as_str() != Some(S::NAME) {
                errors.add(TYPE_TAG, format!("Expected type tag {}.", S::NAME));
            }
        } else if !specs.iter().any(|spec| spec.name == key) {
            errors.add(key.as_str(), UNKNOWN);
        }
    }

    if errors.is_empty() {
        Ok(FieldValues {
            schema: S::NAME,
            values,
        })
    } else {
        warn!(
            schema = S::NAME,
            fields = ?errors.fields().collect::<Vec<_>>(),
            "Schema validation failed"
        );
        Err(errors)
    }
}

/// Validate and construct a record from a parsed JSON value.
pub fn load_value<S: RecordSchema>(value: &Value) -> CodecResult<S::Record> {
    let values = validate::<S>(value)?;
    let record = S::build(values)?;
    debug!(schema = S::NAME, "Loaded record via schema");
    Ok(record)
}

/// Parse JSON text and construct a record with the given schema.
pub fn load<S: RecordSchema>(text: &str) -> CodecResult<S::Record> {
    let value: Value = serde_json::from_str(text)?;
    load_value::<S>(&value)
}

/// Render a record as a tagged JSON object using its schema table.
pub fn dump_value<S: RecordSchema>(record: &S::Record) -> Value {
    let specs = S::fields();
    let mut map = Map::with_capacity(specs.len() + 1);
    map.insert(TYPE_TAG.to_string(), Value::from(S::NAME));
    for spec in specs {
        map.insert(spec.name.to_string(), spec.kind.dump((spec.dump)(record)));
    }
    Value::Object(map)
}

/// Render a record as JSON text using its schema table.
pub fn dump<S: RecordSchema>(record: &S::Record) -> CodecResult<String> {
    serde_json::to_string(&dump_value::<S>(record)).map_err(CodecError::Serialize)
}

/// Serialize a node with the schema matching its runtime record type.
///
/// Anything other than a `Stock` or `Trade` is `UnsupportedType`.
pub fn serialize_with_schema(node: &Node) -> CodecResult<String> {
    match node {
        Node::Record(Record::Stock(stock)) => dump::<StockSchema>(stock),
        Node::Record(Record::Trade(trade)) => dump::<TradeSchema>(trade),
        other => Err(CodecError::UnsupportedType {
            type_name: other.type_name(),
            reason: "schema serialization requires a Stock or Trade".to_string(),
        }),
    }
}

/// Deserialize JSON text with an explicitly chosen schema.
pub fn deserialize_with_schema<S: RecordSchema>(text: &str) -> CodecResult<S::Record> {
    load::<S>(text)
}
