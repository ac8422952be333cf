//! Record to canonical mapping conversion.
//!
//! The canonical mapping starts with the `__type__` tag followed by every
//! declared field in declaration order. Dates and timestamps become
//! ISO-8601 strings, decimals their exact string form.

use crate::value::TYPE_TAG;
use quotetag_core::{render_date, render_decimal, render_timestamp, Record, Stock, Trade};
use serde_json::{Map, Value};

/// Conversion of a record into its tagged JSON mapping.
pub trait Canonical {
    fn canonical(&self) -> Map<String, Value>;
}

impl Canonical for Stock {
    fn canonical(&self) -> Map<String, Value> {
        let mut map = Map::with_capacity(8);
        map.insert(TYPE_TAG.to_string(), Stock::TYPE_NAME.into());
        map.insert("symbol".to_string(), self.symbol.clone().into());
        map.insert("date".to_string(), render_date(&self.date).into());
        map.insert("open".to_string(), render_decimal(&self.open).into());
        map.insert("high".to_string(), render_decimal(&self.high).into());
        map.insert("low".to_string(), render_decimal(&self.low).into());
        map.insert("close".to_string(), render_decimal(&self.close).into());
        map.insert("volume".to_string(), self.volume.into());
        map
    }
}

impl Canonical for Trade {
    fn canonical(&self) -> Map<String, Value> {
        let mut map = Map::with_capacity(7);
        map.insert(TYPE_TAG.to_string(), Trade::TYPE_NAME.into());
        map.insert("symbol".to_string(), self.symbol.clone().into());
        map.insert(
            "timestamp".to_string(),
            render_timestamp(&self.timestamp).into(),
        );
        map.insert("order_type".to_string(), self.order_type.as_str().into());
        map.insert("price".to_string(), render_decimal(&self.price).into());
        map.insert("volume".to_string(), self.volume.into());
        map.insert(
            "commission".to_string(),
            render_decimal(&self.commission).into(),
        );
        map
    }
}

impl Canonical for Record {
    fn canonical(&self) -> Map<String, Value> {
        match self {
            Self::Stock(stock) => stock.canonical(),
            Self::Trade(trade) => trade.canonical(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use quotetag_core::OrderSide;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_stock_canonical() {
        let stock = Stock::new(
            "AAPL",
            NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
            dec!(125.50),
            dec!(128.00),
            dec!(124.75),
            dec!(127.30),
            1_000_000,
        );

        let map = stock.canonical();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["__type__", "symbol", "date", "open", "high", "low", "close", "volume"]
        );
        assert_eq!(
            Value::Object(map),
            json!({
                "__type__": "Stock",
                "symbol": "AAPL",
                "date": "2023-01-05",
                "open": "125.50",
                "high": "128.00",
                "low": "124.75",
                "close": "127.30",
                "volume": 1000000
            })
        );
    }

    #[test]
    fn test_trade_canonical() {
        let trade = Trade::new(
            "MSFT",
            NaiveDate::from_ymd_opt(2023, 3, 14)
                .unwrap()
                .and_hms_micro_opt(9, 30, 15, 250_000)
                .unwrap(),
            OrderSide::Sell,
            dec!(260.05),
            50,
            dec!(0.99),
        );

        let record = Record::from(trade);
        assert_eq!(
            Value::Object(record.canonical()),
            json!({
                "__type__": "Trade",
                "symbol": "MSFT",
                "timestamp": "2023-03-14T09:30:15.250000",
                "order_type": "sell",
                "price": "260.05",
                "volume": 50,
                "commission": "0.99"
            })
        );
    }
}
