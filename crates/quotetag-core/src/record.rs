//! Stock quote and trade records.
//!
//! Records are plain immutable value holders. Their wire form lives in
//! `quotetag-codec`; nothing here knows about JSON.

use crate::order::OrderSide;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::fmt;

/// Daily stock quote (OHLCV).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stock {
    /// Ticker symbol (e.g. "AAPL").
    pub symbol: String,
    /// Trading day.
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    /// Shares traded.
    pub volume: u64,
}

impl Stock {
    /// Type name carried in the wire tag.
    pub const TYPE_NAME: &'static str = "Stock";

    pub fn new(
        symbol: impl Into<String>,
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Intraday range: high - low. `None` on overflow.
    #[inline]
    pub fn range(&self) -> Option<Decimal> {
        self.high.checked_sub(self.low)
    }

    /// Session change: close - open. `None` on overflow.
    #[inline]
    pub fn change(&self) -> Option<Decimal> {
        self.close.checked_sub(self.open)
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stock(symbol={}, date={}, open={}, high={}, low={}, close={}, volume={})",
            self.symbol, self.date, self.open, self.high, self.low, self.close, self.volume
        )
    }
}

/// Executed trade.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trade {
    /// Ticker symbol.
    pub symbol: String,
    /// Execution time (no timezone).
    pub timestamp: NaiveDateTime,
    pub order_type: OrderSide,
    /// Execution price per share.
    pub price: Decimal,
    /// Shares traded.
    pub volume: u64,
    /// Commission charged for the whole trade.
    pub commission: Decimal,
}

impl Trade {
    /// Type name carried in the wire tag.
    pub const TYPE_NAME: &'static str = "Trade";

    pub fn new(
        symbol: impl Into<String>,
        timestamp: NaiveDateTime,
        order_type: OrderSide,
        price: Decimal,
        volume: u64,
        commission: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            timestamp,
            order_type,
            price,
            volume,
            commission,
        }
    }

    /// Notional value: price * volume. `None` on overflow.
    #[inline]
    pub fn notional(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.volume))
    }

    /// Cash impact including commission.
    ///
    /// Buys pay notional + commission, sells receive notional - commission.
    /// `None` when the result leaves the decimal range.
    pub fn total_cost(&self) -> Option<Decimal> {
        let notional = self.notional()?;
        match self.order_type {
            OrderSide::Buy => notional.checked_add(self.commission),
            OrderSide::Sell => notional.checked_sub(self.commission),
        }
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trade(symbol={}, timestamp={}, order_type={}, price={}, volume={}, commission={})",
            self.symbol, self.timestamp, self.order_type, self.price, self.volume, self.commission
        )
    }
}

/// Closed set of record variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Record {
    Stock(Stock),
    Trade(Trade),
}

impl Record {
    /// Type name used in the wire tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Stock(_) => Stock::TYPE_NAME,
            Self::Trade(_) => Trade::TYPE_NAME,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Self::Stock(s) => &s.symbol,
            Self::Trade(t) => &t.symbol,
        }
    }

    pub fn as_stock(&self) -> Option<&Stock> {
        match self {
            Self::Stock(s) => Some(s),
            Self::Trade(_) => None,
        }
    }

    pub fn as_trade(&self) -> Option<&Trade> {
        match self {
            Self::Trade(t) => Some(t),
            Self::Stock(_) => None,
        }
    }
}

impl From<Stock> for Record {
    fn from(stock: Stock) -> Self {
        Self::Stock(stock)
    }
}

impl From<Trade> for Record {
    fn from(trade: Trade) -> Self {
        Self::Trade(trade)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stock(s) => fmt::Display::fmt(s, f),
            Self::Trade(t) => fmt::Display::fmt(t, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_stock() -> Stock {
        Stock::new(
            "AAPL",
            NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
            dec!(125.50),
            dec!(128.00),
            dec!(124.75),
            dec!(127.30),
            1_000_000,
        )
    }

    fn sample_trade(side: OrderSide) -> Trade {
        Trade::new(
            "TSLA",
            NaiveDate::from_ymd_opt(2023, 1, 5)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
            side,
            dec!(250.10),
            100,
            dec!(1.50),
        )
    }

    #[test]
    fn test_stock_range_and_change() {
        let stock = sample_stock();
        assert_eq!(stock.range(), Some(dec!(3.25)));
        assert_eq!(stock.change(), Some(dec!(1.80)));
    }

    #[test]
    fn test_trade_total_cost() {
        assert_eq!(sample_trade(OrderSide::Buy).notional(), Some(dec!(25010.00)));
        assert_eq!(sample_trade(OrderSide::Buy).total_cost(), Some(dec!(25011.50)));
        assert_eq!(sample_trade(OrderSide::Sell).total_cost(), Some(dec!(25008.50)));
    }

    #[test]
    fn test_stock_helpers_overflow() {
        let mut stock = sample_stock();
        stock.high = Decimal::MAX;
        stock.low = Decimal::MIN;
        assert_eq!(stock.range(), None);

        stock.close = Decimal::MIN;
        stock.open = Decimal::MAX;
        assert_eq!(stock.change(), None);
    }

    #[test]
    fn test_trade_helpers_overflow() {
        let mut trade = sample_trade(OrderSide::Buy);
        trade.price = Decimal::MAX;
        trade.volume = 2;
        assert_eq!(trade.notional(), None);
        assert_eq!(trade.total_cost(), None);

        trade.volume = 1;
        trade.commission = dec!(1);
        assert_eq!(trade.notional(), Some(Decimal::MAX));
        assert_eq!(trade.total_cost(), None);

        trade.order_type = OrderSide::Sell;
        assert_eq!(trade.total_cost(), Some(Decimal::MAX - dec!(1)));
    }

    #[test]
    fn test_record_type_name() {
        let stock: Record = sample_stock().into();
        let trade: Record = sample_trade(OrderSide::Buy).into();
        assert_eq!(stock.type_name(), "Stock");
        assert_eq!(trade.type_name(), "Trade");
        assert!(stock.as_trade().is_none());
        assert_eq!(trade.symbol(), "TSLA");
    }

    #[test]
    fn test_display() {
        let text = sample_stock().to_string();
        assert!(text.starts_with("Stock(symbol=AAPL, date=2023-01-05, open=125.50"));
    }
}
