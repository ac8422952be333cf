//! Core domain types for quotetag.
//!
//! This crate provides the records exchanged through the tagged JSON format:
//! - `Stock`: daily OHLCV quote
//! - `Trade`: executed trade with commission
//! - `Record`: closed union of the two
//! - Exact decimal and ISO-8601 text helpers shared by every codec path

pub mod decimal;
pub mod error;
pub mod order;
pub mod record;
pub mod time;

pub use decimal::{parse_decimal, render_decimal};
pub use error::{CoreError, CoreResult};
pub use order::OrderSide;
pub use record::{Record, Stock, Trade};
pub use time::{parse_date, parse_timestamp, render_date, render_timestamp};
