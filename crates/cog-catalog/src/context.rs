//! Coordinate and time values supplied when resolving a key.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use std::fmt;

use crate::token::TokenName;

/// A value bound to a template token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenValue {
    Int(i64),
    Float(f64),
    Time(DateTime<Utc>),
}

impl TokenValue {
    /// Short description used in type mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TokenValue::Int(_) => "an integer",
            TokenValue::Float(_) => "a float",
            TokenValue::Time(_) => "a timestamp",
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Int(v) => write!(f, "{}", v),
            TokenValue::Float(v) => write!(f, "{}", v),
            TokenValue::Time(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

impl From<i64> for TokenValue {
    fn from(v: i64) -> Self {
        TokenValue::Int(v)
    }
}

impl From<i32> for TokenValue {
    fn from(v: i32) -> Self {
        TokenValue::Int(v as i64)
    }
}

impl From<f64> for TokenValue {
    fn from(v: f64) -> Self {
        TokenValue::Float(v)
    }
}

impl From<DateTime<Utc>> for TokenValue {
    fn from(t: DateTime<Utc>) -> Self {
        TokenValue::Time(t)
    }
}

impl From<NaiveDate> for TokenValue {
    /// Midnight UTC on the given day.
    fn from(d: NaiveDate) -> Self {
        TokenValue::Time(Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)))
    }
}

/// Values for whichever tokens a template needs.
///
/// One slot per token name; setting a token twice keeps the last value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoordinateContext {
    values: [Option<TokenValue>; 7],
}

impl CoordinateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Projected tile grid coordinates.
    pub fn tile(x: i64, y: i64) -> Self {
        Self::new().with(TokenName::X, x).with(TokenName::Y, y)
    }

    /// Geographic grid coordinates.
    pub fn geo(lon: impl Into<TokenValue>, lat: impl Into<TokenValue>) -> Self {
        Self::new().with(TokenName::Lon, lon).with(TokenName::Lat, lat)
    }

    pub fn with(mut self, token: TokenName, value: impl Into<TokenValue>) -> Self {
        self.set(token, value);
        self
    }

    pub fn with_time(self, time: impl Into<TokenValue>) -> Self {
        self.with(TokenName::Time, time)
    }

    /// Set both ends of a summary period.
    pub fn with_period(self, start: impl Into<TokenValue>, end: impl Into<TokenValue>) -> Self {
        self.with(TokenName::StartTime, start)
            .with(TokenName::EndTime, end)
    }

    pub fn set(&mut self, token: TokenName, value: impl Into<TokenValue>) {
        self.values[token.slot()] = Some(value.into());
    }

    pub fn get(&self, token: TokenName) -> Option<TokenValue> {
        self.values[token.slot()]
    }

    /// Tokens that currently hold a value.
    pub fn tokens(&self) -> impl Iterator<Item = TokenName> + '_ {
        TokenName::ALL
            .into_iter()
            .filter(|t| self.values[t.slot()].is_some())
    }
}
