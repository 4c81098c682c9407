use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize, Serializer};

/// A non-negative money value held as an exact decimal.
///
/// Deserialization never fails: numbers and numeric strings are accepted,
/// everything else (null, booleans, garbage text, NaN, infinities, negative
/// values) becomes zero. Inputs beyond the decimal range clamp to [`Amount::MAX`].
/// Sums and products saturate at [`Amount::MAX`] instead of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);
    pub const MAX: Amount = Amount(Decimal::MAX);

    /// Lenient conversion from a float; see [`Amount::from_decimal`].
    pub fn new(value: f64) -> Self {
        decimal_from_f64(value).map(Amount::from_decimal).unwrap_or_default()
    }

    /// Anything not strictly positive becomes zero.
    pub fn from_decimal(value: Decimal) -> Self {
        if value > Decimal::ZERO {
            Amount(value.normalize())
        } else {
            Amount::ZERO
        }
    }

    pub fn decimal(self) -> Decimal {
        self.0
    }

    /// Nearest float, for ratios and JSON output.
    pub fn value(self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::new(value)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::from_decimal(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.normalize(), f)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount::from_decimal(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}

impl Mul<Quantity> for Amount {
    type Output = Amount;

    fn mul(self, rhs: Quantity) -> Amount {
        Amount::from_decimal(self.0.saturating_mul(Decimal::from(rhs.0)))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawNumber::deserialize(deserializer)?;
        Ok(raw.into_decimal().map(Amount::from_decimal).unwrap_or_default())
    }
}

/// A whole, non-negative item count. Coerces the same way as [`Amount`];
/// fractional or out-of-range counts become zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u32);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub fn new(value: u32) -> Self {
        Quantity(value)
    }

    fn from_f64(value: f64) -> Self {
        if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
            Quantity(value as u32)
        } else {
            Quantity::ZERO
        }
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Quantity(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawNumber::deserialize(deserializer)?;
        let count = match raw {
            RawNumber::Number(n) => Some(n),
            RawNumber::Text(text) => text.trim().parse().ok(),
            RawNumber::Other(_) => None,
        };
        Ok(count.map(Quantity::from_f64).unwrap_or_default())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl RawNumber {
    fn into_decimal(self) -> Option<Decimal> {
        match self {
            RawNumber::Number(n) => decimal_from_f64(n),
            RawNumber::Text(text) => {
                let text = text.trim();
                parse_decimal(text).or_else(|| text.parse().ok().and_then(decimal_from_f64))
            }
            RawNumber::Other(_) => None,
        }
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

// Goes through the shortest decimal rendering so `0.1` stays exactly `0.1`.
fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    parse_decimal(&value.to_string()).or_else(|| {
        if value.abs() >= 1.0 {
            Some(if value > 0.0 { Decimal::MAX } else { Decimal::MIN })
        } else {
            Decimal::from_f64(value)
        }
    })
}
