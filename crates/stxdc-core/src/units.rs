//! # Unit Conversion
//!
//! Lossless conversion between whole-token decimals and base units.
//!
//! ```text
//!   "1.5" XDC  ──to_base_units──►  1_500_000_000_000_000_000 wei
//!      ▲                                       │
//!      └───────────from_base_units─────────────┘
//! ```
//!
//! Both representations are backed by a 256-bit unsigned integer, the width of
//! the on-chain `uint256`, so no value read from a contract loses precision.

use crate::constants::DECIMALS;
use crate::error::ConversionError;
use primitive_types::U256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 10^18, the number of base units in one whole token
pub fn one_token() -> U256 {
    U256::exp10(DECIMALS as usize)
}

/// Quantity in the smallest on-chain unit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BaseUnitAmount(U256);

impl BaseUnitAmount {
    pub fn new(value: U256) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(U256::zero())
    }

    pub fn raw(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<u128> for BaseUnitAmount {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for BaseUnitAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl fmt::Display for BaseUnitAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BaseUnitAmount {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConversionError::InvalidAmount(format!(
                "'{}' is not a base-unit integer",
                s
            )));
        }
        U256::from_dec_str(s)
            .map(Self)
            .map_err(|_| ConversionError::InvalidAmount(format!("'{}' exceeds 256 bits", s)))
    }
}

/// Non-negative whole-token decimal with at most 18 fractional digits.
///
/// Stored as its base-unit value; `Display` yields the canonical form
/// (`"1.5"`, `"0"`, never `"1.50"` or `"0."`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecimalAmount {
    base: U256,
}

impl DecimalAmount {
    pub fn zero() -> Self {
        Self { base: U256::zero() }
    }

    /// Whole tokens, no fractional part
    pub fn from_whole(tokens: u64) -> Self {
        Self {
            base: U256::from(tokens) * one_token(),
        }
    }

    /// Parse decimal text such as `"12"`, `"0.25"`, `".5"` or `"7."`
    pub fn parse(text: &str) -> Result<Self, ConversionError> {
        let text = text.trim();
        let invalid = |why: &str| ConversionError::InvalidAmount(format!("'{}' {}", text, why));

        if text.starts_with('-') {
            return Err(invalid("is negative"));
        }

        let (integer, fraction) = match text.split_once('.') {
            Some((i, f)) => (i, f),
            None => (text, ""),
        };

        if integer.is_empty() && fraction.is_empty() {
            return Err(invalid("is not a decimal number"));
        }
        if !integer.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("is not a decimal number"));
        }
        if fraction.len() > DECIMALS as usize {
            return Err(invalid("has more than 18 fractional digits"));
        }

        let whole = if integer.is_empty() {
            U256::zero()
        } else {
            U256::from_dec_str(integer).map_err(|_| invalid("is too large"))?
        };
        let fractional = if fraction.is_empty() {
            U256::zero()
        } else {
            let padded = format!("{:0<width$}", fraction, width = DECIMALS as usize);
            U256::from_dec_str(&padded).map_err(|_| invalid("is not a decimal number"))?
        };

        let base = whole
            .checked_mul(one_token())
            .and_then(|scaled| scaled.checked_add(fractional))
            .ok_or_else(|| invalid("is too large"))?;

        Ok(Self { base })
    }

    /// Convert a native float, rejecting NaN, infinities and negatives
    pub fn from_f64(value: f64) -> Result<Self, ConversionError> {
        if !value.is_finite() {
            return Err(ConversionError::InvalidAmount(format!(
                "{} is not a finite number",
                value
            )));
        }
        if value == 0.0 {
            return Ok(Self::zero());
        }
        if value < 0.0 {
            return Err(ConversionError::InvalidAmount(format!("{} is negative", value)));
        }
        // f64 Display never uses exponent notation
        Self::parse(&value.to_string())
    }

    pub fn from_base_units(amount: BaseUnitAmount) -> Self {
        Self { base: amount.raw() }
    }

    pub fn base_units(&self) -> BaseUnitAmount {
        BaseUnitAmount(self.base)
    }

    pub fn is_zero(&self) -> bool {
        self.base.is_zero()
    }

    /// Nearest `f64`; only for bounded comparisons and display
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.base.checked_sub(other.base).map(|base| Self { base })
    }

    pub fn saturating_sub(&self, other: &Self) -> Self {
        Self {
            base: self.base.saturating_sub(other.base),
        }
    }

    /// Largest multiple of `lot` not exceeding `self`; zero when `lot` is zero
    pub fn floor_to_multiple(&self, lot: &Self) -> Self {
        if lot.is_zero() {
            return Self::zero();
        }
        Self {
            base: self.base / lot.base * lot.base,
        }
    }
}

impl fmt::Display for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let one = one_token();
        let whole = self.base / one;
        let fraction = self.base % one;

        if fraction.is_zero() {
            return write!(f, "{}", whole);
        }

        let digits = format!("{:0>width$}", fraction.to_string(), width = DECIMALS as usize);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}

impl FromStr for DecimalAmount {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<f64> for DecimalAmount {
    type Error = ConversionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

macro_rules! string_serde {
    ($ty:ty, $what:literal $(, float = $from_f64:path)?) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct Visitor;

                impl<'de> de::Visitor<'de> for Visitor {
                    type Value = $ty;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str($what)
                    }

                    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                        v.parse().map_err(E::custom)
                    }

                    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                        self.visit_str(&v.to_string())
                    }

                    $(
                        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                            $from_f64(v).map_err(E::custom)
                        }
                    )?
                }

                deserializer.deserialize_any(Visitor)
            }
        }
    };
}

string_serde!(BaseUnitAmount, "a base-unit integer as a decimal string");
string_serde!(DecimalAmount, "a non-negative decimal amount", float = DecimalAmount::from_f64);

/// Scale a decimal amount up to base units (x 10^18).
///
/// The amount is already known to be finite and non-negative; text and float
/// inputs are checked by [`parse_to_base_units`] and [`f64_to_base_units`].
pub fn to_base_units(amount: &DecimalAmount) -> BaseUnitAmount {
    let base = amount.base_units();
    tracing::trace!(%amount, %base, "to_base_units");
    base
}

/// Parse decimal text straight into base units
pub fn parse_to_base_units(text: &str) -> Result<BaseUnitAmount, ConversionError> {
    DecimalAmount::parse(text).map(|amount| to_base_units(&amount))
}

/// Convert a float amount into base units
pub fn f64_to_base_units(value: f64) -> Result<BaseUnitAmount, ConversionError> {
    DecimalAmount::from_f64(value).map(|amount| to_base_units(&amount))
}

/// Scale base units down to a canonical decimal; zero yields `"0"`
pub fn from_base_units(amount: &BaseUnitAmount) -> DecimalAmount {
    DecimalAmount::from_base_units(*amount)
}
