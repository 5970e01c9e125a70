//! # Fixed-Point Percentages
//!
//! Protocol fee parameters are stored on-chain as integers scaled by
//! `10^precision` (default 2, so `12.34%` is stored as `1234`).
//!
//! | Percent | Precision | Stored |
//! |---------|-----------|--------|
//! | 12.34   | 2         | 1234   |
//! | 100     | 2         | 10000  |
//! | 0.5     | 3         | 500    |

use crate::error::ConversionError;
use serde::Serialize;
use std::fmt;

/// Largest precision whose full range `0..=100 x 10^p` fits the 53-bit
/// mantissa of an `f64`, so decoding and re-encoding is lossless
pub const MAX_PERCENT_PRECISION: u32 = 13;

fn float_scale(precision: u32) -> Result<f64, ConversionError> {
    if precision > MAX_PERCENT_PRECISION {
        return Err(ConversionError::InvalidInput(format!(
            "precision {} exceeds maximum of {}",
            precision, MAX_PERCENT_PRECISION
        )));
    }
    Ok(10f64.powi(precision as i32))
}

/// Round half toward positive infinity
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// `round(value x 10^precision)`
pub fn percent_to_fixed_point(value: f64, precision: u32) -> Result<i128, ConversionError> {
    if !value.is_finite() {
        return Err(ConversionError::InvalidInput(format!(
            "percentage {} is not a finite number",
            value
        )));
    }

    let scaled = round_half_up(value * float_scale(precision)?);
    if scaled.abs() >= i128::MAX as f64 {
        return Err(ConversionError::InvalidInput(format!(
            "percentage {} does not fit a fixed-point integer",
            value
        )));
    }

    Ok(scaled as i128)
}

/// `value / 10^precision`
pub fn fixed_point_to_percent(value: i128, precision: u32) -> Result<f64, ConversionError> {
    Ok(value as f64 / float_scale(precision)?)
}

/// Parse a fixed-point value as returned by a contract read
pub fn parse_fixed_point(text: &str) -> Result<i128, ConversionError> {
    let text = text.trim();
    text.parse::<i128>().map_err(|_| {
        ConversionError::InvalidInput(format!("'{}' is not an integer", text))
    })
}

/// Percentage encoded as a fixed-point integer within `0..=100 x 10^precision`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PercentageBasisPoints {
    value: u128,
    precision: u32,
}

impl PercentageBasisPoints {
    /// Wrap an already-encoded value, checking the range
    pub fn new(value: i128, precision: u32) -> Result<Self, ConversionError> {
        float_scale(precision)?;
        let max = Self::max_value(precision);
        if value < 0 || value > max as i128 {
            return Err(ConversionError::InvalidInput(format!(
                "fixed-point percentage {} outside 0..={} at precision {}",
                value, max, precision
            )));
        }
        Ok(Self {
            value: value as u128,
            precision,
        })
    }

    /// Encode a human percentage such as `12.34`
    pub fn from_percent(percent: f64, precision: u32) -> Result<Self, ConversionError> {
        Self::new(percent_to_fixed_point(percent, precision)?, precision)
    }

    /// `100 x 10^precision`, precision clamped to [`MAX_PERCENT_PRECISION`]
    pub fn max_value(precision: u32) -> u128 {
        100 * 10u128.pow(precision.min(MAX_PERCENT_PRECISION))
    }

    pub fn value(&self) -> u128 {
        self.value
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn as_percent(&self) -> f64 {
        self.value as f64 / 10f64.powi(self.precision as i32)
    }
}

impl fmt::Display for PercentageBasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_PERCENT_PRECISION;

    #[test]
    fn test_percent_to_fixed_point() {
        assert_eq!(percent_to_fixed_point(12.34, DEFAULT_PERCENT_PRECISION).unwrap(), 1234);
        assert_eq!(percent_to_fixed_point(100.0, 2).unwrap(), 10_000);
        assert_eq!(percent_to_fixed_point(0.5, 3).unwrap(), 500);
        assert_eq!(percent_to_fixed_point(1.005, 0).unwrap(), 1);
        assert_eq!(percent_to_fixed_point(2.5, 0).unwrap(), 3);
    }

    #[test]
    fn test_percent_to_fixed_point_rejects_non_finite() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                percent_to_fixed_point(bad, 2),
                Err(ConversionError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_unsupported_precision() {
        assert!(percent_to_fixed_point(1.0, 40).is_err());
        assert!(fixed_point_to_percent(1, 40).is_err());

        let above = MAX_PERCENT_PRECISION + 1;
        assert!(matches!(
            percent_to_fixed_point(99.99, above),
            Err(ConversionError::InvalidInput(_))
        ));
        assert!(matches!(
            fixed_point_to_percent(1, above),
            Err(ConversionError::InvalidInput(_))
        ));
        assert!(PercentageBasisPoints::new(0, above).is_err());
    }

    #[test]
    fn test_round_trip_at_range_edges() {
        for precision in 0..=MAX_PERCENT_PRECISION {
            let max = PercentageBasisPoints::max_value(precision) as i128;
            for n in [0, 1, max - 3, max - 1, max] {
                let percent = fixed_point_to_percent(n, precision).unwrap();
                assert_eq!(
                    percent_to_fixed_point(percent, precision).unwrap(),
                    n,
                    "precision {}",
                    precision
                );
            }
        }
    }

    #[test]
    fn test_fixed_point_to_percent() {
        assert_eq!(fixed_point_to_percent(1234, 2).unwrap(), 12.34);
        assert_eq!(fixed_point_to_percent(0, 2).unwrap(), 0.0);
        assert_eq!(fixed_point_to_percent(750, 3).unwrap(), 0.75);
    }

    #[test]
    fn test_parse_fixed_point() {
        assert_eq!(parse_fixed_point(" 250 ").unwrap(), 250);
        assert!(matches!(
            parse_fixed_point("2.5"),
            Err(ConversionError::InvalidInput(_))
        ));
        assert!(parse_fixed_point("").is_err());
    }

    #[test]
    fn test_basis_points_range() {
        let fee = PercentageBasisPoints::from_percent(12.34, 2).unwrap();
        assert_eq!(fee.value(), 1234);
        assert_eq!(fee.to_string(), "12.34%");

        assert!(PercentageBasisPoints::new(10_000, 2).is_ok());
        assert!(PercentageBasisPoints::new(10_001, 2).is_err());
        assert!(PercentageBasisPoints::from_percent(-1.0, 2).is_err());
    }
}
