//! Display formatting for balances, rewards and exchange rates

use crate::units::{from_base_units, BaseUnitAmount};

/// Largest precision whose scale factor is exact in an `f64`
const MAX_FORMAT_PRECISION: u32 = 18;

/// Render a decimal with at most `precision` fractional digits, trailing
/// zeros stripped.
///
/// The integer part is truncated toward zero and printed as-is; only the
/// fractional remainder `|value - trunc(value)|` is rounded. A negative value
/// with a zero integer part therefore prints without its sign
/// (`-0.005` -> `"0.005"`). A remainder that rounds up to a whole unit carries
/// into the integer part (`1.9999` -> `"2"`).
pub fn format_decimal(value: f64, precision: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let precision = precision.min(MAX_FORMAT_PRECISION);
    let scale = 10f64.powi(precision as i32);

    let mut integer = value.trunc();
    let fraction = (value - integer).abs();
    let mut digits = (fraction * scale).round();
    if digits >= scale {
        integer += value.signum();
        digits = 0.0;
    }

    let integer_part = if integer == 0.0 {
        "0".to_string()
    } else {
        integer.to_string()
    };

    if digits == 0.0 {
        return integer_part;
    }

    let fraction_part = format!("{:0>width$}", digits as u64, width = precision as usize);
    format!("{}.{}", integer_part, fraction_part.trim_end_matches('0'))
}

/// Format an on-chain base-unit balance for display
pub fn format_base_units(amount: &BaseUnitAmount, precision: u32) -> String {
    format_decimal(from_base_units(amount).to_f64(), precision)
}

/// Exchange rate between stXDC and XDC: `"1"` at parity, otherwise fixed decimals
pub fn format_exchange_rate(rate: f64, precision: u32) -> String {
    if rate == 1.0 {
        "1".to_string()
    } else {
        format!("{:.*}", precision as usize, rate)
    }
}

/// Clip raw amount input to the form's maximum length
pub fn sanitize_amount_input(input: &str, max_len: usize) -> &str {
    match input.char_indices().nth(max_len) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_DISPLAY_PRECISION;

    #[test]
    fn test_format_decimal_trims_zeros() {
        assert_eq!(format_decimal(1234.5, DEFAULT_DISPLAY_PRECISION), "1234.5");
        assert_eq!(format_decimal(0.1000, DEFAULT_DISPLAY_PRECISION), "0.1");
        assert_eq!(format_decimal(42.0, DEFAULT_DISPLAY_PRECISION), "42");
        assert_eq!(format_decimal(0.0, DEFAULT_DISPLAY_PRECISION), "0");
    }

    #[test]
    fn test_format_decimal_negative() {
        assert_eq!(format_decimal(-0.005, 3), "0.005");
        assert_eq!(format_decimal(-1.25, 3), "-1.25");
        assert_eq!(format_decimal(-12.0, 3), "-12");
    }

    #[test]
    fn test_format_decimal_precision() {
        assert_eq!(format_decimal(3.14159, 3), "3.142");
        assert_eq!(format_decimal(3.14159, 5), "3.14159");
        assert_eq!(format_decimal(0.0004, 3), "0");
        assert_eq!(format_decimal(7.8, 0), "8");
    }

    #[test]
    fn test_format_decimal_carry() {
        assert_eq!(format_decimal(1.9999, 3), "2");
        assert_eq!(format_decimal(-1.9999, 3), "-2");
        assert_eq!(format_decimal(0.9999, 3), "1");
    }

    #[test]
    fn test_format_base_units() {
        let amount: BaseUnitAmount = "1234567800000000000000".parse().unwrap();
        assert_eq!(format_base_units(&amount, 3), "1234.568");
        assert_eq!(format_base_units(&BaseUnitAmount::zero(), 5), "0");
    }

    #[test]
    fn test_format_exchange_rate() {
        assert_eq!(format_exchange_rate(1.0, 5), "1");
        assert_eq!(format_exchange_rate(1.0234567, 5), "1.02346");
    }

    #[test]
    fn test_sanitize_amount_input() {
        assert_eq!(sanitize_amount_input("1234567890123456789", 15), "123456789012345");
        assert_eq!(sanitize_amount_input("100", 15), "100");
    }
}
