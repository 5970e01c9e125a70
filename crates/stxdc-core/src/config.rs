//! Dashboard configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Complete toolkit configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Number formatting
    #[serde(default)]
    pub display: DisplayConfig,

    /// Fixed-point percentage encoding
    #[serde(default)]
    pub percent: PercentConfig,

    /// Form input limits
    #[serde(default)]
    pub input: InputConfig,

    /// Soft limits on admin fee parameters
    #[serde(default)]
    pub fee_warnings: FeeWarningThresholds,
}

/// Number formatting settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Fractional digits for balances
    #[serde(default = "default_display_precision")]
    pub precision: u32,

    /// Fractional digits for transaction tables and reward totals
    #[serde(default = "default_table_precision")]
    pub table_precision: u32,

    /// Fractional digits for the stXDC/XDC exchange rate
    #[serde(default = "default_exchange_rate_precision")]
    pub exchange_rate_precision: u32,

    /// Leading characters kept when shortening an address
    #[serde(default = "default_address_head")]
    pub address_head: usize,

    /// Trailing characters kept when shortening an address
    #[serde(default = "default_address_tail")]
    pub address_tail: usize,
}

fn default_display_precision() -> u32 {
    DEFAULT_DISPLAY_PRECISION
}

fn default_table_precision() -> u32 {
    5
}

fn default_exchange_rate_precision() -> u32 {
    5
}

fn default_address_head() -> usize {
    7
}

fn default_address_tail() -> usize {
    4
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: default_display_precision(),
            table_precision: default_table_precision(),
            exchange_rate_precision: default_exchange_rate_precision(),
            address_head: default_address_head(),
            address_tail: default_address_tail(),
        }
    }
}

/// Fixed-point percentage settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PercentConfig {
    /// Decimal places kept in on-chain percentages
    #[serde(default = "default_percent_precision")]
    pub precision: u32,
}

fn default_percent_precision() -> u32 {
    DEFAULT_PERCENT_PRECISION
}

impl Default for PercentConfig {
    fn default() -> Self {
        Self {
            precision: default_percent_precision(),
        }
    }
}

/// Form input limits
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Characters accepted in the amount field
    #[serde(default = "default_max_amount_len")]
    pub max_amount_len: usize,
}

fn default_max_amount_len() -> usize {
    MAX_AMOUNT_INPUT_LEN
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_amount_len: default_max_amount_len(),
        }
    }
}

/// Percent values above which the admin form shows a warning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeeWarningThresholds {
    #[serde(default = "default_staking_fees")]
    pub staking_fees: f64,

    #[serde(default = "default_unstaking_fees")]
    pub unstaking_fees: f64,

    #[serde(default = "default_admin_reward_cut")]
    pub admin_reward_cut: f64,
}

fn default_staking_fees() -> f64 {
    10.0
}

fn default_unstaking_fees() -> f64 {
    15.0
}

fn default_admin_reward_cut() -> f64 {
    20.0
}

impl Default for FeeWarningThresholds {
    fn default() -> Self {
        Self {
            staking_fees: default_staking_fees(),
            unstaking_fees: default_unstaking_fees(),
            admin_reward_cut: default_admin_reward_cut(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.display.precision, 3);
        assert_eq!(config.percent.precision, 2);
        assert_eq!(config.input.max_amount_len, 15);
        assert_eq!(config.fee_warnings.unstaking_fees, 15.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"display": {"precision": 5}}"#).unwrap();
        assert_eq!(config.display.precision, 5);
        assert_eq!(config.display.address_head, 7);
        assert_eq!(config.fee_warnings, FeeWarningThresholds::default());
    }
}
