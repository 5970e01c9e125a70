//! # stXDC Core
//!
//! Amount, percentage and form validation rules for the stXDC liquid staking
//! dashboard on the XDC network.
//!
//! Staking economics run on-chain. This crate covers what happens before a
//! transaction is built: turning typed amounts into base units, checking them
//! against the node's lot size and supply cap, and encoding admin fee
//! parameters as fixed-point integers.
//!
//! ## Representations
//!
//! ```text
//! ┌────────────────────┬──────────────────────────┬──────────────────────────┐
//! │ DecimalAmount      │ BaseUnitAmount           │ PercentageBasisPoints    │
//! ├────────────────────┼──────────────────────────┼──────────────────────────┤
//! │ "1.5" XDC          │ 1500000000000000000 wei  │ 12.34% -> 1234 (prec. 2) │
//! │ what users type    │ what contracts take      │ how fees are stored      │
//! └────────────────────┴──────────────────────────┴──────────────────────────┘
//! ```
//!
//! Every function is pure; nothing here performs I/O or holds state.

pub mod address;
pub mod config;
pub mod error;
pub mod format;
pub mod inventory;
pub mod percent;
pub mod protocol;
pub mod staking;
pub mod units;

// Re-exports
pub use address::{eth_to_xdc_address, format_address_short, is_valid_address, xdc_to_eth_address};
pub use config::{DashboardConfig, DisplayConfig, FeeWarningThresholds, InputConfig, PercentConfig};
pub use error::{ConversionError, InventoryError, LsdError, ParameterError, Result, StakeValidationError};
pub use format::{format_base_units, format_decimal, format_exchange_rate, sanitize_amount_input};
pub use inventory::{is_staking_balance_low, validate_liquidity_transfer, validate_redemption_quantity};
pub use percent::{fixed_point_to_percent, parse_fixed_point, percent_to_fixed_point, PercentageBasisPoints};
pub use protocol::{ParameterReport, ParameterWarning, ProtocolParameters, ProtocolParametersForm};
pub use staking::{
    check_unstake_liquidity, max_stakeable_amount, validate_stake_amount, ActionGate, StakeAmountInput,
    StakeDirection, StakeForm, StakeIntent, StakeSnapshot,
};
pub use units::{from_base_units, parse_to_base_units, to_base_units, BaseUnitAmount, DecimalAmount};

/// XDC token constants
pub mod constants {
    /// Native token symbol
    pub const SYMBOL: &str = "XDC";

    /// Liquid staking token symbol
    pub const STAKED_SYMBOL: &str = "stXDC";

    /// Decimal places (same as ETH)
    pub const DECIMALS: u32 = 18;

    /// Fractional digits shown for balances
    pub const DEFAULT_DISPLAY_PRECISION: u32 = 3;

    /// Decimal places of on-chain fee percentages
    pub const DEFAULT_PERCENT_PRECISION: u32 = 2;

    /// Characters accepted in the amount field
    pub const MAX_AMOUNT_INPUT_LEN: usize = 15;

    /// Hex digits in an address after its prefix
    pub const ADDRESS_HEX_LEN: usize = 40;
}

pub use constants::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::constants::*;
    pub use crate::error::{ConversionError, LsdError, Result, StakeValidationError};
    pub use crate::staking::{validate_stake_amount, StakeAmountInput, StakeDirection, StakeSnapshot};
    pub use crate::units::{from_base_units, to_base_units, BaseUnitAmount, DecimalAmount};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_token() {
        assert_eq!(units::one_token().to_string(), "1000000000000000000");
    }

    #[test]
    fn test_lsd_error_from_conversion() {
        let err: LsdError = DecimalAmount::parse("x").unwrap_err().into();
        assert_eq!(err.code(), 1001);
    }
}
