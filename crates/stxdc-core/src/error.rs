//! Error types for stXDC amount conversion and form validation

use crate::units::DecimalAmount;
use thiserror::Error;

/// Result type alias for toolkit operations
pub type Result<T> = std::result::Result<T, LsdError>;

/// Numeric conversion failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Amount is not a finite, non-negative decimal with at most 18 fractional digits
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Input cannot be converted (non-finite number, non-integer text, unsupported precision)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Stake and unstake form failures, in the order they are checked
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StakeValidationError {
    #[error("Amount is required")]
    AmountRequired,

    #[error("Amount must be greater than 0")]
    AmountMustBePositive,

    #[error("Amount exceeds available balance")]
    InsufficientBalance,

    #[error("Stake must be at least {lot_size}")]
    BelowLotSize { lot_size: DecimalAmount },

    #[error("Stake must be a multiple of {lot_size}")]
    NotLotSizeMultiple { lot_size: DecimalAmount },

    #[error("Stake amount exceeds maximum available supply of {remaining}")]
    ExceedsAvailableSupply { remaining: DecimalAmount },

    /// Amount text is not a number at all
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Staking contract cannot pay out the unstaked XDC right now
    #[error("Protocol does not have enough balance to fulfill your request ({available} available, {required} required), please try again later")]
    InsufficientProtocolLiquidity {
        available: DecimalAmount,
        required: DecimalAmount,
    },

    #[error("Staking is currently disabled by admin, please use the DEX for staking")]
    StakingPaused,

    #[error("Unstaking is currently disabled by admin, please use the DEX for unstaking")]
    UnstakingPaused,

    #[error("No node space is available for new stake")]
    NodeSpaceUnavailable,
}

/// Admin inventory form failures (redemptions and liquidity transfers)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("No. of tokens is required")]
    TokensRequired,

    #[error("Number of tokens must be greater than 0")]
    TokensMustBePositive,

    #[error("Insufficient balance")]
    InsufficientInventory,

    #[error("Amount is required")]
    AmountRequired,

    #[error("Not enough inventory free balance")]
    ExceedsFreeBalance,

    #[error("Amount must be greater than 0")]
    AmountMustBePositive,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Protocol parameter form failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("{field}: invalid address")]
    InvalidAddress { field: &'static str },

    #[error("{field}: value must be a number from 0 to 100 with up to two decimal places")]
    InvalidPercentage { field: &'static str },

    #[error("{field}: must be a valid number with up to 4 decimal places")]
    InvalidRewardRate { field: &'static str },

    #[error("{field}: {source}")]
    Conversion {
        field: &'static str,
        source: ConversionError,
    },
}

/// Umbrella error for callers that mix conversions and form checks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LsdError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Stake(#[from] StakeValidationError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

impl LsdError {
    /// Stable numeric code for display layers
    pub fn code(&self) -> u32 {
        match self {
            Self::Conversion(ConversionError::InvalidAmount(_)) => 1001,
            Self::Conversion(ConversionError::InvalidInput(_)) => 1002,
            Self::Stake(err) => match err {
                StakeValidationError::AmountRequired => 2001,
                StakeValidationError::AmountMustBePositive => 2002,
                StakeValidationError::InsufficientBalance => 2003,
                StakeValidationError::BelowLotSize { .. } => 2004,
                StakeValidationError::NotLotSizeMultiple { .. } => 2005,
                StakeValidationError::ExceedsAvailableSupply { .. } => 2006,
                StakeValidationError::InvalidAmount(_) => 2007,
                StakeValidationError::InsufficientProtocolLiquidity { .. } => 2008,
                StakeValidationError::StakingPaused
                | StakeValidationError::UnstakingPaused
                | StakeValidationError::NodeSpaceUnavailable => 2009,
            },
            Self::Inventory(_) => 3001,
            Self::Parameter(_) => 4001,
        }
    }

    /// Whether the failure may clear without the user editing the form
    /// (on-chain state such as liquidity or pause flags changes over time)
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Stake(
                StakeValidationError::InsufficientProtocolLiquidity { .. }
                    | StakeValidationError::StakingPaused
                    | StakeValidationError::UnstakingPaused
                    | StakeValidationError::NodeSpaceUnavailable
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err: LsdError = StakeValidationError::AmountRequired.into();
        assert_eq!(err.code(), 2001);

        let err: LsdError = ConversionError::InvalidInput("NaN".into()).into();
        assert_eq!(err.code(), 1002);
    }

    #[test]
    fn test_error_display() {
        let lot_size: DecimalAmount = "100".parse().unwrap();
        let err = StakeValidationError::NotLotSizeMultiple { lot_size };
        assert_eq!(err.to_string(), "Stake must be a multiple of 100");

        let remaining: DecimalAmount = "200".parse().unwrap();
        let err = StakeValidationError::ExceedsAvailableSupply { remaining };
        assert!(err.to_string().ends_with("supply of 200"));
    }

    #[test]
    fn test_transient_errors() {
        assert!(LsdError::from(StakeValidationError::StakingPaused).is_transient());
        assert!(!LsdError::from(StakeValidationError::AmountRequired).is_transient());
    }
}
