//! # Protocol Parameters
//!
//! Admin setup form for the LSD admin contract. Percent fields are typed as
//! text (`"2.5"`), checked, then stored on-chain as fixed-point integers; the
//! XDC reward rate is stored in base units.

use crate::address::{eth_to_xdc_address, is_valid_address, xdc_to_eth_address};
use crate::config::FeeWarningThresholds;
use crate::error::{ConversionError, ParameterError};
use crate::percent::{fixed_point_to_percent, PercentageBasisPoints};
use crate::units::{from_base_units, to_base_units, BaseUnitAmount, DecimalAmount};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Admin form values as typed
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolParametersForm {
    pub dev_address: String,
    pub liquidity_threshold: String,
    pub staking_fees: String,
    pub unstaking_fees: String,
    pub liquidity_tolerance: String,
    pub dev_investment_fees: String,
    pub admin_reward_cut: String,
    pub dev_reward_cut: String,
    pub xdc_reward_rate: String,
}

/// Parameters in the shape the admin contract stores them
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolParameters {
    /// `0x`-prefixed
    pub dev_address: String,
    pub liquidity_threshold: u128,
    pub staking_fees: u128,
    pub unstaking_fees: u128,
    pub liquidity_tolerance: u128,
    pub dev_investment_fees: u128,
    pub admin_reward_cut: u128,
    pub dev_reward_cut: u128,
    pub xdc_reward_rate: BaseUnitAmount,
    /// Decimal places of the fixed-point fields
    pub percent_precision: u32,
}

/// Soft limit exceeded; the form may still be submitted
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParameterWarning {
    pub field: &'static str,
    pub threshold: f64,
    pub message: String,
}

/// Outcome of checking every field
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterReport {
    pub errors: Vec<ParameterError>,
    pub warnings: Vec<ParameterWarning>,
}

impl ParameterReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// `100`, `100.0`, `100.00`, or one or two integer digits with an optional
/// one- or two-digit fraction
static PERCENTAGE_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^(100(\.0{1,2})?|([0-9]{1,2}(\.[0-9]{1,2})?))$").ok());

/// Optional `-`, digits, optional fraction of one to four digits
static REWARD_RATE_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]{1,4})?$").ok());

/// `0` to `100` with at most two decimals
pub fn is_percentage_text(text: &str) -> bool {
    PERCENTAGE_PATTERN
        .as_ref()
        .map_or(false, |re| re.is_match(text))
}

/// Signed decimal with at most four decimals
pub fn is_reward_rate_text(text: &str) -> bool {
    REWARD_RATE_PATTERN
        .as_ref()
        .map_or(false, |re| re.is_match(text))
}

impl ProtocolParametersForm {
    fn percent_fields(&self) -> [(&'static str, &str); 7] {
        [
            ("liquidity_threshold", &self.liquidity_threshold),
            ("staking_fees", &self.staking_fees),
            ("unstaking_fees", &self.unstaking_fees),
            ("liquidity_tolerance", &self.liquidity_tolerance),
            ("dev_investment_fees", &self.dev_investment_fees),
            ("admin_reward_cut", &self.admin_reward_cut),
            ("dev_reward_cut", &self.dev_reward_cut),
        ]
    }

    fn field_errors(&self) -> Vec<ParameterError> {
        let mut errors = Vec::new();

        if !is_valid_address(self.dev_address.trim()) {
            errors.push(ParameterError::InvalidAddress {
                field: "dev_address",
            });
        }
        for (field, value) in self.percent_fields() {
            if !is_percentage_text(value.trim()) {
                errors.push(ParameterError::InvalidPercentage { field });
            }
        }
        if !is_reward_rate_text(self.xdc_reward_rate.trim()) {
            errors.push(ParameterError::InvalidRewardRate {
                field: "xdc_reward_rate",
            });
        }

        errors
    }

    /// Fee fields above their soft limits. Fields that already fail
    /// validation get no warning, and valid percentage text is never
    /// negative, so only the upper bound is checked.
    pub fn warnings(&self, thresholds: &FeeWarningThresholds) -> Vec<ParameterWarning> {
        let checks = [
            ("staking_fees", &self.staking_fees, thresholds.staking_fees, "Staking fees"),
            (
                "unstaking_fees",
                &self.unstaking_fees,
                thresholds.unstaking_fees,
                "Unstaking fees",
            ),
            (
                "admin_reward_cut",
                &self.admin_reward_cut,
                thresholds.admin_reward_cut,
                "Admin reward cut",
            ),
        ];

        checks
            .into_iter()
            .filter(|(_, value, _, _)| is_percentage_text(value.trim()))
            .filter_map(|(field, value, threshold, label)| {
                let percent: f64 = value.trim().parse().ok()?;
                (percent > threshold).then(|| ParameterWarning {
                    field,
                    threshold,
                    message: format!("Note: {} should be between 0 and {}.", label, threshold),
                })
            })
            .collect()
    }

    /// Check every field, collecting all errors and warnings
    pub fn validate(&self, thresholds: &FeeWarningThresholds) -> ParameterReport {
        let report = ParameterReport {
            errors: self.field_errors(),
            warnings: self.warnings(thresholds),
        };
        tracing::debug!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "protocol parameters checked"
        );
        report
    }

    /// Encode for submission; fails on the first invalid field
    pub fn encode(&self, precision: u32) -> Result<ProtocolParameters, ParameterError> {
        if let Some(err) = self.field_errors().into_iter().next() {
            return Err(err);
        }

        let encode_percent = |field: &'static str, text: &str| -> Result<u128, ParameterError> {
            let percent: f64 = text
                .trim()
                .parse()
                .map_err(|_| ParameterError::InvalidPercentage { field })?;
            PercentageBasisPoints::from_percent(percent, precision)
                .map(|bp| bp.value())
                .map_err(|source| ParameterError::Conversion { field, source })
        };

        let xdc_reward_rate = DecimalAmount::parse(&self.xdc_reward_rate)
            .map(|rate| to_base_units(&rate))
            .map_err(|source| ParameterError::Conversion {
                field: "xdc_reward_rate",
                source,
            })?;

        Ok(ProtocolParameters {
            dev_address: xdc_to_eth_address(self.dev_address.trim()),
            liquidity_threshold: encode_percent("liquidity_threshold", &self.liquidity_threshold)?,
            staking_fees: encode_percent("staking_fees", &self.staking_fees)?,
            unstaking_fees: encode_percent("unstaking_fees", &self.unstaking_fees)?,
            liquidity_tolerance: encode_percent("liquidity_tolerance", &self.liquidity_tolerance)?,
            dev_investment_fees: encode_percent("dev_investment_fees", &self.dev_investment_fees)?,
            admin_reward_cut: encode_percent("admin_reward_cut", &self.admin_reward_cut)?,
            dev_reward_cut: encode_percent("dev_reward_cut", &self.dev_reward_cut)?,
            xdc_reward_rate,
            percent_precision: precision,
        })
    }
}

impl ProtocolParameters {
    /// Decode contract values back into form text for editing
    pub fn to_form(&self) -> Result<ProtocolParametersForm, ConversionError> {
        let precision = self.percent_precision;
        let decode = |value: u128| -> Result<String, ConversionError> {
            let value = i128::try_from(value).map_err(|_| {
                ConversionError::InvalidInput(format!("fixed-point value {} is too large", value))
            })?;
            fixed_point_to_percent(value, precision).map(|percent| percent.to_string())
        };

        Ok(ProtocolParametersForm {
            dev_address: eth_to_xdc_address(&self.dev_address),
            liquidity_threshold: decode(self.liquidity_threshold)?,
            staking_fees: decode(self.staking_fees)?,
            unstaking_fees: decode(self.unstaking_fees)?,
            liquidity_tolerance: decode(self.liquidity_tolerance)?,
            dev_investment_fees: decode(self.dev_investment_fees)?,
            admin_reward_cut: decode(self.admin_reward_cut)?,
            dev_reward_cut: decode(self.dev_reward_cut)?,
            xdc_reward_rate: from_base_units(&self.xdc_reward_rate).to_string(),
        })
    }
}
