//! # Stake / Unstake Validation
//!
//! Checks a stake or unstake amount against a snapshot of on-chain state
//! before the transaction layer sees it.
//!
//! ## Rule order (first failure wins)
//!
//! | # | Applies to | Rule | Error |
//! |---|------------|------|-------|
//! | 1 | both | amount present | `AmountRequired` |
//! | 2 | both | amount > 0 | `AmountMustBePositive` |
//! | 3 | both | amount <= available balance | `InsufficientBalance` |
//! | 4 | stake | amount >= lot size | `BelowLotSize` |
//! | 5 | stake | amount % lot size == 0 | `NotLotSizeMultiple` |
//! | 6 | stake | amount <= max supply - current supply | `ExceedsAvailableSupply` |

use crate::error::StakeValidationError;
use crate::format::sanitize_amount_input;
use crate::units::{to_base_units, BaseUnitAmount, DecimalAmount};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which way tokens move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StakeDirection {
    /// XDC in, stXDC out
    Stake,
    /// stXDC in, XDC out
    Unstake,
}

impl StakeDirection {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stake => "stake",
            Self::Unstake => "unstake",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Stake => Self::Unstake,
            Self::Unstake => Self::Stake,
        }
    }
}

impl fmt::Display for StakeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StakeDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stake" => Ok(Self::Stake),
            "unstake" => Ok(Self::Unstake),
            other => Err(format!("unknown direction '{}', expected stake or unstake", other)),
        }
    }
}

/// On-chain state the amount is checked against
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeSnapshot {
    /// XDC balance when staking, stXDC balance when unstaking
    pub available_balance: DecimalAmount,
    /// Minimum stake and required increment
    pub lot_size: DecimalAmount,
    /// Node supply cap
    pub max_supply: DecimalAmount,
    /// Supply already minted against the node
    pub current_supply: DecimalAmount,
}

impl StakeSnapshot {
    /// Remaining stake capacity, zero when the node is already over its cap
    pub fn remaining_supply(&self) -> DecimalAmount {
        self.max_supply.saturating_sub(&self.current_supply)
    }
}

/// Raw form input plus the snapshot it is validated against
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeAmountInput {
    /// Amount exactly as typed
    pub amount: String,
    pub direction: StakeDirection,
    #[serde(flatten)]
    pub snapshot: StakeSnapshot,
}

/// A validated stake or unstake request, ready for the transaction layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeIntent {
    pub amount: DecimalAmount,
    pub direction: StakeDirection,
}

impl StakeIntent {
    /// Amount to pass to the contract call
    pub fn base_units(&self) -> BaseUnitAmount {
        to_base_units(&self.amount)
    }
}

/// Parse typed amount text, distinguishing "negative" from "not a number"
fn parse_positive_amount(raw: &str) -> Result<DecimalAmount, StakeValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(StakeValidationError::AmountRequired);
    }

    if let Some(unsigned) = text.strip_prefix('-') {
        return match DecimalAmount::parse(unsigned) {
            Ok(_) => Err(StakeValidationError::AmountMustBePositive),
            Err(err) => Err(StakeValidationError::InvalidAmount(err.to_string())),
        };
    }

    let amount = DecimalAmount::parse(text)
        .map_err(|err| StakeValidationError::InvalidAmount(err.to_string()))?;
    if amount.is_zero() {
        return Err(StakeValidationError::AmountMustBePositive);
    }
    Ok(amount)
}

/// Lot-size multiple check on the decimal values.
///
/// Lot sizes are small whole-token integers, so `f64` modulo is exact for
/// every realistic amount. A zero lot size yields NaN and fails the check.
fn is_lot_multiple(amount: &DecimalAmount, lot_size: &DecimalAmount) -> bool {
    amount.to_f64() % lot_size.to_f64() == 0.0
}

/// Validate a stake or unstake amount; first failing rule wins
pub fn validate_stake_amount(
    input: &StakeAmountInput,
) -> Result<StakeIntent, StakeValidationError> {
    let result = check_rules(input);
    match &result {
        Ok(intent) => tracing::debug!(
            direction = %intent.direction,
            amount = %intent.amount,
            "stake amount accepted"
        ),
        Err(err) => tracing::debug!(
            direction = %input.direction,
            amount = %input.amount,
            error = %err,
            "stake amount rejected"
        ),
    }
    result
}

fn check_rules(input: &StakeAmountInput) -> Result<StakeIntent, StakeValidationError> {
    let snapshot = &input.snapshot;
    let amount = parse_positive_amount(&input.amount)?;

    if amount > snapshot.available_balance {
        return Err(StakeValidationError::InsufficientBalance);
    }

    if input.direction == StakeDirection::Stake {
        if amount < snapshot.lot_size {
            return Err(StakeValidationError::BelowLotSize {
                lot_size: snapshot.lot_size,
            });
        }

        if !is_lot_multiple(&amount, &snapshot.lot_size) {
            return Err(StakeValidationError::NotLotSizeMultiple {
                lot_size: snapshot.lot_size,
            });
        }

        let remaining = snapshot.remaining_supply();
        if amount > remaining {
            return Err(StakeValidationError::ExceedsAvailableSupply { remaining });
        }
    }

    Ok(StakeIntent {
        amount,
        direction: input.direction,
    })
}

/// Largest lot-size multiple the balance can stake ("Max" button)
pub fn max_stakeable_amount(balance: &DecimalAmount, lot_size: &DecimalAmount) -> DecimalAmount {
    balance.floor_to_multiple(lot_size)
}

/// Fail when the staking contract cannot pay out an unstake right now
pub fn check_unstake_liquidity(
    staking_contract_balance: &DecimalAmount,
    payout: &DecimalAmount,
) -> Result<(), StakeValidationError> {
    if staking_contract_balance < payout {
        tracing::warn!(
            available = %staking_contract_balance,
            required = %payout,
            "staking contract liquidity too low for unstake"
        );
        return Err(StakeValidationError::InsufficientProtocolLiquidity {
            available: *staking_contract_balance,
            required: *payout,
        });
    }
    Ok(())
}

/// Admin switches that disable the widget independently of the amount
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGate {
    #[serde(default)]
    pub staking_paused: bool,
    #[serde(default)]
    pub unstaking_paused: bool,
    #[serde(default = "default_true")]
    pub node_space_available: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ActionGate {
    fn default() -> Self {
        Self {
            staking_paused: false,
            unstaking_paused: false,
            node_space_available: true,
        }
    }
}

impl ActionGate {
    pub fn check(&self, direction: StakeDirection) -> Result<(), StakeValidationError> {
        match direction {
            StakeDirection::Stake if self.staking_paused => Err(StakeValidationError::StakingPaused),
            StakeDirection::Stake if !self.node_space_available => {
                Err(StakeValidationError::NodeSpaceUnavailable)
            }
            StakeDirection::Unstake if self.unstaking_paused => {
                Err(StakeValidationError::UnstakingPaused)
            }
            _ => Ok(()),
        }
    }
}

/// Staking widget state: direction toggle, snapshot and gate
#[derive(Clone, Debug)]
pub struct StakeForm {
    pub direction: StakeDirection,
    pub snapshot: StakeSnapshot,
    pub gate: ActionGate,
    max_input_len: usize,
}

impl StakeForm {
    pub fn new(snapshot: StakeSnapshot, gate: ActionGate, max_input_len: usize) -> Self {
        Self {
            direction: StakeDirection::Stake,
            snapshot,
            gate,
            max_input_len,
        }
    }

    /// Switch between staking and unstaking. The caller refreshes
    /// `snapshot.available_balance` for the new direction.
    pub fn toggle(&mut self) {
        self.direction = self.direction.toggled();
    }

    /// Validate typed input and the admin gate; `Ok` means the submit button is enabled
    pub fn prepare(&self, raw_amount: &str) -> Result<StakeIntent, StakeValidationError> {
        let input = StakeAmountInput {
            amount: sanitize_amount_input(raw_amount, self.max_input_len).to_string(),
            direction: self.direction,
            snapshot: self.snapshot.clone(),
        };
        let intent = validate_stake_amount(&input)?;
        self.gate.check(self.direction)?;
        Ok(intent)
    }

    pub fn can_submit(&self, raw_amount: &str) -> bool {
        self.prepare(raw_amount).is_ok()
    }

    /// "Max" amount for the current direction
    pub fn max_amount(&self) -> DecimalAmount {
        match self.direction {
            StakeDirection::Stake => {
                max_stakeable_amount(&self.snapshot.available_balance, &self.snapshot.lot_size)
            }
            StakeDirection::Unstake => self.snapshot.available_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_AMOUNT_INPUT_LEN;

    fn dec(s: &str) -> DecimalAmount {
        s.parse().unwrap()
    }

    fn snapshot(balance: &str, lot: &str, max: &str, current: &str) -> StakeSnapshot {
        StakeSnapshot {
            available_balance: dec(balance),
            lot_size: dec(lot),
            max_supply: dec(max),
            current_supply: dec(current),
        }
    }

    fn stake(amount: &str, snapshot: StakeSnapshot) -> Result<StakeIntent, StakeValidationError> {
        validate_stake_amount(&StakeAmountInput {
            amount: amount.to_string(),
            direction: StakeDirection::Stake,
            snapshot,
        })
    }

    fn unstake(amount: &str, snapshot: StakeSnapshot) -> Result<StakeIntent, StakeValidationError> {
        validate_stake_amount(&StakeAmountInput {
            amount: amount.to_string(),
            direction: StakeDirection::Unstake,
            snapshot,
        })
    }

    #[test]
    fn test_amount_required() {
        let snap = snapshot("1000", "100", "500", "0");
        assert_eq!(stake("", snap.clone()), Err(StakeValidationError::AmountRequired));
        assert_eq!(stake("   ", snap), Err(StakeValidationError::AmountRequired));
    }

    #[test]
    fn test_amount_must_be_positive() {
        let snap = snapshot("1000", "100", "500", "0");
        assert_eq!(stake("0", snap.clone()), Err(StakeValidationError::AmountMustBePositive));
        assert_eq!(stake("-100", snap.clone()), Err(StakeValidationError::AmountMustBePositive));
        assert_eq!(unstake("0.0", snap), Err(StakeValidationError::AmountMustBePositive));
    }

    #[test]
    fn test_not_a_number() {
        let snap = snapshot("1000", "100", "500", "0");
        assert!(matches!(stake("ten", snap.clone()), Err(StakeValidationError::InvalidAmount(_))));
        assert!(matches!(stake("-x", snap), Err(StakeValidationError::InvalidAmount(_))));
    }

    #[test]
    fn test_insufficient_balance() {
        let snap = snapshot("150", "100", "500", "0");
        assert_eq!(stake("200", snap.clone()), Err(StakeValidationError::InsufficientBalance));
        assert_eq!(unstake("150.5", snap), Err(StakeValidationError::InsufficientBalance));
    }

    #[test]
    fn test_below_lot_size() {
        let snap = snapshot("1000", "100", "500", "0");
        assert_eq!(
            stake("50", snap),
            Err(StakeValidationError::BelowLotSize { lot_size: dec("100") })
        );
    }

    #[test]
    fn test_not_lot_size_multiple() {
        let snap = snapshot("1000", "100", "500", "0");
        assert_eq!(
            stake("150", snap),
            Err(StakeValidationError::NotLotSizeMultiple { lot_size: dec("100") })
        );
    }

    #[test]
    fn test_exceeds_available_supply() {
        let snap = snapshot("1000", "100", "200", "0");
        assert_eq!(
            stake("300", snap),
            Err(StakeValidationError::ExceedsAvailableSupply { remaining: dec("200") })
        );

        let full = snapshot("1000", "100", "200", "250");
        assert_eq!(
            stake("100", full),
            Err(StakeValidationError::ExceedsAvailableSupply { remaining: DecimalAmount::zero() })
        );
    }

    #[test]
    fn test_valid_stake() {
        let snap = snapshot("1000", "100", "500", "0");
        let intent = stake("200", snap).unwrap();
        assert_eq!(intent.amount, dec("200"));
        assert_eq!(intent.base_units().to_string(), "200000000000000000000");
    }

    #[test]
    fn test_unstake_skips_lot_rules() {
        let snap = snapshot("1000", "100", "0", "0");
        let intent = unstake("12.75", snap).unwrap();
        assert_eq!(intent.direction, StakeDirection::Unstake);
        assert_eq!(intent.amount, dec("12.75"));
    }

    #[test]
    fn test_first_failure_wins() {
        // Over balance, below lot and not a multiple at once
        let snap = snapshot("10", "100", "500", "0");
        assert_eq!(stake("55", snap), Err(StakeValidationError::InsufficientBalance));
    }

    #[test]
    fn test_zero_lot_size_rejects_multiple() {
        let snap = snapshot("1000", "0", "500", "0");
        assert_eq!(
            stake("10", snap),
            Err(StakeValidationError::NotLotSizeMultiple { lot_size: DecimalAmount::zero() })
        );
    }

    #[test]
    fn test_max_stakeable_amount() {
        assert_eq!(max_stakeable_amount(&dec("1234.5"), &dec("100")), dec("1200"));
        assert_eq!(max_stakeable_amount(&dec("99"), &dec("100")), DecimalAmount::zero());
    }

    #[test]
    fn test_unstake_liquidity() {
        assert!(check_unstake_liquidity(&dec("100"), &dec("99.9")).is_ok());
        assert_eq!(
            check_unstake_liquidity(&dec("10"), &dec("12")),
            Err(StakeValidationError::InsufficientProtocolLiquidity {
                available: dec("10"),
                required: dec("12"),
            })
        );
    }

    #[test]
    fn test_action_gate() {
        let gate = ActionGate { staking_paused: true, ..ActionGate::default() };
        assert_eq!(gate.check(StakeDirection::Stake), Err(StakeValidationError::StakingPaused));
        assert!(gate.check(StakeDirection::Unstake).is_ok());

        let gate = ActionGate { node_space_available: false, ..ActionGate::default() };
        assert_eq!(
            gate.check(StakeDirection::Stake),
            Err(StakeValidationError::NodeSpaceUnavailable)
        );

        let gate = ActionGate { unstaking_paused: true, ..ActionGate::default() };
        assert_eq!(
            gate.check(StakeDirection::Unstake),
            Err(StakeValidationError::UnstakingPaused)
        );
    }

    #[test]
    fn test_stake_form() {
        let mut form = StakeForm::new(
            snapshot("1050", "100", "5000", "0"),
            ActionGate::default(),
            MAX_AMOUNT_INPUT_LEN,
        );
        assert!(form.can_submit("1000"));
        assert!(!form.can_submit("1050"));
        assert_eq!(form.max_amount(), dec("1000"));

        form.toggle();
        assert_eq!(form.direction, StakeDirection::Unstake);
        assert!(form.can_submit("1050"));
        assert_eq!(form.max_amount(), dec("1050"));

        form.gate.unstaking_paused = true;
        assert_eq!(form.prepare("10"), Err(StakeValidationError::UnstakingPaused));
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("Stake".parse::<StakeDirection>().unwrap(), StakeDirection::Stake);
        assert_eq!("unstake".parse::<StakeDirection>().unwrap(), StakeDirection::Unstake);
        assert!("swap".parse::<StakeDirection>().is_err());
    }
}
