//! Admin inventory forms: node-token redemptions and liquidity transfers
//! from the inventory contract into the staking contract.

use crate::error::InventoryError;
use crate::units::DecimalAmount;

fn parse_signed(text: &str) -> Result<(bool, DecimalAmount), InventoryError> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    DecimalAmount::parse(digits)
        .map(|amount| (negative && !amount.is_zero(), amount))
        .map_err(|err| InventoryError::InvalidAmount(err.to_string()))
}

/// Validate the number of node tokens to redeem.
///
/// Checks, in order: present, greater than zero, within the node's
/// inventory balance.
pub fn validate_redemption_quantity(
    input: &str,
    inventory_balance: &DecimalAmount,
) -> Result<DecimalAmount, InventoryError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(InventoryError::TokensRequired);
    }

    let (negative, quantity) = parse_signed(text)?;
    if negative || quantity.is_zero() {
        return Err(InventoryError::TokensMustBePositive);
    }
    if quantity > *inventory_balance {
        return Err(InventoryError::InsufficientInventory);
    }

    tracing::debug!(%quantity, "redemption quantity accepted");
    Ok(quantity)
}

/// Validate an inventory-to-staking liquidity transfer.
///
/// The free-balance check runs before the positivity check, so an amount
/// that is both too large and non-positive reports the balance error.
pub fn validate_liquidity_transfer(
    input: &str,
    free_balance: &DecimalAmount,
) -> Result<DecimalAmount, InventoryError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(InventoryError::AmountRequired);
    }

    let (negative, amount) = parse_signed(text)?;
    if !negative && amount > *free_balance {
        return Err(InventoryError::ExceedsFreeBalance);
    }
    if negative || amount.is_zero() {
        return Err(InventoryError::AmountMustBePositive);
    }

    tracing::debug!(%amount, "liquidity transfer accepted");
    Ok(amount)
}

/// Whether the staking contract has fallen below its floor balance.
///
/// The floor is the admin contract's liquidity threshold minus its
/// tolerance adjustment, clamped at zero; the balance is low only when
/// strictly below the floor.
pub fn is_staking_balance_low(
    staking_balance: &DecimalAmount,
    liquidity_threshold: &DecimalAmount,
    tolerance_adjustment: &DecimalAmount,
) -> bool {
    let floor = liquidity_threshold.saturating_sub(tolerance_adjustment);
    let low = *staking_balance < floor;
    if low {
        tracing::warn!(
            balance = %staking_balance,
            %floor,
            "staking contract balance below floor"
        );
    }
    low
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> DecimalAmount {
        s.parse().unwrap()
    }

    #[test]
    fn test_redemption_rules() {
        let balance = dec("40");
        assert_eq!(validate_redemption_quantity("", &balance), Err(InventoryError::TokensRequired));
        assert_eq!(
            validate_redemption_quantity("0", &balance),
            Err(InventoryError::TokensMustBePositive)
        );
        assert_eq!(
            validate_redemption_quantity("-3", &balance),
            Err(InventoryError::TokensMustBePositive)
        );
        assert_eq!(
            validate_redemption_quantity("41", &balance),
            Err(InventoryError::InsufficientInventory)
        );
        assert_eq!(validate_redemption_quantity("40", &balance), Ok(dec("40")));
    }

    #[test]
    fn test_liquidity_transfer_rules() {
        let free = dec("2500.5");
        assert_eq!(validate_liquidity_transfer(" ", &free), Err(InventoryError::AmountRequired));
        assert_eq!(
            validate_liquidity_transfer("3000", &free),
            Err(InventoryError::ExceedsFreeBalance)
        );
        assert_eq!(
            validate_liquidity_transfer("0", &free),
            Err(InventoryError::AmountMustBePositive)
        );
        assert_eq!(validate_liquidity_transfer("2500.5", &free), Ok(free));
    }

    #[test]
    fn test_balance_checked_before_positivity() {
        let empty = DecimalAmount::zero();
        assert_eq!(
            validate_liquidity_transfer("0", &empty),
            Err(InventoryError::AmountMustBePositive)
        );
        assert_eq!(
            validate_liquidity_transfer("1", &empty),
            Err(InventoryError::ExceedsFreeBalance)
        );
    }

    #[test]
    fn test_garbage_input() {
        assert!(matches!(
            validate_liquidity_transfer("1,000", &dec("5000")),
            Err(InventoryError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_staking_balance_floor() {
        let threshold = dec("10000");
        let tolerance = dec("1500");

        assert!(is_staking_balance_low(&dec("8499.99"), &threshold, &tolerance));
        assert!(!is_staking_balance_low(&dec("8500"), &threshold, &tolerance));
        assert!(!is_staking_balance_low(&dec("12000"), &threshold, &tolerance));
    }

    #[test]
    fn test_staking_balance_floor_saturates() {
        let threshold = dec("100");
        let tolerance = dec("250");

        assert!(!is_staking_balance_low(&DecimalAmount::zero(), &threshold, &tolerance));
        assert!(!is_staking_balance_low(&dec("1"), &threshold, &tolerance));
    }
}
