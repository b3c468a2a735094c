// src/blockchain/actions/mod.rs

use std::sync::Arc;

use ethers_core::types::U256;
use ethers_core::utils::{format_units, parse_units};

use crate::blockchain::{
    action::{Action, ActionSet},
    models::ActionError,
};

pub mod get_address;
pub mod get_balance;
pub mod smart_swap;
pub mod smart_transfer;

pub use get_address::GetAddress;
pub use get_balance::GetBalance;
pub use smart_swap::SmartSwap;
pub use smart_transfer::SmartTransfer;

/// Literal accepted in place of a token address for the chain's native coin.
pub const NATIVE_TOKEN: &str = "eth";

pub const NATIVE_DECIMALS: u32 = 18;

const MAX_SCALED_DIGITS: usize = 77;

/// Every action the EVM engine publishes, in a stable order.
pub fn all() -> ActionSet {
    ActionSet::new(vec![
        Arc::new(GetAddress) as Arc<dyn Action>,
        Arc::new(GetBalance),
        Arc::new(SmartTransfer),
        Arc::new(SmartSwap),
    ])
}

/// Scales a human-readable amount ("1.5") to base units.
pub(crate) fn parse_amount(
    action: &'static str,
    raw: &str,
    decimals: u32,
) -> Result<U256, ActionError> {
    let raw = raw.trim();
    let invalid = |reason: String| ActionError::InvalidArguments { action, reason };
    if raw.starts_with('-') {
        return Err(invalid(format!("amount '{raw}' must be positive")));
    }
    // U256 holds every 77-digit number; parse_units panics past that.
    let integer_digits = raw
        .split('.')
        .next()
        .unwrap_or_default()
        .trim_start_matches('0')
        .len();
    if integer_digits + decimals as usize > MAX_SCALED_DIGITS {
        return Err(invalid(format!("amount '{raw}' is too large")));
    }
    let amount: U256 = parse_units(raw, decimals)
        .map_err(|e| invalid(format!("amount '{raw}' is not a valid number: {e}")))?
        .into();
    if amount.is_zero() {
        return Err(invalid("amount must be greater than zero".to_string()));
    }
    Ok(amount)
}

/// Formats base units as a decimal string without trailing zeros.
pub(crate) fn display_amount(value: U256, decimals: u32) -> String {
    let formatted = match format_units(value, decimals) {
        Ok(s) => s,
        Err(_) => return value.to_string(),
    };
    if !formatted.contains('.') {
        return formatted;
    }
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
