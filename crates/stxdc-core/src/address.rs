//! XDC address helpers
//!
//! XDC wallets display addresses with an `xdc` prefix where Ethereum tooling
//! expects `0x`; the 40 hex digits are identical.

use crate::constants::ADDRESS_HEX_LEN;

const ETH_PREFIX: &str = "0x";
const XDC_PREFIX: &str = "xdc";

/// `0xabc...` -> `xdcabc...`; other input is returned unchanged
pub fn eth_to_xdc_address(address: &str) -> String {
    match address.strip_prefix(ETH_PREFIX) {
        Some(rest) => format!("{}{}", XDC_PREFIX, rest),
        None => address.to_string(),
    }
}

/// `xdcabc...` -> `0xabc...`; other input is returned unchanged
pub fn xdc_to_eth_address(address: &str) -> String {
    match address.strip_prefix(XDC_PREFIX) {
        Some(rest) => format!("{}{}", ETH_PREFIX, rest),
        None => address.to_string(),
    }
}

/// `0x` or `xdc` followed by exactly 40 hex digits
pub fn is_valid_address(address: &str) -> bool {
    let hex = match address
        .strip_prefix(ETH_PREFIX)
        .or_else(|| address.strip_prefix(XDC_PREFIX))
    {
        Some(hex) => hex,
        None => return false,
    };
    hex.len() == ADDRESS_HEX_LEN && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Keep `start` leading and `end` trailing characters around an ellipsis
pub fn ellipsis_shrink(text: &str, start: usize, end: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let head: String = chars.iter().take(start).collect();
    let tail: String = chars[chars.len().saturating_sub(end)..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Short `xdc`-prefixed form for tables and navbars (`xdc1234...abcd`)
pub fn format_address_short(address: &str, start: usize, end: usize) -> String {
    ellipsis_shrink(&eth_to_xdc_address(address), start, end)
}
