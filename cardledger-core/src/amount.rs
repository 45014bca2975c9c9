//! Statement currency strings such as `-$1,234.56`.
//!
//! Negative amounts are payments and credits, positive amounts are purchases.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{LedgerError, Result};

/// Parse a `[-]$D[,DDD]*.DD` string into a signed amount.
pub fn parse_amount(text: &str) -> Result<Decimal> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();

    let (negative, rest) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    let digits = rest.strip_prefix('$').unwrap_or(rest).trim_start();

    if digits.is_empty() {
        return Err(invalid(text, "no digits"));
    }
    if !digits.chars().all(|c| c.is_ascii_digit() || c == '.') || digits.matches('.').count() > 1 {
        return Err(invalid(text, "not a decimal number"));
    }

    let value = Decimal::from_str(digits).map_err(|e| invalid(text, &e.to_string()))?;
    Ok(if negative { -value } else { value })
}

/// Render an amount the way statements print it: `-$1,234.56`.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let magnitude = format!("{:.2}", rounded.abs());
    let (whole, cents) = magnitude.split_once('.').unwrap_or((magnitude.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

fn invalid(text: &str, reason: &str) -> LedgerError {
    LedgerError::AmountParse {
        text: text.to_string(),
        reason: reason.to_string(),
    }
}
