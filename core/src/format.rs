//! Display formatting for amounts and rates.

use crate::currency::CurrencyCode;

/// `$1,234.50`, `¥1,235`, `CHF 12.00`.
///
/// Known currencies get their symbol, others the code and a space. JPY and
/// KRW have no minor digits.
pub fn format_money(amount: f64, code: CurrencyCode) -> String {
    let fixed = format!("{:.*}", code.decimal_places(), amount.abs());
    let grouped = group_thousands(&fixed);
    let negative = amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let sign = if negative { "-" } else { "" };
    match code.symbol() {
        Some(symbol) => format!("{sign}{symbol}{grouped}"),
        None => format!("{sign}{code} {grouped}"),
    }
}

/// `1 USD = 0.850000 EUR`
pub fn format_rate(rate: f64, from: CurrencyCode, to: CurrencyCode) -> String {
    format!("1 {from} = {rate:.6} {to}")
}

fn group_thousands(fixed: &str) -> String {
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed, None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}
