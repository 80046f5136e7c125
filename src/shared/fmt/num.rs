//! Number formatting utilities for human-readable display.
//!
//! Prices are whole currency units, so everything here works on integers and
//! only needs thousands separators.

/// Inserts a comma between every group of three digits.
///
/// Accepts an optional leading `-` and leaves any fractional part untouched.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };

    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let grouped = integer
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",");

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Format a whole-unit amount with thousands separators (`22000` → `22,000`).
pub fn display_amount(amount: u64) -> String {
    group_thousands(&amount.to_string())
}
