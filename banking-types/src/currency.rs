//! Currency codes and display formatting
//!
//! Pure functions only; localized grouping with a fixed number of minor
//! digits per currency.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217 currency code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Currency {
    /// Pakistani Rupee
    #[default]
    PKR,
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound
    GBP,
    /// UAE Dirham
    AED,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::PKR => "PKR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::AED => "AED",
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::PKR => "Rs.",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::AED => "د.إ",
        }
    }

    /// Number of minor-unit digits
    pub fn minor_units(&self) -> u32 {
        2
    }

    /// Parse from ISO code
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "PKR" => Some(Currency::PKR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "AED" => Some(Currency::AED),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Format a major-unit amount as a localized currency string
///
/// Rounds to the currency's minor digits and groups the integer part in
/// thousands: `format_amount(5000.into(), Currency::PKR)` → `"PKR 5,000.00"`.
pub fn format_amount(amount: Decimal, currency: Currency) -> String {
    let digits = currency.minor_units();
    let rounded = amount.round_dp(digits);
    let plain = format!("{:.*}", digits as usize, rounded);

    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{} {}{}.{}", currency.code(), sign, grouped, frac),
        None => format!("{} {}{}", currency.code(), sign, grouped),
    }
}

/// Format an amount held in minor units (e.g. paisa, cents)
pub fn format_minor(minor: i64, currency: Currency) -> String {
    format_amount(Decimal::new(minor, currency.minor_units()), currency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("PKR"), Some(Currency::PKR));
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("XXX"), None);
    }

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(
            format_amount(Decimal::from(5_000), Currency::PKR),
            "PKR 5,000.00"
        );
        assert_eq!(
            format_amount(Decimal::new(123_456_789, 2), Currency::USD),
            "USD 1,234,567.89"
        );
        assert_eq!(format_amount(Decimal::from(999), Currency::PKR), "PKR 999.00");
    }

    #[test]
    fn test_format_rounds_to_minor_digits() {
        assert_eq!(
            format_amount(Decimal::new(10_014, 3), Currency::PKR), // 10.014
            "PKR 10.01"
        );
        assert_eq!(
            format_amount(Decimal::new(10_016, 3), Currency::PKR), // 10.016
            "PKR 10.02"
        );
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(
            format_amount(Decimal::from(-1_500), Currency::PKR),
            "PKR -1,500.00"
        );
    }

    #[test]
    fn test_format_minor_units() {
        assert_eq!(format_minor(500_000, Currency::PKR), "PKR 5,000.00");
    }
}
