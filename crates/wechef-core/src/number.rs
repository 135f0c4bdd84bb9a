// ABOUTME: Numeric coercion and safe arithmetic for recipe cost computation
// ABOUTME: Never fails; invalid or non-finite input becomes zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

//! Numeric helpers
//!
//! Form input arrives as text, JSON values or already-parsed floats. Every
//! helper here first coerces its arguments through [`ToNum`], so a blank
//! field, `NaN`, an infinity or a non-numeric string all count as `0`.
//!
//! ```rust
//! use wechef_core::number::{format_currency, safe_div, safe_mul, truncate};
//!
//! let line = safe_mul("2.5", 4.0);
//! assert!((line - 10.0).abs() < f64::EPSILON);
//! assert!(safe_div(line, 0).abs() < f64::EPSILON);
//! assert!((truncate(2.999, 2) - 2.99).abs() < 1e-9);
//! assert_eq!(format_currency(1234.5), "$1,234.50");
//! ```

use serde_json::Value;

/// Decimal places used for currency display
pub const DEFAULT_DECIMALS: u32 = 2;

/// Anything that can be read as a number
///
/// `raw_num` may return a non-finite value; callers go through [`to_num`],
/// which collapses those to `0`.
pub trait ToNum {
    /// Numeric reading of the value, possibly `NaN` or infinite
    fn raw_num(&self) -> f64;
}

impl ToNum for f64 {
    fn raw_num(&self) -> f64 {
        *self
    }
}

impl ToNum for f32 {
    fn raw_num(&self) -> f64 {
        f64::from(*self)
    }
}

impl ToNum for i32 {
    fn raw_num(&self) -> f64 {
        f64::from(*self)
    }
}

impl ToNum for u32 {
    fn raw_num(&self) -> f64 {
        f64::from(*self)
    }
}

impl ToNum for i64 {
    fn raw_num(&self) -> f64 {
        *self as f64
    }
}

impl ToNum for u64 {
    fn raw_num(&self) -> f64 {
        *self as f64
    }
}

impl ToNum for usize {
    fn raw_num(&self) -> f64 {
        *self as f64
    }
}

impl ToNum for bool {
    fn raw_num(&self) -> f64 {
        if *self {
            1.0
        } else {
            0.0
        }
    }
}

impl ToNum for str {
    fn raw_num(&self) -> f64 {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            return 0.0;
        }
        trimmed.parse::<f64>().unwrap_or(f64::NAN)
    }
}

impl ToNum for String {
    fn raw_num(&self) -> f64 {
        self.as_str().raw_num()
    }
}

impl<T: ToNum> ToNum for Option<T> {
    fn raw_num(&self) -> f64 {
        self.as_ref().map_or(0.0, ToNum::raw_num)
    }
}

impl ToNum for Value {
    fn raw_num(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(flag) => flag.raw_num(),
            Self::Number(number) => number.as_f64().unwrap_or(f64::NAN),
            Self::String(text) => text.raw_num(),
            Self::Array(_) | Self::Object(_) => f64::NAN,
        }
    }
}

impl<T: ToNum + ?Sized> ToNum for &T {
    fn raw_num(&self) -> f64 {
        (**self).raw_num()
    }
}

/// Coerce a value to a finite number, defaulting to `0`
#[must_use]
pub fn to_num(value: impl ToNum) -> f64 {
    let num = value.raw_num();
    if num.is_finite() {
        num
    } else {
        0.0
    }
}

/// Multiply two coerced values
#[must_use]
pub fn safe_mul(a: impl ToNum, b: impl ToNum) -> f64 {
    to_num(a) * to_num(b)
}

/// Divide two coerced values; a zero denominator yields `0`
#[must_use]
pub fn safe_div(a: impl ToNum, b: impl ToNum) -> f64 {
    let numerator = to_num(a);
    let denominator = to_num(b);
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

/// Truncate toward zero at `decimals` places, without rounding
#[must_use]
pub fn truncate(value: impl ToNum, decimals: u32) -> f64 {
    let num = to_num(value);
    let factor = 10_f64.powf(f64::from(decimals));
    (num * factor).trunc() / factor
}

/// Currency display settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// ISO 4217 code
    pub code: &'static str,
    /// Symbol placed before the amount
    pub symbol: &'static str,
    /// Digits after the decimal point
    pub fraction_digits: usize,
}

impl CurrencyFormat {
    /// US dollars
    pub const USD: Self = Self {
        code: "USD",
        symbol: "$",
        fraction_digits: 2,
    };
    /// Euros
    pub const EUR: Self = Self {
        code: "EUR",
        symbol: "€",
        fraction_digits: 2,
    };
    /// Pounds sterling
    pub const GBP: Self = Self {
        code: "GBP",
        symbol: "£",
        fraction_digits: 2,
    };
    /// Japanese yen
    pub const JPY: Self = Self {
        code: "JPY",
        symbol: "¥",
        fraction_digits: 0,
    };

    /// Look up a preset by ISO code (case-insensitive)
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        [Self::USD, Self::EUR, Self::GBP, Self::JPY]
            .into_iter()
            .find(|format| format.code.eq_ignore_ascii_case(code))
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::USD
    }
}

/// Format as US dollars, e.g. `$1,234.50`
#[must_use]
pub fn format_currency(value: impl ToNum) -> String {
    format_currency_with(value, &CurrencyFormat::USD)
}

/// Format with an explicit currency, en-US grouping and sign placement
#[must_use]
pub fn format_currency_with(value: impl ToNum, format: &CurrencyFormat) -> String {
    let amount = to_num(value);
    let factor = 10_f64.powf(format.fraction_digits as f64);
    let rounded = (amount.abs() * factor).round() / factor;
    let digits = format!("{rounded:.prec$}", prec = format.fraction_digits);

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let sign = if amount < 0.0 && rounded > 0.0 { "-" } else { "" };
    let grouped = group_thousands(int_part);
    frac_part.map_or_else(
        || format!("{sign}{}{grouped}", format.symbol),
        |frac| format!("{sign}{}{grouped}.{frac}", format.symbol),
    )
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, ch) in int_part.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_to_num_coercion() {
        assert!(approx(to_num(" 12.5 "), 12.5));
        assert!(approx(to_num(""), 0.0));
        assert!(approx(to_num("abc"), 0.0));
        assert!(approx(to_num(f64::NAN), 0.0));
        assert!(approx(to_num(f64::INFINITY), 0.0));
        assert!(approx(to_num(None::<f64>), 0.0));
        assert!(approx(to_num(Some(3_i32)), 3.0));
        assert!(approx(to_num(&json!("7")), 7.0));
        assert!(approx(to_num(&json!(null)), 0.0));
        assert!(approx(to_num(&json!([1, 2])), 0.0));
        assert!(approx(to_num(true), 1.0));
    }

    #[test]
    fn test_safe_div_by_zero() {
        for x in [0.0, 1.0, -5.5, 1e12] {
            assert!(approx(safe_div(x, 0.0), 0.0));
        }
        assert!(approx(safe_div(10, "4"), 2.5));
    }

    #[test]
    fn test_truncate_does_not_round() {
        assert!(approx(truncate(2.999, 2), 2.99));
        assert!(approx(truncate(-2.999, 2), -2.99));
        assert!(approx(truncate(7.5, 0), 7.0));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "$0.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(-3.1), "-$3.10");
        assert_eq!(format_currency("oops"), "$0.00");
        assert_eq!(format_currency_with(1234.4, &CurrencyFormat::JPY), "¥1,234");
        assert_eq!(format_currency_with(999.999, &CurrencyFormat::EUR), "€1,000.00");
    }

    #[test]
    fn test_currency_lookup() {
        assert_eq!(CurrencyFormat::from_code("gbp"), Some(CurrencyFormat::GBP));
        assert_eq!(CurrencyFormat::from_code("XYZ"), None);
    }
}
