//! Display formatting for quantities and currency amounts.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Symbol and separator preferences for rendered amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrencyStyle {
    pub symbol: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for CurrencyStyle {
    fn default() -> Self {
        Self {
            symbol: "$".into(),
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

static DEFAULT_STYLE: Lazy<CurrencyStyle> = Lazy::new(CurrencyStyle::default);

/// Rounds to two decimals and folds `-0.0` into `0.0` for display.
pub fn round_display(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Formats a bare number with grouping separators and fixed precision.
pub fn format_number(style: &CurrencyStyle, value: f64, precision: u8) -> String {
    let mut body = format!("{:.*}", precision as usize, value);
    if style.decimal_separator != '.' {
        if let Some(pos) = body.find('.') {
            body.replace_range(pos..=pos, &style.decimal_separator.to_string());
        }
    }
    if let Some(pos) = body.find(style.decimal_separator) {
        let mut int_part = body[..pos].to_string();
        insert_grouping(&mut int_part, style.grouping_separator);
        body = format!("{}{}", int_part, &body[pos..]);
    } else {
        insert_grouping(&mut body, style.grouping_separator);
    }
    body
}

/// Quantity display: two decimals with grouping, no symbol.
pub fn format_quantity(value: f64) -> String {
    format_number(&DEFAULT_STYLE, value, 2)
}

/// Currency display: symbol, two decimals, grouping, never negative zero.
pub fn format_currency_with(style: &CurrencyStyle, value: f64) -> String {
    let display = round_display(value);
    if display < 0.0 {
        format!("-{}{}", style.symbol, format_number(style, -display, 2))
    } else {
        format!("{}{}", style.symbol, format_number(style, display, 2))
    }
}

pub fn format_currency(value: f64) -> String {
    format_currency_with(&DEFAULT_STYLE, value)
}

fn insert_grouping(int_part: &mut String, separator: char) {
    let mut cleaned = int_part.replace(separator, "");
    if cleaned.starts_with('-') {
        let sign = cleaned.remove(0);
        let grouped = group_digits(&cleaned, separator);
        *int_part = format!("{}{}", sign, grouped);
    } else {
        *int_part = group_digits(&cleaned, separator);
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(1000.0), "$1,000.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_quantity(200.0), "200.00");
    }

    #[test]
    fn negative_zero_displays_as_zero() {
        assert_eq!(format_currency(-0.0), "$0.00");
        assert_eq!(format_currency(-0.0001), "$0.00");
        assert_eq!(round_display(-0.0), 0.0);
        assert!(round_display(-0.0).is_sign_positive());
    }

    #[test]
    fn custom_style_applies() {
        let style = CurrencyStyle {
            symbol: "€".into(),
            decimal_separator: ',',
            grouping_separator: '.',
        };
        assert_eq!(format_currency_with(&style, 1234.5), "€1.234,50");
    }
}
