//! Money formatting
//!
//! Renders an amount in cents through a store money format such as
//! `${{amount}}` or `{{ amount_with_comma_separator }} €`.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("placeholder pattern is valid"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyFormatError {
    #[error("Money format has no {{{{ placeholder }}}}: {0:?}")]
    MissingPlaceholder(String),
}

/// Digit grouping for one placeholder style
struct Delimiters {
    precision: u32,
    thousands: &'static str,
    decimal: &'static str,
}

impl Delimiters {
    fn for_placeholder(name: &str) -> Option<Self> {
        let (precision, thousands, decimal) = match name {
            "amount" => (2, ",", "."),
            "amount_no_decimals" => (0, ",", "."),
            "amount_with_comma_separator" => (2, ".", ","),
            "amount_no_decimals_with_comma_separator" => (0, ".", ","),
            "amount_no_decimals_with_space_separator" => (0, " ", "."),
            "amount_with_apostrophe_separator" => (2, "'", "."),
            _ => return None,
        };
        Some(Self {
            precision,
            thousands,
            decimal,
        })
    }

    fn format(&self, cents: i64) -> String {
        let negative = cents < 0;
        let abs = cents.unsigned_abs();

        let (units, fraction) = if self.precision == 0 {
            // Half away from zero
            ((abs + 50) / 100, None)
        } else {
            (abs / 100, Some(abs % 100))
        };

        let mut out = String::new();
        if negative && (units > 0 || fraction.is_some_and(|f| f > 0)) {
            out.push('-');
        }
        out.push_str(&group_thousands(units, self.thousands));
        if let Some(fraction) = fraction {
            out.push_str(self.decimal);
            out.push_str(&format!("{:02}", fraction));
        }
        out
    }
}

fn group_thousands(units: u64, separator: &str) -> String {
    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Whether `format` contains a `{{ name }}` placeholder [`format_money`] can fill
pub fn has_placeholder(format: &str) -> bool {
    PLACEHOLDER.is_match(format)
}

/// Format `cents` with the money format `format`
///
/// Unknown placeholder names render as an empty amount.
pub fn format_money(cents: i64, format: &str) -> Result<String, MoneyFormatError> {
    let captures = PLACEHOLDER
        .captures(format)
        .ok_or_else(|| MoneyFormatError::MissingPlaceholder(format.to_string()))?;

    let value = Delimiters::for_placeholder(&captures[1])
        .map(|delimiters| delimiters.format(cents))
        .unwrap_or_default();

    Ok(PLACEHOLDER.replacen(format, 1, regex::NoExpand(&value)).into_owned())
}

/// Format an amount given as text, as found in form fields and some API payloads
///
/// The first `.` is dropped before parsing (`"12.50"` is 1250 cents). Text
/// that still is not an integer renders as `0` in the chosen format.
pub fn format_money_str(raw: &str, format: &str) -> Result<String, MoneyFormatError> {
    let digits = raw.trim().replacen('.', "", 1);
    match digits.parse::<i64>() {
        Ok(cents) => format_money(cents, format),
        Err(_) => {
            let captures = PLACEHOLDER
                .captures(format)
                .ok_or_else(|| MoneyFormatError::MissingPlaceholder(format.to_string()))?;
            let value = if Delimiters::for_placeholder(&captures[1]).is_some() {
                "0"
            } else {
                ""
            };
            Ok(PLACEHOLDER.replacen(format, 1, regex::NoExpand(value)).into_owned())
        }
    }
}
