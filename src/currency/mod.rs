//! Rupiah display and amount parsing.

use crate::{config::Config, errors::LedgerError};

/// Formatting rules for whole-unit amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub marker: String,
    pub grouping_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            marker: "Rp".into(),
            grouping_separator: '.',
        }
    }
}

impl CurrencyFormat {
    pub fn from_config(config: &Config) -> Self {
        Self {
            marker: config.currency_marker.clone(),
            grouping_separator: config.grouping_separator,
        }
    }

    /// `Rp 1.000.000`
    pub fn format(&self, amount: u64) -> String {
        format!("{} {}", self.marker, group_digits(amount, self.grouping_separator))
    }

    /// `Rp -200.000` for negative projections.
    pub fn format_signed(&self, amount: i128) -> String {
        let grouped = group_digits_u128(amount.unsigned_abs(), self.grouping_separator);
        if amount < 0 {
            format!("{} -{}", self.marker, grouped)
        } else {
            format!("{} {}", self.marker, grouped)
        }
    }

    /// History line amount: the sign stands in for the marker, `+ 50.000`.
    pub fn format_entry(&self, sign: char, amount: u64) -> String {
        format!("{} {}", sign, group_digits(amount, self.grouping_separator))
    }

    /// Parses user text such as `1.000.000`, `Rp 250.000` or `-5`.
    ///
    /// Grouping separators are only accepted between thousands groups, so
    /// decimal-looking input like `1.5` is rejected instead of misread.
    /// Sign is kept so the ledger can reject non-positive amounts itself.
    pub fn parse_amount(&self, input: &str) -> Result<i64, LedgerError> {
        let shown = input.trim();
        let mut text = shown;
        if text.len() >= self.marker.len()
            && text.is_char_boundary(self.marker.len())
            && text[..self.marker.len()].eq_ignore_ascii_case(&self.marker)
        {
            text = text[self.marker.len()..].trim_start();
        }
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, text),
        };
        let cleaned = ungroup(digits, self.grouping_separator).ok_or_else(|| {
            LedgerError::InvalidAmount(format!("`{shown}` is not a whole number"))
        })?;
        let value: i64 = cleaned
            .parse()
            .map_err(|_| LedgerError::InvalidAmount(format!("`{shown}` is too large")))?;
        Ok(if negative { -value } else { value })
    }
}

/// Strips separators from `1.234.567`-style text. The first group holds one
/// to three digits and every later group exactly three.
fn ungroup(text: &str, separator: char) -> Option<String> {
    let mut groups = text.split(separator);
    let first = groups.next()?;
    let is_digits = |group: &str| !group.is_empty() && group.chars().all(|ch| ch.is_ascii_digit());
    if !is_digits(first) {
        return None;
    }

    let mut cleaned = first.to_string();
    let mut grouped = false;
    for group in groups {
        if group.len() != 3 || !is_digits(group) {
            return None;
        }
        grouped = true;
        cleaned.push_str(group);
    }
    if grouped && first.len() > 3 {
        return None;
    }
    Some(cleaned)
}

/// Formats with the default `Rp` / `.` rules.
pub fn format_rupiah(amount: u64) -> String {
    CurrencyFormat::default().format(amount)
}

fn group_digits(amount: u64, separator: char) -> String {
    group_digits_u128(u128::from(amount), separator)
}

fn group_digits_u128(amount: u128, separator: char) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(format_rupiah(0), "Rp 0");
        assert_eq!(format_rupiah(999), "Rp 999");
        assert_eq!(format_rupiah(1_000), "Rp 1.000");
        assert_eq!(format_rupiah(1_000_000), "Rp 1.000.000");
        assert_eq!(format_rupiah(12_345_678), "Rp 12.345.678");
    }

    #[test]
    fn negative_projection_keeps_marker_first() {
        let format = CurrencyFormat::default();
        assert_eq!(format.format_signed(-200_000), "Rp -200.000");
        assert_eq!(format.format_signed(5), "Rp 5");
    }

    #[test]
    fn entry_amounts_use_sign_instead_of_marker() {
        let format = CurrencyFormat::default();
        assert_eq!(format.format_entry('+', 50_000), "+ 50.000");
        assert_eq!(format.format_entry('-', 1_500), "- 1.500");
    }

    #[test]
    fn parses_grouped_and_prefixed_amounts() {
        let format = CurrencyFormat::default();
        assert_eq!(format.parse_amount("1000000").unwrap(), 1_000_000);
        assert_eq!(format.parse_amount("1.000.000").unwrap(), 1_000_000);
        assert_eq!(format.parse_amount(" rp 250.000 ").unwrap(), 250_000);
        assert_eq!(format.parse_amount("-5").unwrap(), -5);
        assert_eq!(format.parse_amount("12.345").unwrap(), 12_345);
    }

    #[test]
    fn custom_separator_groups_the_same_way() {
        let format = CurrencyFormat {
            marker: "IDR".into(),
            grouping_separator: ',',
        };
        assert_eq!(format.parse_amount("IDR 1,500,000").unwrap(), 1_500_000);
        assert!(format.parse_amount("1,5").is_err());
        assert!(format.parse_amount("1.500").is_err());
    }

    #[test]
    fn rejects_non_numeric_amounts() {
        let format = CurrencyFormat::default();
        for input in [
            "", "abc", "12a", "Rp", "1,5", "1.5", "10.50", "1.0.0", "12.34.5", ".500", "1.",
            "1234.567", "1 000",
        ] {
            assert!(
                matches!(format.parse_amount(input), Err(LedgerError::InvalidAmount(_))),
                "{input:?}"
            );
        }
    }
}
