//! Shared utility functions for ESG crates.

/// Number formatting functions
pub mod format {
    /// Placeholder shown for values that cannot be displayed.
    pub const NOT_AVAILABLE: &str = "N/A";

    /// Round a value to a fixed number of decimal places (half away from zero).
    pub fn round_to(value: f64, decimals: u32) -> f64 {
        let factor = 10f64.powi(decimals as i32);
        (value * factor).round() / factor
    }

    /// Insert `,` thousands separators into the integer part of a
    /// pre-formatted decimal string such as "-1234567.89".
    fn group_thousands(formatted: &str) -> String {
        let (sign, unsigned) = match formatted.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", formatted),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (unsigned, None),
        };
        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (idx, ch) in int_part.chars().enumerate() {
            if idx > 0 && (int_part.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        match frac_part {
            Some(f) => format!("{sign}{grouped}.{f}"),
            None => format!("{sign}{grouped}"),
        }
    }

    /// Format a number with thousands separators and a fixed number of decimals.
    ///
    /// e.g. `format_number(1234567.891, 2)` -> "1,234,567.89"
    pub fn format_number(value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return NOT_AVAILABLE.to_string();
        }
        let formatted = format!("{:.*}", decimals, value);
        // "-0.0" reads badly in a table
        let formatted = if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
            formatted[1..].to_string()
        } else {
            formatted
        };
        group_thousands(&formatted)
    }

    /// Format a percentage with one decimal place, e.g. `50.0%`.
    pub fn format_percent(value: f64) -> String {
        if !value.is_finite() {
            return NOT_AVAILABLE.to_string();
        }
        format!("{}%", format_number(value, 1))
    }

    /// Format a currency amount with two decimals, e.g. `$1,234.50`.
    pub fn format_currency(value: f64, symbol: &str) -> String {
        if !value.is_finite() {
            return NOT_AVAILABLE.to_string();
        }
        if value < 0.0 {
            format!("-{}{}", symbol, format_number(-value, 2))
        } else {
            format!("{}{}", symbol, format_number(value, 2))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_number_groups_thousands() {
            assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
            assert_eq!(format_number(999.0, 0), "999");
            assert_eq!(format_number(1000.0, 0), "1,000");
            assert_eq!(format_number(-45210.5, 1), "-45,210.5");
        }

        #[test]
        fn test_format_number_negative_zero() {
            assert_eq!(format_number(-0.01, 1), "0.0");
        }

        #[test]
        fn test_format_percent() {
            assert_eq!(format_percent(50.0), "50.0%");
            assert_eq!(format_percent(33.333), "33.3%");
            assert_eq!(format_percent(f64::NAN), "N/A");
        }

        #[test]
        fn test_format_currency() {
            assert_eq!(format_currency(1234.5, "$"), "$1,234.50");
            assert_eq!(format_currency(-20.0, "$"), "-$20.00");
        }

        #[test]
        fn test_round_to() {
            assert_eq!(round_to(33.3333, 1), 33.3);
            assert_eq!(round_to(66.66, 1), 66.7);
            assert_eq!(round_to(12.6675, 2), 12.67);
        }
    }
}

/// Parsing helpers for numbers arriving as display strings
pub mod parse {
    /// Parse a display-formatted number such as "1,234.5" or " 600 ".
    ///
    /// Returns `None` for empty, "N/A"-style or otherwise non-numeric input.
    pub fn parse_numeric(s: &str) -> Option<f64> {
        let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
        match cleaned.to_lowercase().as_str() {
            "" | "n/a" | "na" | "null" | "-" | "---" => None,
            other => other.parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::parse_numeric;

        #[test]
        fn test_parse_numeric() {
            assert_eq!(parse_numeric("1,234.5"), Some(1234.5));
            assert_eq!(parse_numeric(" 600 "), Some(600.0));
            assert_eq!(parse_numeric("N/A"), None);
            assert_eq!(parse_numeric(""), None);
            assert_eq!(parse_numeric("abc"), None);
        }
    }
}
