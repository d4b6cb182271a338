//! Decimal amount helpers
//!
//! Line amounts are kept as strings so they can be edited as typed; these
//! helpers convert them to numbers for arithmetic and back to fixed
//! two-decimal strings for the balancing line.

use std::fmt;

/// Absolute tolerance (one cent) used to decide whether a line set balances
pub const BALANCE_TOLERANCE: f64 = 0.01;

/// Parse the leading decimal number of an amount string
///
/// Behaves like a lenient form-field parse: leading whitespace is skipped,
/// the longest numeric prefix is used ("12.5abc" is 12.5), and anything
/// without digits, or anything that is not finite, is 0.
pub fn parse_amount(s: &str) -> f64 {
    let bytes = s.trim_start().as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &bytes[int_start..pos];

    let mut frac_digits: &[u8] = &[];
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &bytes[frac_start..end];
        pos = end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return 0.0;
    }

    // Exponent only counts when at least one digit follows it
    let mut exponent: &[u8] = &[];
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let exp_start = pos + 1;
        let mut end = exp_start;
        if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            exponent = &bytes[exp_start..end];
        }
    }

    let mut normalized = String::with_capacity(int_digits.len() + frac_digits.len() + 8);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if int_digits.is_empty() {
        "0"
    } else {
        ascii(int_digits)
    });
    normalized.push('.');
    normalized.push_str(if frac_digits.is_empty() {
        "0"
    } else {
        ascii(frac_digits)
    });
    if !exponent.is_empty() {
        normalized.push('e');
        normalized.push_str(ascii(exponent));
    }

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

fn ascii(bytes: &[u8]) -> &str {
    // Slices come from a &str and only ever cover ASCII digits and signs
    std::str::from_utf8(bytes).unwrap_or("0")
}

/// Format an amount with exactly two decimal places
///
/// Values that round to zero are written as "0.00", never "-0.00".
pub fn format_amount(value: f64) -> String {
    let value = if value.abs() < 0.005 { 0.0 } else { value };
    format!("{:.2}", value)
}

/// Format an amount for display with a currency symbol
pub fn format_with_symbol(value: f64, symbol: &str) -> String {
    let formatted = format_amount(value.abs());
    if value <= -0.005 {
        format!("-{}{}", symbol, formatted)
    } else {
        format!("{}{}", symbol, formatted)
    }
}

/// Strictly parse a user-supplied total ("120", "$1,250.50", "-15.25")
///
/// Unlike `parse_amount`, this rejects anything that is not a complete,
/// finite number. Used for invoice totals entered on the command line.
pub fn parse_total(s: &str) -> Result<f64, AmountParseError> {
    let trimmed = s.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(stripped) => (true, stripped),
        None => (false, trimmed),
    };
    let rest = rest.strip_prefix('$').unwrap_or(rest);
    let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

    if cleaned.is_empty() || cleaned.starts_with(['-', '+']) {
        return Err(AmountParseError::InvalidFormat(s.to_string()));
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| AmountParseError::InvalidFormat(s.to_string()))?;
    if !value.is_finite() {
        return Err(AmountParseError::InvalidFormat(s.to_string()));
    }

    Ok(if negative { -value } else { value })
}

/// Error type for strict amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    InvalidFormat(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_amount("100"), 100.0);
        assert_eq!(parse_amount("12.5"), 12.5);
        assert_eq!(parse_amount("-30.25"), -30.25);
        assert_eq!(parse_amount("+7"), 7.0);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("5."), 5.0);
        assert_eq!(parse_amount("  42  "), 42.0);
        assert_eq!(parse_amount("1e2"), 100.0);
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
        assert_eq!(parse_amount("."), 0.0);
        assert_eq!(parse_amount("$10"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
        assert_eq!(parse_amount("1e999"), 0.0);
    }

    #[test]
    fn test_parse_uses_numeric_prefix() {
        assert_eq!(parse_amount("12.5abc"), 12.5);
        assert_eq!(parse_amount("1,000"), 1.0);
        assert_eq!(parse_amount("3e"), 3.0);
        assert_eq!(parse_amount("3e-"), 3.0);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(70.0), "70.00");
        assert_eq!(format_amount(0.1 + 0.2), "0.30");
        assert_eq!(format_amount(-12.5), "-12.50");
        assert_eq!(format_amount(-0.0), "0.00");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(format_with_symbol(1050.5, "$"), "$1050.50");
        assert_eq!(format_with_symbol(-10.5, "$"), "-$10.50");
        assert_eq!(format_with_symbol(0.0, "€"), "€0.00");
    }

    #[test]
    fn test_parse_total() {
        assert_eq!(parse_total("120").unwrap(), 120.0);
        assert_eq!(parse_total("$1,250.50").unwrap(), 1250.5);
        assert_eq!(parse_total("-15.25").unwrap(), -15.25);
        assert!(parse_total("").is_err());
        assert!(parse_total("abc").is_err());
        assert!(parse_total("12abc").is_err());
        assert!(parse_total("--5").is_err());
        assert!(parse_total("inf").is_err());
    }
}
