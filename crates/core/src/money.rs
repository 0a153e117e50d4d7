//! Currency display helpers.

/// Formats an amount as US dollars, e.g. `$1,234,567.89`.
///
/// The amount is rounded to cents the same way `{:.2}` rounds, and the
/// integer part is grouped by thousands. Negative amounts keep their sign
/// in front of the currency symbol (`-$12.50`).
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${amount}");
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut result = String::with_capacity(fixed.len() + whole.len() / 3 + 2);
    if amount < 0.0 && fixed != "0.00" {
        result.push('-');
    }
    result.push('$');
    result.push_str(&group_thousands(whole));
    result.push('.');
    result.push_str(cents);
    result
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(833.333_333), "$833.33");
        assert_eq!(format_usd(5322.419_961), "$5,322.42");
        assert_eq!(format_usd(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(-12.5), "-$12.50");
    }

    #[test]
    fn test_format_usd_tiny_negative() {
        // Rounds to zero, so there is nothing left to be negative.
        assert_eq!(format_usd(-0.001), "$0.00");
    }

    #[test]
    fn test_format_usd_non_finite() {
        assert_eq!(format_usd(f64::INFINITY), "$inf");
        assert_eq!(format_usd(f64::NAN), "$NaN");
    }
}
