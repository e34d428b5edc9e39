/// Group the integer digits of a non-negative amount with commas
fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a currency value with two decimals and thousands separators
pub fn format_currency(value: f64) -> String {
    let cents_total = (value.abs() * 100.0).round() as u64;
    let whole = cents_total / 100;
    let cents = cents_total % 100;

    if value < 0.0 && cents_total > 0 {
        format!("-{}.{:02}", group_thousands(whole), cents)
    } else {
        format!("{}.{:02}", group_thousands(whole), cents)
    }
}

/// Format a signed difference, always showing the sign
pub fn format_delta(value: f64) -> String {
    let formatted = format_currency(value);
    if formatted.starts_with('-') || formatted == "0.00" {
        formatted
    } else {
        format!("+{}", formatted)
    }
}

/// Format a value that is already a percentage (50.0 -> "50.00%")
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Format a package or headcount quantity, dropping a zero fraction
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(1234.5), "1,234.50");
        assert_eq!(format_currency(1_234_567.891), "1,234,567.89");
        assert_eq!(format_currency(-1500.0), "-1,500.00");
    }

    #[test]
    fn test_format_currency_rounds_cents_into_whole() {
        assert_eq!(format_currency(999.999), "1,000.00");
        assert_eq!(format_currency(-0.001), "0.00");
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(150.0), "+150.00");
        assert_eq!(format_delta(-150.0), "-150.00");
        assert_eq!(format_delta(0.0), "0.00");
    }

    #[test]
    fn test_format_pct_and_quantity() {
        assert_eq!(format_pct(58.285714), "58.29%");
        assert_eq!(format_quantity(13.0), "13");
        assert_eq!(format_quantity(12.5), "12.50");
    }
}
