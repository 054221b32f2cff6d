/// `$1,234,567` style rendering of a whole-dollar amount.
pub fn usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Truncates toward zero like the metric cards do.
pub fn usd_f64(amount: f64) -> String {
    usd(amount.max(0.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(usd(0), "$0");
        assert_eq!(usd(999), "$999");
        assert_eq!(usd(1_000), "$1,000");
        assert_eq!(usd(150_000), "$150,000");
        assert_eq!(usd(12_345_678), "$12,345,678");
    }

    #[test]
    fn fractional_amounts_truncate() {
        assert_eq!(usd_f64(111_000.9), "$111,000");
    }
}
