//! Number formatting for the stats panel.

/// Group the digits of a whole number with commas.
fn group_thousands(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Whole part of `n` with thousands separators (`1234.9` → `1,234`).
pub fn format_count(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_count(-n));
    }
    group_thousands(n.floor() as u64)
}

/// Two decimal places with thousands separators (`1234.5` → `1,234.50`).
pub fn format_money(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_money(-n));
    }
    let cents = (n * 100.0).round() as u64;
    format!("{}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// A multiplier as a whole percentage (`1.2` → `120%`).
pub fn format_percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_groups_digits() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.9), "999");
        assert_eq!(format_count(1000.0), "1,000");
        assert_eq!(format_count(1_234_567.8), "1,234,567");
        assert_eq!(format_count(-2500.0), "-2,500");
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(0.1), "0.10");
        assert_eq!(format_money(10.006), "10.01");
        assert_eq!(format_money(2_000_000.0), "2,000,000.00");
        assert_eq!(format_money(-3.5), "-3.50");
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(format_percent(1.0), "100%");
        assert_eq!(format_percent(1.2), "120%");
        assert_eq!(format_percent(3.6), "360%");
    }
}
