//! Currency helpers for listing prices.
//!
//! Rents are whole rupees; there is no paise component anywhere in the system.

/// Format rupees with Indian digit grouping: the last three digits, then
/// groups of two (`₹1,00,000`).
pub fn format_inr(rupees: i64) -> String {
    let digits = rupees.unsigned_abs().to_string();
    let sign = if rupees < 0 { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("{}₹{}", sign, digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{}₹{},{}", sign, groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(950), "₹950");
        assert_eq!(format_inr(5000), "₹5,000");
        assert_eq!(format_inr(18000), "₹18,000");
        assert_eq!(format_inr(100000), "₹1,00,000");
        assert_eq!(format_inr(12345678), "₹1,23,45,678");
        assert_eq!(format_inr(-2500), "-₹2,500");
    }
}
