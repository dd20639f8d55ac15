//! Input parsing and paging arithmetic for the console.

use rust_decimal::Decimal;

/// Entered at any prompt to abandon the current operation.
pub const CANCEL: &str = "0";

/// Number of pages for `total` rows, never less than one.
pub fn total_pages(total: i64, page_size: u32) -> u32 {
    let size = i64::from(page_size.max(1));
    let pages = (total.max(0) + size - 1) / size;
    pages.max(1) as u32
}

pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

pub fn page_offset(page: u32, page_size: u32) -> u32 {
    page.saturating_sub(1) * page_size
}

/// 1-based row number typed by the user.
pub fn parse_position(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

/// Absolute position of an on-screen row. `None` when the row cannot exist.
pub fn absolute_position(offset: i64, row: i64) -> Option<i64> {
    if row < 1 {
        return None;
    }
    offset.checked_add(row)
}

/// Decimal price, `,` accepted as the separator.
pub fn parse_price(input: &str) -> Result<Decimal, &'static str> {
    let price: Decimal = input
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| "invalid price")?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err("price must not be negative");
    }
    Ok(price)
}

pub fn is_confirmation(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "yes" | "y" | "да")
}

/// Shorten to `max` characters, ending in "..." when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_round_up_and_never_hit_zero() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn page_is_clamped_into_range() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(7, 3), 3);
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(3, 10), 20);
    }

    #[test]
    fn positions_parse_signed_integers() {
        assert_eq!(parse_position(" 4 "), Some(4));
        assert_eq!(parse_position("-1"), Some(-1));
        assert_eq!(parse_position("two"), None);
    }

    #[test]
    fn row_numbers_are_relative_to_the_page() {
        assert_eq!(absolute_position(0, 3), Some(3));
        assert_eq!(absolute_position(10, 4), Some(14));
        assert_eq!(absolute_position(10, 0), None);
        assert_eq!(absolute_position(10, -2), None);
        assert_eq!(absolute_position(10, i64::MAX), None);
        assert_eq!(absolute_position(0, i64::MAX), Some(i64::MAX));
    }

    #[test]
    fn prices() {
        assert_eq!(parse_price("15000"), Ok(Decimal::from(15000)));
        assert_eq!(parse_price("99,50"), Ok(Decimal::new(9950, 2)));
        assert_eq!(parse_price("0"), Ok(Decimal::ZERO));
        assert!(parse_price("-5").is_err());
        assert!(parse_price("abc").is_err());
        assert!(parse_price("inf").is_err());
        assert!(parse_price("NaN").is_err());
    }

    #[test]
    fn confirmation_words() {
        assert!(is_confirmation("Да"));
        assert!(is_confirmation("yes"));
        assert!(!is_confirmation("нет"));
        assert!(!is_confirmation(""));
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate("Сочи", 30), "Сочи");
        let long = "Романтический тур в период белых ночей";
        let cut = truncate(long, 30);
        assert_eq!(cut.chars().count(), 30);
        assert!(cut.ends_with("..."));
    }
}
