//! Number formatting for display.

use num_format::{Locale, ToFormattedString};

/// Formats a population with en-US thousands separators.
///
/// ```
/// use wherein::core::format::format_population;
/// assert_eq!(format_population(1234567), "1,234,567");
/// ```
pub fn format_population(population: u64) -> String {
    population.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(format_population(0), "0");
    }

    #[test]
    fn test_below_a_thousand_has_no_separator() {
        assert_eq!(format_population(7), "7");
        assert_eq!(format_population(999), "999");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(format_population(1000), "1,000");
        assert_eq!(format_population(1234567), "1,234,567");
        assert_eq!(format_population(100_000), "100,000");
    }

    #[test]
    fn test_real_population() {
        assert_eq!(format_population(11_555_997), "11,555,997");
        assert_eq!(format_population(1_402_112_000), "1,402,112,000");
    }

    #[test]
    fn test_largest_value() {
        assert_eq!(format_population(u64::MAX), "18,446,744,073,709,551,615");
    }
}
