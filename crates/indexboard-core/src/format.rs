//! Display formatting for overview values.
//!
//! Absent values render as the `N/A` placeholder. Volume and market cap are
//! the only figures that pick up thousands separators; price fields print
//! their plain decimal form.

/// Placeholder for fields the provider did not supply.
pub const NOT_AVAILABLE: &str = "N/A";

/// Currency glyph the overview prefixes onto monetary fields.
///
/// Cosmetic label carried over from the dashboard's original presentation:
/// it appears for every index regardless of the index's actual trading
/// currency, including in front of the `N/A` placeholder.
pub const RUPEE_GLYPH: &str = "₹";

/// Insert thousands separators into a plain digit run.
fn group_digits(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, byte) in bytes.iter().enumerate() {
        if index > 0 && (bytes.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*byte as char);
    }
    grouped
}

/// `1234567` renders as `1,234,567`.
pub fn grouped_int(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Group the integer part and leave the fraction untouched, so
/// `1234567.891` renders as `1,234,567.891`.
pub fn grouped_float(value: f64) -> String {
    let rendered = value.to_string();
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };

    match unsigned.split_once('.') {
        Some((int_part, frac_part)) => {
            format!("{sign}{}.{frac_part}", group_digits(int_part))
        }
        None => format!("{sign}{}", group_digits(unsigned)),
    }
}

/// Plain decimal form without grouping, `N/A` when absent.
pub fn float_or_na(value: Option<f64>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => NOT_AVAILABLE.to_owned(),
    }
}

/// Grouped integer, `N/A` when absent.
pub fn grouped_int_or_na(value: Option<u64>) -> String {
    match value {
        Some(value) => grouped_int(value),
        None => NOT_AVAILABLE.to_owned(),
    }
}

/// Grouped decimal, `N/A` when absent.
pub fn grouped_float_or_na(value: Option<f64>) -> String {
    match value {
        Some(value) => grouped_float(value),
        None => NOT_AVAILABLE.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_group_every_three_digits() {
        assert_eq!(grouped_int(0), "0");
        assert_eq!(grouped_int(999), "999");
        assert_eq!(grouped_int(1_000), "1,000");
        assert_eq!(grouped_int(1_234_567), "1,234,567");
    }

    #[test]
    fn floats_group_only_the_integer_part() {
        assert_eq!(grouped_float(1_234_567.891), "1,234,567.891");
        assert_eq!(grouped_float(999.25), "999.25");
        assert_eq!(grouped_float(1_000_000.0), "1,000,000");
    }

    #[test]
    fn absent_values_render_as_placeholder() {
        assert_eq!(float_or_na(None), "N/A");
        assert_eq!(grouped_int_or_na(None), "N/A");
        assert_eq!(grouped_float_or_na(None), "N/A");
    }

    #[test]
    fn price_fields_stay_ungrouped() {
        assert_eq!(float_or_na(Some(3_850.5)), "3850.5");
        assert_eq!(float_or_na(Some(19_425.35)), "19425.35");
    }
}
