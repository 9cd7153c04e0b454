/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by a relative epsilon so exact decimal midpoints (1.005) round
    // away from zero despite their binary representation.
    let factor = 10_u64.pow(decimals);
    let scaled_f = abs_value * factor as f64;
    let scaled = (scaled_f + f64::EPSILON * scaled_f).round() as u64;

    let integer_part = scaled / factor;
    let frac_part = scaled % factor;

    let grouped = group_thousands(&integer_part.to_string());
    let result = if decimals == 0 {
        grouped
    } else {
        format!(
            "{}.{:0width$}",
            grouped,
            frac_part,
            width = decimals as usize
        )
    };

    if negative && scaled != 0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a monetary amount as a USD string with two decimal places and
/// thousands separators.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.56),  "$1,234.56");
/// assert_eq!(format_currency(0.0),      "$0.00");
/// assert_eq!(format_currency(-9.99),    "$-9.99");
/// ```
pub fn format_currency(amount: f64) -> String {
    format!("${}", format_number(amount, 2))
}

/// Format a percentage with two decimals, e.g. `"12.34%"`.
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number(value, 2))
}

/// Format a signed percentage-point difference, e.g. `"+5.00%"` or `"-3.33%"`.
pub fn format_delta(value: f64) -> String {
    let body = format_percent(value);
    if body.starts_with('-') || format_number(value, 2) == "0.00" {
        body
    } else {
        format!("+{}", body)
    }
}

/// Short axis label: `950`, `1.2k`, `3.4M`.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_compact;
///
/// assert_eq!(format_compact(950.0), "950");
/// assert_eq!(format_compact(1_240.0), "1.2k");
/// assert_eq!(format_compact(-3_400_000.0), "-3.4M");
/// ```
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs >= 1_000_000.0 {
        format!("{}{:.1}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}{:.1}k", sign, abs / 1_000.0)
    } else {
        format!("{}{:.0}", sign, abs)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_no_thousands() {
        assert_eq!(format_number(123.456, 2), "123.46");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(1_234.5, 1), "1,234.5");
    }

    #[test]
    fn test_format_number_millions() {
        assert_eq!(format_number(1_234_567.0, 0), "1,234,567");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9_876.5, 1), "-9,876.5");
    }

    #[test]
    fn test_format_number_rounds_up() {
        assert_eq!(format_number(1.005, 2), "1.01");
    }

    #[test]
    fn test_format_number_carry_into_integer() {
        assert_eq!(format_number(999.999, 2), "1,000.00");
    }

    #[test]
    fn test_format_number_negative_rounding_to_zero_has_no_sign() {
        assert_eq!(format_number(-0.001, 2), "0.00");
    }

    // ── format_currency ──────────────────────────────────────────────────────

    #[test]
    fn test_format_currency_positive() {
        assert_eq!(format_currency(1_234.56), "$1,234.56");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-9.99), "$-9.99");
        assert_eq!(format_currency(-1_234.5), "$-1,234.50");
    }

    #[test]
    fn test_format_currency_large() {
        assert_eq!(format_currency(2_297_200.8603), "$2,297,200.86");
    }

    // ── format_percent / format_delta ────────────────────────────────────────

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(-10.0 / 300.0 * 100.0), "-3.33%");
        assert_eq!(format_percent(12.467), "12.47%");
    }

    #[test]
    fn test_format_delta_signs() {
        assert_eq!(format_delta(5.0), "+5.00%");
        assert_eq!(format_delta(-3.333), "-3.33%");
        assert_eq!(format_delta(0.0), "0.00%");
        assert_eq!(format_delta(-0.001), "0.00%");
    }

    // ── format_compact ───────────────────────────────────────────────────────

    #[test]
    fn test_format_compact_ranges() {
        assert_eq!(format_compact(0.0), "0");
        assert_eq!(format_compact(999.0), "999");
        assert_eq!(format_compact(741_999.8), "742.0k");
        assert_eq!(format_compact(2_297_200.0), "2.3M");
    }

    // ── group_thousands (via format_number) ──────────────────────────────────

    #[test]
    fn test_group_thousands_four_digits() {
        assert_eq!(format_number(1234.0, 0), "1,234");
    }

    #[test]
    fn test_group_thousands_six_digits() {
        assert_eq!(format_number(123_456.0, 0), "123,456");
    }
}
