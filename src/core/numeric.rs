// Platkit - core/numeric.rs
//
// Lenient numeric helpers. `parse_i64` follows scanf-style leniency: it
// never reports malformed input, it just stops reading.

/// Parse a leading decimal integer from `text`.
///
/// Leading whitespace and one optional sign are accepted; parsing stops at
/// the first non-digit. Text with no digits yields 0. Values past the `i64`
/// range saturate.
pub fn parse_i64(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(digit - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
    }
    value
}

/// Round to the nearest integer, halves going up (towards +infinity).
pub fn round_half_up(x: f64) -> i32 {
    (x + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_i64("0"), 0);
        assert_eq!(parse_i64("123456789012"), 123_456_789_012);
        assert_eq!(parse_i64("-42"), -42);
        assert_eq!(parse_i64("+17"), 17);
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!(parse_i64("  \t 99 bottles"), 99);
        assert_eq!(parse_i64("12abc"), 12);
        assert_eq!(parse_i64("abc"), 0);
        assert_eq!(parse_i64(""), 0);
        assert_eq!(parse_i64("-"), 0);
    }

    #[test]
    fn test_parse_saturates() {
        assert_eq!(parse_i64("9223372036854775807"), i64::MAX);
        assert_eq!(parse_i64("99999999999999999999"), i64::MAX);
        assert_eq!(parse_i64("-9223372036854775808"), i64::MIN);
        assert_eq!(parse_i64("-99999999999999999999"), i64::MIN);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
        assert_eq!(round_half_up(0.0), 0);
    }
}
