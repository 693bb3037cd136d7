//! Strict decimal parsing for result values.

/// Parse a decimal number, rejecting anything that is not plain decimal notation.
///
/// Accepted (after trimming surrounding whitespace): an optional sign, digits with an optional
/// fractional part (`3`, `3.`, `3.25`, `.25`), and an optional exponent (`1e3`, `2.5E-2`).
///
/// Rejected: empty strings, trailing garbage (`12abc`), textual sentinels (`NaN`, `inf`,
/// `Infinity`), hex, thousands separators, and values that overflow to infinity.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if !is_decimal_literal(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        frac_digits = count_digits(&bytes[i..]);
        i += frac_digits;
    }

    // A bare sign or a lone '.' is not a number.
    if int_digits + frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_digits = count_digits(&bytes[i..]);
        if exp_digits == 0 {
            return false;
        }
        i += exp_digits;
    }

    i == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::parse_decimal;

    #[test]
    fn accepts_plain_decimal_notation() {
        assert_eq!(parse_decimal("3"), Some(3.0));
        assert_eq!(parse_decimal("-4.5"), Some(-4.5));
        assert_eq!(parse_decimal("+0.25"), Some(0.25));
        assert_eq!(parse_decimal(".5"), Some(0.5));
        assert_eq!(parse_decimal("7."), Some(7.0));
        assert_eq!(parse_decimal("1e3"), Some(1000.0));
        assert_eq!(parse_decimal("2.5E-2"), Some(0.025));
        assert_eq!(parse_decimal("-1.5e+1"), Some(-15.0));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(parse_decimal(" 12.5 "), Some(12.5));
        assert_eq!(parse_decimal("\t8\n"), Some(8.0));
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
    }

    #[test]
    fn rejects_sentinels() {
        for raw in ["NaN", "nan", "inf", "-inf", "Infinity", "infinity"] {
            assert_eq!(parse_decimal(raw), None, "{raw}");
        }
    }

    #[test]
    fn rejects_malformed_numbers() {
        for raw in [
            "Eleven", "12abc", "1,5", "1 000", "0x1A", "+", "-", ".", "1e", "1e+", "e5", "--1",
            "1.2.3",
        ] {
            assert_eq!(parse_decimal(raw), None, "{raw}");
        }
    }

    #[test]
    fn rejects_overflow_to_infinity() {
        assert_eq!(parse_decimal("1e400"), None);
        assert_eq!(parse_decimal("-1e400"), None);
    }
}
