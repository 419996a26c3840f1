//! Numeric recognition for table cells.
//!
//! Two conversions drive everything here:
//!
//! * [`to_number`] converts a *whole* string (surrounding whitespace is
//!   ignored, an empty string is `0`, `0x`/`0o`/`0b` literals and signed
//!   `Infinity` are understood). Anything left over makes it `NaN`.
//! * [`parse_float`] reads the longest leading decimal number and ignores
//!   whatever follows (`"5abc"` is `5`, `"abc"` is `NaN`).
//!
//! The strict policy accepts a string only when both conversions agree on a
//! finite value, which rules out hex literals, blank strings and trailing
//! garbage. The loose policy only asks that the whole-string conversion is
//! not `NaN`.

use super::model::Cell;

/// Which numeric recogniser to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericPolicy {
    /// Canonical decimal numbers only. Used by statistics and `flatten`.
    Strict,
    /// Anything whole-string conversion does not turn into `NaN`.
    /// Used by column coercion.
    Loose,
}

impl NumericPolicy {
    /// Whether `cell` denotes a number under this policy.
    pub fn accepts(&self, cell: &Cell) -> bool {
        match (self, cell) {
            (NumericPolicy::Strict, Cell::Text(s)) => strict_text(s),
            // Magnitudes from 1e21 upwards print with an `e+` exponent.
            (NumericPolicy::Strict, Cell::Number(v)) => v.is_finite() && v.abs() < 1e21,
            (NumericPolicy::Loose, Cell::Text(s)) => !to_number(s).is_nan(),
            (NumericPolicy::Loose, Cell::Number(v)) => !v.is_nan(),
        }
    }

    /// The numeric value of `cell`, or `None` when the policy rejects it.
    ///
    /// Loose coercion takes the leading-prefix value, so an accepted `""`
    /// yields `NaN` and `"0x1A"` yields `0`.
    pub fn coerce(&self, cell: &Cell) -> Option<f64> {
        if !self.accepts(cell) {
            return None;
        }
        match (self, cell) {
            (_, Cell::Number(v)) => Some(*v),
            (NumericPolicy::Strict, Cell::Text(s)) => Some(to_number(s)),
            (NumericPolicy::Loose, Cell::Text(s)) => Some(parse_float(s)),
        }
    }
}

/// Strict validity check used throughout the statistics functions.
pub fn is_valid_number(cell: &Cell) -> bool {
    NumericPolicy::Strict.accepts(cell)
}

fn strict_text(s: &str) -> bool {
    if s.contains('+') || s.ends_with('.') {
        return false;
    }
    let value = to_number(s);
    value.is_finite() && value == parse_float(s)
}

/// JS white space and line terminators (no U+0085).
fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' ' | '\u{A0}' | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}' | '\u{2029}' | '\u{202F}' | '\u{205F}' | '\u{3000}' | '\u{FEFF}'
    )
}

/// Convert an entire string to a number; `NaN` when any part is not numeric.
pub fn to_number(s: &str) -> f64 {
    let t = s.trim_matches(is_space);
    if t.is_empty() {
        return 0.0;
    }
    if let Some(v) = radix_literal(t) {
        return v;
    }
    if let Some(v) = signed_infinity(t).filter(|(_, len)| *len == t.len()) {
        return v.0;
    }
    match decimal_prefix(t) {
        Some((len, canonical)) if len == t.len() => canonical.parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Parse the longest leading decimal number; `NaN` when there is none.
pub fn parse_float(s: &str) -> f64 {
    let t = s.trim_start_matches(is_space);
    if let Some((v, _)) = signed_infinity(t) {
        return v;
    }
    decimal_prefix(t)
        .and_then(|(_, canonical)| canonical.parse().ok())
        .unwrap_or(f64::NAN)
}

fn radix_literal(t: &str) -> Option<f64> {
    let bytes = t.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let mut value = 0.0_f64;
    for c in t[2..].chars() {
        match c.to_digit(radix) {
            Some(d) => value = value * f64::from(radix) + f64::from(d),
            None => return Some(f64::NAN),
        }
    }
    Some(value)
}

/// `Infinity` with an optional sign at the start of `t`, with the length consumed.
fn signed_infinity(t: &str) -> Option<(f64, usize)> {
    let (sign, rest) = match t.as_bytes().first() {
        Some(b'-') => (-1.0, &t[1..]),
        Some(b'+') => (1.0, &t[1..]),
        _ => (1.0, t),
    };
    rest.starts_with("Infinity")
        .then(|| (sign * f64::INFINITY, t.len() - rest.len() + "Infinity".len()))
}

/// Scan `sign? digits* ('.' digits*)? (e sign? digits+)?` with at least one
/// mantissa digit. Returns the consumed length and a normalised literal that
/// `str::parse::<f64>` always accepts.
fn decimal_prefix(t: &str) -> Option<(usize, String)> {
    let bytes = t.as_bytes();
    let mut i = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = &t[int_start..i];

    let mut frac_digits = "";
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = &t[frac_start..j];
        i = j;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut exponent = String::from("0");
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        let exp_negative = match bytes.get(j) {
            Some(b'-') => {
                j += 1;
                true
            }
            Some(b'+') => {
                j += 1;
                false
            }
            _ => false,
        };
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            exponent = format!("{}{}", if exp_negative { "-" } else { "" }, &t[exp_start..j]);
            i = j;
        }
    }

    let canonical = format!(
        "{}{}.{}e{}",
        if negative { "-" } else { "" },
        if int_digits.is_empty() { "0" } else { int_digits },
        if frac_digits.is_empty() { "0" } else { frac_digits },
        exponent,
    );
    Some((i, canonical))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict(s: &str) -> bool {
        is_valid_number(&Cell::from(s))
    }

    fn loose(s: &str) -> bool {
        NumericPolicy::Loose.accepts(&Cell::from(s))
    }

    #[test]
    fn strict_accepts_plain_decimals() {
        for s in ["42", "-3.14", "0", "-3.25", "0.5", ".5", "1e3", "007", " 5 "] {
            assert!(strict(s), "{s:?} should be valid");
        }
    }

    #[test]
    fn strict_rejects_plus_and_trailing_dot() {
        for s in ["+5", "5.", "1e+3", "5+", "-5."] {
            assert!(!strict(s), "{s:?} should be invalid");
        }
    }

    #[test]
    fn strict_rejects_non_canonical_text() {
        for s in ["", "   ", "NaN", "Infinity", "-Infinity", "5abc", "abc", "0x10", "1 2", "."] {
            assert!(!strict(s), "{s:?} should be invalid");
        }
    }

    #[test]
    fn strict_number_cells() {
        assert!(is_valid_number(&Cell::Number(12.5)));
        assert!(is_valid_number(&Cell::Number(1e-7)));
        assert!(!is_valid_number(&Cell::Number(1e21)));
        assert!(!is_valid_number(&Cell::Number(f64::NAN)));
        assert!(!is_valid_number(&Cell::Number(f64::INFINITY)));
    }

    #[test]
    fn loose_accepts_more_than_strict() {
        for s in ["+5", "5.", "", "  ", "0x1A", "Infinity", "1e+3"] {
            assert!(loose(s), "{s:?} should pass the loose test");
        }
        for s in ["abc", "5abc", "NaN", "1 2"] {
            assert!(!loose(s), "{s:?} should fail the loose test");
        }
    }

    #[test]
    fn loose_coercion_takes_prefix_value() {
        let policy = NumericPolicy::Loose;
        assert_eq!(policy.coerce(&Cell::from("+5")), Some(5.0));
        assert_eq!(policy.coerce(&Cell::from("0x1A")), Some(0.0));
        assert!(policy.coerce(&Cell::from("")).unwrap().is_nan());
        assert_eq!(policy.coerce(&Cell::from("abc")), None);
    }

    #[test]
    fn whole_string_conversion() {
        assert_eq!(to_number(""), 0.0);
        assert_eq!(to_number(" 12 "), 12.0);
        assert_eq!(to_number("0x1A"), 26.0);
        assert_eq!(to_number("0b101"), 5.0);
        assert_eq!(to_number("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(to_number("5."), 5.0);
        assert_eq!(to_number("2.5e-1"), 0.25);
        assert!(to_number("0x").is_nan());
        assert!(to_number("1e").is_nan());
        assert!(to_number("--1").is_nan());
    }

    #[test]
    fn only_js_white_space_is_trimmed() {
        assert_eq!(to_number("\u{A0}5\u{3000}"), 5.0);
        assert_eq!(to_number("\u{FEFF}\t7\r\n"), 7.0);
        assert!(to_number("\u{85}5").is_nan());
        assert!(parse_float("\u{85}5").is_nan());
        assert!(!strict("\u{85}5"));
        assert!(strict("\u{2003}5"));
    }

    #[test]
    fn prefix_conversion() {
        assert_eq!(parse_float("5abc"), 5.0);
        assert_eq!(parse_float("  -1.5e2xyz"), -150.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("Infinityx"), f64::INFINITY);
        assert_eq!(parse_float("0x10"), 0.0);
        assert!(parse_float("abc").is_nan());
        assert!(parse_float("-").is_nan());
    }
}
