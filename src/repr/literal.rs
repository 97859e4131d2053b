// ============================================================================
// Bit-Pattern Literals
// Parsing of 0b/0x strings into raw code patterns
// ============================================================================

use crate::errors::{FxpResult, ParseError};
use crate::format::N_WORD_MAX;

/// A parsed `0b`/`0x` literal: the raw bit pattern, the width its digits
/// cover and the fractional-bit count implied by an optional radix point.
///
/// The pattern is unsigned here; two's-complement interpretation depends
/// on the resolving format and happens in the value layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    pub bits: u128,
    pub n_word: u32,
    /// `Some(f)` when the literal carried a radix point `f` bits from
    /// the right (`0b0110.01` has `f = 2`, hex digits count 4 bits each).
    pub n_frac: Option<u32>,
}

/// True when the trimmed input starts with a `0b`/`0x` radix prefix and
/// should be parsed as a raw bit pattern rather than a decimal number.
#[inline]
pub fn has_radix_prefix(s: &str) -> bool {
    let t = s.trim();
    t.starts_with("0b") || t.starts_with("0x")
}

/// Parse a `0b`/`0x` literal.
///
/// # Errors
/// - `Empty` on a missing digit string
/// - `InvalidNumber` if no radix prefix is present
/// - `InvalidDigit` on digits outside the base or a repeated point
/// - `TooWide` when the digits cover more than 64 bits
pub fn parse_literal(s: &str) -> FxpResult<Literal> {
    let t = s.trim();
    if t.is_empty() {
        return Err(ParseError::Empty.into());
    }

    let (digits, bits_per_digit, base) = if let Some(rest) = t.strip_prefix("0b") {
        (rest, 1u32, 2u32)
    } else if let Some(rest) = t.strip_prefix("0x") {
        (rest, 4u32, 16u32)
    } else {
        return Err(ParseError::InvalidNumber.into());
    };

    let mut bits: u128 = 0;
    let mut n_word = 0u32;
    let mut frac: Option<u32> = None;

    for ch in digits.chars() {
        if ch == '.' {
            if frac.is_some() {
                return Err(ParseError::InvalidDigit { digit: ch, base }.into());
            }
            frac = Some(0);
            continue;
        }
        let digit = ch
            .to_digit(base)
            .ok_or(ParseError::InvalidDigit { digit: ch, base })?;
        n_word += bits_per_digit;
        if n_word > N_WORD_MAX {
            return Err(ParseError::TooWide { bits: n_word }.into());
        }
        bits = (bits << bits_per_digit) | digit as u128;
        if let Some(f) = frac.as_mut() {
            *f += bits_per_digit;
        }
    }

    if n_word == 0 {
        return Err(ParseError::Empty.into());
    }
    Ok(Literal {
        bits,
        n_word,
        n_frac: frac,
    })
}

/// Interpret a bit pattern as a raw code at `n_word` bits, taking the
/// top bit as the sign under two's complement when `signed`.
#[inline]
pub fn twos_complement(bits: u128, n_word: u32, signed: bool) -> i128 {
    if signed && n_word > 0 && bits >> (n_word - 1) & 1 == 1 {
        bits as i128 - (1i128 << n_word)
    } else {
        bits as i128
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_literal() {
        let lit = parse_literal("0b1100").unwrap();
        assert_eq!(lit.bits, 0b1100);
        assert_eq!(lit.n_word, 4);
        assert_eq!(lit.n_frac, None);
        // signed at its own width: two's complement -4
        assert_eq!(twos_complement(lit.bits, lit.n_word, true), -4);
        assert_eq!(twos_complement(lit.bits, lit.n_word, false), 12);
    }

    #[test]
    fn test_fractional_binary_literal() {
        let lit = parse_literal("0b11.00").unwrap();
        assert_eq!(lit.bits, 0b1100);
        assert_eq!(lit.n_word, 4);
        assert_eq!(lit.n_frac, Some(2));

        let lit = parse_literal("0b0110.01").unwrap();
        assert_eq!(lit.bits, 0b011001);
        assert_eq!(lit.n_frac, Some(2));
    }

    #[test]
    fn test_hex_literal() {
        let lit = parse_literal("0x8c").unwrap();
        assert_eq!(lit.bits, 0x8c);
        assert_eq!(lit.n_word, 8);
        assert_eq!(twos_complement(lit.bits, lit.n_word, true), -116);

        let lit = parse_literal("0x1.8").unwrap();
        assert_eq!(lit.bits, 0x18);
        assert_eq!(lit.n_frac, Some(4));
    }

    #[test]
    fn test_malformed_literals() {
        assert!(parse_literal("").is_err());
        assert!(parse_literal("0b").is_err());
        assert!(parse_literal("1100").is_err());
        assert!(parse_literal("0b102").is_err());
        assert!(parse_literal("0xfg").is_err());
        assert!(parse_literal("0b1.1.0").is_err());
        // 17 hex digits cover 68 bits
        assert!(parse_literal("0x10000000000000000").is_err());
    }

    #[test]
    fn test_full_width_literal() {
        let lit = parse_literal("0xffffffffffffffff").unwrap();
        assert_eq!(lit.n_word, 64);
        assert_eq!(twos_complement(lit.bits, lit.n_word, true), -1);
        assert_eq!(twos_complement(lit.bits, lit.n_word, false), u64::MAX as i128);
    }
}
