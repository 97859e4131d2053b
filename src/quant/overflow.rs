// ============================================================================
// Overflow Guard
// Clamps or wraps an out-of-range code and reports which bound was crossed
// ============================================================================

use crate::format::Format;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Policy for codes that fall outside the format's representable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OverflowPolicy {
    /// Clamp to the nearest representable bound.
    #[default]
    Saturate,
    /// Reduce modulo the representable span, re-entering at the
    /// opposite bound.
    Wrap,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Saturate => write!(f, "saturate"),
            OverflowPolicy::Wrap => write!(f, "wrap"),
        }
    }
}

/// Force an already-rounded code into the format's range.
///
/// Returns the final code plus the per-operation `(overflow, underflow)`
/// pair. The caller ORs these into the sticky status; they are never
/// cleared here.
#[inline]
pub fn clamp_or_wrap(code: i128, format: &Format, policy: OverflowPolicy) -> (i128, bool, bool) {
    let min = format.min_code();
    let max = format.max_code();

    let overflow = code > max;
    let underflow = code < min;
    if !overflow && !underflow {
        return (code, false, false);
    }

    let final_code = match policy {
        OverflowPolicy::Saturate => code.clamp(min, max),
        OverflowPolicy::Wrap => {
            // span is 2^n_word, so the wrapping subtraction stays exact
            // modulo the span even for codes near the i128 bounds
            let span = max - min + 1;
            code.wrapping_sub(min).rem_euclid(span) + min
        },
    };
    (final_code, overflow, underflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s8_2() -> Format {
        Format::from_word(true, 8, 2).unwrap()
    }

    fn u4_2() -> Format {
        Format::from_word(false, 4, 2).unwrap()
    }

    #[test]
    fn test_in_range_untouched() {
        let fmt = s8_2();
        for code in [-128, -1, 0, 1, 127] {
            assert_eq!(
                clamp_or_wrap(code, &fmt, OverflowPolicy::Saturate),
                (code, false, false)
            );
            assert_eq!(
                clamp_or_wrap(code, &fmt, OverflowPolicy::Wrap),
                (code, false, false)
            );
        }
    }

    #[test]
    fn test_saturate() {
        let fmt = s8_2();
        // 32.00 at step 0.25 -> code 128, one past max
        assert_eq!(
            clamp_or_wrap(128, &fmt, OverflowPolicy::Saturate),
            (127, true, false)
        );
        // -32.25 -> code -129, one below min
        assert_eq!(
            clamp_or_wrap(-129, &fmt, OverflowPolicy::Saturate),
            (-128, false, true)
        );
    }

    #[test]
    fn test_wrap_unsigned() {
        let fmt = u4_2();
        // 4.0 -> code 16, wraps to 0.0
        assert_eq!(
            clamp_or_wrap(16, &fmt, OverflowPolicy::Wrap),
            (0, true, false)
        );
        // -0.25 -> code -1, wraps to 15 (3.75)
        assert_eq!(
            clamp_or_wrap(-1, &fmt, OverflowPolicy::Wrap),
            (15, false, true)
        );
    }

    #[test]
    fn test_wrap_signed() {
        let fmt = s8_2();
        assert_eq!(
            clamp_or_wrap(128, &fmt, OverflowPolicy::Wrap),
            (-128, true, false)
        );
        assert_eq!(
            clamp_or_wrap(-129, &fmt, OverflowPolicy::Wrap),
            (127, false, true)
        );
        // multiple spans out
        assert_eq!(
            clamp_or_wrap(256 + 5, &fmt, OverflowPolicy::Wrap),
            (5, true, false)
        );
    }
}
