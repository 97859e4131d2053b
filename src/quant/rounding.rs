// ============================================================================
// Rounding Policy
// Closed set of rounding modes applied when a scaled value lands between
// two representable codes
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rounding policy applied during encoding.
///
/// The policy set is fixed and exhaustive; dispatch goes through a single
/// [`apply`](RoundingPolicy::apply) function rather than open-ended
/// virtual dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingPolicy {
    /// Round toward zero (drop the fractional remainder).
    #[default]
    Truncate,
    /// Round toward negative infinity.
    Floor,
    /// Round toward positive infinity.
    Ceiling,
    /// Round toward zero. Alias behavior of `Truncate`, kept as a
    /// distinct mode for parity with hardware-modeling conventions.
    Fix,
    /// Round to nearest; ties go away from zero (not banker's rounding).
    Nearest,
}

impl RoundingPolicy {
    /// Round an unrounded (fractional) code to an integral code.
    ///
    /// A value already on the code grid is unchanged under every mode.
    #[inline]
    pub fn apply(self, unrounded: f64) -> f64 {
        match self {
            RoundingPolicy::Truncate | RoundingPolicy::Fix => unrounded.trunc(),
            RoundingPolicy::Floor => unrounded.floor(),
            RoundingPolicy::Ceiling => unrounded.ceil(),
            // f64::round is half-away-from-zero, exactly the tie rule here
            RoundingPolicy::Nearest => unrounded.round(),
        }
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundingPolicy::Truncate => "trunc",
            RoundingPolicy::Floor => "floor",
            RoundingPolicy::Ceiling => "ceil",
            RoundingPolicy::Fix => "fix",
            RoundingPolicy::Nearest => "nearest",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RoundingPolicy::*;

    #[test]
    fn test_on_grid_unchanged() {
        for policy in [Truncate, Floor, Ceiling, Fix, Nearest] {
            assert_eq!(policy.apply(5.0), 5.0, "{} moved an on-grid code", policy);
            assert_eq!(policy.apply(-5.0), -5.0);
            assert_eq!(policy.apply(0.0), 0.0);
        }
    }

    #[test]
    fn test_between_grid_points() {
        // 1.26 at 2 fractional bits -> unrounded code 5.04
        assert_eq!(Truncate.apply(5.04), 5.0);
        assert_eq!(Fix.apply(5.04), 5.0);
        assert_eq!(Floor.apply(5.04), 5.0);
        assert_eq!(Ceiling.apply(5.04), 6.0);
        assert_eq!(Nearest.apply(5.04), 5.0);

        assert_eq!(Truncate.apply(-5.04), -5.0);
        assert_eq!(Floor.apply(-5.04), -6.0);
        assert_eq!(Ceiling.apply(-5.04), -5.0);
    }

    #[test]
    fn test_nearest_ties_away_from_zero() {
        assert_eq!(Nearest.apply(2.5), 3.0);
        assert_eq!(Nearest.apply(-2.5), -3.0);
        assert_eq!(Nearest.apply(2.4), 2.0);
        assert_eq!(Nearest.apply(-2.4), -2.0);
    }

    #[test]
    fn test_truncate_symmetry() {
        for x in [0.3, 1.7, 5.04, 123.999] {
            assert_eq!(Truncate.apply(-x), -Truncate.apply(x));
            assert_eq!(Fix.apply(-x), -Fix.apply(x));
        }
    }
}
