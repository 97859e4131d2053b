// ============================================================================
// Status Tracker
// Sticky per-instance overflow/underflow/inexact flags
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sticky status flags for a stored value.
///
/// Flags are OR-ed in by encode operations and survive until
/// [`reset`](Status::reset); no operation clears them implicitly. The
/// struct itself is the structured representation; its `Display` output
/// is the textual one (empty when no flag is raised).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Status {
    /// A code exceeded the format's upper bound.
    pub overflow: bool,
    /// A code fell below the format's lower bound.
    pub underflow: bool,
    /// A stored code does not decode back to the supplied value
    /// (precision loss under the active rounding policy).
    pub inexact: bool,
}

impl Status {
    /// All flags clear.
    pub const CLEAR: Self = Self {
        overflow: false,
        underflow: false,
        inexact: false,
    };

    /// True when any flag is raised.
    #[inline]
    pub const fn any(&self) -> bool {
        self.overflow || self.underflow || self.inexact
    }

    /// OR another operation's flags into this sticky set.
    #[inline]
    pub fn merge(&mut self, other: Status) {
        self.overflow |= other.overflow;
        self.underflow |= other.underflow;
        self.inexact |= other.inexact;
    }

    /// Clear every flag. The only path that lowers a raised flag.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::CLEAR;
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, raised) in [
            ("overflow", self.overflow),
            ("underflow", self.underflow),
            ("inexact", self.inexact),
        ] {
            if raised {
                writeln!(f, "\t{:<9}\t=\ttrue", name)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_clear() {
        let status = Status::default();
        assert!(!status.any());
        assert_eq!(status.to_string(), "");
    }

    #[test]
    fn test_merge_is_sticky() {
        let mut status = Status::default();
        status.merge(Status {
            overflow: true,
            ..Status::CLEAR
        });
        status.merge(Status::CLEAR); // an in-range operation later
        assert!(status.overflow);
        assert!(!status.underflow);
    }

    #[test]
    fn test_reset() {
        let mut status = Status {
            overflow: true,
            underflow: true,
            inexact: true,
        };
        status.reset();
        assert_eq!(status, Status::CLEAR);
    }

    #[test]
    fn test_display_lists_raised_flags() {
        let status = Status {
            overflow: true,
            underflow: false,
            inexact: true,
        };
        let text = status.to_string();
        assert!(text.contains("overflow"));
        assert!(text.contains("inexact"));
        assert!(!text.contains("underflow"));
    }
}
