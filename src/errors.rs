// ============================================================================
// Errors
// Error types for format resolution and literal parsing
// ============================================================================

use std::fmt;

/// Errors raised by contradictory or insufficient construction constraints.
///
/// These are fatal to the construction call and are never retried.
/// Overflow and underflow are *not* errors: they are handled by the
/// configured [`OverflowPolicy`](crate::quant::OverflowPolicy) and
/// surfaced through sticky status flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// `n_word` disagrees with `n_int + n_frac + sign`
    WordConflict { n_word: u32, expected: u32 },
    /// `n_frac` (plus the sign bit) does not fit in `n_word`
    FracExceedsWord { n_frac: u32, n_word: u32 },
    /// Requested word size exceeds the 64-bit limit
    WordTooWide { n_word: u32 },
    /// Resolved word size is zero bits
    ZeroWord,
    /// Affine scale must be strictly positive
    NonPositiveScale { scale: f64 },
    /// Constraints are insufficient to determine a format
    Underspecified,
    /// Rendering base outside the supported 2..=36 range
    BadBase { base: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::WordConflict { n_word, expected } => write!(
                f,
                "word size conflict: n_word = {} but n_int + n_frac + sign = {}",
                n_word, expected
            ),
            ConfigError::FracExceedsWord { n_frac, n_word } => write!(
                f,
                "fractional bits do not fit: n_frac = {} with n_word = {}",
                n_frac, n_word
            ),
            ConfigError::WordTooWide { n_word } => {
                write!(f, "word size {} exceeds the 64-bit limit", n_word)
            },
            ConfigError::ZeroWord => write!(f, "format resolves to a zero-bit word"),
            ConfigError::NonPositiveScale { scale } => {
                write!(f, "scale must be strictly positive, got {}", scale)
            },
            ConfigError::Underspecified => {
                write!(f, "constraints are insufficient to determine a format")
            },
            ConfigError::BadBase { base } => {
                write!(f, "base {} outside the supported range 2..=36", base)
            },
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised by malformed literal string input.
///
/// A parse failure fails the single encode call and leaves the prior
/// stored code and status untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Empty input string
    Empty,
    /// Digits present but no `0b`/`0x` prefix and not a decimal number
    InvalidNumber,
    /// Digit invalid for the literal's base
    InvalidDigit { digit: char, base: u32 },
    /// Literal carries more bits than a 64-bit word can hold
    TooWide { bits: u32 },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty literal"),
            ParseError::InvalidNumber => write!(f, "could not parse value as a number"),
            ParseError::InvalidDigit { digit, base } => {
                write!(f, "invalid digit '{}' for base {}", digit, base)
            },
            ParseError::TooWide { bits } => {
                write!(f, "literal width {} bits exceeds the 64-bit limit", bits)
            },
        }
    }
}

impl std::error::Error for ParseError {}

/// Top-level error type for the quantization engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FxpError {
    Config(ConfigError),
    Parse(ParseError),
}

impl fmt::Display for FxpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FxpError::Config(e) => write!(f, "configuration error: {}", e),
            FxpError::Parse(e) => write!(f, "parse error: {}", e),
        }
    }
}

impl std::error::Error for FxpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FxpError::Config(e) => Some(e),
            FxpError::Parse(e) => Some(e),
        }
    }
}

impl From<ConfigError> for FxpError {
    fn from(e: ConfigError) -> Self {
        FxpError::Config(e)
    }
}

impl From<ParseError> for FxpError {
    fn from(e: ParseError) -> Self {
        FxpError::Parse(e)
    }
}

/// Result type alias for engine operations
pub type FxpResult<T> = Result<T, FxpError>;
