// ============================================================================
// Format Descriptor
// Immutable word-format descriptor: sign, integer/fractional bits, affine
// scale/bias transform
// ============================================================================

use crate::errors::{ConfigError, FxpResult, ParseError};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum word width in bits (sign + integer + fractional).
pub const N_WORD_MAX: u32 = 64;

/// Immutable fixed-point format descriptor.
///
/// A format is `{signed, n_int, n_frac, scale, bias}` with the derived
/// word width `n_word = n_int + n_frac + (1 if signed)`. The word width
/// is the sole authority on the raw-code range:
///
/// - signed: `[-2^(n_word-1), 2^(n_word-1) - 1]`
/// - unsigned: `[0, 2^n_word - 1]`
///
/// The real value of a raw code is `code * precision + bias` where
/// `precision = scale * 2^(-n_frac)`.
///
/// # Example
/// ```
/// use fxp_engine::format::Format;
///
/// let fmt = Format::new(true, 5, 2)?; // s8/2
/// assert_eq!(fmt.n_word(), 8);
/// assert_eq!(fmt.precision(), 0.25);
/// assert_eq!(fmt.upper(), 31.75);
/// assert_eq!(fmt.lower(), -32.0);
/// # Ok::<(), fxp_engine::errors::FxpError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Format {
    signed: bool,
    n_int: u32,
    n_frac: u32,
    scale: f64,
    bias: f64,
}

impl Format {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a format from its sign and integer/fractional bit counts.
    ///
    /// # Errors
    /// - `ZeroWord` if the derived word width is zero
    /// - `WordTooWide` if it exceeds [`N_WORD_MAX`]
    pub fn new(signed: bool, n_int: u32, n_frac: u32) -> FxpResult<Self> {
        let n_word = n_int + n_frac + signed as u32;
        if n_word == 0 {
            return Err(ConfigError::ZeroWord.into());
        }
        if n_word > N_WORD_MAX {
            return Err(ConfigError::WordTooWide { n_word }.into());
        }
        Ok(Self {
            signed,
            n_int,
            n_frac,
            scale: 1.0,
            bias: 0.0,
        })
    }

    /// Create a format from its total word width and fractional bits.
    ///
    /// `n_int` is derived from the sign-bit identity.
    ///
    /// # Errors
    /// `FracExceedsWord` if `n_frac` plus the sign bit does not fit.
    pub fn from_word(signed: bool, n_word: u32, n_frac: u32) -> FxpResult<Self> {
        if n_frac + signed as u32 > n_word {
            return Err(ConfigError::FracExceedsWord { n_frac, n_word }.into());
        }
        Self::new(signed, n_word - n_frac - signed as u32, n_frac)
    }

    /// Attach an affine scale factor.
    ///
    /// # Errors
    /// `NonPositiveScale` unless `scale` is finite and `> 0`.
    pub fn with_scale(mut self, scale: f64) -> FxpResult<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ConfigError::NonPositiveScale { scale }.into());
        }
        self.scale = scale;
        Ok(self)
    }

    /// Attach an affine bias.
    #[must_use]
    pub fn with_bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub const fn signed(&self) -> bool {
        self.signed
    }

    /// Integer bits (excludes the sign bit).
    #[inline]
    pub const fn n_int(&self) -> u32 {
        self.n_int
    }

    /// Fractional bits.
    #[inline]
    pub const fn n_frac(&self) -> u32 {
        self.n_frac
    }

    /// Total word width: `n_int + n_frac + sign`.
    #[inline]
    pub const fn n_word(&self) -> u32 {
        self.n_int + self.n_frac + self.signed as u32
    }

    #[inline]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub const fn bias(&self) -> f64 {
        self.bias
    }

    /// True when the format carries a non-identity affine transform.
    #[inline]
    pub fn is_scaled(&self) -> bool {
        self.scale != 1.0 || self.bias != 0.0
    }

    // ========================================================================
    // Derived range
    // ========================================================================

    /// Largest representable raw code.
    #[inline]
    pub const fn max_code(&self) -> i128 {
        if self.signed {
            (1i128 << (self.n_word() - 1)) - 1
        } else {
            (1i128 << self.n_word()) - 1
        }
    }

    /// Smallest representable raw code.
    #[inline]
    pub const fn min_code(&self) -> i128 {
        if self.signed {
            -(1i128 << (self.n_word() - 1))
        } else {
            0
        }
    }

    #[inline]
    pub const fn contains_code(&self, code: i128) -> bool {
        code >= self.min_code() && code <= self.max_code()
    }

    /// Real-valued step between adjacent codes: `scale * 2^(-n_frac)`.
    #[inline]
    pub fn precision(&self) -> f64 {
        self.scale * (self.n_frac as f64).exp2().recip()
    }

    /// Largest representable value: `bias + precision * max_code`.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.bias + self.precision() * self.max_code() as f64
    }

    /// Smallest representable value: `bias + precision * min_code`.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.bias + self.precision() * self.min_code() as f64
    }

    // ========================================================================
    // dtype string
    // ========================================================================

    /// Compact serialization: `fxp-<s|u><n_word>/<n_frac>[-complex]`.
    pub fn dtype(&self, complex: bool) -> String {
        format!(
            "fxp-{}{}/{}{}",
            if self.signed { 's' } else { 'u' },
            self.n_word(),
            self.n_frac,
            if complex { "-complex" } else { "" }
        )
    }

    /// Parse a `fxp-<s|u><n_word>/<n_frac>[-complex]` string back into a
    /// format plus the complex marker. Scale and bias are not part of the
    /// dtype and come back as the identity transform.
    pub fn parse_dtype(s: &str) -> FxpResult<(Self, bool)> {
        let body = s.strip_prefix("fxp-").ok_or(ParseError::InvalidNumber)?;
        let (body, complex) = match body.strip_suffix("-complex") {
            Some(rest) => (rest, true),
            None => (body, false),
        };
        let signed = match body.as_bytes().first() {
            Some(b's') => true,
            Some(b'u') => false,
            _ => return Err(ParseError::InvalidNumber.into()),
        };
        let (word_str, frac_str) = body[1..].split_once('/').ok_or(ParseError::InvalidNumber)?;
        let n_word: u32 = word_str.parse().map_err(|_| ParseError::InvalidNumber)?;
        let n_frac: u32 = frac_str.parse().map_err(|_| ParseError::InvalidNumber)?;
        Ok((Self::from_word(signed, n_word, n_frac)?, complex))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dtype(false))
    }
}
