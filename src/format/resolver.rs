// ============================================================================
// Format Resolver
// Completes caller constraints into a concrete Format, inferring the
// minimal word format that represents the input exactly
// ============================================================================

use crate::errors::{ConfigError, FxpResult};
use crate::format::descriptor::{Format, N_WORD_MAX};
use smallvec::SmallVec;

/// Partial format constraints supplied by a caller.
///
/// Any field may be left unset; [`resolve`](FormatSpec::resolve) fills
/// the rest by minimal-format inference over the input values, and
/// [`resolve_default`](FormatSpec::resolve_default) applies the
/// value-free defaults. Mutually inconsistent constraints fail with a
/// `ConfigError`.
///
/// # Example
/// ```
/// use fxp_engine::format::FormatSpec;
///
/// let fmt = FormatSpec::new().resolve(&[-0.5])?;
/// assert_eq!(fmt.dtype(false), "fxp-s2/1");
/// # Ok::<(), fxp_engine::errors::FxpError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FormatSpec {
    signed: Option<bool>,
    n_word: Option<u32>,
    n_int: Option<u32>,
    n_frac: Option<u32>,
    scale: Option<f64>,
    bias: Option<f64>,
}

impl FormatSpec {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn signed(mut self, signed: bool) -> Self {
        self.signed = Some(signed);
        self
    }

    #[must_use]
    pub fn n_word(mut self, n_word: u32) -> Self {
        self.n_word = Some(n_word);
        self
    }

    #[must_use]
    pub fn n_int(mut self, n_int: u32) -> Self {
        self.n_int = Some(n_int);
        self
    }

    #[must_use]
    pub fn n_frac(mut self, n_frac: u32) -> Self {
        self.n_frac = Some(n_frac);
        self
    }

    #[must_use]
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    #[must_use]
    pub fn bias(mut self, bias: f64) -> Self {
        self.bias = Some(bias);
        self
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve the smallest format simultaneously sufficient for every
    /// value in `values` (components of a complex input or elements of a
    /// container, flattened by the caller).
    ///
    /// Explicitly supplied sizes override the inferred quantities; the
    /// remaining one follows from `n_word = n_int + n_frac + sign`.
    pub fn resolve(&self, values: &[f64]) -> FxpResult<Format> {
        if values.is_empty() {
            return self.resolve_default();
        }

        let signed = self.signed.unwrap_or(true);
        let sign = signed as u32;
        let (n_word, n_int, n_frac) = self.completed_sizes(sign)?;

        // Fully constrained: nothing to infer.
        if let (Some(w), Some(f)) = (n_word, n_frac) {
            return self.affine(Format::from_word(signed, w, f)?);
        }

        // Inverse affine transform, componentwise.
        let scale = self.scale.unwrap_or(1.0);
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ConfigError::NonPositiveScale { scale }.into());
        }
        let bias = self.bias.unwrap_or(0.0);
        let raw: SmallVec<[f64; 8]> = values.iter().map(|v| (v - bias) / scale).collect();

        // Pass 1: union of fractional-bit requirements.
        let n_frac = match n_frac {
            Some(f) => f,
            None => {
                let cap = N_WORD_MAX - sign;
                raw.iter().map(|&r| frac_bits(r, cap)).max().unwrap_or(0)
            },
        };

        // Pass 2: union of magnitude-bit requirements over the exact codes.
        let factor = (n_frac as f64).exp2();
        let max_bits = raw
            .iter()
            .map(|&r| magnitude_bits((r * factor).round() as i128, signed))
            .max()
            .unwrap_or(0);
        let n_int = n_int.unwrap_or(max_bits.saturating_sub(n_frac));

        match n_word {
            // Explicit word width: keep the minimal fractional bits, the
            // integer field absorbs the remainder.
            Some(w) => {
                let f = n_frac.min(w.saturating_sub(sign + n_int));
                self.affine(Format::from_word(signed, w, f)?)
            },
            None => {
                let mut n_int = n_int;
                let mut n_frac = n_frac;
                // An all-zero unsigned input still needs one bit of word.
                if n_int + n_frac + sign == 0 {
                    n_int = 1;
                }
                // Word cap: the excess comes out of the fractional field.
                if n_int + n_frac + sign > N_WORD_MAX {
                    let kept = N_WORD_MAX.saturating_sub(sign + n_int);
                    tracing::warn!(
                        n_frac,
                        kept,
                        "fractional bits exceed the word limit, truncating"
                    );
                    n_frac = kept;
                }
                self.affine(Format::new(signed, n_int, n_frac)?)
            },
        }
    }

    /// Resolve without an input value.
    ///
    /// Defaults: nothing given resolves to `s16/15`; `n_word` alone
    /// allots one integer-or-sign bit (`n_frac = n_word - 1`); `n_frac`
    /// alone takes `n_word = n_frac + 1`. `n_int` alone is
    /// underspecified.
    pub fn resolve_default(&self) -> FxpResult<Format> {
        let signed = self.signed.unwrap_or(true);
        let sign = signed as u32;
        let fmt = match self.completed_sizes(sign)? {
            (Some(w), _, Some(f)) => Format::from_word(signed, w, f)?,
            (Some(w), None, None) => Format::from_word(signed, w, w.saturating_sub(1))?,
            (None, None, Some(f)) => Format::from_word(signed, f + 1, f)?,
            (None, Some(_), None) => return Err(ConfigError::Underspecified.into()),
            (None, None, None) => Format::from_word(signed, 16, 15)?,
            // completed_sizes never leaves exactly one of {n_int, n_frac}
            // unset when n_word is known
            _ => return Err(ConfigError::Underspecified.into()),
        };
        self.affine(fmt)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Fill in derivable sizes via `n_word = n_int + n_frac + sign`,
    /// rejecting contradictions.
    fn completed_sizes(&self, sign: u32) -> FxpResult<(Option<u32>, Option<u32>, Option<u32>)> {
        match (self.n_word, self.n_int, self.n_frac) {
            (Some(w), Some(i), Some(f)) => {
                let expected = i + f + sign;
                if w != expected {
                    return Err(ConfigError::WordConflict {
                        n_word: w,
                        expected,
                    }
                    .into());
                }
                Ok((Some(w), Some(i), Some(f)))
            },
            (None, Some(i), Some(f)) => Ok((Some(i + f + sign), Some(i), Some(f))),
            (Some(w), Some(i), None) => {
                if i + sign > w {
                    return Err(ConfigError::WordConflict {
                        n_word: w,
                        expected: i + sign,
                    }
                    .into());
                }
                Ok((Some(w), Some(i), Some(w - i - sign)))
            },
            (Some(w), None, Some(f)) => {
                if f + sign > w {
                    return Err(ConfigError::FracExceedsWord {
                        n_frac: f,
                        n_word: w,
                    }
                    .into());
                }
                Ok((Some(w), Some(w - f - sign), Some(f)))
            },
            incomplete => Ok(incomplete),
        }
    }

    fn affine(&self, fmt: Format) -> FxpResult<Format> {
        let fmt = match self.scale {
            Some(s) => fmt.with_scale(s)?,
            None => fmt,
        };
        Ok(match self.bias {
            Some(b) => fmt.with_bias(b),
            None => fmt,
        })
    }
}

/// Smallest `f` with `raw * 2^f` integral, capped.
///
/// Fixed-iteration doubling loop; hitting the cap means the value is not
/// an exact binary fraction at this depth and the nearest representable
/// value is accepted (the loss surfaces later as the sticky `inexact`
/// flag).
fn frac_bits(raw: f64, cap: u32) -> u32 {
    if !raw.is_finite() {
        return 0;
    }
    let mut x = raw;
    let mut f = 0;
    while x.fract() != 0.0 && f < cap {
        x *= 2.0;
        f += 1;
    }
    if x.fract() != 0.0 {
        tracing::warn!(
            value = raw,
            cap,
            "value is not an exact binary fraction, accepting approximation"
        );
    }
    f
}

/// Magnitude bits needed to store `code`, asymmetric for signed words so
/// that `-2^k` costs one bit less than `+2^k`.
fn magnitude_bits(code: i128, signed: bool) -> u32 {
    if code >= 0 {
        128 - code.leading_zeros()
    } else if signed {
        128 - (-(code + 1)).leading_zeros()
    } else {
        // negative input for an unsigned word: size by magnitude, the
        // range violation surfaces at encode time
        128 - (-code).leading_zeros()
    }
}
