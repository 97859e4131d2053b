// ============================================================================
// Fxp Builder
// Construction-time constraints: sizing, affine transform, policies
// ============================================================================

use crate::errors::FxpResult;
use crate::format::{Format, FormatSpec};
use crate::quant::{OverflowPolicy, RoundingPolicy};
use crate::repr;
use crate::value::fxp::{parse_decimal, Fxp, Input};

/// Builder collecting the constraints a value is created under.
///
/// Sizing fields left unset are inferred from the input by
/// [`FormatSpec::resolve`]; `build_zero` applies the value-free
/// defaults instead. `like` copies a donor's format and policies and
/// excludes the sizing fields.
///
/// # Example
/// ```
/// use fxp_engine::prelude::*;
///
/// let x = Fxp::builder()
///     .signed(false)
///     .n_word(8)
///     .n_frac(4)
///     .overflow(OverflowPolicy::Wrap)
///     .build(3.25)?;
/// assert_eq!(x.dtype(), "fxp-u8/4");
/// # Ok::<(), fxp_engine::errors::FxpError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FxpBuilder<'a> {
    signed: Option<bool>,
    n_word: Option<u32>,
    n_int: Option<u32>,
    n_frac: Option<u32>,
    scale: Option<f64>,
    bias: Option<f64>,
    dtype: Option<&'a str>,
    rounding: Option<RoundingPolicy>,
    overflow: Option<OverflowPolicy>,
    like: Option<&'a Fxp>,
}

impl<'a> FxpBuilder<'a> {
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

    /// Real step size per code unit; must be finite and positive.
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

    /// Take the whole format from a serialized dtype string such as
    /// `fxp-s8/4`. A `-complex` marker forces complex storage even for
    /// a real input. Excludes the individual sizing fields.
    #[must_use]
    pub fn dtype(mut self, dtype: &'a str) -> Self {
        self.dtype = Some(dtype);
        self
    }

    #[must_use]
    pub fn rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = Some(rounding);
        self
    }

    #[must_use]
    pub fn overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = Some(overflow);
        self
    }

    /// Copy the donor's format, rounding and overflow policy. Explicit
    /// `rounding`/`overflow` calls still override; the donor's code and
    /// status are never copied.
    #[must_use]
    pub fn like(mut self, donor: &'a Fxp) -> Self {
        self.like = Some(donor);
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Resolve the format and encode `input` into a fresh value.
    pub fn build<'b>(self, input: impl Into<Input<'b>>) -> FxpResult<Fxp> {
        let input = input.into();

        if let Some(donor) = self.like {
            let mut fxp = Fxp::from_parts(
                *donor.format(),
                self.rounding.unwrap_or_else(|| donor.rounding()),
                self.overflow.unwrap_or_else(|| donor.overflow_policy()),
            );
            fxp.set(input)?;
            if donor.is_complex() {
                fxp.promote_to_complex();
            }
            return Ok(fxp);
        }

        let (format, force_complex) = self.resolve_format(&input)?;
        let mut fxp = Fxp::from_parts(
            format,
            self.rounding.unwrap_or_default(),
            self.overflow.unwrap_or_default(),
        );
        fxp.set(input)?;
        if force_complex {
            fxp.promote_to_complex();
        }
        Ok(fxp)
    }

    /// Resolve the format without an input value and encode zero.
    pub fn build_zero(self) -> FxpResult<Fxp> {
        if self.like.is_some() {
            return self.build(0.0);
        }
        let (format, force_complex) = match self.dtype {
            Some(d) => Format::parse_dtype(d)?,
            None => (self.spec().resolve_default()?, false),
        };
        let mut fxp = Fxp::from_parts(
            format,
            self.rounding.unwrap_or_default(),
            self.overflow.unwrap_or_default(),
        );
        fxp.set(0.0)?;
        if force_complex {
            fxp.promote_to_complex();
        }
        Ok(fxp)
    }

    fn resolve_format(&self, input: &Input<'_>) -> FxpResult<(Format, bool)> {
        if let Some(d) = self.dtype {
            return Format::parse_dtype(d);
        }
        let format = match input {
            Input::Real(v) => self.spec().resolve(&[*v])?,
            Input::Complex(c) => self.spec().resolve(&[c.re, c.im])?,
            Input::Text(s) => {
                if repr::has_radix_prefix(s) {
                    self.resolve_for_literal(s)?
                } else {
                    self.spec().resolve(&[parse_decimal(s)?])?
                }
            },
        };
        Ok((format, false))
    }

    /// A bit-pattern input fills unset sizes from its own shape: the
    /// digit count gives the word width, the radix point the fractional
    /// width. Sign interpretation defaults to signed.
    fn resolve_for_literal(&self, s: &str) -> FxpResult<Format> {
        let lit = repr::parse_literal(s)?;
        let mut spec = self.spec();
        if self.n_word.is_none() && (self.n_int.is_none() || self.n_frac.is_none()) {
            spec = spec.n_word(lit.n_word.max(1));
        }
        if self.n_frac.is_none() && self.n_int.is_none() {
            spec = spec.n_frac(lit.n_frac.unwrap_or(0));
        }
        spec.resolve_default()
    }

    fn spec(&self) -> FormatSpec {
        let mut spec = FormatSpec::new();
        if let Some(signed) = self.signed {
            spec = spec.signed(signed);
        }
        if let Some(w) = self.n_word {
            spec = spec.n_word(w);
        }
        if let Some(i) = self.n_int {
            spec = spec.n_int(i);
        }
        if let Some(f) = self.n_frac {
            spec = spec.n_frac(f);
        }
        if let Some(s) = self.scale {
            spec = spec.scale(s);
        }
        if let Some(b) = self.bias {
            spec = spec.bias(b);
        }
        spec
    }
}
