// ============================================================================
// Fxp Value Cell
// A stored (Format, code) pair with sticky status and fixed policies
// ============================================================================

use crate::errors::{FxpResult, ParseError};
use crate::format::Format;
use crate::quant::{
    clamp_or_wrap, decode, encode, OverflowPolicy, Quantized, RoundingPolicy, Status,
};
use crate::repr;
use crate::value::builder::FxpBuilder;
use num_complex::Complex64;
use std::fmt;

/// Raw storage of a quantized value: one code, or an independently
/// quantized real/imaginary pair under the same format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeWord {
    Real(i128),
    Complex { re: i128, im: i128 },
}

/// Input accepted by construction and re-encode calls.
///
/// Text starting `0b`/`0x` is a raw bit pattern under the resolving
/// format; any other text parses as a decimal number at the API
/// boundary and encodes like a plain value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input<'a> {
    Real(f64),
    Complex(Complex64),
    Text(&'a str),
}

impl From<f64> for Input<'static> {
    fn from(v: f64) -> Self {
        Input::Real(v)
    }
}

impl From<i64> for Input<'static> {
    fn from(v: i64) -> Self {
        Input::Real(v as f64)
    }
}

impl From<Complex64> for Input<'static> {
    fn from(v: Complex64) -> Self {
        Input::Complex(v)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        Input::Text(s)
    }
}

/// A fixed-point value: an immutable [`Format`], the stored raw code(s),
/// sticky status flags and the rounding/overflow policies fixed at
/// construction.
///
/// The format never changes implicitly after construction; re-encoding
/// a new input re-quantizes into the same storage. Deriving a value
/// with another instance's format goes through [`Fxp::like`].
///
/// # Example
/// ```
/// use fxp_engine::prelude::*;
///
/// let mut x = Fxp::builder()
///     .signed(true)
///     .n_word(8)
///     .n_frac(2)
///     .rounding(RoundingPolicy::Nearest)
///     .build(4.25)?;
/// assert_eq!(x.to_f64(), 4.25);
/// assert_eq!(x.dtype(), "fxp-s8/2");
///
/// x.set(1.26)?; // re-quantize in place
/// assert_eq!(x.to_f64(), 1.25);
/// # Ok::<(), fxp_engine::errors::FxpError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Fxp {
    format: Format,
    code: CodeWord,
    status: Status,
    rounding: RoundingPolicy,
    overflow: OverflowPolicy,
}

impl Fxp {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Start a builder for explicit constraints.
    pub fn builder<'a>() -> FxpBuilder<'a> {
        FxpBuilder::new()
    }

    /// Encode `input` under the minimal inferred format.
    pub fn new<'a>(input: impl Into<Input<'a>>) -> FxpResult<Self> {
        FxpBuilder::new().build(input)
    }

    /// Zero-valued cell under an already-resolved format.
    pub fn with_format(format: Format) -> Self {
        let mut fxp = Self {
            format,
            code: CodeWord::Real(0),
            status: Status::CLEAR,
            rounding: RoundingPolicy::default(),
            overflow: OverflowPolicy::default(),
        };
        fxp.encode_real(0.0);
        fxp
    }

    /// Derive an independent value with the donor's format and policies:
    /// same signedness and widths, fresh code and status.
    pub fn like<'a>(donor: &Fxp, input: impl Into<Input<'a>>) -> FxpResult<Self> {
        FxpBuilder::new().like(donor).build(input)
    }

    pub(crate) fn from_parts(
        format: Format,
        rounding: RoundingPolicy,
        overflow: OverflowPolicy,
    ) -> Self {
        Self {
            format,
            code: CodeWord::Real(0),
            status: Status::CLEAR,
            rounding,
            overflow,
        }
    }

    // ========================================================================
    // Re-encode
    // ========================================================================

    /// Re-quantize a new input into the existing format, in place.
    ///
    /// Overflow and underflow never fail the call; they clamp or wrap
    /// per the configured policy and raise sticky flags. A malformed
    /// text input fails with `ParseError` and leaves the stored code
    /// and status untouched.
    pub fn set<'a>(&mut self, input: impl Into<Input<'a>>) -> FxpResult<()> {
        match input.into() {
            Input::Real(v) => {
                self.encode_real(v);
                Ok(())
            },
            Input::Complex(v) => {
                self.encode_complex(v);
                Ok(())
            },
            Input::Text(s) => {
                if repr::has_radix_prefix(s) {
                    let lit = repr::parse_literal(s)?;
                    self.encode_literal(lit);
                } else {
                    let v = parse_decimal(s)?;
                    self.encode_real(v);
                }
                Ok(())
            },
        }
    }

    fn quantize(&mut self, value: f64) -> i128 {
        let q = encode(value, &self.format, self.rounding, self.overflow);
        self.track(q);
        q.code
    }

    fn encode_real(&mut self, value: f64) {
        let code = self.quantize(value);
        self.code = CodeWord::Real(code);
    }

    fn encode_complex(&mut self, value: Complex64) {
        let re = self.quantize(value.re);
        let im = self.quantize(value.im);
        self.code = CodeWord::Complex { re, im };
    }

    /// Store a parsed bit pattern as a raw code: no affine transform, no
    /// rounding unless the literal's radix point disagrees with the
    /// format's fractional width.
    fn encode_literal(&mut self, lit: repr::Literal) {
        // Sign interpretation at the resolving format's width; a wider
        // literal keeps its own sign bit and overflows.
        let width = self.format.n_word().max(lit.n_word);
        let tc = repr::twos_complement(lit.bits, width, self.format.signed());

        let code = match lit.n_frac {
            None => {
                let (code, overflow, underflow) = clamp_or_wrap(tc, &self.format, self.overflow);
                self.track(Quantized {
                    code,
                    overflow,
                    underflow,
                    inexact: overflow || underflow,
                });
                code
            },
            Some(lit_frac) => {
                // Realign the radix point to the format's fractional width.
                let shift = self.format.n_frac() as i32 - lit_frac as i32;
                let aligned = tc as f64 * (shift as f64).exp2();
                let rounded = self.rounding.apply(aligned);
                let (code, overflow, underflow) =
                    clamp_or_wrap(rounded as i128, &self.format, self.overflow);
                self.track(Quantized {
                    code,
                    overflow,
                    underflow,
                    inexact: code as f64 != aligned,
                });
                code
            },
        };
        self.code = CodeWord::Real(code);
    }

    fn track(&mut self, q: Quantized) {
        if q.overflow || q.underflow {
            tracing::debug!(
                dtype = %self.dtype(),
                overflow = q.overflow,
                underflow = q.underflow,
                "code out of range, {} applied",
                self.overflow
            );
        }
        self.status.merge(Status {
            overflow: q.overflow,
            underflow: q.underflow,
            inexact: q.inexact,
        });
    }

    /// Rebuild the storage as a complex pair, quantizing a zero
    /// imaginary component. Used when a real input lands in a cell
    /// declared complex.
    pub(crate) fn promote_to_complex(&mut self) {
        if let CodeWord::Real(re) = self.code {
            let im = self.quantize(0.0);
            self.code = CodeWord::Complex { re, im };
        }
    }

    // ========================================================================
    // Read side
    // ========================================================================

    #[inline]
    pub fn format(&self) -> &Format {
        &self.format
    }

    #[inline]
    pub fn is_complex(&self) -> bool {
        matches!(self.code, CodeWord::Complex { .. })
    }

    /// Decoded real component.
    pub fn real(&self) -> f64 {
        match self.code {
            CodeWord::Real(code) | CodeWord::Complex { re: code, .. } => {
                decode(code, &self.format)
            },
        }
    }

    /// Decoded imaginary component (0 for a real cell).
    pub fn imag(&self) -> f64 {
        match self.code {
            CodeWord::Real(_) => 0.0,
            CodeWord::Complex { im, .. } => decode(im, &self.format),
        }
    }

    /// Decoded value; the imaginary component of a complex cell is
    /// dropped.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.real()
    }

    #[inline]
    pub fn to_complex(&self) -> Complex64 {
        Complex64::new(self.real(), self.imag())
    }

    pub fn code(&self) -> CodeWord {
        self.code
    }

    /// Raw code of the real component.
    pub fn raw(&self) -> i128 {
        match self.code {
            CodeWord::Real(code) | CodeWord::Complex { re: code, .. } => code,
        }
    }

    pub fn raw_imag(&self) -> Option<i128> {
        match self.code {
            CodeWord::Real(_) => None,
            CodeWord::Complex { im, .. } => Some(im),
        }
    }

    /// Real-component code as the unsigned word-width bit pattern.
    pub fn uraw(&self) -> u128 {
        repr::uraw(self.raw(), self.format.n_word())
    }

    pub fn uraw_imag(&self) -> Option<u128> {
        self.raw_imag().map(|im| repr::uraw(im, self.format.n_word()))
    }

    /// Compact format serialization: `fxp-<s|u><n_word>/<n_frac>[-complex]`.
    pub fn dtype(&self) -> String {
        self.format.dtype(self.is_complex())
    }

    // ========================================================================
    // Status and policies
    // ========================================================================

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Clear all sticky flags. Nothing else ever lowers them.
    pub fn reset(&mut self) {
        self.status.reset();
    }

    #[inline]
    pub fn rounding(&self) -> RoundingPolicy {
        self.rounding
    }

    /// Explicit policy reconfiguration; affects subsequent encodes only.
    pub fn set_rounding(&mut self, rounding: RoundingPolicy) {
        self.rounding = rounding;
    }

    #[inline]
    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow
    }

    pub fn set_overflow(&mut self, policy: OverflowPolicy) {
        self.overflow = policy;
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Two's-complement binary string, componentwise for complex cells.
    pub fn bin(&self, frac_dot: bool) -> String {
        match self.code {
            CodeWord::Real(code) => repr::bin(code, &self.format, frac_dot),
            CodeWord::Complex { re, im } => repr::join_complex(
                &repr::bin(re, &self.format, frac_dot),
                &repr::bin(im, &self.format, frac_dot),
            ),
        }
    }

    /// `0x`-prefixed padded hex of the two's-complement pattern.
    pub fn hex(&self) -> String {
        match self.code {
            CodeWord::Real(code) => repr::hex(code, &self.format),
            CodeWord::Complex { re, im } => repr::join_complex(
                &repr::hex(re, &self.format),
                &repr::hex(im, &self.format),
            ),
        }
    }

    /// Sign-prefixed magnitude rendering in an arbitrary base.
    pub fn base_repr(&self, base: u32, frac_dot: bool) -> FxpResult<String> {
        match self.code {
            CodeWord::Real(code) => repr::base_repr(code, &self.format, base, frac_dot),
            CodeWord::Complex { re, im } => Ok(repr::join_complex(
                &repr::base_repr(re, &self.format, base, frac_dot)?,
                &repr::base_repr(im, &self.format, base, frac_dot)?,
            )),
        }
    }
}

impl fmt::Display for Fxp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            CodeWord::Real(_) => write!(f, "{}", self.real()),
            CodeWord::Complex { .. } => {
                let im = self.imag();
                if im.is_sign_negative() {
                    write!(f, "{}{}j", self.real(), im)
                } else {
                    write!(f, "{}+{}j", self.real(), im)
                }
            },
        }
    }
}

/// Decimal text at the API boundary; parsed through `rust_decimal` so
/// "0.1"-style inputs arrive with decimal, not binary, intent.
pub(crate) fn parse_decimal(s: &str) -> FxpResult<f64> {
    use rust_decimal::prelude::ToPrimitive;
    use std::str::FromStr;

    let d = rust_decimal::Decimal::from_str(s.trim()).map_err(|_| ParseError::InvalidNumber)?;
    d.to_f64().ok_or_else(|| ParseError::InvalidNumber.into())
}
