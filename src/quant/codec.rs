// ============================================================================
// Codec
// Value <-> raw-code conversion under a format, with rounding and
// overflow handling
// ============================================================================

use crate::format::Format;
use crate::quant::overflow::{clamp_or_wrap, OverflowPolicy};
use crate::quant::rounding::RoundingPolicy;

/// Result of quantizing one scalar component.
///
/// The flags describe this operation only; the caller ORs them into the
/// instance's sticky [`Status`](crate::quant::Status).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantized {
    /// Final in-range raw code.
    pub code: i128,
    pub overflow: bool,
    pub underflow: bool,
    /// The stored code does not decode back to the input value.
    pub inexact: bool,
}

/// Encode a real value into a raw code under `format`.
///
/// Pipeline: inverse affine transform, scale by `2^n_frac`, round per
/// policy, then force into range per the overflow policy. The returned
/// code is always in range; out-of-range inputs surface through the
/// flags, never through an error.
///
/// Non-finite inputs are defined: `NaN` encodes as code 0 with `inexact`
/// raised; infinities run through the overflow guard like any other
/// out-of-range value.
#[inline]
pub fn encode(
    value: f64,
    format: &Format,
    rounding: RoundingPolicy,
    policy: OverflowPolicy,
) -> Quantized {
    let scaled = (value - format.bias()) / format.scale();
    let unrounded = scaled * (format.n_frac() as f64).exp2();
    let rounded = rounding.apply(unrounded);

    // Saturating cast: infinities pin to the i128 bounds, NaN to zero.
    let candidate = rounded as i128;
    let (code, overflow, underflow) = clamp_or_wrap(candidate, format, policy);

    Quantized {
        code,
        overflow,
        underflow,
        // NaN compares unequal to itself, so it lands here as well
        inexact: code as f64 != unrounded,
    }
}

/// Decode a raw code back to its real value: `code * precision + bias`.
#[inline]
pub fn decode(code: i128, format: &Format) -> f64 {
    code as f64 * format.precision() + format.bias()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quant::overflow::OverflowPolicy::{Saturate, Wrap};
    use crate::quant::rounding::RoundingPolicy::{Ceiling, Fix, Floor, Nearest, Truncate};

    fn s8_2() -> Format {
        Format::from_word(true, 8, 2).unwrap()
    }

    fn quantize(value: f64, rounding: crate::quant::RoundingPolicy) -> f64 {
        let fmt = s8_2();
        decode(encode(value, &fmt, rounding, Saturate).code, &fmt)
    }

    #[test]
    fn test_rounding_table() {
        // step 0.25; 1.25 is on-grid and unchanged under every mode
        assert_eq!(quantize(1.25, Truncate), 1.25);
        assert_eq!(quantize(1.25, Ceiling), 1.25);
        assert_eq!(quantize(1.25, Floor), 1.25);
        assert_eq!(quantize(1.25, Fix), 1.25);
        assert_eq!(quantize(1.25, Nearest), 1.25);

        // 1.26 sits between 1.25 and 1.50
        assert_eq!(quantize(1.26, Truncate), 1.25);
        assert_eq!(quantize(1.26, Ceiling), 1.5);
        assert_eq!(quantize(1.26, Floor), 1.25);
        assert_eq!(quantize(1.26, Fix), 1.25);
        assert_eq!(quantize(1.26, Nearest), 1.25);

        // half-grid point rounds away from zero under Nearest
        assert_eq!(quantize(1.375, Nearest), 1.5);
        assert_eq!(quantize(-1.375, Nearest), -1.5);

        // symmetric sign behavior for toward-zero modes
        assert_eq!(quantize(-1.26, Truncate), -quantize(1.26, Truncate));
        assert_eq!(quantize(-1.26, Fix), -quantize(1.26, Fix));
    }

    #[test]
    fn test_saturate_bounds() {
        let fmt = s8_2();
        let q = encode(32.0, &fmt, Nearest, Saturate);
        assert_eq!(decode(q.code, &fmt), 31.75);
        assert!(q.overflow && !q.underflow);

        let q = encode(-32.25, &fmt, Nearest, Saturate);
        assert_eq!(decode(q.code, &fmt), -32.0);
        assert!(q.underflow && !q.overflow);
    }

    #[test]
    fn test_wrap_bounds() {
        let fmt = Format::from_word(false, 4, 2).unwrap();
        let q = encode(4.0, &fmt, Nearest, Wrap);
        assert_eq!(decode(q.code, &fmt), 0.0);
        assert!(q.overflow);

        let q = encode(-0.25, &fmt, Nearest, Wrap);
        assert_eq!(decode(q.code, &fmt), 3.75);
        assert!(q.underflow);
    }

    #[test]
    fn test_inexact_flag() {
        let fmt = s8_2();
        assert!(!encode(1.25, &fmt, Nearest, Saturate).inexact);
        assert!(encode(1.26, &fmt, Nearest, Saturate).inexact);
        // saturation loses the value too
        assert!(encode(100.0, &fmt, Nearest, Saturate).inexact);
    }

    #[test]
    fn test_scale_bias_pipeline() {
        let fmt = Format::new(true, 2, 0)
            .unwrap()
            .with_scale(2.0)
            .unwrap()
            .with_bias(-1.5);
        let q = encode(4.5, &fmt, Nearest, Saturate);
        assert_eq!(q.code, 3);
        assert!(!q.inexact);
        assert_eq!(decode(q.code, &fmt), 4.5);
        assert_eq!(decode(fmt.min_code(), &fmt), -9.5);
    }

    #[test]
    fn test_non_finite_inputs() {
        let fmt = s8_2();
        let q = encode(f64::NAN, &fmt, Nearest, Saturate);
        assert_eq!(q.code, 0);
        assert!(q.inexact);

        let q = encode(f64::INFINITY, &fmt, Nearest, Saturate);
        assert_eq!(q.code, fmt.max_code());
        assert!(q.overflow);

        let q = encode(f64::NEG_INFINITY, &fmt, Nearest, Saturate);
        assert_eq!(q.code, fmt.min_code());
        assert!(q.underflow);
    }
}
