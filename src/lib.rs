// ============================================================================
// Fixed-Point Quantization Engine
// Bit-accurate fixed-point formats, quantization and rendering
// ============================================================================

//! # fxp-engine
//!
//! A bit-accurate fixed-point quantization engine.
//!
//! ## Features
//!
//! - **Format descriptors** (`signed`, `n_word`, `n_int`, `n_frac`) with an
//!   optional affine `scale`/`bias` transform
//! - **Minimal-format inference** from input values, with per-field overrides
//! - **Five rounding policies** (truncate, floor, ceiling, fix, nearest) and
//!   two overflow policies (saturate, wrap)
//! - **Sticky status flags** per value: overflow, underflow, inexact
//! - **Bit-accurate rendering**: padded two's-complement binary and hex,
//!   sign-magnitude output in any base 2-36, complex pairs included
//!
//! ## Example
//!
//! ```rust
//! use fxp_engine::prelude::*;
//!
//! // Minimal format inferred from the value
//! let x = Fxp::new(-7.25)?;
//! assert_eq!(x.dtype(), "fxp-s6/2");
//!
//! // Explicit sizing, sticky overflow flag under saturation
//! let mut y = Fxp::builder()
//!     .signed(true)
//!     .n_word(8)
//!     .n_frac(4)
//!     .rounding(RoundingPolicy::Nearest)
//!     .build(-7.25)?;
//! assert_eq!(y.bin(true), "1000.1100");
//! assert_eq!(y.hex(), "0x8c");
//!
//! y.set(100.0)?;
//! assert_eq!(y.to_f64(), 7.9375); // clamped to the upper bound
//! assert!(y.status().overflow);
//! # Ok::<(), fxp_engine::errors::FxpError>(())
//! ```

pub mod errors;
pub mod format;
pub mod quant;
pub mod repr;
pub mod value;

// Re-exports for convenience
pub mod prelude {
    pub use crate::errors::{ConfigError, FxpError, FxpResult, ParseError};
    pub use crate::format::{Format, FormatSpec, N_WORD_MAX};
    pub use crate::quant::{OverflowPolicy, RoundingPolicy, Status};
    pub use crate::value::{CodeWord, Fxp, FxpBuilder};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use num_complex::Complex64;

    #[test]
    fn test_end_to_end_quantization() {
        let mut x = Fxp::builder()
            .signed(true)
            .n_word(8)
            .n_frac(4)
            .rounding(RoundingPolicy::Nearest)
            .build(-7.25)
            .unwrap();

        assert_eq!(x.to_f64(), -7.25);
        assert_eq!(x.raw(), -116);
        assert_eq!(x.bin(false), "10001100");
        assert_eq!(x.bin(true), "1000.1100");
        assert_eq!(x.hex(), "0x8c");
        assert_eq!(x.base_repr(2, false).unwrap(), "-1110100");
        assert_eq!(x.base_repr(16, false).unwrap(), "-74");

        // re-encode through every stage of the pipeline
        x.set(3.141592653589793).unwrap();
        assert_eq!(x.to_f64(), 3.125);
        assert!(x.status().inexact);
        assert!(!x.status().overflow);
    }

    #[test]
    fn test_rounding_policy_matrix() {
        let build = |r| {
            Fxp::builder()
                .signed(true)
                .n_word(16)
                .n_frac(2)
                .rounding(r)
                .build(0.0)
                .unwrap()
        };
        let cases = [
            // (input, trunc, floor, ceil, fix, nearest)
            (1.30, 1.25, 1.25, 1.50, 1.25, 1.25),
            (-1.30, -1.25, -1.50, -1.25, -1.25, -1.25),
            (1.375, 1.25, 1.25, 1.50, 1.25, 1.50),
            (-1.375, -1.25, -1.50, -1.25, -1.25, -1.50),
            (1.25, 1.25, 1.25, 1.25, 1.25, 1.25),
        ];
        for (input, trunc, floor, ceil, fix, nearest) in cases {
            let expected = [
                (RoundingPolicy::Truncate, trunc),
                (RoundingPolicy::Floor, floor),
                (RoundingPolicy::Ceiling, ceil),
                (RoundingPolicy::Fix, fix),
                (RoundingPolicy::Nearest, nearest),
            ];
            for (rounding, want) in expected {
                let mut x = build(rounding);
                x.set(input).unwrap();
                assert_eq!(x.to_f64(), want, "{rounding}({input})");
            }
        }
    }

    #[test]
    fn test_complex_pipeline() {
        let z = Fxp::new(Complex64::new(0.25, -14.5)).unwrap();
        assert_eq!(z.dtype(), "fxp-s7/2-complex");
        assert_eq!(z.to_complex(), Complex64::new(0.25, -14.5));
        assert_eq!(z.bin(false), "0000001+1000110j");
    }

    #[test]
    fn test_scaled_format_round_trip() {
        // codes step by 2.0 starting at -1.5
        let mut x = Fxp::builder().scale(2.0).bias(-1.5).build(4.5).unwrap();
        assert_eq!(x.to_f64(), 4.5);
        assert_eq!(x.format().precision(), 2.0);

        // off-grid input truncates toward zero in code space
        x.set(3.0).unwrap();
        assert_eq!(x.to_f64(), 2.5);
        assert!(x.status().inexact);
    }

    #[test]
    fn test_status_display() {
        let mut x = Fxp::builder()
            .signed(false)
            .n_word(4)
            .n_frac(0)
            .build(0.0)
            .unwrap();
        assert_eq!(x.status().to_string(), "");

        x.set(-1.0).unwrap();
        x.set(0.3).unwrap();
        let rendered = x.status().to_string();
        assert!(rendered.contains("underflow"));
        assert!(rendered.contains("inexact"));
        assert!(!rendered.contains("overflow"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_format_serde_round_trip() {
        let fmt = FormatSpec::new()
            .n_word(12)
            .n_frac(5)
            .resolve_default()
            .unwrap();
        let json = serde_json::to_string(&fmt).unwrap();
        let back: Format = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fmt);

        let json = serde_json::to_string(&RoundingPolicy::Nearest).unwrap();
        let back: RoundingPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RoundingPolicy::Nearest);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Quantizing a value already on the grid is exact under every
            // rounding policy.
            #[test]
            fn on_grid_values_round_trip(code in -128i128..128, frac in 0u32..8) {
                let fmt = FormatSpec::new()
                    .signed(true)
                    .n_word(9)
                    .n_frac(frac)
                    .resolve_default()
                    .unwrap();
                let value = code as f64 * fmt.precision();
                for rounding in [
                    RoundingPolicy::Truncate,
                    RoundingPolicy::Floor,
                    RoundingPolicy::Ceiling,
                    RoundingPolicy::Fix,
                    RoundingPolicy::Nearest,
                ] {
                    let mut x = Fxp::with_format(fmt);
                    x.set_rounding(rounding);
                    x.set(value).unwrap();
                    prop_assert_eq!(x.to_f64(), value);
                    prop_assert!(!x.status().inexact);
                }
            }

            // The stored value always lies inside the format's range.
            #[test]
            fn saturation_keeps_values_in_range(v in -1e6f64..1e6) {
                let x = Fxp::builder()
                    .signed(true)
                    .n_word(10)
                    .n_frac(3)
                    .build(v)
                    .unwrap();
                prop_assert!(x.to_f64() <= x.format().upper());
                prop_assert!(x.to_f64() >= x.format().lower());
            }

            // Wrapping also keeps codes in range, flags instead of failing.
            #[test]
            fn wrap_keeps_codes_in_range(v in -1e6f64..1e6) {
                let x = Fxp::builder()
                    .signed(true)
                    .n_word(10)
                    .n_frac(3)
                    .overflow(OverflowPolicy::Wrap)
                    .build(v)
                    .unwrap();
                prop_assert!(x.format().contains_code(x.raw()));
            }

            // Inference always yields a format that holds a short binary
            // fraction exactly.
            #[test]
            fn inferred_format_is_exact(int_part in -1000i64..1000, frac_num in 0u32..16) {
                let v = int_part as f64 + frac_num as f64 / 16.0;
                let x = Fxp::new(v).unwrap();
                prop_assert_eq!(x.to_f64(), v);
                prop_assert!(!x.status().any());
            }

            // Decoding any in-range code and re-encoding gives it back.
            #[test]
            fn code_value_code_identity(code in -512i128..512) {
                let fmt = FormatSpec::new()
                    .signed(true)
                    .n_word(10)
                    .n_frac(4)
                    .resolve_default()
                    .unwrap();
                let mut x = Fxp::with_format(fmt);
                x.set(code as f64 * fmt.precision()).unwrap();
                prop_assert_eq!(x.raw(), code);
            }
        }
    }
}
