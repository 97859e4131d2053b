// ============================================================================
// Basic Usage Example
// ============================================================================

use fxp_engine::prelude::*;
use num_complex::Complex64;

fn main() -> FxpResult<()> {
    println!("=== fxp-engine Example ===\n");

    // Minimal format inferred from the value
    let x = Fxp::new(-7.25)?;
    println!("Inferred format for -7.25: {}", x.dtype());
    println!("  value  = {}", x);
    println!("  raw    = {}", x.raw());
    println!("  binary = {}", x.bin(true));

    // Explicit sizing with nearest rounding
    let mut y = Fxp::builder()
        .signed(true)
        .n_word(8)
        .n_frac(4)
        .rounding(RoundingPolicy::Nearest)
        .build(3.141592653589793)?;
    println!("\nPi quantized into {}:", y.dtype());
    println!("  value  = {}", y);
    println!("  hex    = {}", y.hex());
    println!("  status = [{}]", y.status());

    // Saturation raises a sticky flag, never an error
    y.set(100.0)?;
    println!("\nAfter encoding 100.0 (out of range):");
    println!("  value  = {}", y);
    println!("  status = [{}]", y.status());

    // Wrapping instead of saturation
    let mut w = Fxp::builder()
        .signed(false)
        .n_word(4)
        .n_frac(2)
        .overflow(OverflowPolicy::Wrap)
        .build_zero()?;
    w.set(4.5)?;
    println!("\n4.5 wrapped into {}: {}", w.dtype(), w);

    // Affine transform: codes step by 2.0 starting at -1.5
    let s = Fxp::builder().scale(2.0).bias(-1.5).build(4.5)?;
    println!(
        "\nScaled format {}: value {} stored as code {}",
        s.dtype(),
        s,
        s.raw()
    );

    // Complex values quantize componentwise under one format
    let z = Fxp::new(Complex64::new(0.25, -14.5))?;
    println!("\nComplex value in {}:", z.dtype());
    println!("  value  = {}", z);
    println!("  binary = {}", z.bin(false));

    // Raw bit patterns round-trip through literals
    let lit = Fxp::new("0b11.01")?;
    println!("\nLiteral 0b11.01 in {}: {}", lit.dtype(), lit);

    Ok(())
}
