// ============================================================================
// Code Rendering
// Bit-accurate textual views of a stored code: two's-complement binary
// and hex, sign-prefixed magnitude for arbitrary bases
// ============================================================================

use crate::errors::{ConfigError, FxpResult};
use crate::format::Format;
use smallvec::SmallVec;

/// The stored code reinterpreted as an unsigned bit pattern of the
/// format's word width (two's complement for negative codes).
#[inline]
pub fn uraw(code: i128, n_word: u32) -> u128 {
    if code < 0 {
        ((1i128 << n_word) + code) as u128
    } else {
        code as u128
    }
}

/// Render the two's-complement bit pattern, zero-padded to `n_word`.
///
/// `frac_dot` inserts the radix point `n_frac` digits from the right.
pub fn bin(code: i128, format: &Format, frac_dot: bool) -> String {
    let n_word = format.n_word() as usize;
    let mut s = format!("{:0width$b}", uraw(code, format.n_word()), width = n_word);
    if frac_dot && format.n_frac() > 0 {
        s.insert(s.len() - format.n_frac() as usize, '.');
    }
    s
}

/// Render the two's-complement pattern as `0x`-prefixed lowercase hex,
/// zero-padded to the word's hex-digit count.
pub fn hex(code: i128, format: &Format) -> String {
    let digits = format.n_word().div_ceil(4) as usize;
    format!("0x{:0width$x}", uraw(code, format.n_word()), width = digits)
}

/// Render the code as a sign-prefixed magnitude in an arbitrary base.
///
/// Unlike [`bin`]/[`hex`], a negative code prints a leading `-` before
/// the magnitude digits rather than a complement pattern. Digits above 9
/// are uppercase. For power-of-two bases, `frac_dot` places the radix
/// point `ceil(n_frac / log2(base))` digits from the right; other bases
/// have no well-defined digit width and render the unbroken string.
///
/// # Errors
/// `BadBase` unless `2 <= base <= 36`.
pub fn base_repr(code: i128, format: &Format, base: u32, frac_dot: bool) -> FxpResult<String> {
    if !(2..=36).contains(&base) {
        return Err(ConfigError::BadBase { base }.into());
    }

    let mut digits: SmallVec<[u8; 64]> = SmallVec::new();
    let mut magnitude = code.unsigned_abs();
    loop {
        let d = (magnitude % base as u128) as u8;
        digits.push(if d < 10 { b'0' + d } else { b'A' + d - 10 });
        magnitude /= base as u128;
        if magnitude == 0 {
            break;
        }
    }

    let dot_pos = if frac_dot && base.is_power_of_two() {
        let bits_per_digit = base.trailing_zeros();
        format.n_frac().div_ceil(bits_per_digit) as usize
    } else {
        0
    };
    // the radix point needs a digit on its left
    while digits.len() < dot_pos + 1 {
        digits.push(b'0');
    }

    let mut s = String::with_capacity(digits.len() + 2);
    if code < 0 {
        s.push('-');
    }
    for (i, &d) in digits.iter().enumerate().rev() {
        s.push(d as char);
        if dot_pos > 0 && i == dot_pos {
            s.push('.');
        }
    }
    Ok(s)
}

/// Compose rendered real/imaginary parts into `<re>+<im>j`, omitting the
/// `+` exactly when the imaginary part already carries a `-` sign.
pub fn join_complex(re: &str, im: &str) -> String {
    if im.starts_with('-') {
        format!("{}{}j", re, im)
    } else {
        format!("{}+{}j", re, im)
    }
}
