// ============================================================================
// Representation Module
// Bit-string views: literal parsing in, rendered patterns out
// ============================================================================
//
// This module provides:
// - parse_literal: 0b/0x strings into raw bit patterns
// - bin/hex/base_repr: two's-complement and sign-magnitude rendering
// - join_complex: <re>+<im>j composition
//
// Rendering is a pure read-side view over a (code, Format) pair; nothing
// here mutates a stored value or its status.

mod literal;
mod render;

pub use literal::{has_radix_prefix, parse_literal, twos_complement, Literal};
pub use render::{base_repr, bin, hex, join_complex, uraw};
