// ============================================================================
// Quantization Module
// The value <-> code engine: rounding, overflow handling, sticky status
// ============================================================================
//
// This module provides:
// - encode/decode: the scalar quantization pipeline
// - RoundingPolicy: truncate / floor / ceiling / fix / nearest
// - OverflowPolicy: saturate or wrap, with per-operation flags
// - Status: sticky overflow/underflow/inexact tracking
//
// Design principles:
// - Out-of-range values never abort; they clamp or wrap and raise flags
// - Policies are closed enums dispatched through a single apply function
// - Every operation is a bounded, deterministic computation

mod codec;
mod overflow;
mod rounding;
mod status;

pub use codec::{decode, encode, Quantized};
pub use overflow::{clamp_or_wrap, OverflowPolicy};
pub use rounding::RoundingPolicy;
pub use status::Status;
