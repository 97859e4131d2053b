// ============================================================================
// Format Module
// Word-format descriptors and minimal-format inference
// ============================================================================
//
// This module provides:
// - Format: immutable {signed, n_int, n_frac, scale, bias} descriptor
// - FormatSpec: partial caller constraints plus the resolver that
//   completes them into the smallest sufficient Format
//
// Design principles:
// - n_word is the sole authority on the raw-code range
// - Inference is a bounded two-pass reduction, never an unbounded search
// - Contradictory constraints fail fast with ConfigError

mod descriptor;
mod resolver;

pub use descriptor::{Format, N_WORD_MAX};
pub use resolver::FormatSpec;
