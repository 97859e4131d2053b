// ============================================================================
// Value Layer
// The Fxp cell and its construction builder
// ============================================================================

pub mod builder;
pub mod fxp;

pub use builder::FxpBuilder;
pub use fxp::{CodeWord, Fxp, Input};
