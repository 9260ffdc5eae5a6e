//! Provides the shared vocabulary of the nocap compiler: source locations
//! and the diagnostics that refer to them.

pub mod core;
pub mod diagnostic;
