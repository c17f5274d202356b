//! Utilities shared across the compiler.

pub mod colors;
pub mod stats;
