//! Syntax of the Springboard language.
//!
//! This module contains sub-modules that tokenize and parse Springboard
//! programs.

pub mod parser;
pub mod program;
pub mod tokenizer;
