//! A program as parsed by our grammar.
//!
//! A `Program` is produced once by the parser and is immutable afterwards.
//! The symbol table built from it lives in `resolve` and is the only
//! mutable state in the pipeline (the expander's memoization writes).

use std::fmt;

/// The fixed target instruction set.
pub const ALPHABET: &str = "+-.,<>[]";

/// A single element of parsed code.
///
/// Brackets are ordinary literal atoms to the compiler; the parser checks
/// their nesting purely for grammatical well-formedness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Atom {
    /// One of the eight target alphabet characters.
    Literal(char),
    /// A reference to a named symbol, `[A-Za-z0-9_]+`.
    Reference(String),
}

impl Atom {
    /// The symbol table key for this atom. Literals are keyed by their own
    /// character, which is what makes the builtin identity entries work.
    pub fn name(&self) -> String {
        match *self {
            Atom::Literal(c) => c.to_string(),
            Atom::Reference(ref name) => name.clone(),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Atom::Literal(c) => write!(f, "{}", c),
            Atom::Reference(ref name) => write!(f, " {} ", name),
        }
    }
}

/// An ordered sequence of atoms; order is emitted left to right.
pub type CodeSequence = Vec<Atom>;

/// Render a code sequence roughly as it was written, for error reports.
pub fn sequence_to_string(seq: &[Atom]) -> String {
    seq.iter().map(|a| a.to_string()).collect()
}

/// A named symbol definition, `: name code ;`.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolDef {
    pub name: String,
    pub body: CodeSequence,
}

/// A parsed Springboard program: imports, local definitions, and a body.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    /// Import paths exactly as written, quotes stripped, in declared order.
    pub imports: Vec<String>,
    /// Local definitions in declared order.
    pub defs: Vec<SymbolDef>,
    /// Top-level code.
    pub code: CodeSequence,
}
