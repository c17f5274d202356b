//! Error types produced by the Springboard compiler.
//!
//! Every error is fatal to the compilation that produced it; there is no
//! partial-success mode. The kind is kept separate from the message so hosts
//! can report the failure class without parsing strings.

use std::error;
use std::fmt;

/// Classes of compilation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed source text.
    Parse,
    /// An import path recurred on its own resolution chain.
    CircularDependency,
    /// A local definition collided with an existing name.
    SymbolRedefined,
    /// A reference named a symbol absent from the merged table.
    SymbolUndefined,
    /// Expanding a symbol required expanding that same symbol again.
    CircularDefinition,
    /// Imports or expansions nested past the configured limit.
    NestingTooDeep,
    /// A source file could not be read.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::ErrorKind::*;
        let name = match *self {
            Parse => "parse error",
            CircularDependency => "circular dependency",
            SymbolRedefined => "symbol redefined",
            SymbolUndefined => "symbol undefined",
            CircularDefinition => "circular definition",
            NestingTooDeep => "nesting too deep",
            Io => "i/o error",
        };
        f.write_str(name)
    }
}

/// A compilation error produced by Springboard.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringboardError {
    kind: ErrorKind,
    message: String,
}

impl SpringboardError {
    pub fn new<T: Into<String>>(kind: ErrorKind, message: T) -> SpringboardError {
        SpringboardError {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SpringboardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl error::Error for SpringboardError {}

/// Result type returned by Springboard.
pub type SpringboardResult<T> = Result<T, SpringboardError>;

/// Internal macro for creating a compile error of a given kind.
macro_rules! compile_err {
    ( $kind:ident, $($arg:tt)* ) => ({
        ::std::result::Result::Err($crate::error::SpringboardError::new(
            $crate::error::ErrorKind::$kind,
            format!($($arg)*),
        ))
    })
}
