//! The Springboard compiler.
//!
//! Springboard is a small macro language over the 8-character brainfuck
//! instruction set `+ - . , < > [ ]`. A program is a list of file imports,
//! a list of named symbol definitions, and a code body; compilation expands
//! every symbol reference down to bare instructions and then runs a peephole
//! optimizer over the result.
//!
//! The pipeline is strictly forward: parse, build the symbol table
//! (recursively parsing and building each import), expand, optimize. Any
//! error aborts the whole compilation with no partial output.
//!
//! ```
//! use springboard::SpringboardConf;
//!
//! let out = springboard::compile_str(": inc2 ++ ; inc2 > inc2", &SpringboardConf::new());
//! assert_eq!(out.unwrap(), "++>++");
//! ```

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

use std::path::Path;

use time::PreciseTime;

#[macro_use]
pub mod error;

pub mod conf;
pub mod expand;
pub mod optimizer;
pub mod resolve;
pub mod syntax;
pub mod util;

pub use crate::conf::SpringboardConf;
pub use crate::error::{ErrorKind, SpringboardError, SpringboardResult};
pub use crate::resolve::{FsSource, SourceProvider};
pub use crate::util::stats::CompilationStats;

/// Compile a Springboard program given as a string.
///
/// Imports resolve against the current directory via the filesystem.
pub fn compile_str(input: &str, conf: &SpringboardConf) -> SpringboardResult<String> {
    let mut stats = CompilationStats::new();
    compile_with(input, Path::new(""), &FsSource, conf, &mut stats)
}

/// Compile the Springboard program in the file at `path`. Relative imports
/// resolve against the file's directory.
pub fn compile_file(path: &Path, conf: &SpringboardConf) -> SpringboardResult<String> {
    let mut stats = CompilationStats::new();
    compile_file_with(path, conf, &mut stats)
}

/// `compile_file` with caller-owned statistics.
pub fn compile_file_with(
    path: &Path,
    conf: &SpringboardConf,
    stats: &mut CompilationStats,
) -> SpringboardResult<String> {
    let provider = FsSource;
    let input = provider.source(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    compile_with(&input, base_dir, &provider, conf, stats)
}

/// Run the full compilation pipeline: parse, resolve imports and build the
/// symbol table, expand, optimize.
pub fn compile_with(
    input: &str,
    base_dir: &Path,
    provider: &dyn SourceProvider,
    conf: &SpringboardConf,
    stats: &mut CompilationStats,
) -> SpringboardResult<String> {
    let parsed = conf::parse(conf)?;

    let start = PreciseTime::now();
    let program = syntax::parser::parse_program(input)?;
    let end = PreciseTime::now();
    stats.stage_times.push(("parse".to_string(), start.to(end)));
    debug!(
        "Parsed program: {} imports, {} definitions, {} code atoms",
        program.imports.len(),
        program.defs.len(),
        program.code.len()
    );

    let start = PreciseTime::now();
    let mut table = resolve::build(&program, base_dir, provider, &[], &parsed)?;
    let end = PreciseTime::now();
    stats
        .stage_times
        .push(("resolve".to_string(), start.to(end)));
    debug!("Symbol table holds {} user symbols", table.user_len());

    let start = PreciseTime::now();
    let mut code = expand::expand(&program.code, &mut table, &parsed, stats)?;
    let end = PreciseTime::now();
    stats
        .stage_times
        .push(("expand".to_string(), start.to(end)));
    debug!("Expanded program to {} instructions", code.len());

    optimizer::apply_passes(&mut code, &parsed.optimization_passes, stats)?;
    debug!("Optimized program has {} instructions", code.len());

    Ok(code)
}
