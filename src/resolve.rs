//! Builds the symbol table for a parsed program, resolving imports.
//!
//! Import resolution recursively re-invokes the parser and this builder on
//! each imported file. Relative paths resolve against the directory of the
//! importing file, threaded explicitly down the recursion; nothing here
//! touches the process working directory.
//!
//! Two collision policies coexist on purpose. Later imports silently
//! overwrite earlier imports' definitions of the same name, but a local
//! definition may never collide with anything already in the table. Imports
//! may shadow each other freely; a file may not redefine what it itself just
//! obtained.

use std::fs;
use std::path::{Path, PathBuf};

use fnv::FnvHashMap;

use crate::conf::ParsedConf;
use crate::error::*;
use crate::syntax::parser::parse_program;
use crate::syntax::program::*;

/// The value bound to a symbol name.
///
/// User definitions start unexpanded; the expander replaces the entry with
/// its flat expansion the first time it is needed. The two states are
/// distinct variants so the cache is visible in the type rather than a
/// runtime shape check.
#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    Unexpanded(CodeSequence),
    Expanded(String),
}

/// A mapping from symbol name to definition, seeded with the builtins.
///
/// Each of the eight alphabet characters is pre-registered as a symbol
/// mapping to itself, which makes literal and reference handling uniform in
/// the expander. Builtin names are never reachable by user definitions since
/// the identifier grammar excludes punctuation.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    defs: FnvHashMap<String, Definition>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        let mut defs = FnvHashMap::default();
        for c in ALPHABET.chars() {
            defs.insert(c.to_string(), Definition::Expanded(c.to_string()));
        }
        SymbolTable { defs }
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.defs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    pub fn insert(&mut self, name: String, def: Definition) {
        self.defs.insert(name, def);
    }

    /// Replace a symbol's entry with its flat expansion. This is the
    /// expander's memoization write.
    pub fn memoize(&mut self, name: &str, expansion: String) {
        self.defs
            .insert(name.to_string(), Definition::Expanded(expansion));
    }

    /// Merge another table into this one. Entries in `other` win, which is
    /// what gives later imports precedence over earlier ones.
    pub fn merge(&mut self, other: SymbolTable) {
        self.defs.extend(other.defs);
    }

    /// Number of user-defined entries (excludes the builtins).
    pub fn user_len(&self) -> usize {
        self.defs.len() - ALPHABET.len()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

/// Supplies source text for a file identifier. The builder's only view of
/// the filesystem; tests substitute an in-memory implementation.
pub trait SourceProvider {
    fn source(&self, path: &Path) -> SpringboardResult<String>;
}

/// Reads sources from the local filesystem.
pub struct FsSource;

impl SourceProvider for FsSource {
    fn source(&self, path: &Path) -> SpringboardResult<String> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(text),
            Err(e) => compile_err!(Io, "Cannot read {}: {}", path.display(), e),
        }
    }
}

/// Build the symbol table for `program`, resolving imports relative to
/// `base_dir`.
///
/// `previous_imports` is the chain of literal import strings on the path
/// from the root file down to this one. The chain accumulates sibling
/// imports within one file and each recursive build receives a copy, so
/// diamond imports through different branches resolve fine while a path
/// recurring on its own chain fails fast. The chain is used for cycle
/// detection only; the nesting limit counts recursion depth, so a wide
/// but flat import list never trips it.
pub fn build(
    program: &Program,
    base_dir: &Path,
    provider: &dyn SourceProvider,
    previous_imports: &[String],
    conf: &ParsedConf,
) -> SpringboardResult<SymbolTable> {
    build_at(program, base_dir, provider, previous_imports, 0, conf)
}

fn build_at(
    program: &Program,
    base_dir: &Path,
    provider: &dyn SourceProvider,
    previous_imports: &[String],
    depth: usize,
    conf: &ParsedConf,
) -> SpringboardResult<SymbolTable> {
    let mut table = SymbolTable::new();

    let mut chain: Vec<String> = previous_imports.to_vec();
    for import in &program.imports {
        if chain.iter().any(|p| p == import) {
            return compile_err!(
                CircularDependency,
                "Circular dependency involving {} and {}",
                import,
                chain.join(", ")
            );
        }
        chain.push(import.clone());
        if depth >= conf.import_limit {
            return compile_err!(
                NestingTooDeep,
                "Imports nested past {} levels resolving {}",
                conf.import_limit,
                import
            );
        }

        let path = resolve_path(base_dir, import);
        debug!("Resolving import {} as {}", import, path.display());
        let text = provider.source(&path)?;
        let imported = parse_program(&text)?;
        let import_base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let imported_table = build_at(&imported, &import_base, provider, &chain, depth + 1, conf)?;
        table.merge(imported_table);
    }

    for def in &program.defs {
        if let Some(old) = table.get(&def.name) {
            let old_text = match *old {
                Definition::Unexpanded(ref seq) => sequence_to_string(seq),
                Definition::Expanded(ref s) => s.clone(),
            };
            return compile_err!(
                SymbolRedefined,
                "Attempt to redefine symbol {}, from {} to {}",
                def.name,
                old_text,
                sequence_to_string(&def.body)
            );
        }
        table.insert(def.name.clone(), Definition::Unexpanded(def.body.clone()));
    }

    Ok(table)
}

fn resolve_path(base_dir: &Path, import: &str) -> PathBuf {
    let import = Path::new(import);
    if import.is_absolute() {
        import.to_path_buf()
    } else {
        base_dir.join(import)
    }
}
