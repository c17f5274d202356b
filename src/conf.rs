//! Configurations and defaults for the Springboard compiler.

use std::collections::HashMap;

use crate::error::*;
use crate::optimizer::{Pass, OPTIMIZATION_PASSES};

// Keys used in the textual representation of a conf.
pub const EXPANSION_LIMIT_KEY: &str = "springboard.expansion.limit";
pub const IMPORT_LIMIT_KEY: &str = "springboard.import.limit";
pub const OPTIMIZATION_PASSES_KEY: &str = "springboard.optimization.passes";

// Default values of each key.
pub const DEFAULT_EXPANSION_LIMIT: usize = 256;
pub const DEFAULT_IMPORT_LIMIT: usize = 64;

lazy_static! {
    pub static ref DEFAULT_OPTIMIZATION_PASSES: Vec<Pass> = {
        let m = ["pointer-motion", "arithmetic"];
        m.iter()
            .map(|e| OPTIMIZATION_PASSES.get(e).unwrap().clone())
            .collect()
    };
}

/// A key-value dictionary of compiler settings.
#[derive(Clone, Debug, Default)]
pub struct SpringboardConf {
    dict: HashMap<String, String>,
}

impl SpringboardConf {
    pub fn new() -> SpringboardConf {
        SpringboardConf {
            dict: HashMap::new(),
        }
    }

    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.dict.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.dict.get(key)
    }
}

/// A parsed configuration with correctly typed fields.
#[derive(Clone)]
pub struct ParsedConf {
    /// Maximum depth of the symbol expansion chain.
    pub expansion_limit: usize,
    /// Maximum depth of the import resolution chain.
    pub import_limit: usize,
    /// Optimization passes to apply to the expanded output, in order.
    pub optimization_passes: Vec<Pass>,
}

impl Default for ParsedConf {
    fn default() -> Self {
        ParsedConf {
            expansion_limit: DEFAULT_EXPANSION_LIMIT,
            import_limit: DEFAULT_IMPORT_LIMIT,
            optimization_passes: DEFAULT_OPTIMIZATION_PASSES.clone(),
        }
    }
}

/// Parse a configuration from a SpringboardConf key-value dictionary.
pub fn parse(conf: &SpringboardConf) -> SpringboardResult<ParsedConf> {
    let value = conf.get(EXPANSION_LIMIT_KEY);
    let expansion_limit = value
        .map(|s| parse_limit(s))
        .unwrap_or(Ok(DEFAULT_EXPANSION_LIMIT))?;

    let value = conf.get(IMPORT_LIMIT_KEY);
    let import_limit = value
        .map(|s| parse_limit(s))
        .unwrap_or(Ok(DEFAULT_IMPORT_LIMIT))?;

    let value = conf.get(OPTIMIZATION_PASSES_KEY);
    let passes = value
        .map(|s| parse_passes(s))
        .unwrap_or_else(|| Ok(DEFAULT_OPTIMIZATION_PASSES.clone()))?;

    Ok(ParsedConf {
        expansion_limit,
        import_limit,
        optimization_passes: passes,
    })
}

/// Parse a recursion limit.
fn parse_limit(s: &str) -> SpringboardResult<usize> {
    match s.parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => compile_err!(Parse, "Invalid recursion limit: {}", s),
    }
}

/// Parse a comma-separated list of optimization passes.
fn parse_passes(s: &str) -> SpringboardResult<Vec<Pass>> {
    if s.is_empty() {
        return Ok(vec![]); // Special case because split() creates an empty piece here.
    }
    let mut result = vec![];
    for piece in s.split(',') {
        match OPTIMIZATION_PASSES.get(piece) {
            Some(pass) => result.push(pass.clone()),
            None => return compile_err!(Parse, "Unknown optimization pass: {}", piece),
        }
    }
    Ok(result)
}
