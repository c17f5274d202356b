//! Recursive macro expansion with memoization.
//!
//! Expansion walks a code sequence left to right, substituting symbol
//! references with their definitions until only alphabet characters remain.
//! The first time a symbol fully expands, its table entry is overwritten
//! with the flat result, so every symbol is expanded from scratch at most
//! once no matter how many places reference it. Total cost is linear in the
//! size of the symbol dependency graph rather than exponential under
//! repeated references.

use crate::conf::ParsedConf;
use crate::error::*;
use crate::resolve::{Definition, SymbolTable};
use crate::syntax::program::CodeSequence;
use crate::util::stats::CompilationStats;

/// Expand `code` against `table` into a flat alphabet string.
///
/// Memoization writes mutate `table`; a second call with the same table
/// reuses every cached expansion.
pub fn expand(
    code: &CodeSequence,
    table: &mut SymbolTable,
    conf: &ParsedConf,
    stats: &mut CompilationStats,
) -> SpringboardResult<String> {
    let mut chain: Vec<String> = Vec::new();
    expand_with_chain(code, table, &mut chain, conf, stats)
}

/// The recursive worker. `chain` holds the names currently being expanded,
/// outermost first; it is the evidence reported for a circular definition.
fn expand_with_chain(
    code: &CodeSequence,
    table: &mut SymbolTable,
    chain: &mut Vec<String>,
    conf: &ParsedConf,
    stats: &mut CompilationStats,
) -> SpringboardResult<String> {
    let mut output = String::new();

    for atom in code {
        let name = atom.name();
        let body = match table.get(&name) {
            None => return compile_err!(SymbolUndefined, "Symbol {} is undefined", name),
            Some(&Definition::Expanded(ref s)) => {
                // Builtins and already-expanded symbols land here; nothing
                // is re-expanded.
                output.push_str(s);
                continue;
            }
            Some(&Definition::Unexpanded(ref body)) => {
                if chain.iter().any(|n| n == &name) {
                    return compile_err!(
                        CircularDefinition,
                        "Definition of symbol {} requires its own expansion: {} -> {}",
                        name,
                        chain.join(" -> "),
                        name
                    );
                }
                body.clone()
            }
        };

        if chain.len() >= conf.expansion_limit {
            return compile_err!(
                NestingTooDeep,
                "Expansion of {} nested past {} levels",
                name,
                conf.expansion_limit
            );
        }

        chain.push(name.clone());
        let expansion = expand_with_chain(&body, table, chain, conf, stats)?;
        chain.pop();

        trace!("Expanded symbol {} to {} characters", name, expansion.len());
        stats.expanded_symbols.push(name.clone());
        table.memoize(&name, expansion.clone());
        output.push_str(&expansion);
    }

    Ok(output)
}
