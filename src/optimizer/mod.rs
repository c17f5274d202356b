//! Peephole optimizer over the expanded output.
//!
//! This module manages optimizations over the flat alphabet string produced
//! by the expander. Optimizations are represented as text transforms in the
//! `transforms` module, which rewrite one string to another. The module
//! provides a pass interface that groups related transforms into a pass and
//! applies each pass until a fix point (that is, until the pass stops
//! changing the output).

use time::PreciseTime;

use crate::error::*;
use crate::util::stats::CompilationStats;

pub use self::passes::*;

mod passes;
pub mod transforms;

/// Apply passes from a list until fix point.
pub fn apply_passes(
    code: &mut String,
    passes: &[Pass],
    stats: &mut CompilationStats,
) -> SpringboardResult<()> {
    // Collapsing one kind of run can merge two runs of the other kind, so
    // the list is re-applied until the output settles.
    let mut changed = true;
    while changed {
        changed = false;
        for pass in passes {
            let start = PreciseTime::now();
            changed |= pass.transform(code)?;
            let end = PreciseTime::now();
            stats.pass_times.push((pass.pass_name(), start.to(end)));
            debug!("After {} pass: {}", pass.pass_name(), code);
        }
    }
    Ok(())
}
