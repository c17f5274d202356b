//! Named groups of peephole transforms.

use fnv::FnvHashMap;

use crate::error::*;

use super::transforms;

/// A named group of text transforms applied together until fix point.
#[derive(Clone)]
pub struct Pass {
    transforms: Vec<fn(&str) -> String>,
    pass_name: String,
}

impl Pass {
    pub fn new(transforms: Vec<fn(&str) -> String>, pass_name: &'static str) -> Pass {
        Pass {
            transforms,
            pass_name: String::from(pass_name),
        }
    }

    /// Apply this pass's transforms to `code` until they stop changing it.
    /// Returns whether anything changed.
    pub fn transform(&self, code: &mut String) -> SpringboardResult<bool> {
        let mut changed = false;
        let mut continue_pass = true;
        while continue_pass {
            continue_pass = false;
            for transform in &self.transforms {
                let next = transform(code);
                if next != *code {
                    *code = next;
                    continue_pass = true;
                    changed = true;
                }
            }
        }
        Ok(changed)
    }

    pub fn pass_name(&self) -> String {
        self.pass_name.clone()
    }
}

lazy_static! {
    pub static ref OPTIMIZATION_PASSES: FnvHashMap<&'static str, Pass> = {
        let mut m = FnvHashMap::default();
        m.insert(
            "pointer-motion",
            Pass::new(vec![transforms::collapse_pointer_runs], "pointer-motion"),
        );
        m.insert(
            "arithmetic",
            Pass::new(
                vec![transforms::collapse_arithmetic_runs],
                "arithmetic",
            ),
        );
        m
    };
}
