//! Run-collapsing rewrites over the flat output string.
//!
//! Each transform replaces every maximal run of a pair of opposite-effect
//! instructions with the run's net effect in one left-to-right sweep. Any
//! other character ends the current run and passes through untouched.

/// Collapse maximal runs of `>` and `<` into their net movement.
pub fn collapse_pointer_runs(code: &str) -> String {
    collapse_runs(code, '>', '<')
}

/// Collapse maximal runs of `+` and `-` into their net change.
pub fn collapse_arithmetic_runs(code: &str) -> String {
    collapse_runs(code, '+', '-')
}

fn collapse_runs(code: &str, forward: char, backward: char) -> String {
    let mut output = String::with_capacity(code.len());
    let mut balance: i64 = 0;
    for c in code.chars() {
        if c == forward {
            balance += 1;
        } else if c == backward {
            balance -= 1;
        } else {
            flush_run(&mut output, balance, forward, backward);
            balance = 0;
            output.push(c);
        }
    }
    flush_run(&mut output, balance, forward, backward);
    output
}

/// Emit the net effect of a finished run. A balanced run emits nothing; the
/// sign picks the direction and the magnitude the repeat count.
fn flush_run(output: &mut String, balance: i64, forward: char, backward: char) {
    if balance > 0 {
        for _ in 0..balance {
            output.push(forward);
        }
    } else {
        for _ in 0..-balance {
            output.push(backward);
        }
    }
}
