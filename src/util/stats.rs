//! Utility struct for measuring compilation work.

use time::Duration;

use crate::util::colors::*;

/// Tracks various compile-time statistics throughout the compiler.
pub struct CompilationStats {
    /// Running times for the compiler stages (parse, resolve, expand).
    pub stage_times: Vec<(String, Duration)>,
    /// Running times for optimization passes.
    pub pass_times: Vec<(String, Duration)>,
    /// Names of symbols expanded from their unexpanded form, one entry per
    /// cache write. A symbol referenced many times still appears here once.
    pub expanded_symbols: Vec<String>,
}

impl CompilationStats {
    pub fn new() -> CompilationStats {
        CompilationStats {
            stage_times: Vec::new(),
            pass_times: Vec::new(),
            expanded_symbols: Vec::new(),
        }
    }

    /// How many times `symbol` was expanded from scratch.
    pub fn expansion_count(&self, symbol: &str) -> usize {
        self.expanded_symbols.iter().filter(|s| *s == symbol).count()
    }

    /// Formats a duration for printing, in milliseconds.
    fn format_time(duration: &Duration) -> f64 {
        if duration.num_milliseconds() == 0 {
            if let Some(v) = duration.num_microseconds() {
                (v as f64) / 1000.0
            } else {
                0.0
            }
        } else {
            duration.num_milliseconds() as f64
        }
    }

    /// Returns pretty-printed statistics stored in `self`.
    pub fn pretty_print(&self) -> String {
        let mut result = String::new();

        result.push_str("Springboard Compiler:\n");
        let mut total = Duration::milliseconds(0);
        for &(ref name, ref dur) in self.stage_times.iter() {
            result.push_str(&format!(
                "\t{}: {:.3} ms\n",
                name,
                CompilationStats::format_time(dur)
            ));
            total = total + *dur;
        }
        result.push_str(&format!(
            "\t{} {} ms\n",
            format_color(Color::Green, "Compiler Total"),
            CompilationStats::format_time(&total)
        ));

        let mut total = Duration::milliseconds(0);
        result.push_str("Optimization Passes:\n");
        for &(ref name, ref dur) in self.pass_times.iter() {
            result.push_str(&format!(
                "\t{}: {:.3} ms\n",
                name,
                CompilationStats::format_time(dur)
            ));
            total = total + *dur;
        }
        result.push_str(&format!(
            "\t{} {} ms\n",
            format_color(Color::Green, "Passes Total"),
            CompilationStats::format_time(&total)
        ));

        result.push_str(&format!(
            "Symbols expanded: {}\n",
            self.expanded_symbols.len()
        ));

        result
    }
}

impl Default for CompilationStats {
    fn default() -> Self {
        CompilationStats::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_counts() {
        let mut stats = CompilationStats::new();
        stats.expanded_symbols.push("a".to_string());
        stats.expanded_symbols.push("b".to_string());
        stats.expanded_symbols.push("a".to_string());
        assert_eq!(stats.expansion_count("a"), 2);
        assert_eq!(stats.expansion_count("b"), 1);
        assert_eq!(stats.expansion_count("c"), 0);
    }
}
