//! Basic format strings for colored terminal output.

const RESET: &str = "\x1b[0m";

/// Colors used in parser error context and statistics reports.
pub enum Color {
    BoldRed,
    Green,
}

impl Color {
    fn prefix(&self) -> &str {
        match *self {
            Color::BoldRed => "\x1b[1;31m",
            Color::Green => "\x1b[0;32m",
        }
    }
}

pub fn format_color(color: Color, text: &str) -> String {
    format!("{}{}{}", color.prefix(), text, RESET)
}
