//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::{OwoColorize, Stream};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".if_supports_color(Stream::Stdout, |t| t.green()), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".if_supports_color(Stream::Stderr, |t| t.red()), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".if_supports_color(Stream::Stderr, |t| t.yellow()), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".if_supports_color(Stream::Stdout, |t| t.blue()), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.if_supports_color(Stream::Stdout, |t| t.bold()));
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print an aligned `key: value` row
    pub fn field(key: &str, value: &str) {
        let label = format!("{:<12}", format!("{}:", key));
        println!(
            "  {} {}",
            label.if_supports_color(Stream::Stdout, |t| t.dimmed()),
            value
        );
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Render a yes/no flag
pub fn format_flag(value: bool) -> String {
    if value {
        "yes"
            .if_supports_color(Stream::Stdout, |t| t.green())
            .to_string()
    } else {
        "no".if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_singular() {
        assert_eq!(format_count(1, "line", "lines"), "1 line");
    }

    #[test]
    fn test_format_count_plural() {
        assert_eq!(format_count(3, "line", "lines"), "3 lines");
        assert_eq!(format_count(0, "line", "lines"), "0 lines");
    }

    #[test]
    fn test_format_flag_plain() {
        owo_colors::set_override(false);
        assert_eq!(format_flag(true), "yes");
        assert_eq!(format_flag(false), "no");
    }
}
