//! UI helper functions for terminal output formatting.

use holdem_engine::cards::Card;
use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// `0.8523` -> `"85.2%"`.
pub fn percent(v: f64) -> String {
    format!("{:.1}%", v * 100.0)
}

/// Cards as `[As Kd]`, or `[--]` when none are known.
pub fn bracket_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "[--]".to_string();
    }
    format!("[{}]", holdem_engine::cards::format_cards(cards))
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::parse_cards;

    #[test]
    fn formats_helpers() {
        assert_eq!(percent(0.8523), "85.2%");
        assert_eq!(bracket_cards(&[]), "[--]");
        assert_eq!(bracket_cards(&parse_cards("As Kd").unwrap()), "[As Kd]");
        let mut err = Vec::new();
        display_warning(&mut err, "session ended early").unwrap();
        assert_eq!(String::from_utf8(err).unwrap(), "WARNING: session ended early\n");
    }
}
