//! Line-oriented prompting.

use std::io::{self, BufRead, Write};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed")]
    Closed,

    #[error("'{input}' is not a whole number")]
    NotANumber { input: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Print `label` and read one line, without its line terminator or
/// surrounding whitespace.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<String, PromptError> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PromptError::Closed);
    }
    Ok(line.trim().to_string())
}

pub fn parse_int(raw: &str) -> Result<i64, PromptError> {
    raw.trim()
        .parse()
        .map_err(|_| PromptError::NotANumber {
            input: raw.trim().to_string(),
        })
}

/// Like [`parse_int`], but a blank answer means `default`.
pub fn parse_int_or(raw: &str, default: i64) -> Result<i64, PromptError> {
    if raw.trim().is_empty() {
        return Ok(default);
    }
    parse_int(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn ask_strips_line_endings_and_echoes_label() {
        let mut input = Cursor::new("  P1 \r\n");
        let mut output = Vec::new();
        let answer = ask(&mut input, &mut output, "Code: ").unwrap();
        assert_eq!(answer, "P1");
        assert_eq!(output, b"Code: ");
    }

    #[test]
    fn ask_reports_closed_input() {
        let mut input = Cursor::new("");
        let err = ask(&mut input, &mut Vec::new(), "Code: ").unwrap_err();
        assert!(matches!(err, PromptError::Closed));
    }

    #[test]
    fn parse_int_rejects_words() {
        let err = parse_int("ten").unwrap_err();
        assert!(matches!(err, PromptError::NotANumber { ref input } if input == "ten"));
    }

    #[test]
    fn parse_int_or_uses_default_on_blank() {
        assert_eq!(parse_int_or("", 100).unwrap(), 100);
        assert_eq!(parse_int_or(" 42 ", 100).unwrap(), 42);
        assert!(parse_int_or("x", 100).is_err());
    }

    #[test]
    fn parse_int_accepts_signs() {
        assert_eq!(parse_int(" -3 ").unwrap(), -3);
        assert_eq!(parse_int("+7").unwrap(), 7);
    }
}
