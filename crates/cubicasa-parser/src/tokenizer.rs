// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SVG path-data tokenizer
//!
//! Understands the absolute subset used by CubiCasa floor plans: `M`, `L`
//! and `Z`/`z`. Everything else is skipped token by token, so a noisy path
//! degrades to fewer coordinates instead of an error.

use log::trace;
use nom::{number::complete::recognize_float, IResult};

/// A recognized path command with its operands
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// Absolute move (`M x y`)
    MoveTo { x: f64, y: f64 },
    /// Absolute line (`L x y`)
    LineTo { x: f64, y: f64 },
    /// Close the current ring (`Z` or `z`)
    Close,
}

// ============================================================================
// Parsing Primitives
// ============================================================================

#[inline]
fn is_separator(b: u8) -> bool {
    b == b',' || b.is_ascii_whitespace()
}

#[inline]
fn is_command(b: u8) -> bool {
    matches!(b, b'M' | b'L' | b'Z' | b'z')
}

/// Recognize a decimal number: optional sign, digits with an optional
/// fraction or a bare fraction, optional exponent
fn number(input: &str) -> IResult<&str, &str> {
    recognize_float(input)
}

/// Parse a whole token as a finite number
///
/// Locale-independent: `.` is the only decimal separator. Returns `None`
/// when the token has trailing garbage or overflows to infinity.
pub fn parse_number(token: &str) -> Option<f64> {
    let (rest, text) = number(token).ok()?;
    if !rest.is_empty() {
        return None;
    }

    // Use lexical-core for fast parsing
    let value: f64 = lexical_core::parse(text.as_bytes()).ok()?;
    value.is_finite().then_some(value)
}

// ============================================================================
// Tokenizer
// ============================================================================

/// Forward-only tokenizer over one path-data string
///
/// Yields commands lazily, left to right. Separators are commas and ASCII
/// whitespace; a command letter also ends the token before it, so `M0,0L10,0`
/// and `M 0 0 L 10 0` tokenize identically.
#[derive(Clone, Debug)]
pub struct PathTokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> PathTokenizer<'a> {
    /// Create a new tokenizer for the given path data
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Scan the next raw token
    ///
    /// A command letter is always a token of its own. Any other run of
    /// bytes extends to the next separator or command letter. Both are
    /// ASCII, so token boundaries always fall on char boundaries.
    fn next_token(&mut self) -> Option<&'a str> {
        let bytes = self.input.as_bytes();

        while self.pos < bytes.len() && is_separator(bytes[self.pos]) {
            self.pos += 1;
        }
        if self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos;
        if is_command(bytes[start]) {
            self.pos += 1;
        } else {
            while self.pos < bytes.len()
                && !is_separator(bytes[self.pos])
                && !is_command(bytes[self.pos])
            {
                self.pos += 1;
            }
        }

        Some(&self.input[start..self.pos])
    }

    /// Read one numeric operand
    ///
    /// The token is consumed even when it is not a number, so scanning
    /// resumes right after the failed operand.
    fn operand(&mut self) -> Option<f64> {
        let token = self.next_token()?;
        let value = parse_number(token);
        if value.is_none() {
            trace!("path operand {token:?} is not a number");
        }
        value
    }

    /// Read the `x y` pair following `M` or `L`
    fn point(&mut self) -> Option<(f64, f64)> {
        let x = self.operand()?;
        let y = self.operand()?;
        Some((x, y))
    }
}

impl<'a> Iterator for PathTokenizer<'a> {
    type Item = PathCommand;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let token = self.next_token()?;
            match token {
                "M" => {
                    if let Some((x, y)) = self.point() {
                        return Some(PathCommand::MoveTo { x, y });
                    }
                }
                "L" => {
                    if let Some((x, y)) = self.point() {
                        return Some(PathCommand::LineTo { x, y });
                    }
                }
                "Z" | "z" => return Some(PathCommand::Close),
                _ => trace!("skipping path token {token:?}"),
            }
        }
    }
}

impl std::iter::FusedIterator for PathTokenizer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use PathCommand::*;

    fn commands(d: &str) -> Vec<PathCommand> {
        PathTokenizer::new(d).collect()
    }

    #[test]
    fn test_parse_number_integer() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-7"), Some(-7.0));
        assert_eq!(parse_number("+3"), Some(3.0));
    }

    #[test]
    fn test_parse_number_decimal() {
        assert_eq!(parse_number("10.5"), Some(10.5));
        assert_eq!(parse_number("-.25"), Some(-0.25));
        assert_eq!(parse_number("1.5E-3"), Some(0.0015));
    }

    #[test]
    fn test_parse_number_keeps_fraction() {
        assert_eq!(parse_number("1.5"), Some(1.5));
        assert_eq!(parse_number("-1.5"), Some(-1.5));
        assert_eq!(parse_number("123.456"), Some(123.456));
        assert_eq!(parse_number("0.125"), Some(0.125));
        assert_eq!(parse_number("3e1"), Some(30.0));
    }

    #[test]
    fn test_decimal_operands() {
        assert_eq!(
            commands("M 1.5 2.75 L 10.5 0"),
            vec![MoveTo { x: 1.5, y: 2.75 }, LineTo { x: 10.5, y: 0.0 }]
        );
        assert_eq!(
            commands("M-1.5,-2L3e1,0z"),
            vec![MoveTo { x: -1.5, y: -2.0 }, LineTo { x: 30.0, y: 0.0 }, Close]
        );
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        assert_eq!(parse_number("foo"), None);
        assert_eq!(parse_number("10px"), None);
        assert_eq!(parse_number("1,5"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("1e999"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_standard_path() {
        assert_eq!(
            commands("M 0 0 L 10 0 L 10 10 Z"),
            vec![
                MoveTo { x: 0.0, y: 0.0 },
                LineTo { x: 10.0, y: 0.0 },
                LineTo { x: 10.0, y: 10.0 },
                Close,
            ]
        );
    }

    #[test]
    fn test_attached_commands_match_separated() {
        assert_eq!(
            commands("M0,0L10,0L10,10L0,10Z"),
            commands("M 0 0 L 10 0 L 10 10 L 0 10 Z")
        );
    }

    #[test]
    fn test_separator_runs_collapse() {
        assert_eq!(
            commands("  M ,, 1\t2\n L 3 ,4  "),
            vec![MoveTo { x: 1.0, y: 2.0 }, LineTo { x: 3.0, y: 4.0 }]
        );
    }

    #[test]
    fn test_lowercase_close() {
        assert_eq!(commands("z Z"), vec![Close, Close]);
    }

    #[test]
    fn test_malformed_operand_discards_command() {
        // `foo` is consumed with the failed `L`, so `L 10 10` parses normally
        assert_eq!(
            commands("M 0 0 L 10 foo L 10 10 Z"),
            vec![
                MoveTo { x: 0.0, y: 0.0 },
                LineTo { x: 10.0, y: 10.0 },
                Close,
            ]
        );
    }

    #[test]
    fn test_command_letter_as_operand_is_consumed() {
        // The second `L` is read as the failed operand and dropped with it
        assert_eq!(
            commands("M 0 0 L 5 L 1 2 L 3 4"),
            vec![MoveTo { x: 0.0, y: 0.0 }, LineTo { x: 3.0, y: 4.0 }]
        );
    }

    #[test]
    fn test_unknown_commands_skipped() {
        assert_eq!(
            commands("M 0 0 C 5 5 L 10 10 H 3 Q 1 1 2 2 L 0 10 Z"),
            vec![
                MoveTo { x: 0.0, y: 0.0 },
                LineTo { x: 10.0, y: 10.0 },
                LineTo { x: 0.0, y: 10.0 },
                Close,
            ]
        );
    }

    #[test]
    fn test_relative_commands_are_not_recognized() {
        assert_eq!(commands("m 1 1 l 2 2"), vec![]);
    }

    #[test]
    fn test_truncated_command() {
        assert_eq!(commands("M 1 1 L 2"), vec![MoveTo { x: 1.0, y: 1.0 }]);
    }

    #[test]
    fn test_non_ascii_garbage() {
        assert_eq!(
            commands("M 1 1 ÄÖ L 2 2"),
            vec![MoveTo { x: 1.0, y: 1.0 }, LineTo { x: 2.0, y: 2.0 }]
        );
    }
}
