//! Primitives for parsing SVG attribute and style values.
//!
//! Each value type implements [`Parse`], which reads from a shared [`Parser`] cursor.
//! The collaborators used while flattening transforms live here:
//!
//! - [`length`] converts CSS lengths into user units
//! - [`list`] reads whitespace or comma separated number lists
//! - [`style`] reads and writes the declarations of a `style` attribute
//! - [`transform`] reads `transform` lists into a [`transform::Matrix`]

use error::Error;

pub mod error;
pub mod length;
pub mod list;
pub mod number;
pub mod style;
pub mod transform;

/// A parser containing state for the active parsing of an SVG value
pub struct Parser<'input> {
    input: &'input str,
    cursor: usize,
}

impl<'input> Parser<'input> {
    /// Create a new parser with the input
    pub fn new(input: &'input str) -> Self {
        Self { input, cursor: 0 }
    }

    /// Returns the current position in the input being read
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Try reading the next value
    ///
    /// # Errors
    ///
    /// If the input has ended
    pub fn read(&mut self) -> Result<char, Error<'input>> {
        let current = self.current()?;
        self.cursor += current.len_utf8();
        Ok(current)
    }

    /// Go to the next value without reading
    pub fn advance(&mut self) {
        if let Ok(current) = self.current() {
            self.cursor += current.len_utf8();
        }
    }

    /// Move backwards to a previous cursor position
    pub fn rewind_to(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.input.len());
    }

    /// Skip remaining input
    pub fn done(&mut self) {
        self.cursor = self.input.len();
    }

    /// Try parsing a portion of the input, reverting to the original state if failed
    ///
    /// # Errors
    ///
    /// If the attempted parsing fails
    pub fn try_parse<T, E, F: FnOnce(&mut Self) -> Result<T, E>>(&mut self, f: F) -> Result<T, E> {
        let cursor = self.cursor;
        let result = f(self);
        if result.is_err() {
            self.cursor = cursor;
        }
        result
    }

    /// Get remaining slice of input
    pub fn slice(&self) -> &'input str {
        &self.input[self.cursor..]
    }

    /// Get slice from start position to current position
    pub fn slice_from(&self, start: usize) -> &'input str {
        let end = self.cursor.min(self.input.len());
        &self.input[start..end]
    }

    /// Get the length of the remaining input
    pub fn len(&self) -> usize {
        self.input.len() - self.cursor
    }

    /// Returns whether the remaining input is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets the current character of the input
    ///
    /// # Errors
    ///
    /// If reached the end of input
    pub fn current(&self) -> Result<char, Error<'input>> {
        self.slice().chars().next().ok_or(Error::EndOfInput)
    }

    /// Move the cursor forward while the characters match the given predicate
    ///
    /// Returns the skipped content as a slice
    pub fn take_matches<F: FnMut(char) -> bool>(&mut self, f: F) -> &'input str {
        let cursor = self.cursor();
        self.skip_matches(f);
        self.slice_from(cursor)
    }

    /// Moves the cursor forward the number of matching characters
    pub fn skip_matches<F: FnMut(char) -> bool>(&mut self, pat: F) {
        let remaining = self.slice().trim_start_matches(pat).len();
        self.cursor += self.len() - remaining;
    }

    /// Moves the cursor forward past a single occurrence of the character
    pub fn skip_char(&mut self, char: char) {
        if self.current() == Ok(char) {
            self.cursor += char.len_utf8();
        }
    }

    /// Moves the cursor forward the number of whitespace characters
    pub fn skip_whitespace(&mut self) {
        self.skip_matches(char::is_whitespace);
    }

    /// Skips whitespace with at most one comma within it
    pub fn skip_comma_and_whitespace(&mut self) {
        self.skip_whitespace();
        self.skip_char(',');
        self.skip_whitespace();
    }

    /// Asserts the end of the input was reached
    ///
    /// # Errors
    ///
    /// When the cursor is prior to the end of the string
    pub fn expect_done(&self) -> Result<(), Error<'input>> {
        if self.cursor < self.input.len() {
            Err(Error::ExpectedDone)
        } else {
            Ok(())
        }
    }

    /// Read and assert the next character matches the expected character
    ///
    /// # Errors
    ///
    /// If the end of the input is reached, or the character does not match
    pub fn expect_char(&mut self, expected: char) -> Result<(), Error<'input>> {
        let received = self.read()?;
        if received == expected {
            Ok(())
        } else {
            Err(Error::ExpectedChar { expected, received })
        }
    }

    /// Read and assert a set of characters matches some ident
    ///
    /// # Errors
    ///
    /// When an invalid ident is received
    pub fn expect_ident(&mut self) -> Result<&'input str, Error<'input>> {
        let cursor = self.cursor;
        let name_start_char = self.read()?;
        if !is_name_start_char(name_start_char) {
            return Err(Error::ExpectedIdent {
                expected: "valid ident starting character",
                received: self.slice_from(cursor),
            });
        }
        self.skip_matches(is_name_char);
        Ok(self.slice_from(cursor))
    }
}

fn is_name_start_char(char: char) -> bool {
    char.is_ascii_alphabetic() || matches!(char, '_' | '-')
}

fn is_name_char(char: char) -> bool {
    is_name_start_char(char) || char.is_ascii_digit()
}

/// A trait for things that can be parsed from CSS or attribute values.
pub trait Parse<'input>: Sized {
    /// Parse this value using an existing parser.
    ///
    /// # Errors
    /// If parsing fails
    fn parse(input: &mut Parser<'input>) -> Result<Self, Error<'input>>;

    /// Parse a value from a string
    ///
    /// # Errors
    /// If parsing fails
    fn parse_string(input: &'input str) -> Result<Self, Error<'input>> {
        let parser = &mut Parser::new(input);
        parser.skip_whitespace();
        let result = Self::parse(parser)?;
        parser.skip_whitespace();
        parser.expect_done()?;
        Ok(result)
    }
}

#[test]
fn parser_cursor() {
    let mut parser = Parser::new("  rotate , 45");
    parser.skip_whitespace();
    assert_eq!(parser.expect_ident(), Ok("rotate"));
    parser.skip_comma_and_whitespace();
    assert_eq!(parser.slice(), "45");
    assert_eq!(parser.take_matches(|c| c.is_ascii_digit()), "45");
    assert!(parser.is_empty());
    assert_eq!(parser.read(), Err(Error::EndOfInput));
}
