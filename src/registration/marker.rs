//! Marker line grammar
//!
//! A marker line starts with the profile sentinel and names a registration as
//! the first argument of a macro-style invocation:
//!
//! ```text
//! marker := SENTINEL suffix WS* "(" WS* name WS* "," rest
//! suffix := [A-Za-z0-9_]*
//! name   := one or more chars other than whitespace, "(", ")" and ","
//! ```
//!
//! Only the sentinel, the opening parenthesis, the name and the comma that
//! follows it are examined. The remaining arguments may continue onto later
//! lines. When nothing but whitespace follows the `(`, the name and its comma
//! are read from the next non-blank line instead:
//!
//! ```c
//! COMAC_TEST (
//!     subsurface_repeat,
//!     "Tests source clipping with repeat",
//!     ...)
//! ```

use thiserror::Error;

/// Reasons a marker line fails the name-extraction grammar.
///
/// Columns are 1-based character offsets into the line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkerError {
    #[error("line does not start with '{sentinel}'")]
    MissingSentinel { sentinel: String },

    #[error("expected '(' after marker at column {column}")]
    MissingOpenParen { column: usize },

    #[error("empty registration name at column {column}")]
    EmptyName { column: usize },

    #[error("expected ',' after registration name '{name}' at column {column}, found {found}")]
    MissingComma {
        name: String,
        column: usize,
        found: String,
    },

    #[error("expected 'name,' on the line after '(' at column {column}, found {found}")]
    MissingContinuation { column: usize, found: String },
}

impl MarkerError {
    pub fn column(&self) -> usize {
        match self {
            MarkerError::MissingSentinel { .. } => 1,
            MarkerError::MissingOpenParen { column }
            | MarkerError::EmptyName { column }
            | MarkerError::MissingComma { column, .. }
            | MarkerError::MissingContinuation { column, .. } => *column,
        }
    }
}

/// Returns true if the line is a candidate marker line.
///
/// This is the coarse test: an exact, case-sensitive prefix match with no
/// tolerance for leading whitespace.
pub fn is_marker_line(line: &str, sentinel: &str) -> bool {
    line.starts_with(sentinel)
}

/// What a marker line holds once its sentinel and `(` have been read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerHead<'a> {
    /// The name and its comma are on the marker line
    Named(&'a str),
    /// Nothing follows the `(`; the name is on the next non-blank line.
    /// `column` is where the name was expected on the marker line.
    Open { column: usize },
}

/// Extracts the registration name from a line that passed [`is_marker_line`].
///
/// Single-line form only: a line that ends right after `(` is an
/// [`MarkerError::EmptyName`]. The returned slice borrows from `line`.
pub fn parse_marker<'a>(line: &'a str, sentinel: &str) -> Result<&'a str, MarkerError> {
    match parse_marker_head(line, sentinel)? {
        MarkerHead::Named(name) => Ok(name),
        MarkerHead::Open { column } => Err(MarkerError::EmptyName { column }),
    }
}

/// Reads a marker line up to its name, allowing the name to follow on a
/// later line.
pub fn parse_marker_head<'a>(
    line: &'a str,
    sentinel: &str,
) -> Result<MarkerHead<'a>, MarkerError> {
    if !is_marker_line(line, sentinel) {
        return Err(MarkerError::MissingSentinel {
            sentinel: sentinel.to_string(),
        });
    }
    let mut cursor = Cursor::new(line, sentinel.len());

    cursor.skip_while(|c| c.is_ascii_alphanumeric() || c == '_');
    cursor.skip_whitespace();
    if !cursor.eat('(') {
        return Err(MarkerError::MissingOpenParen {
            column: cursor.column(),
        });
    }

    cursor.skip_whitespace();
    if cursor.peek().is_none() {
        return Ok(MarkerHead::Open {
            column: cursor.column(),
        });
    }

    name_and_comma(&mut cursor).map(MarkerHead::Named)
}

/// Reads `WS* name WS* ","` from the line following an open marker.
///
/// Columns in the error refer to `line`.
pub fn parse_continued_name(line: &str) -> Result<&str, MarkerError> {
    let mut cursor = Cursor::new(line, 0);
    cursor.skip_whitespace();
    name_and_comma(&mut cursor)
}

fn name_and_comma<'a>(cursor: &mut Cursor<'a>) -> Result<&'a str, MarkerError> {
    let name_column = cursor.column();
    let name = cursor.take_while(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | ','));
    if name.is_empty() {
        return Err(MarkerError::EmptyName {
            column: name_column,
        });
    }

    cursor.skip_whitespace();
    if !cursor.eat(',') {
        return Err(MarkerError::MissingComma {
            name: name.to_string(),
            column: cursor.column(),
            found: cursor.describe_next(),
        });
    }

    Ok(name)
}

/// Byte cursor over a single line that tracks character columns.
struct Cursor<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str, start: usize) -> Self {
        Self { line, pos: start }
    }

    fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn column(&self) -> usize {
        self.line[..self.pos].chars().count() + 1
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.line[start..self.pos]
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        self.take_while(pred);
    }

    fn skip_whitespace(&mut self) {
        self.skip_while(char::is_whitespace);
    }

    fn describe_next(&self) -> String {
        match self.peek() {
            Some(c) => format!("'{}'", c),
            None => "end of line".to_string(),
        }
    }
}
