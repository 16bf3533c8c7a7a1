use crate::lang::{
    code::Cell,
    source_buffer::{SourceBuffer, SourceLocation},
};
use std::fmt::{self, Display, Formatter};

/// A token is a run of text between separators.  Whether it names a word or is a numeric literal
/// is only decided later by the outer interpreter, the dictionary gets the first say.
///
/// The token also holds the location in the input line where it was found.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    location: SourceLocation,
    text: String,
}

/// A list of tokens found in an input line.
pub type TokenList = Vec<Token>;

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl Token {
    pub fn new(location: SourceLocation, text: String) -> Token {
        Token { location, text }
    }

    /// Get the token's location in the original input.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The raw text of the token.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Try to read the token as a numeric literal.
    pub fn number(&self) -> Option<Cell> {
        to_numeric(&self.text)
    }
}

/// Tokens are separated by runs of whitespace and/or commas.
fn is_separator(next: &char) -> bool {
    next.is_whitespace() || *next == ','
}

/// Skip over separators.  Stopping only at either the end of the buffer or the next token
/// character.
fn skip_separators(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.peek_next() {
        if !is_separator(&next) {
            break;
        }

        let _ = buffer.next_char();
    }
}

/// Pull text out of the buffer until we hit a separator.
fn process_until_separator(buffer: &mut SourceBuffer) -> (SourceLocation, String) {
    let location = buffer.location().clone();
    let mut text = String::new();

    while let Some(next) = buffer.peek_next() {
        if is_separator(&next) {
            break;
        }

        let _ = buffer.next_char();
        text.push(next);
    }

    (location, text)
}

/// Attempt to convert the text into a numeric literal.  Plain decimal integers with an optional
/// sign are the expected notation.  Hexadecimal and binary literals are also accepted, and `_` may
/// be used as a separator inside them for readability.
pub fn to_numeric(text: &str) -> Option<Cell> {
    if text.is_empty() {
        return None;
    }

    let (negative, digits) = match text.strip_prefix('-') {
        Some(stripped) => (true, stripped),
        None => (false, text),
    };

    let (radix, stripped) = if let Some(stripped) = digits.strip_prefix("0x") {
        (16, stripped)
    } else if let Some(stripped) = digits.strip_prefix("0b") {
        (2, stripped)
    } else {
        return text.parse::<Cell>().ok();
    };

    // The only sign allowed is the one in front of the prefix.
    if stripped.starts_with(['-', '+']) {
        return None;
    }

    let magnitude = Cell::from_str_radix(&stripped.replace('_', ""), radix).ok()?;

    if negative {
        magnitude.checked_neg()
    } else {
        Some(magnitude)
    }
}

/// Split a single input line into its tokens.  Empty tokens never appear in the result, so a
/// leading, trailing, or doubled separator is harmless.
pub fn tokenize_line(path: &str, line_number: usize, line: &str) -> TokenList {
    let mut buffer = SourceBuffer::new(path, line_number, line);
    let mut token_list = TokenList::new();

    while let Some(next) = buffer.peek_next() {
        if is_separator(&next) {
            skip_separators(&mut buffer);
            continue;
        }

        let (location, text) = process_until_separator(&mut buffer);
        token_list.push(Token::new(location, text));
    }

    token_list
}
