use core::str::Chars;
use std::fmt::{ self,
                Display,
                Formatter };



/// The location in the input where a token was found.  Used by the error reporting so a user can
/// see which token of a line caused the line to be rejected.
///
/// This is a read-only structure.  Use the field accessor methods to get the values.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SourceLocation
{
    /// A description of where the text came from.  Lines entered in the REPL have a tag of
    /// "\<repl\>".
    path: String,

    /// The 1 based number of the line within the session.
    line: usize,

    /// The 1 based column number of the token.
    column: usize
}


/// Used for error reporting to show where in the input an error originated.
impl Display for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result
    {
        write!(formatter, "{} ({}, {})", self.path, self.line, self.column)
    }
}


impl SourceLocation
{
    /// Create a new SourceLocation with all of the needed information.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self
    {
        SourceLocation { path: path.to_owned(), line, column }
    }

    /// The tag describing the input.
    pub fn path(&self) -> &String
    {
        &self.path
    }

    /// The 1 based number of the line within the session.
    pub fn line(&self) -> usize
    {
        self.line
    }

    /// The 1 based column number.
    pub fn column(&self) -> usize
    {
        self.column
    }
}



/// A forward only cursor over a line of input.  As characters are consumed the location of the
/// cursor is maintained so that the tokenizer can stamp each token with where it started.
///
/// The buffer only borrows the text, it is never copied.
pub struct SourceBuffer<'a>
{
    chars: Chars<'a>,

    location: SourceLocation,

    /// A character that has been peeked at but not yet consumed.
    current: Option<char>
}


impl<'a> SourceBuffer<'a>
{
    /// Create a new buffer over the given line of text, tagging locations with the given path and
    /// line number.
    pub fn new(path: &str, line: usize, source: &'a str) -> Self
    {
        SourceBuffer
            {
                chars: source.chars(),
                location: SourceLocation::new_from_info(path, line, 1),
                current: None
            }
    }

    /// The location the cursor is currently at.
    pub fn location(&self) -> &SourceLocation
    {
        &self.location
    }

    /// Take a peek at the next character without consuming it.
    pub fn peek_next(&mut self) -> Option<char>
    {
        if self.current.is_none()
        {
            self.current = self.chars.next();
        }

        self.current
    }

    /// Get and consume the next character.
    pub fn next_char(&mut self) -> Option<char>
    {
        let next = match self.current.take()
            {
                Some(peeked) => Some(peeked),
                None => self.chars.next()
            };

        if next.is_some()
        {
            self.location.column += 1;
        }

        next
    }
}



#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn tracks_columns_on_its_line()
    {
        let mut buffer = SourceBuffer::new("<test>", 4, "ab c");

        assert_eq!(buffer.peek_next(), Some('a'));
        assert_eq!(buffer.location().column(), 1);

        let _ = buffer.next_char();
        let _ = buffer.next_char();
        assert_eq!(buffer.location().column(), 3);

        let _ = buffer.next_char();
        assert_eq!(buffer.location().line(), 4);
        assert_eq!(buffer.location().column(), 4);

        assert_eq!(buffer.next_char(), Some('c'));
        assert_eq!(buffer.next_char(), None);
    }

    #[test]
    fn displays_path_and_position()
    {
        let location = SourceLocation::new_from_info("<repl>", 1, 5);
        assert_eq!(location.to_string(), "<repl> (1, 5)");
    }
}
