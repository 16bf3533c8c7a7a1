use std::{ error::Error,
           fmt::{ self,
                  Debug,
                  Display,
                  Formatter } };
use crate::lang::source_buffer::SourceLocation;

use super::interpreter::Interpreter;



pub type Result<T> = std::result::Result<T, ScriptError>;



/// The kinds of failure a line can be rejected with.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind
{
    /// A pop on an empty parameter or return stack.
    StackUnderflow,

    /// A code memory cell that does not resolve to a known word, or a read outside of code memory.
    MemoryFault,

    /// A token that is neither a known word nor a parseable number.
    UndefinedWord,

    /// A `:` while already compiling.
    NestedColon,

    /// A `;` while in immediate mode.
    UnexpectedSemicolon
}


impl Display for ErrorKind
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        let name = match self
            {
                ErrorKind::StackUnderflow      => "stack underflow",
                ErrorKind::MemoryFault         => "memory fault",
                ErrorKind::UndefinedWord       => "undefined word",
                ErrorKind::NestedColon         => "nested colon",
                ErrorKind::UnexpectedSemicolon => "unexpected semicolon"
            };

        write!(f, "{}", name)
    }
}



/// Any error that occurs while processing a line.
#[derive(Clone, PartialEq, Eq)]
pub struct ScriptError
{
    /// The location of the token being processed when the error occurred, if available.
    location: Option<SourceLocation>,

    /// What went wrong.
    kind: ErrorKind,

    /// The description of the error.
    error: String
}


impl Error for ScriptError
{
}


impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match &self.location
        {
            Some(location) => write!(f, "{}: {}", location, self.error),
            None => write!(f, "{}", self.error)
        }
    }
}


impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{:?}: {}", self.kind, self)
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(location: Option<SourceLocation>, kind: ErrorKind, error: String) -> ScriptError
    {
        ScriptError
            {
                location,
                kind,
                error
            }
    }

    /// Create a new ScriptError and wrap it in a Result::Err.
    pub fn new_as_result<T>(location: Option<SourceLocation>,
                            kind: ErrorKind,
                            error: String) -> Result<T>
    {
        Err(ScriptError::new(location, kind, error))
    }

    /// Attach a location to an error raised somewhere that didn't know about one.  An existing
    /// location is kept.
    pub fn with_location(mut self, location: Option<SourceLocation>) -> ScriptError
    {
        if self.location.is_none()
        {
            self.location = location;
        }

        self
    }

    /// If available, the location of the token that caused the error.
    pub fn location(&self) -> &Option<SourceLocation>
    {
        &self.location
    }

    pub fn kind(&self) -> ErrorKind
    {
        self.kind
    }

    /// The description of the error.
    pub fn error(&self) -> &String
    {
        &self.error
    }
}



/// A convenience function for creating a ScriptError and wrapping it in a Result::Err using the
/// interpreter's current token location.
pub fn script_error<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: String) -> Result<T>
{
    let location = interpreter.current_location().clone();

    ScriptError::new_as_result(location, kind, message)
}



pub fn script_error_str<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: &str) -> Result<T>
{
    script_error(interpreter, kind, message.to_string())
}
