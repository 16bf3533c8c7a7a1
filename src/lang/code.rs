use crate::runtime::data_structures::dictionary::Dictionary;
use std::fmt::{self, Display, Formatter};

/// One slot of code memory or of the parameter stack.  A code memory cell holds either a
/// dictionary index or a literal value.  Which one is decided purely by the primitive that consumes
/// it.
pub type Cell = i64;

/// The native operations of the virtual machine.  Every word in the dictionary is either one of
/// these or a compiled definition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Primitive {
    /// Return from the current compiled definition.
    Exit,

    /// Push the cell following this one as a literal.
    Lit,

    /// Unconditionally skip the following cell.
    Branch,

    /// Pop a value and skip the following cell if it was zero.
    ZeroBranch,

    /// Switch the outer interpreter to immediate mode.
    LeftBracket,

    /// Switch the outer interpreter to compile mode.
    RightBracket,

    /// Hide the most recently added word.
    Hide,

    /// Reveal the most recently added word.
    Reveal,

    /// Start a new colon definition.
    Colon,

    /// Finish the current colon definition.
    Semicolon,

    /// Emit the parameter stack.
    DotS,

    /// Pop and emit the top of the parameter stack.
    Dot,

    /// Add the top two values.
    Add,

    /// Duplicate the top value.
    Dup,

    /// Emit the visible word names.
    Words,

    /// Pop a value as the new background colour.
    Background,
}

impl Display for Primitive {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            Primitive::Exit => "EXIT",
            Primitive::Lit => "LIT",
            Primitive::Branch => "BRANCH",
            Primitive::ZeroBranch => "0BRANCH",
            Primitive::LeftBracket => "LBRAC",
            Primitive::RightBracket => "RBRAC",
            Primitive::Hide => "HIDE",
            Primitive::Reveal => "REVEAL",
            Primitive::Colon => "COLON",
            Primitive::Semicolon => "SEMICOLON",
            Primitive::DotS => "DOTS",
            Primitive::Dot => "DOT",
            Primitive::Add => "ADD",
            Primitive::Dup => "DUP",
            Primitive::Words => "WORDS",
            Primitive::Background => "BG",
        };

        write!(f, "{}", name)
    }
}

/// What a primitive asks of whoever dispatched it once its own effect is done.  Inside compiled
/// code the cursor is code memory, at the top level it is the token stream of the line.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Flow {
    /// Carry on with the next cell.
    Next,

    /// Skip exactly one cell, then carry on.
    Skip,

    /// Consume the next cell as a literal and push it.
    Literal,

    /// Return from the current definition.
    Exit,
}

/// Pretty print a region of code memory for debugging purposes.  Cells that follow a `lit` are
/// shown as literals, everything else is resolved against the dictionary where possible.
pub fn pretty_print_code(code: &[Cell], dictionary: &Dictionary) -> String {
    use std::fmt::Write;

    let mut result = String::with_capacity(code.len() * 20);
    let mut literal_next = false;

    for (index, cell) in code.iter().enumerate() {
        let description = if literal_next {
            literal_next = false;
            "literal".to_string()
        } else {
            match dictionary.resolve(*cell) {
                Some(word) => {
                    literal_next = word.is_primitive(Primitive::Lit);
                    if word.name.is_empty() {
                        "<unnamed>".to_string()
                    } else {
                        word.name.clone()
                    }
                }
                None => "???".to_string(),
            }
        };

        writeln!(&mut result, "{:4}: {:6}  {}", index, cell, description)
            .expect("Writing to String should never fail.");
    }

    result
}
