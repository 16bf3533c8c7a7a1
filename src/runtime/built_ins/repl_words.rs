use crate::{
    lang::code::Flow,
    runtime::{error, interpreter::Interpreter},
};

/// Show the names of all visible words, newest first.
///
/// Signature: ` -- `
pub fn word_words(interpreter: &mut dyn Interpreter) -> error::Result<Flow> {
    let names = interpreter.dictionary().visible_names().join(" ");

    interpreter.emit(&names);
    Ok(Flow::Next)
}

/// Pop a value and hand it to the REPL as the new background colour.
///
/// Signature: `colour -- `
pub fn word_background(interpreter: &mut dyn Interpreter) -> error::Result<Flow> {
    let value = interpreter.pop()?;

    interpreter.set_background(value);
    Ok(Flow::Next)
}
