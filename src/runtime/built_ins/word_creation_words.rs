use crate::{
    lang::code::{Cell, Flow},
    runtime::{
        built_ins::EXIT_INDEX,
        data_structures::dictionary::{WordBehavior, WordInfo, WordRuntime, WordVisibility},
        error::{self, ErrorKind, script_error_str},
        interpreter::{CompilerState, Interpreter, Mode},
    },
};
use tracing::debug;

/// Start the creation of a new word.  The word starts out hidden and unnamed, entering the code
/// that will be compiled from the current cursor on.  The next token of the input names it.
fn start_word(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    if interpreter.mode() == Mode::Compile {
        return script_error_str(
            interpreter,
            ErrorKind::NestedColon,
            "Can not start a new word while already compiling one.",
        );
    }

    let entry = interpreter.wp();
    let index = interpreter.add_word(WordInfo::new(
        String::new(),
        WordRuntime::Normal,
        WordVisibility::Hidden,
        WordBehavior::Compiled(entry),
    ));

    debug!(index, entry, "started new word");

    interpreter.set_compiler_state(CompilerState::AwaitingName);
    interpreter.set_mode(Mode::Compile);

    Ok(())
}

/// Start a new word definition.
///
/// Signature: ` -- `
pub fn word_start_word(interpreter: &mut dyn Interpreter) -> error::Result<Flow> {
    start_word(interpreter)?;
    Ok(Flow::Next)
}

/// End the definition of the newly created word and make it visible.  Ending a definition that
/// was never started is reported, but the exit cell, the reveal, and the mode switch still happen.
///
/// Signature: ` -- `
pub fn word_end_word(interpreter: &mut dyn Interpreter) -> error::Result<Flow> {
    let was_compiling = interpreter.mode() == Mode::Compile;

    interpreter.compile_cell(EXIT_INDEX as Cell);
    let _ = interpreter.dictionary_mut().reveal_last();

    interpreter.set_mode(Mode::Immediate);
    interpreter.set_compiler_state(CompilerState::Idle);

    if let Some(word) = interpreter.dictionary().last() {
        debug!(name = %word.name, behavior = %word.behavior, "finished word");
    }

    if !was_compiling {
        return script_error_str(
            interpreter,
            ErrorKind::UnexpectedSemicolon,
            "Ending a word definition while not compiling.",
        );
    }

    Ok(Flow::Next)
}

/// Switch to immediate mode.
///
/// Signature: ` -- `
pub fn word_left_bracket(interpreter: &mut dyn Interpreter) -> error::Result<Flow> {
    interpreter.set_mode(Mode::Immediate);
    Ok(Flow::Next)
}

/// Switch to compile mode.
///
/// Signature: ` -- `
pub fn word_right_bracket(interpreter: &mut dyn Interpreter) -> error::Result<Flow> {
    interpreter.set_mode(Mode::Compile);
    Ok(Flow::Next)
}

/// Hide the most recently defined word from lookups.
///
/// Signature: ` -- `
pub fn word_hide(interpreter: &mut dyn Interpreter) -> error::Result<Flow> {
    let _ = interpreter.dictionary_mut().hide_last();
    Ok(Flow::Next)
}

/// Make the most recently defined word visible to lookups.
///
/// Signature: ` -- `
pub fn word_reveal(interpreter: &mut dyn Interpreter) -> error::Result<Flow> {
    let _ = interpreter.dictionary_mut().reveal_last();
    Ok(Flow::Next)
}
