use crate::{
    lang::code::Flow,
    runtime::{error, interpreter::Interpreter},
};

// These words only describe what should happen to the cursor.  The interpreter that dispatched
// them moves it, through code memory when running compiled code or through the tokens of the line
// at the top level.

/// Return from the current definition.
///
/// Signature: ` -- `
pub fn word_exit(_interpreter: &mut dyn Interpreter) -> error::Result<Flow> {
    Ok(Flow::Exit)
}

/// Push the following cell as a literal.
///
/// Signature: ` -- value`
pub fn word_lit(_interpreter: &mut dyn Interpreter) -> error::Result<Flow> {
    Ok(Flow::Literal)
}

/// Unconditionally skip the following cell.
///
/// Signature: ` -- `
pub fn word_branch(_interpreter: &mut dyn Interpreter) -> error::Result<Flow> {
    Ok(Flow::Skip)
}

/// Skip the following cell if the popped value is zero, otherwise fall through to it.
///
/// Signature: `flag -- `
pub fn word_zero_branch(interpreter: &mut dyn Interpreter) -> error::Result<Flow> {
    let flag = interpreter.pop()?;

    if flag == 0 {
        Ok(Flow::Skip)
    } else {
        Ok(Flow::Next)
    }
}
