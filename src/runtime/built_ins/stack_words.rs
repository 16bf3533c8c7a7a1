use crate::{
    lang::code::Flow,
    runtime::{error, interpreter::Interpreter},
};

/// Duplicate the top value on the parameter stack.
///
/// Signature: `value -- value value`
pub fn word_dup(interpreter: &mut dyn Interpreter) -> error::Result<Flow> {
    let value = interpreter.pop()?;

    interpreter.push(value);
    interpreter.push(value);

    Ok(Flow::Next)
}

/// Add the top two values.  With fewer than two values the stack is left as it was.
///
/// Signature: `a b -- a+b`
pub fn word_add(interpreter: &mut dyn Interpreter) -> error::Result<Flow> {
    interpreter.require_depth(2)?;

    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(a.wrapping_add(b));

    Ok(Flow::Next)
}

/// Show the parameter stack without changing it, as its depth followed by the values from the
/// bottom up.
///
/// Signature: ` -- `
pub fn word_print_stack(interpreter: &mut dyn Interpreter) -> error::Result<Flow> {
    let stack = interpreter.stack();

    let text = if stack.is_empty() {
        format!("<{}>", stack.len())
    } else {
        format!("<{}> {}", stack.len(), stack)
    };

    interpreter.emit(&text);
    Ok(Flow::Next)
}

/// Pop the top value and show it.
///
/// Signature: `value -- `
pub fn word_print_top(interpreter: &mut dyn Interpreter) -> error::Result<Flow> {
    let value = interpreter.pop()?;

    interpreter.emit(&value.to_string());
    Ok(Flow::Next)
}
