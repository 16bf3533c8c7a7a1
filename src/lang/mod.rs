/// Module for tracking where in the input line a token was found.
pub mod source_buffer;

/// Module for turning an input line into a list of tokens for the outer interpreter.
pub mod tokenizing;

/// Module defining the cells of code memory and the primitive operations of the virtual machine.
pub mod code;
