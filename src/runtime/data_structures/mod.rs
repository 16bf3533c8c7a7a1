/// A growable array of cells with stack style access as well as random writes.  Used for the
/// parameter stack, the return stack, and code memory.
pub mod cell_stack;

/// The dictionary module provides the append-only word dictionary used by the interpreter.
pub mod dictionary;
